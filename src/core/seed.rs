//! RB-003: Built-in sample recipes written on first use.

use super::types::{Category, Comment, NutritionalInfo, Recipe};
use chrono::{DateTime, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The sample collection, in display order.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".to_string(),
            title: "Spaghetti Bolognese".to_string(),
            description: "Classic Italian pasta dish with rich meat sauce".to_string(),
            ingredients: lines(&[
                "500g spaghetti",
                "300g ground beef",
                "400ml tomato sauce",
                "1 onion",
                "2 cloves garlic",
                "olive oil",
                "salt",
                "pepper",
            ]),
            instructions: "Cook pasta according to package instructions. In a large pan, heat olive \
                oil and sauté onion and garlic. Add ground beef and cook until browned. Add tomato \
                sauce and simmer for 20 minutes. Season with salt and pepper. Serve over pasta."
                .to_string(),
            cooking_time: 45,
            servings: 4,
            category: Category::Dinner,
            rating: 4.5,
            nutritional_info: NutritionalInfo {
                calories: 600.0,
                protein: 25.0,
                fat: 15.0,
                carbs: 80.0,
            },
            comments: vec![Comment {
                id: "1".to_string(),
                username: "FoodLover".to_string(),
                text: "Absolutely delicious! My family loved it.".to_string(),
                timestamp: at(2025, 1, 15, 10, 0),
            }],
            created_by: "chef1".to_string(),
            created_at: at(2025, 1, 10, 8, 0),
            image: Some("/placeholder.svg?height=200&width=300".to_string()),
        },
        Recipe {
            id: "2".to_string(),
            title: "Green Smoothie Bowl".to_string(),
            description: "Healthy and refreshing breakfast bowl packed with nutrients".to_string(),
            ingredients: lines(&[
                "1 banana",
                "1 cup spinach",
                "1/2 avocado",
                "1 cup almond milk",
                "1 tbsp chia seeds",
                "granola",
                "berries",
            ]),
            instructions: "Blend banana, spinach, avocado, and almond milk until smooth. Pour into \
                a bowl and top with chia seeds, granola, and berries."
                .to_string(),
            cooking_time: 10,
            servings: 1,
            category: Category::Breakfast,
            rating: 4.8,
            nutritional_info: NutritionalInfo {
                calories: 350.0,
                protein: 12.0,
                fat: 18.0,
                carbs: 45.0,
            },
            comments: vec![],
            created_by: "healthyguru".to_string(),
            created_at: at(2025, 1, 12, 7, 0),
            image: Some("/placeholder.svg?height=200&width=300".to_string()),
        },
        Recipe {
            id: "3".to_string(),
            title: "Chocolate Chip Cookies".to_string(),
            description: "Soft and chewy homemade chocolate chip cookies".to_string(),
            ingredients: lines(&[
                "2 cups flour",
                "1 cup butter",
                "3/4 cup brown sugar",
                "1/2 cup white sugar",
                "2 eggs",
                "1 tsp vanilla",
                "1 tsp baking soda",
                "1 cup chocolate chips",
            ]),
            instructions: "Preheat oven to 375°F. Cream butter and sugars. Add eggs and vanilla. \
                Mix in dry ingredients, then fold in chocolate chips. Drop spoonfuls on baking \
                sheet and bake for 9-11 minutes."
                .to_string(),
            cooking_time: 25,
            servings: 24,
            category: Category::Dessert,
            rating: 4.7,
            nutritional_info: NutritionalInfo {
                calories: 180.0,
                protein: 3.0,
                fat: 8.0,
                carbs: 26.0,
            },
            comments: vec![Comment {
                id: "2".to_string(),
                username: "BakingMom".to_string(),
                text: "Perfect recipe! Kids absolutely love these.".to_string(),
                timestamp: at(2025, 1, 14, 15, 30),
            }],
            created_by: "baker123".to_string(),
            created_at: at(2025, 1, 11, 14, 0),
            image: Some("/placeholder.svg?height=200&width=300".to_string()),
        },
    ]
}
