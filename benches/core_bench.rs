//! Benchmarks for recipebox core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recipebox::core::planner::{reorder_plan, MealPlanner, Slot};
use recipebox::core::query::{filter_recipes, RecipeQuery, SortOrder};
use recipebox::core::seed::sample_recipes;
use recipebox::core::types::{MealPlan, Recipe, Weekday};
use recipebox::storage::MemoryStorage;

fn collection(size: usize) -> Vec<Recipe> {
    let base = sample_recipes();
    (0..size)
        .map(|i| {
            let mut r = base[i % base.len()].clone();
            r.id = i.to_string();
            r.title = format!("{} #{}", r.title, i);
            r.rating = (i % 50) as f64 / 10.0;
            r
        })
        .collect()
}

fn bench_filter_recipes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_recipes");
    let query = RecipeQuery {
        search: Some("garlic".to_string()),
        max_cooking_time: Some(60),
        sort: SortOrder::Rating,
        ..Default::default()
    };
    for size in [10, 100, 1000] {
        let recipes = collection(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &recipes, |b, recipes| {
            b.iter(|| {
                let out = filter_recipes(black_box(recipes), black_box(&query));
                black_box(out.len());
            });
        });
    }
    group.finish();
}

fn bench_reorder_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder_plan");
    for per_day in [4, 32, 256] {
        let plan: MealPlan = Weekday::ALL
            .into_iter()
            .map(|day| (day, (0..per_day).map(|i| i.to_string()).collect()))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(per_day), &plan, |b, plan| {
            b.iter(|| {
                let next = reorder_plan(
                    black_box(plan),
                    Slot::new(Weekday::Monday, 0),
                    Slot::new(Weekday::Friday, per_day / 2),
                )
                .unwrap();
                black_box(next);
            });
        });
    }
    group.finish();
}

fn bench_plan_summary(c: &mut Criterion) {
    let recipes = collection(100);
    let mut planner = MealPlanner::open(MemoryStorage::new());
    for (i, day) in Weekday::ALL.into_iter().enumerate() {
        for j in 0..5 {
            planner
                .add_recipe_to_day(day, &((i * 13 + j * 7) % 120).to_string())
                .unwrap();
        }
    }
    c.bench_function("plan_summary", |b| {
        b.iter(|| black_box(planner.summary(black_box(recipes.as_slice()))));
    });
}

criterion_group!(
    benches,
    bench_filter_recipes,
    bench_reorder_plan,
    bench_plan_summary
);
criterion_main!(benches);
