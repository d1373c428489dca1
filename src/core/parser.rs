//! RB-007: YAML parsing and validation for recipebox.yaml and recipe drafts.
//!
//! Config checks:
//! - Version must be "1.0"
//! - Name and profile id/username must be non-empty
//! - Comment limit must be positive
//!
//! Draft checks are the form rules of the producing UI; the store itself
//! accepts any well-typed draft.

use super::types::*;
use crate::error::{Error, Result};
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors.into_iter().map(|e| e.message).collect())
    }
}

fn err(message: impl Into<String>) -> ValidationError {
    ValidationError {
        message: message.into(),
    }
}

/// Parse a recipebox.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<RecipeboxConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
    parse_config(&content)
}

/// Parse a recipebox.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<RecipeboxConfig> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &RecipeboxConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(err(format!(
            "version must be \"1.0\", got \"{}\"",
            config.version
        )));
    }
    if config.name.trim().is_empty() {
        errors.push(err("name must not be empty"));
    }
    if config.profile.id.trim().is_empty() {
        errors.push(err("profile.id must not be empty"));
    }
    if config.profile.username.trim().is_empty() {
        errors.push(err("profile.username must not be empty"));
    }
    if config.state_dir.trim().is_empty() {
        errors.push(err("state_dir must not be empty"));
    }
    if config.limits.comment_max_chars == 0 {
        errors.push(err("limits.comment_max_chars must be greater than 0"));
    }
    if !config.limits.max_rating.is_finite() || config.limits.max_rating <= 0.0 {
        errors.push(err("limits.max_rating must be a finite number greater than 0"));
    }

    errors
}

/// Parse a recipe draft (camelCase keys) from YAML.
pub fn parse_draft(yaml: &str) -> Result<RecipeDraft> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Parse a recipe patch (camelCase keys) from YAML.
pub fn parse_patch(yaml: &str) -> Result<RecipePatch> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Drop blank ingredient lines and trim text fields, as the create form does.
pub fn normalize_draft(mut draft: RecipeDraft) -> RecipeDraft {
    draft.title = draft.title.trim().to_string();
    draft.ingredients = draft
        .ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    draft.image = draft.image.filter(|i| !i.trim().is_empty());
    draft
}

fn validate_nutrition(n: &NutritionalInfo, errors: &mut Vec<ValidationError>) {
    for (field, value) in n.fields() {
        if !value.is_finite() || value < 0.0 {
            errors.push(err(format!(
                "nutritionalInfo.{} must be a finite number >= 0",
                field
            )));
        }
    }
}

/// Validate a draft. Returns a list of errors (empty = valid).
pub fn validate_draft(draft: &RecipeDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push(err("title must not be empty"));
    }
    if draft.servings == 0 {
        errors.push(err("servings must be at least 1"));
    }
    validate_nutrition(&draft.nutritional_info, &mut errors);
    errors
}

/// Validate a patch. Returns a list of errors (empty = valid).
pub fn validate_patch(patch: &RecipePatch) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if patch.is_empty() {
        errors.push(err("patch sets no fields"));
    }
    if patch.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
        errors.push(err("title must not be empty"));
    }
    if patch.servings == Some(0) {
        errors.push(err("servings must be at least 1"));
    }
    if let Some(ref n) = patch.nutritional_info {
        validate_nutrition(n, &mut errors);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
version: "1.0"
name: home-kitchen
state_dir: /tmp/recipebox
profile:
  id: chef1
  username: FoodLover
limits:
  comment_max_chars: 280
"#;

    #[test]
    fn test_rb007_parse_valid() {
        let config = parse_config(VALID).unwrap();
        assert_eq!(config.name, "home-kitchen");
        assert_eq!(config.state_dir, "/tmp/recipebox");
        assert_eq!(config.limits.comment_max_chars, 280);
        assert_eq!(config.limits.max_rating, 5.0);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_rb007_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipebox.yaml");
        std::fs::write(&path, VALID).unwrap();
        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.profile.username, "FoodLover");
    }

    #[test]
    fn test_rb007_parse_file_missing() {
        let err = parse_config_file(Path::new("/nonexistent/recipebox.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rb007_parse_invalid_yaml() {
        assert!(matches!(parse_config("version: [unclosed"), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_rb007_validate_errors() {
        let yaml = r#"
version: "2.0"
name: ""
profile:
  id: ""
  username: x
limits:
  comment_max_chars: 0
  max_rating: 0
"#;
        let config = parse_config(yaml).unwrap();
        let errors = validate_config(&config);
        let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 5, "{:?}", messages);
        assert!(messages[0].contains("version"));
        assert!(messages.iter().any(|m| m.contains("profile.id")));
    }

    #[test]
    fn test_rb007_validation_errors_into_error() {
        let e: Error = vec![err("a"), err("b")].into();
        assert!(matches!(e, Error::Validation(ref v) if v == &["a", "b"]));
    }

    #[test]
    fn test_rb007_parse_and_normalize_draft() {
        let yaml = r#"
title: "  Pancakes "
cookingTime: 20
servings: 4
category: Breakfast
ingredients: ["2 eggs", "   ", "", "1 cup flour"]
image: ""
nutritionalInfo: {calories: 300, protein: 8, fat: 10, carbs: 40}
"#;
        let draft = normalize_draft(parse_draft(yaml).unwrap());
        assert_eq!(draft.title, "Pancakes");
        assert_eq!(draft.ingredients, vec!["2 eggs", "1 cup flour"]);
        assert!(draft.image.is_none());
        assert!(validate_draft(&draft).is_empty());
    }

    #[test]
    fn test_rb007_draft_unknown_category_rejected() {
        let yaml = "title: x\ncookingTime: 1\nservings: 1\ncategory: Brunch\n";
        assert!(parse_draft(yaml).is_err());
    }

    #[test]
    fn test_rb007_validate_draft_errors() {
        let yaml = r#"
title: " "
cookingTime: 5
servings: 0
category: Snack
nutritionalInfo: {calories: -1, protein: 0, fat: 0, carbs: 0}
"#;
        let errors = validate_draft(&parse_draft(yaml).unwrap());
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_rb007_validate_draft_rejects_infinite_nutrition() {
        let yaml = r#"
title: Bottomless Pie
cookingTime: 60
servings: 8
category: Dessert
nutritionalInfo: {calories: .inf, protein: 1, fat: -.inf, carbs: .nan}
"#;
        let draft = parse_draft(yaml).unwrap();
        assert!(draft.nutritional_info.calories.is_infinite());
        let messages: Vec<_> = validate_draft(&draft).iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), 3, "{:?}", messages);
        assert!(messages[0].contains("calories"));
        assert!(messages.iter().any(|m| m.contains("fat")));
        assert!(messages.iter().any(|m| m.contains("carbs")));
    }

    #[test]
    fn test_rb007_validate_patch_rejects_infinite_nutrition() {
        let patch = parse_patch("nutritionalInfo: {calories: 1, protein: .inf, fat: 0, carbs: 0}\n")
            .unwrap();
        assert_eq!(validate_patch(&patch).len(), 1);
    }

    #[test]
    fn test_rb007_validate_infinite_max_rating() {
        let yaml = "version: \"1.0\"\nname: k\nprofile: {id: a, username: b}\nlimits: {max_rating: .inf}\n";
        let errors = validate_config(&parse_config(yaml).unwrap());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("max_rating"));
    }

    #[test]
    fn test_rb007_parse_and_validate_patch() {
        let patch = parse_patch("title: Better Toast\ncookingTime: 4\n").unwrap();
        assert_eq!(patch.title.as_deref(), Some("Better Toast"));
        assert_eq!(patch.cooking_time, Some(4));
        assert!(patch.servings.is_none());
        assert!(validate_patch(&patch).is_empty());

        let empty = parse_patch("{}").unwrap();
        assert_eq!(validate_patch(&empty).len(), 1);

        let bad = parse_patch("servings: 0\n").unwrap();
        assert_eq!(validate_patch(&bad).len(), 1);
    }
}
