use serde::{Deserialize, Serialize};

use crate::domain::{Ingredient, Recipe};

pub const IMAGE_UPLOAD_PATH: &str = "/image/upload";
pub const RECIPES_GENERATE_PATH: &str = "/recipes/generate";
pub const RECIPE_CATEGORIES_PATH: &str = "/recipes/categories";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

pub const DEFAULT_MAX_TIME_MINUTES: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRecipesRequest {
    pub ingredients: Vec<Ingredient>,
    pub max_time: u32,
    pub dietary_restrictions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRecipesResponse {
    pub recipes: Vec<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn generate_request_matches_service_contract() {
        let request = GenerateRecipesRequest {
            ingredients: vec![Ingredient::new("vejce", "vejce")],
            max_time: DEFAULT_MAX_TIME_MINUTES,
            dietary_restrictions: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).expect("encode"),
            json!({
                "ingredients": [{"name": "vejce", "category": "vejce"}],
                "max_time": 20,
                "dietary_restrictions": []
            })
        );
    }

    #[test]
    fn upload_response_requires_ingredients_array() {
        let ok: UploadImageResponse = serde_json::from_value(json!({
            "message": "Obrázek byl úspěšně nahrán a analyzován",
            "ingredients": []
        }))
        .expect("decode");
        assert!(ok.ingredients.is_empty());

        let missing = serde_json::from_value::<UploadImageResponse>(json!({"message": "hotovo"}));
        assert!(missing.is_err());
    }
}
