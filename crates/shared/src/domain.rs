use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// An ingredient detected in the uploaded photo.
///
/// The service may attach more fields than `name` and `category` (for
/// example `quantity` and `freshness`); those are kept in `extra` so the
/// ingredient can be sent back to the recipe endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            extra: Map::new(),
        }
    }

    pub fn category_kind(&self) -> IngredientCategory {
        IngredientCategory::from_label(&self.category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngredientCategory {
    Vegetables,
    Fruit,
    Meat,
    Dairy,
    Eggs,
    Pasta,
    Rice,
    Legumes,
    Spices,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 10] = [
        IngredientCategory::Vegetables,
        IngredientCategory::Fruit,
        IngredientCategory::Meat,
        IngredientCategory::Dairy,
        IngredientCategory::Eggs,
        IngredientCategory::Pasta,
        IngredientCategory::Rice,
        IngredientCategory::Legumes,
        IngredientCategory::Spices,
        IngredientCategory::Other,
    ];

    /// Maps a service category label; anything unrecognized is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "zelenina" => Self::Vegetables,
            "ovoce" => Self::Fruit,
            "maso" => Self::Meat,
            "mléčné" => Self::Dairy,
            "vejce" => Self::Eggs,
            "těstoviny" => Self::Pasta,
            "rýže" => Self::Rice,
            "luštěniny" => Self::Legumes,
            "koření" => Self::Spices,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetables => "zelenina",
            Self::Fruit => "ovoce",
            Self::Meat => "maso",
            Self::Dairy => "mléčné",
            Self::Eggs => "vejce",
            Self::Pasta => "těstoviny",
            Self::Rice => "rýže",
            Self::Legumes => "luštěniny",
            Self::Spices => "koření",
            Self::Other => "ostatní",
        }
    }
}

/// A numeric or free-form amount, e.g. `2`, `"200g"` or `"1/2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(Number),
    Text(String),
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => {
                if let Some(float) = number.as_f64().filter(|_| number.is_f64()) {
                    if float.fract() == 0.0 && float.abs() < 1e15 {
                        return write!(f, "{}", float as i64);
                    }
                }
                write!(f, "{number}")
            }
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Server-computed availability of a recipe's ingredients; never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientAvailability {
    pub available_count: u32,
    pub total_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: Quantity,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories_per_serving: Quantity,
    pub protein: Quantity,
    pub carbs: Quantity,
    pub fat: Quantity,
    pub fiber: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Minutes.
    pub prep_time: u32,
    pub tags: Vec<String>,
    pub ingredient_availability: IngredientAvailability,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub nutrition_info: NutritionInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appliances: Vec<String>,
}
