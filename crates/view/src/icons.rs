use shared::domain::IngredientCategory;

pub const FALLBACK_ICON: &str = "fas fa-utensils";

pub fn category_icon(category: IngredientCategory) -> &'static str {
    match category {
        IngredientCategory::Vegetables => "fas fa-carrot",
        IngredientCategory::Fruit => "fas fa-apple-alt",
        IngredientCategory::Meat => "fas fa-drumstick-bite",
        IngredientCategory::Dairy => "fas fa-cheese",
        IngredientCategory::Eggs => "fas fa-egg",
        IngredientCategory::Pasta => "fas fa-bread-slice",
        IngredientCategory::Rice | IngredientCategory::Legumes => "fas fa-seedling",
        IngredientCategory::Spices => "fas fa-pepper-hot",
        IngredientCategory::Other => FALLBACK_ICON,
    }
}

/// Icon class for a service category label.
pub fn ingredient_icon(category: &str) -> &'static str {
    category_icon(IngredientCategory::from_label(category))
}
