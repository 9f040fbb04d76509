//! Renders controller snapshots into HTML fragments and plain-text summaries.
//! Everything here is a pure function of its inputs; no document is needed.

pub mod html;
pub mod icons;
pub mod text;

use shared::domain::IngredientAvailability;

pub use html::{
    render_ingredient_card, render_ingredients_grid, render_notifications, render_page,
    render_recipe_card, render_recipe_detail, render_recipe_modal, render_recipes_grid,
    render_upload_area,
};
pub use icons::{ingredient_icon, FALLBACK_ICON};
pub use text::{render_recipe_text, render_results_text};

/// "X/Y ingrediencí dostupných", straight from the server counts.
pub fn availability_text(availability: &IngredientAvailability) -> String {
    format!(
        "{}/{} ingrediencí dostupných",
        availability.available_count, availability.total_count
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
