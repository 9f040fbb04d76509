//! Plain-text rendering for terminal hosts.

use std::fmt::Write as _;

use client_core::{UiPhase, ViewSnapshot};
use shared::domain::Recipe;

use crate::availability_text;

pub fn render_results_text(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();
    match snapshot.phase {
        UiPhase::Upload => {
            let _ = writeln!(out, "Nahrajte fotografii ledničky.");
        }
        UiPhase::Loading => {
            let _ = writeln!(out, "Analyzuji obsah ledničky…");
        }
        UiPhase::Results => {
            let _ = writeln!(out, "Nalezené ingredience ({}):", snapshot.ingredients.len());
            for ingredient in &snapshot.ingredients {
                let _ = writeln!(out, "  - {} [{}]", ingredient.name, ingredient.category);
            }
            let _ = writeln!(out, "Doporučené recepty ({}):", snapshot.recipes.len());
            for (index, recipe) in snapshot.recipes.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} ({} min) {} | {}",
                    index + 1,
                    recipe.name,
                    recipe.prep_time,
                    recipe
                        .tags
                        .iter()
                        .map(|tag| format!("#{tag}"))
                        .collect::<Vec<_>>()
                        .join(" "),
                    availability_text(&recipe.ingredient_availability),
                );
            }
        }
    }
    for notification in &snapshot.notifications {
        let _ = writeln!(out, "! {}", notification.message);
    }
    out
}

pub fn render_recipe_text(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "Ingredience:");
    for ingredient in &recipe.ingredients {
        let amount = format!("{} {}", ingredient.amount, ingredient.unit);
        let _ = writeln!(out, "  - {} - {}", ingredient.name, amount.trim_end());
    }
    let _ = writeln!(out, "Postup přípravy:");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", step + 1, instruction);
    }
    let nutrition = &recipe.nutrition_info;
    let _ = writeln!(out, "Nutriční informace (na porci):");
    let _ = writeln!(out, "  Kalorie: {} kcal", nutrition.calories_per_serving);
    let _ = writeln!(out, "  Bílkoviny: {}", nutrition.protein);
    let _ = writeln!(out, "  Sacharidy: {}", nutrition.carbs);
    let _ = writeln!(out, "  Tuky: {}", nutrition.fat);
    let _ = writeln!(out, "  Vláknina: {}", nutrition.fiber);
    if let Some(tips) = &recipe.cooking_tips {
        let _ = writeln!(out, "Tipy pro přípravu:");
        for tip in tips {
            let _ = writeln!(out, "  - {tip}");
        }
    }
    out
}
