//! HTML fragments for the upload page. Element ids and class names match the
//! stylesheet the page ships with.

use std::fmt::Write as _;

use client_core::{ImagePreview, Notification, UiPhase, ViewSnapshot};
use shared::domain::{Ingredient, Recipe};

use crate::{availability_text, escape_html, icons::ingredient_icon};

const UPLOAD_PROMPT: &str = "Klikněte pro nahrání fotografie";
const UPLOAD_HINT: &str = "nebo přetáhněte soubor sem";
const CHANGE_HINT: &str = "Klikněte pro změnu";

fn display(visible: bool, shown_as: &str) -> String {
    if visible {
        format!("display: {shown_as}")
    } else {
        "display: none".to_string()
    }
}

pub fn render_upload_area(preview: Option<&ImagePreview>, drag_active: bool) -> String {
    let class = if drag_active {
        "upload-area dragover"
    } else {
        "upload-area"
    };
    let content = match preview {
        Some(preview) => format!(
            concat!(
                r#"<img src="{src}" alt="Preview" style="max-width: 200px; max-height: 200px; border-radius: 10px;">"#,
                r#"<p>{name}</p>"#,
                r#"<p class="upload-hint">{hint}</p>"#,
            ),
            src = escape_html(&preview.data_url),
            name = escape_html(&preview.file_name),
            hint = CHANGE_HINT,
        ),
        None => format!(
            concat!(
                r#"<i class="fas fa-cloud-upload-alt"></i>"#,
                r#"<p>{prompt}</p>"#,
                r#"<p class="upload-hint">{hint}</p>"#,
            ),
            prompt = UPLOAD_PROMPT,
            hint = UPLOAD_HINT,
        ),
    };
    format!(r#"<div id="uploadArea" class="{class}"><div class="upload-content">{content}</div></div>"#)
}

pub fn render_ingredient_card(ingredient: &Ingredient) -> String {
    format!(
        concat!(
            r#"<div class="ingredient-card fade-in">"#,
            r#"<div class="ingredient-icon"><i class="{icon}"></i></div>"#,
            r#"<div class="ingredient-name">{name}</div>"#,
            r#"<div class="ingredient-category">{category}</div>"#,
            "</div>"
        ),
        icon = ingredient_icon(&ingredient.category),
        name = escape_html(&ingredient.name),
        category = escape_html(&ingredient.category),
    )
}

pub fn render_ingredients_grid(ingredients: &[Ingredient]) -> String {
    let cards: String = ingredients.iter().map(render_ingredient_card).collect();
    format!(r#"<div id="ingredientsGrid" class="ingredients-grid">{cards}</div>"#)
}

/// A clickable card; `index` is what the host passes back to `open_recipe`.
pub fn render_recipe_card(index: usize, recipe: &Recipe) -> String {
    let tags: String = recipe
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="recipe-tag">{}</span>"#, escape_html(tag)))
        .collect();
    format!(
        concat!(
            r#"<div class="recipe-card fade-in" data-recipe-index="{index}">"#,
            r#"<div class="recipe-header">"#,
            r#"<div class="recipe-name">{name}</div>"#,
            r#"<div class="recipe-time">{prep_time} min</div>"#,
            "</div>",
            r#"<div class="recipe-tags">{tags}</div>"#,
            r#"<div class="recipe-availability">{availability}</div>"#,
            "</div>"
        ),
        index = index,
        name = escape_html(&recipe.name),
        prep_time = recipe.prep_time,
        tags = tags,
        availability = availability_text(&recipe.ingredient_availability),
    )
}

pub fn render_recipes_grid(recipes: &[Recipe]) -> String {
    let cards: String = recipes
        .iter()
        .enumerate()
        .map(|(index, recipe)| render_recipe_card(index, recipe))
        .collect();
    format!(r#"<div id="recipesGrid" class="recipes-grid">{cards}</div>"#)
}

fn nutrition_row(label: &str, value: &str) -> String {
    format!(r#"<div class="recipe-ingredient"><strong>{label}:</strong> {value}</div>"#)
}

/// Modal body: ingredients, numbered steps, nutrition, and tips when present.
pub fn render_recipe_detail(recipe: &Recipe) -> String {
    let mut body = String::new();

    body.push_str(r#"<div class="recipe-detail-section"><h4>Ingredience</h4><div class="recipe-ingredients">"#);
    for ingredient in &recipe.ingredients {
        let amount = format!("{} {}", ingredient.amount, ingredient.unit);
        let _ = write!(
            body,
            r#"<div class="recipe-ingredient"><strong>{}</strong> - {}</div>"#,
            escape_html(&ingredient.name),
            escape_html(amount.trim_end()),
        );
    }
    body.push_str("</div></div>");

    body.push_str(r#"<div class="recipe-detail-section"><h4>Postup přípravy</h4><ol class="recipe-instructions">"#);
    for step in &recipe.instructions {
        let _ = write!(
            body,
            r#"<li class="recipe-instruction">{}</li>"#,
            escape_html(step)
        );
    }
    body.push_str("</ol></div>");

    let nutrition = &recipe.nutrition_info;
    body.push_str(r#"<div class="recipe-detail-section"><h4>Nutriční informace (na porci)</h4><div class="recipe-ingredients">"#);
    body.push_str(&nutrition_row(
        "Kalorie",
        &format!("{} kcal", escape_html(&nutrition.calories_per_serving.to_string())),
    ));
    body.push_str(&nutrition_row(
        "Bílkoviny",
        &escape_html(&nutrition.protein.to_string()),
    ));
    body.push_str(&nutrition_row(
        "Sacharidy",
        &escape_html(&nutrition.carbs.to_string()),
    ));
    body.push_str(&nutrition_row("Tuky", &escape_html(&nutrition.fat.to_string())));
    body.push_str(&nutrition_row(
        "Vláknina",
        &escape_html(&nutrition.fiber.to_string()),
    ));
    body.push_str("</div></div>");

    if let Some(tips) = &recipe.cooking_tips {
        body.push_str(r#"<div class="recipe-detail-section"><h4>Tipy pro přípravu</h4><ul class="recipe-instructions">"#);
        for tip in tips {
            let _ = write!(
                body,
                r#"<li class="recipe-instruction">{}</li>"#,
                escape_html(tip)
            );
        }
        body.push_str("</ul></div>");
    }

    body
}

/// The modal overlay; closed renders an inactive, empty shell.
pub fn render_recipe_modal(recipe: Option<&Recipe>) -> String {
    let (class, name, body) = match recipe {
        Some(recipe) => (
            "modal active",
            escape_html(&recipe.name),
            render_recipe_detail(recipe),
        ),
        None => ("modal", String::new(), String::new()),
    };
    format!(
        concat!(
            r#"<div id="recipeModal" class="{class}">"#,
            r#"<div class="modal-content">"#,
            r#"<div class="modal-header">"#,
            r#"<h3 id="modalRecipeName">{name}</h3>"#,
            r#"<span id="modalClose" class="modal-close">&times;</span>"#,
            "</div>",
            r#"<div id="modalBody" class="modal-body">{body}</div>"#,
            "</div></div>"
        ),
        class = class,
        name = name,
        body = body,
    )
}

pub fn render_notifications(notifications: &[Notification]) -> String {
    let toasts: String = notifications
        .iter()
        .map(|notification| {
            format!(
                r#"<div class="notification notification-error" data-notification-id="{}">{}</div>"#,
                notification.id,
                escape_html(&notification.message)
            )
        })
        .collect();
    format!(r#"<div id="notifications" class="notifications">{toasts}</div>"#)
}

/// All regions of the page. Sections not belonging to the current phase are
/// hidden; results and ingredient/recipe grids are only filled in Results.
pub fn render_page(snapshot: &ViewSnapshot) -> String {
    let upload_button = if snapshot.submit_enabled {
        r#"<button id="uploadBtn" class="upload-btn">Najít recepty</button>"#
    } else {
        r#"<button id="uploadBtn" class="upload-btn" disabled>Najít recepty</button>"#
    };
    let in_results = snapshot.phase == UiPhase::Results;
    let (ingredients, recipes): (&[Ingredient], &[Recipe]) = if in_results {
        (snapshot.ingredients.as_slice(), snapshot.recipes.as_slice())
    } else {
        (&[], &[])
    };
    let results_class = if in_results {
        "results-section fade-in"
    } else {
        "results-section"
    };

    let mut page = String::new();
    let _ = write!(
        page,
        r#"<section id="uploadSection" class="upload-section" style="{}">{}{}</section>"#,
        display(snapshot.phase == UiPhase::Upload, "flex"),
        render_upload_area(snapshot.preview.as_ref(), snapshot.drag_active),
        upload_button,
    );
    let _ = write!(
        page,
        concat!(
            r#"<section id="loadingSection" class="loading-section" style="{}">"#,
            r#"<div class="spinner"></div><p>Analyzuji obsah ledničky…</p>"#,
            "</section>"
        ),
        display(snapshot.phase == UiPhase::Loading, "flex"),
    );
    let _ = write!(
        page,
        concat!(
            r#"<section id="resultsSection" class="{}" style="{}">"#,
            "<h2>Nalezené ingredience</h2>{}",
            "<h2>Doporučené recepty</h2>{}",
            r#"<button id="newPhotoBtn" class="new-photo-btn">Nová fotografie</button>"#,
            "</section>"
        ),
        results_class,
        display(in_results, "block"),
        render_ingredients_grid(ingredients),
        render_recipes_grid(recipes),
    );
    page.push_str(&render_recipe_modal(snapshot.modal.as_ref()));
    page.push_str(&render_notifications(&snapshot.notifications));
    page
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
