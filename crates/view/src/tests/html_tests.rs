use client_core::{IntakeSource, SelectedFile, UploadController};
use serde_json::json;
use shared::protocol::{GenerateRecipesResponse, UploadImageResponse};

use super::*;
use crate::text::{render_recipe_text, render_results_text};

fn omelette(cooking_tips: Option<Vec<&str>>) -> Recipe {
    let mut raw = json!({
        "name": "Omeleta",
        "prep_time": 10,
        "tags": ["rychlé"],
        "ingredient_availability": {"available_count": 1, "total_count": 1},
        "ingredients": [{"name": "vejce", "amount": 2, "unit": "ks"}],
        "instructions": ["Rozklepněte vejce", "Smažte 5 minut"],
        "nutrition_info": {
            "calories_per_serving": 180,
            "protein": "12g",
            "carbs": "1g",
            "fat": "14g",
            "fiber": "0g"
        }
    });
    if let Some(tips) = cooking_tips {
        raw["cooking_tips"] = json!(tips);
    }
    serde_json::from_value(raw).expect("recipe fixture")
}

fn results_controller(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> UploadController {
    let mut controller = UploadController::default();
    controller
        .select_file(
            IntakeSource::Browse,
            SelectedFile::new("lednice.jpg", "image/jpeg", vec![1, 2, 3]),
        )
        .expect("select");
    let ticket = controller.begin_submission().expect("ticket");
    controller
        .complete_upload(
            ticket.id,
            Ok(UploadImageResponse {
                ingredients,
                message: None,
                filename: None,
                upload_time: None,
            }),
        )
        .expect("upload");
    controller.complete_generation(
        ticket.id,
        Ok(GenerateRecipesResponse {
            recipes,
            total_count: None,
            generation_time: None,
        }),
    );
    controller
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn upload_phase_hides_loading_and_results() {
    let page = render_page(&UploadController::default().snapshot());
    assert!(page.contains(r#"id="uploadSection" class="upload-section" style="display: flex""#));
    assert!(page.contains(r#"id="loadingSection" class="loading-section" style="display: none""#));
    assert!(page.contains(r#"id="resultsSection" class="results-section" style="display: none""#));
    assert!(page.contains(r#"<button id="uploadBtn" class="upload-btn" disabled>"#));
    assert!(page.contains("Klikněte pro nahrání fotografie"));
    assert!(page.contains(r#"<div id="recipeModal" class="modal">"#));
}

#[test]
fn loading_phase_shows_only_loading() {
    let mut controller = UploadController::default();
    controller
        .select_file(
            IntakeSource::Browse,
            SelectedFile::new("a.png", "image/png", vec![1]),
        )
        .expect("select");
    controller.begin_submission().expect("ticket");

    let page = render_page(&controller.snapshot());
    assert!(page.contains(r#"id="uploadSection" class="upload-section" style="display: none""#));
    assert!(page.contains(r#"id="loadingSection" class="loading-section" style="display: flex""#));
    assert!(page.contains(r#"style="display: none"><h2>Nalezené ingredience"#));
}

#[test]
fn selected_file_shows_preview_and_enables_submit() {
    let mut controller = UploadController::default();
    controller
        .select_file(
            IntakeSource::Browse,
            SelectedFile::new("lednice.png", "image/png", b"png!".to_vec()),
        )
        .expect("select");
    let page = render_page(&controller.snapshot());
    assert!(page.contains(r#"<img src="data:image/png;base64,cG5nIQ==""#));
    assert!(page.contains("<p>lednice.png</p>"));
    assert!(page.contains("Klikněte pro změnu"));
    assert!(page.contains(r#"<button id="uploadBtn" class="upload-btn">"#));
}

#[test]
fn drag_over_highlights_upload_area() {
    assert!(render_upload_area(None, true).contains(r#"class="upload-area dragover""#));
    assert!(render_upload_area(None, false).contains(r#"class="upload-area""#));
}

#[test]
fn results_render_one_card_per_item_in_order() {
    let ingredients = vec![
        Ingredient::new("mrkev", "zelenina"),
        Ingredient::new("jablko", "ovoce"),
        Ingredient::new("voda", "nápoje"),
    ];
    let mut second = omelette(None);
    second.name = "Lívance".into();
    let controller = results_controller(ingredients, vec![omelette(None), second]);

    let page = render_page(&controller.snapshot());
    assert!(page.contains(r#"class="results-section fade-in" style="display: block""#));
    assert_eq!(count(&page, r#"class="ingredient-card fade-in""#), 3);
    assert_eq!(count(&page, r#"class="recipe-card fade-in""#), 2);

    let carrot = page.find("mrkev").expect("mrkev");
    let apple = page.find("jablko").expect("jablko");
    assert!(carrot < apple);
    let first = page.find(r#"data-recipe-index="0""#).expect("first card");
    let omelette_name = page.find(">Omeleta<").expect("omeleta");
    let pancakes = page.find(">Lívance<").expect("lívance");
    assert!(first < omelette_name && omelette_name < pancakes);
    assert!(page.contains(r#"<i class="fas fa-utensils"></i></div><div class="ingredient-name">voda"#));
}

#[test]
fn example_scenario_renders_egg_card_and_availability() {
    let controller = results_controller(vec![Ingredient::new("vejce", "vejce")], vec![omelette(None)]);
    let snapshot = controller.snapshot();

    let ingredients = render_ingredients_grid(&snapshot.ingredients);
    assert_eq!(count(&ingredients, "ingredient-card"), 1);
    assert!(ingredients.contains(r#"<i class="fas fa-egg"></i>"#));

    let recipes = render_recipes_grid(&snapshot.recipes);
    assert_eq!(count(&recipes, "recipe-card"), 1);
    assert!(recipes.contains("1/1 ingrediencí dostupných"));
    assert!(recipes.contains(r#"<div class="recipe-time">10 min</div>"#));
    assert!(recipes.contains(r#"<span class="recipe-tag">rychlé</span>"#));
}

#[test]
fn recipe_failure_renders_results_with_zero_recipe_cards() {
    let mut controller = UploadController::default();
    controller
        .select_file(
            IntakeSource::Browse,
            SelectedFile::new("a.jpg", "image/jpeg", vec![1]),
        )
        .expect("select");
    let ticket = controller.begin_submission().expect("ticket");
    controller
        .complete_upload(
            ticket.id,
            Ok(UploadImageResponse {
                ingredients: vec![Ingredient::new("vejce", "vejce")],
                message: None,
                filename: None,
                upload_time: None,
            }),
        )
        .expect("upload");
    controller.complete_generation(
        ticket.id,
        Err(client_core::Endpoint::RecipeGenerate.failed(
            client_core::TransportFailure::Network("connection reset".into()),
        )),
    );

    let page = render_page(&controller.snapshot());
    assert_eq!(count(&page, "recipe-card"), 0);
    assert_eq!(count(&page, "ingredient-card"), 1);
    assert_eq!(count(&page, r#"class="notification notification-error""#), 1);
    assert!(page.contains("Chyba při generování receptů."));
}

#[test]
fn modal_without_tips_omits_tips_section() {
    let detail = render_recipe_detail(&omelette(None));
    assert!(detail.contains("<h4>Ingredience</h4>"));
    assert!(detail.contains("<strong>vejce</strong> - 2 ks"));
    assert!(detail.contains("<h4>Postup přípravy</h4>"));
    assert_eq!(count(&detail, r#"<li class="recipe-instruction">"#), 2);
    assert!(detail.contains("<h4>Nutriční informace (na porci)</h4>"));
    assert!(!detail.contains("Tipy pro přípravu"));
}

#[test]
fn modal_with_two_tips_renders_two_tip_items() {
    let detail = render_recipe_detail(&omelette(Some(vec!["tip1", "tip2"])));
    let tips_start = detail.find("Tipy pro přípravu").expect("tips section");
    let tips = &detail[tips_start..];
    assert_eq!(count(tips, r#"<li class="recipe-instruction">"#), 2);
    assert!(tips.contains(">tip1<") && tips.contains(">tip2<"));
}

#[test]
fn empty_tips_list_still_renders_the_section() {
    let detail = render_recipe_detail(&omelette(Some(Vec::new())));
    assert!(detail.contains("Tipy pro přípravu"));
}

#[test]
fn nutrition_block_has_fixed_order() {
    let detail = render_recipe_detail(&omelette(None));
    let order: Vec<usize> = ["Kalorie:", "Bílkoviny:", "Sacharidy:", "Tuky:", "Vláknina:"]
        .iter()
        .map(|label| detail.find(label).expect(label))
        .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(detail.contains("<strong>Kalorie:</strong> 180 kcal"));
    assert!(detail.contains("<strong>Bílkoviny:</strong> 12g"));
}

#[test]
fn open_modal_is_active_with_recipe_name() {
    let mut controller = results_controller(vec![Ingredient::new("vejce", "vejce")], vec![omelette(None)]);
    assert!(controller.open_recipe(0));
    let page = render_page(&controller.snapshot());
    assert!(page.contains(r#"<div id="recipeModal" class="modal active">"#));
    assert!(page.contains(r#"<h3 id="modalRecipeName">Omeleta</h3>"#));

    controller.click_modal(client_core::ClickTarget::Backdrop);
    let page = render_page(&controller.snapshot());
    assert!(page.contains(r#"<div id="recipeModal" class="modal">"#));
    assert!(!page.contains("Postup přípravy"));
}

#[test]
fn user_text_is_escaped() {
    let card = render_ingredient_card(&Ingredient::new("<script>alert(1)</script>", "zelenina"));
    assert!(!card.contains("<script>"));
    assert!(card.contains("&lt;script&gt;"));
}

#[test]
fn notifications_stack_in_render() {
    let mut controller = UploadController::default();
    let _ = controller.begin_submission();
    let _ = controller.begin_submission();
    let html = render_notifications(&controller.snapshot().notifications);
    assert_eq!(count(&html, "Prosím vyberte obrázek."), 2);
}

#[test]
fn text_summary_lists_cards_and_detail() {
    let controller = results_controller(vec![Ingredient::new("vejce", "vejce")], vec![omelette(Some(vec!["tip1"]))]);
    let summary = render_results_text(&controller.snapshot());
    assert!(summary.contains("  - vejce [vejce]"));
    assert!(summary.contains("1. Omeleta (10 min) #rychlé | 1/1 ingrediencí dostupných"));

    let detail = render_recipe_text(&controller.recipes()[0]);
    assert!(detail.contains("  1. Rozklepněte vejce"));
    assert!(detail.contains("  2. Smažte 5 minut"));
    assert!(detail.contains("  Kalorie: 180 kcal"));
    assert!(detail.contains("  - tip1"));
}
