use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{apply_process_env, load_settings_from, parse_base_url},
    load_settings, ClientSettings, HttpRecipeApi, IntakeSource, SelectedFile, UploadController,
    WorkflowSettings,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Photograph your fridge, get recipes")]
struct Cli {
    /// Settings file; defaults to ./fridge.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a fridge photo and print the suggested recipes.
    Cook {
        #[arg(long)]
        image: PathBuf,
        /// Write the rendered page here.
        #[arg(long)]
        out: Option<PathBuf>,
        /// 1-based number of the recipe to show in detail.
        #[arg(long)]
        open_recipe: Option<usize>,
    },
    Health,
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let settings = resolve_settings(cli.config.as_deref(), cli.base_url.as_deref())?;
    let api = HttpRecipeApi::from_settings(&settings)?;
    info!(base_url = api.base_url(), "config: using recipe service");

    match cli.command {
        Command::Cook {
            image,
            out,
            open_recipe,
        } => cook(&api, &settings, &image, out.as_deref(), open_recipe).await,
        Command::Health => {
            let health = api
                .health()
                .await
                .context("health check request failed")?;
            println!("{}: {}", health.status, health.message);
            if !health.is_healthy() {
                bail!("service reported status '{}'", health.status);
            }
            Ok(())
        }
        Command::Categories => {
            let categories = api
                .categories()
                .await
                .context("failed to list recipe categories")?;
            for category in categories {
                println!("{category}");
            }
            Ok(())
        }
    }
}

fn resolve_settings(config: Option<&Path>, base_url: Option<&str>) -> Result<ClientSettings> {
    let mut settings = match config {
        Some(path) => {
            let mut settings = load_settings_from(path)?;
            apply_process_env(&mut settings);
            settings
        }
        None => load_settings(),
    };
    if let Some(url) = base_url {
        settings.api_base_url = parse_base_url(url)?;
    }
    Ok(settings)
}

async fn cook(
    api: &HttpRecipeApi,
    settings: &ClientSettings,
    image: &Path,
    out: Option<&Path>,
    open_recipe: Option<usize>,
) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("failed to read image '{}'", image.display()))?;
    let mime_type = mime_guess::from_path(image)
        .first_raw()
        .unwrap_or("application/octet-stream");
    let name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.display().to_string());

    let mut controller = UploadController::new(WorkflowSettings::from(settings));
    let file = SelectedFile::new(name, mime_type, bytes);
    let outcome = match controller.select_file(IntakeSource::Browse, file) {
        Ok(()) => controller.submit(api).await,
        Err(err) => Err(err),
    };

    print!("{}", view::render_results_text(&controller.snapshot()));

    if let Some(number) = open_recipe {
        if number > 0 && controller.open_recipe(number - 1) {
            if let Some(recipe) = controller.modal().recipe() {
                println!();
                print!("{}", view::render_recipe_text(recipe));
            }
        } else {
            warn!(number, "modal: no such recipe");
        }
    }

    if let Some(out) = out {
        tokio::fs::write(out, page_document(&view::render_page(&controller.snapshot())))
            .await
            .with_context(|| format!("failed to write page '{}'", out.display()))?;
        info!(path = %out.display(), "wrote rendered page");
    }

    let summary = outcome.context("fridge analysis failed")?;
    if let Some(err) = summary.recipe_error {
        warn!("workflow: finished without recipes: {err}");
    }
    Ok(())
}

fn page_document(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="cs"><head><meta charset="utf-8"><title>Lednice</title></head>"#,
            "<body>{}</body></html>\n"
        ),
        body
    )
}
