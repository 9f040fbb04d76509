//! Upload controller: the upload → generate → display workflow as an explicit
//! state machine. Rendering happens elsewhere, from [`ViewSnapshot`]s.
//!
//! The workflow can be driven in one call with [`UploadController::submit`],
//! or step by step (`begin_submission`, `complete_upload`,
//! `complete_generation`) by a host that interleaves other UI events while
//! requests are in flight. Nothing is cancelled: an outcome for an older
//! submission is still applied, and the last writer wins.

use std::time::{Duration, Instant};

use shared::{
    domain::{Ingredient, Recipe},
    protocol::{GenerateRecipesRequest, GenerateRecipesResponse, UploadImageResponse},
};
use tracing::{debug, info, warn};

use crate::{
    config::ClientSettings,
    error::ClientError,
    intake::{ImagePreview, IntakeSource, SelectedFile},
    notifications::{Notification, NotificationCenter, DEFAULT_NOTIFICATION_TTL},
    RecipeApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiPhase {
    #[default]
    Upload,
    Loading,
    Results,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<Recipe>),
}

impl ModalState {
    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            Self::Closed => None,
            Self::Open(recipe) => Some(&**recipe),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Where a click inside the modal overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    pub max_time_minutes: u32,
    pub dietary_restrictions: Vec<String>,
    pub notification_ttl: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            max_time_minutes: shared::protocol::DEFAULT_MAX_TIME_MINUTES,
            dietary_restrictions: Vec::new(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl From<&ClientSettings> for WorkflowSettings {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            max_time_minutes: settings.max_time_minutes,
            dietary_restrictions: settings.dietary_restrictions.clone(),
            notification_ttl: settings.notification_ttl(),
        }
    }
}

/// A started submission: the file to upload and the id its outcomes carry.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: u64,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSummary {
    pub submission: u64,
    pub ingredient_count: usize,
    pub recipe_count: usize,
    /// Set when recipe generation failed but the workflow still reached results.
    pub recipe_error: Option<ClientError>,
}

/// Everything a renderer needs, detached from the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub phase: UiPhase,
    pub preview: Option<ImagePreview>,
    pub drag_active: bool,
    pub submit_enabled: bool,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub modal: Option<Recipe>,
    pub notifications: Vec<Notification>,
}

pub struct UploadController {
    settings: WorkflowSettings,
    phase: UiPhase,
    selected_file: Option<SelectedFile>,
    preview: Option<ImagePreview>,
    drag_active: bool,
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    modal: ModalState,
    notifications: NotificationCenter,
    latest_submission: u64,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new(WorkflowSettings::default())
    }
}

impl UploadController {
    pub fn new(settings: WorkflowSettings) -> Self {
        let notifications = NotificationCenter::new(settings.notification_ttl);
        Self {
            settings,
            phase: UiPhase::Upload,
            selected_file: None,
            preview: None,
            drag_active: false,
            ingredients: Vec::new(),
            recipes: Vec::new(),
            modal: ModalState::Closed,
            notifications,
            latest_submission: 0,
        }
    }

    pub fn phase(&self) -> UiPhase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    /// A file is held and results are not on screen.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && self.phase != UiPhase::Results
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    pub fn latest_submission(&self) -> u64 {
        self.latest_submission
    }

    /// Validates and stores a file. A rejected file leaves the current
    /// selection untouched and raises a notification.
    pub fn select_file(
        &mut self,
        source: IntakeSource,
        file: SelectedFile,
    ) -> Result<(), ClientError> {
        if let Err(err) = file.validate() {
            warn!(
                source = source.as_str(),
                file = %file.name,
                mime_type = %file.mime_type,
                size_bytes = file.size_bytes(),
                "intake: file rejected: {err}"
            );
            self.raise(&err);
            return Err(err);
        }

        info!(
            source = source.as_str(),
            file = %file.name,
            size_bytes = file.size_bytes(),
            "intake: file selected"
        );
        self.preview = Some(ImagePreview::from_file(&file));
        self.selected_file = Some(file);
        Ok(())
    }

    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Only the first dropped file is considered; an empty drop does nothing.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Result<(), ClientError> {
        self.drag_active = false;
        match files.into_iter().next() {
            Some(file) => self.select_file(IntakeSource::Drop, file),
            None => Ok(()),
        }
    }

    /// Starts a submission from Upload, or from Loading while an earlier one is
    /// still in flight. From Results only `reset` leads back.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, ClientError> {
        if self.phase == UiPhase::Results {
            warn!("workflow: submit while results are shown");
            return Err(ClientError::ResultsShown);
        }
        let Some(file) = self.selected_file.clone() else {
            let err = ClientError::NoFileSelected;
            warn!("workflow: submit without a selected file");
            self.raise(&err);
            return Err(err);
        };

        self.latest_submission += 1;
        self.phase = UiPhase::Loading;
        info!(
            submission = self.latest_submission,
            file = %file.name,
            "workflow: submission started"
        );
        Ok(SubmissionTicket {
            id: self.latest_submission,
            file,
        })
    }

    /// Applies the image-upload outcome. On success the held ingredients are
    /// replaced and the recipe request to send next is returned; on failure the
    /// phase returns to Upload and no recipe request is produced.
    pub fn complete_upload(
        &mut self,
        submission: u64,
        outcome: Result<UploadImageResponse, ClientError>,
    ) -> Result<GenerateRecipesRequest, ClientError> {
        self.note_if_stale(submission, "upload");
        match outcome {
            Ok(body) => {
                info!(
                    submission,
                    ingredients = body.ingredients.len(),
                    "workflow: ingredients received"
                );
                self.ingredients = body.ingredients;
                Ok(self.recipe_request())
            }
            Err(err) => {
                warn!(submission, "workflow: upload failed: {err}");
                self.raise(&err);
                self.phase = UiPhase::Upload;
                Err(err)
            }
        }
    }

    /// Applies the recipe-generation outcome and moves to Results either way.
    /// A failure is reported but keeps whatever recipes are already held.
    pub fn complete_generation(
        &mut self,
        submission: u64,
        outcome: Result<GenerateRecipesResponse, ClientError>,
    ) -> WorkflowSummary {
        self.note_if_stale(submission, "generate");
        let recipe_error = match outcome {
            Ok(body) => {
                self.recipes = body.recipes;
                None
            }
            Err(err) => {
                warn!(submission, "workflow: recipe generation failed: {err}");
                self.raise(&err);
                Some(err)
            }
        };

        self.phase = UiPhase::Results;
        info!(
            submission,
            ingredients = self.ingredients.len(),
            recipes = self.recipes.len(),
            "workflow: showing results"
        );
        WorkflowSummary {
            submission,
            ingredient_count: self.ingredients.len(),
            recipe_count: self.recipes.len(),
            recipe_error,
        }
    }

    /// Runs the whole workflow. The recipe call starts only after the upload
    /// succeeded; errors that abort the workflow are returned.
    pub async fn submit(&mut self, api: &dyn RecipeApi) -> Result<WorkflowSummary, ClientError> {
        let ticket = self.begin_submission()?;
        let uploaded = api.upload_image(&ticket.file).await;
        let request = self.complete_upload(ticket.id, uploaded)?;
        let generated = api.generate_recipes(&request).await;
        Ok(self.complete_generation(ticket.id, generated))
    }

    /// The only way back from Results to Upload.
    pub fn reset(&mut self) {
        info!("workflow: reset to upload");
        self.selected_file = None;
        self.preview = None;
        self.drag_active = false;
        self.ingredients.clear();
        self.recipes.clear();
        self.modal = ModalState::Closed;
        self.phase = UiPhase::Upload;
    }

    /// Opens the detail modal for the recipe at `index`, replacing any open one.
    pub fn open_recipe(&mut self, index: usize) -> bool {
        let Some(recipe) = self.recipes.get(index) else {
            debug!(index, "modal: no recipe at index");
            return false;
        };
        debug!(index, recipe = %recipe.name, "modal: open");
        self.modal = ModalState::Open(Box::new(recipe.clone()));
        true
    }

    pub fn close_modal(&mut self) {
        if self.modal.is_open() {
            debug!("modal: close");
        }
        self.modal = ModalState::Closed;
    }

    /// Clicks on the backdrop close the modal; clicks on its content do not.
    pub fn click_modal(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close_modal();
        }
    }

    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        self.notifications.dismiss_expired(now)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            phase: self.phase,
            preview: self.preview.clone(),
            drag_active: self.drag_active,
            submit_enabled: self.can_submit(),
            ingredients: self.ingredients.clone(),
            recipes: self.recipes.clone(),
            modal: self.modal.recipe().cloned(),
            notifications: self.notifications.active().to_vec(),
        }
    }

    fn recipe_request(&self) -> GenerateRecipesRequest {
        GenerateRecipesRequest {
            ingredients: self.ingredients.clone(),
            max_time: self.settings.max_time_minutes,
            dietary_restrictions: self.settings.dietary_restrictions.clone(),
        }
    }

    fn raise(&mut self, err: &ClientError) {
        self.notifications.push(err.user_message());
    }

    fn note_if_stale(&self, submission: u64, step: &str) {
        if submission != self.latest_submission {
            warn!(
                submission,
                latest = self.latest_submission,
                step,
                "workflow: applying outcome of a superseded submission"
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
