//! Replays a command script against the editor.

use crate::config::ShellConfig;
use crate::error::ShellError;
use flowdeck_core::{IdGenerator, Result, SequentialIdGenerator, UlidIdGenerator};
use flowdeck_editor::{
    EditorCommand, EditorController, EditorHost, EditorInput, Level, Notification,
};
use flowdeck_workflow::{Catalog, SavedWorkflow};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Host that keeps everything the editor hands it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub saves: Vec<SavedWorkflow>,
    pub notifications: Vec<Notification>,
    pub closed: bool,
}

impl EditorHost for RecordingHost {
    fn on_save(&mut self, workflow: SavedWorkflow) {
        self.saves.push(workflow);
    }

    fn on_close(&mut self) {
        self.closed = true;
    }

    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!(message = %notification.message, "Editor notification"),
            Level::Success | Level::Info => {
                tracing::info!(message = %notification.message, "Editor notification");
            }
        }
        self.notifications.push(notification);
    }
}

/// Feeds commands to the controller until the script ends or the editor
/// closes. Rejected commands are logged and skipped.
pub fn replay(
    controller: &mut EditorController,
    commands: Vec<EditorCommand>,
    host: &mut RecordingHost,
) {
    for (step, command) in commands.into_iter().enumerate() {
        if host.closed {
            tracing::info!(step, "Editor closed, ignoring remaining commands");
            break;
        }
        if let Err(err) = controller.dispatch(command, host) {
            tracing::warn!(step, error = %err, "Command rejected");
        }
    }
}

/// Runs the configured script and writes the last saved workflow.
///
/// Returns the last saved workflow, if any save succeeded.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or the
/// output cannot be written.
pub fn run(config: &ShellConfig) -> Result<Option<SavedWorkflow>, ShellError> {
    let catalog: Catalog = read_json(&config.catalog_path, "catalog")?;
    let input = match &config.workflow_path {
        Some(path) => EditorInput::from_saved(read_json(path, "workflow")?, catalog),
        None => EditorInput {
            catalog,
            ..EditorInput::default()
        },
    };
    let commands: Vec<EditorCommand> = read_json(&config.script_path, "script")?;

    let ids: Box<dyn IdGenerator> = if config.sequential_ids {
        Box::new(SequentialIdGenerator::new())
    } else {
        Box::new(UlidIdGenerator)
    };
    let mut controller = EditorController::load(input, config.editor.clone(), ids);
    let mut host = RecordingHost::default();
    replay(&mut controller, commands, &mut host);

    let Some(saved) = host.saves.pop() else {
        tracing::warn!("Script finished without a successful save");
        return Ok(None);
    };
    write_output(config.output_path.as_deref(), &saved)?;
    Ok(Some(saved))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T, ShellError> {
    let text = std::fs::read_to_string(path).map_err(|e| ShellError::Read {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    let value = serde_json::from_str(&text).map_err(|e| ShellError::Parse {
        what,
        details: e.to_string(),
    })?;
    Ok(value)
}

fn write_output(path: Option<&Path>, saved: &SavedWorkflow) -> Result<(), ShellError> {
    let json = serde_json::to_string_pretty(saved).map_err(|e| ShellError::Write {
        path: "<json>".to_string(),
        details: e.to_string(),
    })?;
    match path {
        Some(path) => {
            std::fs::write(path, json + "\n").map_err(|e| ShellError::Write {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), "Saved workflow written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
