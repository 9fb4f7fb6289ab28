//! Setup checks, run after every render of a zone.
//!
//! Broken invariants are fatal and come back as [`DroppableError`]. Problems
//! the zone can live with come back as [`SetupWarning`]s and are logged.

use crate::ui::core::surface::SurfaceReader;

use super::error::{DroppableError, Result, SetupWarning};
use super::types::{DroppableId, DroppableMode};

pub struct ValidationInput<'a> {
    pub droppable_id: &'a DroppableId,
    pub mode: DroppableMode,
    pub has_clone_renderer: bool,
    /// The engine asked for a placeholder and the renderer committed one.
    pub placeholder_committed: bool,
    pub root: &'a SurfaceReader,
    pub placeholder: &'a SurfaceReader,
}

pub fn validate(input: &ValidationInput<'_>, warnings: bool) -> Result<Vec<SetupWarning>> {
    let result = run_checks(input, warnings);
    match &result {
        Ok(found) => {
            for warning in found {
                tracing::warn!(droppable_id = %input.droppable_id, "{warning}");
            }
        }
        Err(e) => tracing::error!(droppable_id = %input.droppable_id, error = %e, "droppable invariant"),
    }
    result
}

fn run_checks(input: &ValidationInput<'_>, warnings: bool) -> Result<Vec<SetupWarning>> {
    if input.droppable_id.is_empty() {
        return Err(DroppableError::MissingDroppableId);
    }
    if input.root.get().is_none() {
        return Err(DroppableError::MissingRootSurface {
            droppable_id: input.droppable_id.clone(),
        });
    }

    let mut found = Vec::new();
    match input.mode {
        DroppableMode::Standard => {
            if warnings && input.placeholder_committed && input.placeholder.get().is_none() {
                found.push(SetupWarning::PlaceholderNotFound {
                    droppable_id: input.droppable_id.clone(),
                });
            }
        }
        DroppableMode::Virtual => {
            if !input.has_clone_renderer {
                return Err(DroppableError::MissingCloneRenderer {
                    droppable_id: input.droppable_id.clone(),
                });
            }
            if input.placeholder.get().is_some() {
                return Err(DroppableError::UnexpectedVirtualPlaceholder {
                    droppable_id: input.droppable_id.clone(),
                });
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/validation.rs"]
mod tests;
