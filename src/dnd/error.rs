use std::fmt;

use super::types::DroppableId;

pub type Result<T> = std::result::Result<T, DroppableError>;

/// Programmer errors in how a zone is wired up.
///
/// None of these are expected at runtime and none are retried. Once a zone
/// has returned one it stays poisoned: continuing could leave the engine with
/// an inconsistent view of every other zone in the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DroppableError {
    MissingAppContext,
    MissingCollaborator(&'static str),
    MissingDroppableId,
    MissingRootSurface { droppable_id: DroppableId },
    MissingCloneRenderer { droppable_id: DroppableId },
    UnexpectedVirtualPlaceholder { droppable_id: DroppableId },
    MissingCloneContainer { droppable_id: DroppableId },
    Unmounted,
}

impl fmt::Display for DroppableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroppableError::MissingAppContext => write!(f, "could not find app context"),
            DroppableError::MissingCollaborator(name) => {
                write!(f, "droppable requires a {name}")
            }
            DroppableError::MissingDroppableId => write!(f, "a droppable requires a droppable id"),
            DroppableError::MissingRootSurface { droppable_id } => write!(
                f,
                "droppable \"{droppable_id}\": provided inner ref has not been given a surface"
            ),
            DroppableError::MissingCloneRenderer { droppable_id } => write!(
                f,
                "droppable \"{droppable_id}\": virtual lists must provide a clone renderer"
            ),
            DroppableError::UnexpectedVirtualPlaceholder { droppable_id } => write!(
                f,
                "droppable \"{droppable_id}\": expected virtual list to not have a placeholder"
            ),
            DroppableError::MissingCloneContainer { droppable_id } => write!(
                f,
                "droppable \"{droppable_id}\": clone requested without a container to mount it in"
            ),
            DroppableError::Unmounted => write!(f, "droppable has been unmounted"),
        }
    }
}

impl std::error::Error for DroppableError {}

/// Setup problems that are worth telling the developer about but do not stop
/// the zone from working.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupWarning {
    PlaceholderNotFound { droppable_id: DroppableId },
}

impl fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupWarning::PlaceholderNotFound { droppable_id } => write!(
                f,
                "droppable \"{droppable_id}\": placeholder could not be found; \
                 render provided.placeholder inside the zone"
            ),
        }
    }
}
