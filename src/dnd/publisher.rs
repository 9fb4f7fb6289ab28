use std::rc::Rc;

use crate::ui::core::surface::SurfaceReader;

use super::registry::{DroppableEntry, DroppableRegistry, EntryId};
use super::types::{DroppableDescriptor, ZoneConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishAction {
    Registered,
    /// The descriptor changed: the old entry went away and a new one came in.
    Reregistered,
    Updated,
    Unchanged,
}

/// Keeps one zone's registration in step with its configuration.
///
/// Calls reach the registry in the order configuration changes are seen.
/// Dropping the publisher unregisters.
pub struct DroppablePublisher {
    registry: Rc<dyn DroppableRegistry>,
    geometry: SurfaceReader,
    current: Option<DroppableEntry>,
}

impl DroppablePublisher {
    pub fn new(registry: Rc<dyn DroppableRegistry>, geometry: SurfaceReader) -> Self {
        Self {
            registry,
            geometry,
            current: None,
        }
    }

    pub fn entry(&self) -> Option<&DroppableEntry> {
        self.current.as_ref()
    }

    pub fn publish(&mut self, descriptor: DroppableDescriptor, config: ZoneConfig) -> PublishAction {
        let action = match &self.current {
            None => PublishAction::Registered,
            Some(cur) if cur.descriptor != descriptor => PublishAction::Reregistered,
            Some(cur) if cur.config != config => PublishAction::Updated,
            Some(_) => return PublishAction::Unchanged,
        };

        match action {
            PublishAction::Updated => {
                if let Some(last) = self.current.take() {
                    let next = DroppableEntry {
                        config,
                        ..last.clone()
                    };
                    self.registry.update(next.clone(), &last);
                    self.current = Some(next);
                }
            }
            _ => {
                if let Some(last) = self.current.take() {
                    self.registry.unregister(&last);
                }
                let entry = DroppableEntry {
                    unique_id: EntryId::next(),
                    descriptor,
                    config,
                    geometry: self.geometry.clone(),
                };
                self.registry.register(entry.clone());
                self.current = Some(entry);
            }
        }
        tracing::debug!(?action, "droppable publish");
        action
    }

    /// Returns whether there was a registration to remove.
    pub fn unpublish(&mut self) -> bool {
        match self.current.take() {
            Some(entry) => {
                self.registry.unregister(&entry);
                true
            }
            None => false,
        }
    }
}

impl Drop for DroppablePublisher {
    fn drop(&mut self) {
        self.unpublish();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/publisher.rs"]
mod tests;
