//! Where zones announce themselves to the drag engine.
//!
//! [`DroppableRegistry`] is the seam: the adapter only pushes entries through
//! it. [`InMemoryRegistry`] is the engine-side store most hosts use.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use crate::ui::core::channel::{Listeners, Subscription};
use crate::ui::core::geom::Rect;
use crate::ui::core::surface::SurfaceReader;

use super::types::{DragType, DroppableDescriptor, DroppableId, ZoneConfig};

/// Distinguishes successive registrations of the same droppable id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    pub fn next() -> Self {
        thread_local! {
            static NEXT: Cell<u64> = const { Cell::new(1) };
        }
        NEXT.with(|next| {
            let id = next.get();
            next.set(id + 1);
            Self(id)
        })
    }
}

#[derive(Clone, Debug)]
pub struct DroppableEntry {
    pub unique_id: EntryId,
    pub descriptor: DroppableDescriptor,
    pub config: ZoneConfig,
    pub geometry: SurfaceReader,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppableDimension {
    pub descriptor: DroppableDescriptor,
    pub config: ZoneConfig,
    pub rect: Rect,
}

impl DroppableEntry {
    /// Reads the zone's geometry now. `None` while its root surface is unmounted.
    pub fn dimension(&self) -> Option<DroppableDimension> {
        let rect = self.geometry.rect()?;
        Some(DroppableDimension {
            descriptor: self.descriptor.clone(),
            config: self.config,
            rect,
        })
    }
}

pub trait DroppableRegistry {
    fn register(&self, entry: DroppableEntry);

    /// Replaces `last` with `entry`; both carry the same `unique_id`.
    fn update(&self, entry: DroppableEntry, last: &DroppableEntry);

    fn unregister(&self, entry: &DroppableEntry);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    Added(DroppableId),
    Updated(DroppableId),
    Removed(DroppableId),
}

#[derive(Default)]
pub struct InMemoryRegistry {
    entries: RefCell<FxHashMap<DroppableId, DroppableEntry>>,
    listeners: Listeners<RegistryEvent>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_by_id(&self, id: &DroppableId) -> Option<DroppableEntry> {
        self.entries.borrow().get(id).cloned()
    }

    pub fn exists(&self, id: &DroppableId) -> bool {
        self.entries.borrow().contains_key(id)
    }

    /// Entries accepting `drag_type`, ordered by id.
    pub fn get_all_by_type(&self, drag_type: &DragType) -> Vec<DroppableEntry> {
        let mut out: Vec<DroppableEntry> = self
            .entries
            .borrow()
            .values()
            .filter(|e| &e.descriptor.drag_type == drag_type)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.descriptor.id.cmp(&b.descriptor.id));
        out
    }

    pub fn dimension(&self, id: &DroppableId) -> Option<DroppableDimension> {
        self.entries.borrow().get(id)?.dimension()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl FnMut(&RegistryEvent) + 'static) -> Subscription {
        self.listeners.subscribe(f)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl DroppableRegistry for InMemoryRegistry {
    fn register(&self, entry: DroppableEntry) {
        let id = entry.descriptor.id.clone();
        if let Some(prev) = self.entries.borrow_mut().insert(id.clone(), entry) {
            tracing::warn!(droppable_id = %id, replaced = ?prev.unique_id, "droppable id registered twice");
        }
        tracing::debug!(droppable_id = %id, "droppable registered");
        self.listeners.emit(&RegistryEvent::Added(id));
    }

    fn update(&self, entry: DroppableEntry, last: &DroppableEntry) {
        let id = entry.descriptor.id.clone();
        {
            let mut entries = self.entries.borrow_mut();
            let Some(current) = entries.get(&last.descriptor.id) else {
                return;
            };
            if current.unique_id != entry.unique_id {
                return;
            }
            entries.remove(&last.descriptor.id);
            entries.insert(id.clone(), entry);
        }
        tracing::debug!(droppable_id = %id, "droppable updated");
        self.listeners.emit(&RegistryEvent::Updated(id));
    }

    fn unregister(&self, entry: &DroppableEntry) {
        let id = &entry.descriptor.id;
        {
            let mut entries = self.entries.borrow_mut();
            // A stale entry must not evict a newer registration of the same id.
            match entries.get(id) {
                Some(current) if current.unique_id == entry.unique_id => {
                    entries.remove(id);
                }
                _ => return,
            }
        }
        tracing::debug!(droppable_id = %id, "droppable unregistered");
        self.listeners.emit(&RegistryEvent::Removed(id.clone()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/registry.rs"]
mod tests;
