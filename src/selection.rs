//! Selected identifiers and their display details.
//!
//! `SelectionState` is treated as a value: every mutation produces a new
//! state, so the id list and the details list always change together.

use crate::model::{Identifier, Item};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    ids: Vec<Identifier>,
    details: Vec<Item>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a hydration result. Details are kept only for requested
    /// ids; requested ids the source did not return get an empty name.
    pub fn hydrated(ids: Vec<Identifier>, items: Vec<Item>) -> Self {
        let details = ids
            .iter()
            .map(|id| {
                items
                    .iter()
                    .find(|item| item.id == *id)
                    .cloned()
                    .unwrap_or_else(|| Item::new(id.clone(), ""))
            })
            .collect();

        Self { ids, details }
    }

    pub fn ids(&self) -> &[Identifier] {
        &self.ids
    }

    pub fn details(&self) -> &[Item] {
        &self.details
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.ids.contains(id)
    }

    /// Add the id if absent, remove it if present.
    pub fn toggled(&self, id: &Identifier, name: &str) -> Self {
        if self.contains(id) {
            Self {
                ids: self.ids.iter().filter(|i| *i != id).cloned().collect(),
                details: self
                    .details
                    .iter()
                    .filter(|item| item.id != *id)
                    .cloned()
                    .collect(),
            }
        } else {
            let mut ids = self.ids.clone();
            ids.push(id.clone());
            let mut details = self.details.clone();
            details.push(Item::new(id.clone(), name));
            Self { ids, details }
        }
    }

    /// Keep only ids present in `candidates`.
    pub fn pruned_to(&self, candidates: &[Item]) -> Self {
        let present = |id: &Identifier| candidates.iter().any(|item| item.id == *id);
        Self {
            ids: self.ids.iter().filter(|id| present(id)).cloned().collect(),
            details: self
                .details
                .iter()
                .filter(|item| present(&item.id))
                .cloned()
                .collect(),
        }
    }
}
