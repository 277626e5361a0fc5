// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;

use crate::RecordId;

/// Selected record ids. Membership is independent of filtering, sorting and
/// scrolling; nothing here is pruned when a row leaves the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    ids: HashSet<RecordId>,
}

impl SelectionState {
    pub fn from_ids(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Plain click selects only `id`; a modifier click toggles `id` and
    /// leaves every other member alone.
    pub fn clicked(&self, id: RecordId, modifier_held: bool) -> Self {
        if !modifier_held {
            return Self::from_ids([id]);
        }
        let mut ids = self.ids.clone();
        if !ids.remove(&id) {
            ids.insert(id);
        }
        Self { ids }
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.ids.iter().copied()
    }
}
