// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::store::{DatasetStore, EditError, EditOutcome};
use crate::{ColumnKey, RecordId};

/// What ended an edit at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTrigger {
    Confirm,
    Cancel,
    FocusLost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingCell {
    pub row_id: RecordId,
    pub column: ColumnKey,
    pub pending_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(EditingCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// Nothing was being edited.
    NoSession,
    Committed {
        cell: EditingCell,
        outcome: EditOutcome,
    },
    Cancelled(EditingCell),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn cell(&self) -> Option<&EditingCell> {
        match self {
            Self::Idle => None,
            Self::Editing(cell) => Some(cell),
        }
    }

    pub fn is_editing_cell(&self, row_id: RecordId, column: ColumnKey) -> bool {
        self.cell()
            .is_some_and(|cell| cell.row_id == row_id && cell.column == column)
    }

    /// Begins editing a cell. An edit already in progress is committed first;
    /// if that commit is rejected the earlier edit stays active and the error
    /// is returned.
    pub fn start(
        &mut self,
        store: &mut DatasetStore,
        row_id: RecordId,
        column: ColumnKey,
        initial_value: impl Into<String>,
    ) -> Result<EditResult, EditError> {
        if !column.is_editable() {
            return Err(EditError::ReadOnly(column));
        }
        let previous = self.commit(store)?;
        *self = Self::Editing(EditingCell {
            row_id,
            column,
            pending_value: initial_value.into(),
        });
        Ok(previous)
    }

    /// Replaces the pending value. Ignored while idle.
    pub fn update(&mut self, value: impl Into<String>) {
        if let Self::Editing(cell) = self {
            cell.pending_value = value.into();
        }
    }

    /// Writes the pending value through the store. On a rejected value the
    /// session keeps editing so the value can be corrected.
    pub fn commit(&mut self, store: &mut DatasetStore) -> Result<EditResult, EditError> {
        let Self::Editing(cell) = &*self else {
            return Ok(EditResult::NoSession);
        };
        let outcome = store.apply_edit(cell.row_id, cell.column, &cell.pending_value)?;
        let Self::Editing(cell) = std::mem::take(self) else {
            return Ok(EditResult::NoSession);
        };
        Ok(EditResult::Committed { cell, outcome })
    }

    pub fn cancel(&mut self) -> EditResult {
        match std::mem::take(self) {
            Self::Idle => EditResult::NoSession,
            Self::Editing(cell) => EditResult::Cancelled(cell),
        }
    }

    pub fn finish(
        &mut self,
        store: &mut DatasetStore,
        trigger: EditTrigger,
    ) -> Result<EditResult, EditError> {
        match trigger {
            EditTrigger::Confirm | EditTrigger::FocusLost => self.commit(store),
            EditTrigger::Cancel => Ok(self.cancel()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditResult, EditSession, EditTrigger};
    use crate::store::{DatasetStore, EditError, EditOutcome};
    use crate::{Category, ColumnKey, Record, RecordId, Status};
    use anyhow::Result;

    fn store() -> Result<DatasetStore> {
        let records = (1..=10)
            .map(|id| Record {
                id: RecordId::new(id),
                date: "2025-06-01T12:00:00.000Z".to_owned(),
                merchant: format!("Merchant {id}"),
                category: Category::Utilities,
                amount_cents: 1_000,
                status: Status::Pending,
                description: format!("Transaction {id}"),
            })
            .collect();
        Ok(DatasetStore::from_records(records)?)
    }

    fn merchant(store: &DatasetStore, id: i64) -> String {
        store
            .get(RecordId::new(id))
            .map(|record| record.merchant.clone())
            .unwrap_or_default()
    }

    #[test]
    fn confirm_commits_pending_value() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();

        session.start(&mut store, RecordId::new(9), ColumnKey::Merchant, "Merchant 9")?;
        session.update("Acme");
        let result = session.finish(&mut store, EditTrigger::Confirm)?;

        assert!(matches!(result, EditResult::Committed { .. }));
        assert_eq!(session, EditSession::Idle);
        assert_eq!(merchant(&store, 9), "Acme");
        Ok(())
    }

    #[test]
    fn cancel_discards_pending_value() -> Result<()> {
        let mut store = store()?;
        let version = store.version();
        let mut session = EditSession::default();

        session.start(&mut store, RecordId::new(2), ColumnKey::Merchant, "Merchant 2")?;
        session.update("Merchant 2!");
        let result = session.finish(&mut store, EditTrigger::Cancel)?;

        assert!(matches!(result, EditResult::Cancelled(ref cell) if cell.pending_value == "Merchant 2!"));
        assert!(!session.is_editing());
        assert_eq!(merchant(&store, 2), "Merchant 2");
        assert_eq!(store.version(), version);
        Ok(())
    }

    #[test]
    fn focus_loss_commits() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        session.start(&mut store, RecordId::new(4), ColumnKey::Merchant, "")?;
        session.update("Blurred");
        session.finish(&mut store, EditTrigger::FocusLost)?;
        assert_eq!(merchant(&store, 4), "Blurred");
        Ok(())
    }

    #[test]
    fn starting_a_new_edit_commits_the_previous_one() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        session.start(&mut store, RecordId::new(1), ColumnKey::Merchant, "First")?;

        let previous = session.start(&mut store, RecordId::new(2), ColumnKey::Merchant, "x")?;
        assert!(matches!(
            previous,
            EditResult::Committed {
                outcome: EditOutcome::Applied { .. },
                ..
            }
        ));
        assert_eq!(merchant(&store, 1), "First");
        assert!(session.is_editing_cell(RecordId::new(2), ColumnKey::Merchant));
        Ok(())
    }

    #[test]
    fn rejected_commit_keeps_session_open() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        session.start(&mut store, RecordId::new(3), ColumnKey::Amount, "10.00")?;
        session.update("ten dollars");

        let error = session
            .finish(&mut store, EditTrigger::Confirm)
            .expect_err("bad amount should be rejected");
        assert!(matches!(error, EditError::InvalidValue { .. }));
        assert!(session.is_editing_cell(RecordId::new(3), ColumnKey::Amount));

        let blocked = session.start(&mut store, RecordId::new(5), ColumnKey::Merchant, "");
        assert!(blocked.is_err());
        assert!(session.is_editing_cell(RecordId::new(3), ColumnKey::Amount));

        session.update("-7.5");
        session.finish(&mut store, EditTrigger::Confirm)?;
        assert_eq!(
            store.get(RecordId::new(3)).map(|record| record.amount_cents),
            Some(-750)
        );
        Ok(())
    }

    #[test]
    fn idle_session_ignores_updates_and_finishes_as_no_session() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        session.update("ignored");
        assert_eq!(session, EditSession::Idle);
        assert_eq!(
            session.finish(&mut store, EditTrigger::Confirm)?,
            EditResult::NoSession
        );
        assert_eq!(session.cancel(), EditResult::NoSession);
        Ok(())
    }

    #[test]
    fn id_column_cannot_be_edited() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        let error = session
            .start(&mut store, RecordId::new(1), ColumnKey::Id, "1")
            .expect_err("id is read-only");
        assert_eq!(error, EditError::ReadOnly(ColumnKey::Id));
        assert!(!session.is_editing());
        Ok(())
    }

    #[test]
    fn committing_a_vanished_row_is_a_no_op() -> Result<()> {
        let mut store = store()?;
        let mut session = EditSession::default();
        session.start(&mut store, RecordId::new(404), ColumnKey::Merchant, "x")?;
        let result = session.finish(&mut store, EditTrigger::Confirm)?;
        assert!(matches!(
            result,
            EditResult::Committed {
                outcome: EditOutcome::MissingRow,
                ..
            }
        ));
        assert!(!session.is_editing());
        Ok(())
    }
}
