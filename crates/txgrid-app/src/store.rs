// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::money::parse_amount_cents;
use crate::{Category, ColumnKey, Record, RecordId, Status};

/// Change marker for the dataset. Every accepted mutation yields a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DatasetVersion(u64);

impl DatasetVersion {
    pub const fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("column {} is read-only", .0.as_str())]
    ReadOnly(ColumnKey),
    #[error("invalid {} value {value:?}: {reason}", .column.as_str())]
    InvalidValue {
        column: ColumnKey,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied {
        version: DatasetVersion,
        previous: String,
    },
    /// The target id is not in the dataset; nothing changed.
    MissingRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate record id {id} at positions {first} and {second}")]
pub struct DuplicateIdError {
    pub id: RecordId,
    pub first: usize,
    pub second: usize,
}

/// Owns the authoritative record sequence. Records are only ever touched
/// through [`DatasetStore::apply_edit`]; derived views hold positions into
/// `records`, which stay valid because rows are never inserted or removed.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<Record>,
    positions: HashMap<RecordId, usize>,
    version: DatasetVersion,
}

impl DatasetStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Result<Self, DuplicateIdError> {
        let positions = index_positions(&records)?;
        Ok(Self {
            records,
            positions,
            version: DatasetVersion::default().next(),
        })
    }

    /// Swaps in a freshly loaded dataset in one step.
    pub fn replace(&mut self, records: Vec<Record>) -> Result<DatasetVersion, DuplicateIdError> {
        let positions = index_positions(&records)?;
        self.records = records;
        self.positions = positions;
        self.version = self.version.next();
        Ok(self.version)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> DatasetVersion {
        self.version
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.position_of(id).map(|position| &self.records[position])
    }

    pub fn apply_edit(
        &mut self,
        id: RecordId,
        column: ColumnKey,
        value: &str,
    ) -> Result<EditOutcome, EditError> {
        if !column.is_editable() {
            return Err(EditError::ReadOnly(column));
        }
        let Some(position) = self.position_of(id) else {
            return Ok(EditOutcome::MissingRow);
        };

        let update = parse_field(column, value)?;
        let record = &mut self.records[position];
        let previous = record.edit_text(column);
        match update {
            FieldUpdate::Date(date) => record.date = date,
            FieldUpdate::Merchant(merchant) => record.merchant = merchant,
            FieldUpdate::Description(description) => record.description = description,
            FieldUpdate::Category(category) => record.category = category,
            FieldUpdate::Amount(cents) => record.amount_cents = cents,
            FieldUpdate::Status(status) => record.status = status,
        }
        self.version = self.version.next();
        Ok(EditOutcome::Applied {
            version: self.version,
            previous,
        })
    }
}

enum FieldUpdate {
    Date(String),
    Merchant(String),
    Description(String),
    Category(Category),
    Amount(i64),
    Status(Status),
}

fn parse_field(column: ColumnKey, value: &str) -> Result<FieldUpdate, EditError> {
    let invalid = |reason| EditError::InvalidValue {
        column,
        value: value.to_owned(),
        reason,
    };
    match column {
        ColumnKey::Id => Err(EditError::ReadOnly(column)),
        ColumnKey::Date => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(invalid("date cannot be empty"));
            }
            OffsetDateTime::parse(trimmed, &Rfc3339)
                .map_err(|_| invalid("expected an RFC 3339 timestamp"))?;
            Ok(FieldUpdate::Date(trimmed.to_owned()))
        }
        ColumnKey::Merchant => Ok(FieldUpdate::Merchant(value.to_owned())),
        ColumnKey::Description => Ok(FieldUpdate::Description(value.to_owned())),
        ColumnKey::Category => Category::parse(value.trim())
            .map(FieldUpdate::Category)
            .ok_or_else(|| invalid("unknown category")),
        ColumnKey::Amount => parse_amount_cents(value)
            .map(FieldUpdate::Amount)
            .map_err(|_| invalid("expected a decimal amount")),
        ColumnKey::Status => Status::parse(value.trim())
            .map(FieldUpdate::Status)
            .ok_or_else(|| invalid("expected Completed, Pending, or Failed")),
    }
}

fn index_positions(records: &[Record]) -> Result<HashMap<RecordId, usize>, DuplicateIdError> {
    let mut positions = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if let Some(first) = positions.insert(record.id, position) {
            return Err(DuplicateIdError {
                id: record.id,
                first,
                second: position,
            });
        }
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::{DatasetStore, DatasetVersion, DuplicateIdError, EditError, EditOutcome};
    use crate::{Category, ColumnKey, Record, RecordId, Status};
    use anyhow::Result;

    fn record(id: i64, merchant: &str) -> Record {
        Record {
            id: RecordId::new(id),
            date: format!("2025-01-{:02}T00:00:00.000Z", id % 28 + 1),
            merchant: merchant.to_owned(),
            category: Category::Groceries,
            amount_cents: id * 100,
            status: Status::Completed,
            description: format!("Transaction {id}"),
        }
    }

    fn store() -> Result<DatasetStore> {
        Ok(DatasetStore::from_records(
            (1..=5).map(|id| record(id, &format!("Merchant {id}"))).collect(),
        )?)
    }

    #[test]
    fn edit_replaces_exactly_one_field() -> Result<()> {
        let mut store = store()?;
        let before = store.records().to_vec();
        let version = store.version();

        let outcome = store.apply_edit(RecordId::new(3), ColumnKey::Merchant, "Acme")?;
        assert!(matches!(
            outcome,
            EditOutcome::Applied { ref previous, .. } if previous == "Merchant 3"
        ));
        assert!(store.version() > version);

        for (old, new) in before.iter().zip(store.records()) {
            if old.id == RecordId::new(3) {
                let mut expected = old.clone();
                expected.merchant = "Acme".to_owned();
                assert_eq!(new, &expected);
            } else {
                assert_eq!(new, old);
            }
        }
        Ok(())
    }

    #[test]
    fn edit_of_missing_row_is_a_silent_no_op() -> Result<()> {
        let mut store = store()?;
        let before = store.records().to_vec();
        let version = store.version();

        let outcome = store.apply_edit(RecordId::new(99), ColumnKey::Merchant, "Ghost")?;
        assert_eq!(outcome, EditOutcome::MissingRow);
        assert_eq!(store.version(), version);
        assert_eq!(store.records(), before.as_slice());
        Ok(())
    }

    #[test]
    fn typed_columns_parse_their_values() -> Result<()> {
        let mut store = store()?;
        let id = RecordId::new(2);
        store.apply_edit(id, ColumnKey::Amount, "-1,234.5")?;
        store.apply_edit(id, ColumnKey::Status, "Failed")?;
        store.apply_edit(id, ColumnKey::Category, "Travel")?;

        let edited = store.get(id).expect("record 2 exists");
        assert_eq!(edited.amount_cents, -123_450);
        assert_eq!(edited.status, Status::Failed);
        assert_eq!(edited.category, Category::Travel);
        Ok(())
    }

    #[test]
    fn invalid_values_leave_dataset_untouched() -> Result<()> {
        let mut store = store()?;
        let version = store.version();

        let error = store
            .apply_edit(RecordId::new(1), ColumnKey::Amount, "twelve")
            .expect_err("non-numeric amount should fail");
        assert!(matches!(
            error,
            EditError::InvalidValue {
                column: ColumnKey::Amount,
                ..
            }
        ));
        assert_eq!(
            store.apply_edit(RecordId::new(1), ColumnKey::Id, "7"),
            Err(EditError::ReadOnly(ColumnKey::Id))
        );
        assert_eq!(store.version(), version);
        assert_eq!(store.get(RecordId::new(1)).map(|r| r.amount_cents), Some(100));
        Ok(())
    }

    #[test]
    fn date_edits_must_be_timestamps() -> Result<()> {
        let mut store = store()?;
        let id = RecordId::new(4);
        let version = store.version();

        for bad in ["yesterday", "2025-13-01T00:00:00Z", "2025-01-05"] {
            let error = store
                .apply_edit(id, ColumnKey::Date, bad)
                .expect_err("non-timestamp date should fail");
            assert!(matches!(
                error,
                EditError::InvalidValue {
                    column: ColumnKey::Date,
                    ..
                }
            ));
        }
        assert_eq!(store.version(), version);

        store.apply_edit(id, ColumnKey::Date, " 2025-07-04T09:30:00.000Z ")?;
        assert_eq!(
            store.get(id).map(|record| record.date.as_str()),
            Some("2025-07-04T09:30:00.000Z")
        );
        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = DatasetStore::from_records(vec![record(1, "a"), record(2, "b"), record(1, "c")])
            .expect_err("duplicate id should fail");
        assert_eq!(
            error,
            DuplicateIdError {
                id: RecordId::new(1),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn replace_bumps_version_and_reindexes() -> Result<()> {
        let mut store = DatasetStore::empty();
        assert_eq!(store.version(), DatasetVersion::default());
        assert!(store.is_empty());

        let version = store.replace(vec![record(10, "x"), record(11, "y")])?;
        assert_eq!(version, store.version());
        assert_eq!(store.position_of(RecordId::new(11)), Some(1));
        assert_eq!(store.len(), 2);
        Ok(())
    }
}
