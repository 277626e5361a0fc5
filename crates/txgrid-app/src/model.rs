// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::ids::RecordId;
use crate::money::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Completed,
    Pending,
    Failed,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Completed, Self::Pending, Self::Failed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Completed" => Some(Self::Completed),
            "Pending" => Some(Self::Pending),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Utilities,
    Entertainment,
    Travel,
    Healthcare,
    Shopping,
    Dining,
    Subscriptions,
    Salary,
    Investment,
}

impl Category {
    pub const ALL: [Self; 10] = [
        Self::Groceries,
        Self::Utilities,
        Self::Entertainment,
        Self::Travel,
        Self::Healthcare,
        Self::Shopping,
        Self::Dining,
        Self::Subscriptions,
        Self::Salary,
        Self::Investment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Travel => "Travel",
            Self::Healthcare => "Healthcare",
            Self::Shopping => "Shopping",
            Self::Dining => "Dining",
            Self::Subscriptions => "Subscriptions",
            Self::Salary => "Salary",
            Self::Investment => "Investment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

/// Declared storage type of a column. Comparison dispatches on this, never on
/// the runtime shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Timestamp,
    Text,
    Category,
    Money,
    Status,
}

impl FieldType {
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Money)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    Id,
    Date,
    Merchant,
    Category,
    Amount,
    Status,
    Description,
}

impl ColumnKey {
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::Date,
        Self::Merchant,
        Self::Category,
        Self::Amount,
        Self::Status,
        Self::Description,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Date => "date",
            Self::Merchant => "merchant",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::Status => "status",
            Self::Description => "description",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Date => "Date",
            Self::Merchant => "Merchant",
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Status => "Status",
            Self::Description => "Description",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }

    pub const fn field_type(self) -> FieldType {
        match self {
            Self::Id => FieldType::Integer,
            Self::Date => FieldType::Timestamp,
            Self::Merchant | Self::Description => FieldType::Text,
            Self::Category => FieldType::Category,
            Self::Amount => FieldType::Money,
            Self::Status => FieldType::Status,
        }
    }

    /// Identity is permanent; everything else may be overwritten by an edit.
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Id)
    }
}

/// Borrowed view of one cell, tagged by the column's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Integer(i64),
    Money(i64),
    Text(&'a str),
    Category(Category),
    Status(Status),
}

impl FieldValue<'_> {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Integer(value) | Self::Money(value) => Some(*value),
            _ => None,
        }
    }

    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Money(cents) => Cow::Owned(format_amount(*cents)),
            Self::Text(value) => Cow::Borrowed(value),
            Self::Category(category) => Cow::Borrowed(category.as_str()),
            Self::Status(status) => Cow::Borrowed(status.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub date: String,
    pub merchant: String,
    pub category: Category,
    pub amount_cents: i64,
    pub status: Status,
    pub description: String,
}

impl Record {
    pub fn field(&self, column: ColumnKey) -> FieldValue<'_> {
        match column {
            ColumnKey::Id => FieldValue::Integer(self.id.get()),
            ColumnKey::Date => FieldValue::Text(&self.date),
            ColumnKey::Merchant => FieldValue::Text(&self.merchant),
            ColumnKey::Category => FieldValue::Category(self.category),
            ColumnKey::Amount => FieldValue::Money(self.amount_cents),
            ColumnKey::Status => FieldValue::Status(self.status),
            ColumnKey::Description => FieldValue::Text(&self.description),
        }
    }

    /// The string an edit session starts from for this cell.
    pub fn edit_text(&self, column: ColumnKey) -> String {
        self.field(column).display().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, ColumnKey, FieldType, FieldValue, Record, Status};
    use crate::RecordId;

    fn sample() -> Record {
        Record {
            id: RecordId::new(9),
            date: "2025-03-01T10:00:00.000Z".to_owned(),
            merchant: "Merchant 42".to_owned(),
            category: Category::Dining,
            amount_cents: -1_250,
            status: Status::Pending,
            description: "Transaction 9 at abc".to_owned(),
        }
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        for key in ColumnKey::ALL {
            assert_eq!(ColumnKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(Status::parse("completed"), None);
    }

    #[test]
    fn schema_declares_numeric_columns() {
        let numeric = ColumnKey::ALL
            .into_iter()
            .filter(|key| key.field_type().is_numeric())
            .collect::<Vec<_>>();
        assert_eq!(numeric, vec![ColumnKey::Id, ColumnKey::Amount]);
        assert_eq!(ColumnKey::Date.field_type(), FieldType::Timestamp);
    }

    #[test]
    fn only_id_is_read_only() {
        let read_only = ColumnKey::ALL
            .into_iter()
            .filter(|key| !key.is_editable())
            .collect::<Vec<_>>();
        assert_eq!(read_only, vec![ColumnKey::Id]);
    }

    #[test]
    fn field_access_follows_column_type() {
        let record = sample();
        assert_eq!(record.field(ColumnKey::Id), FieldValue::Integer(9));
        assert_eq!(record.field(ColumnKey::Amount), FieldValue::Money(-1_250));
        assert_eq!(record.field(ColumnKey::Amount).as_number(), Some(-1_250));
        assert_eq!(record.field(ColumnKey::Merchant).as_number(), None);
        assert_eq!(record.edit_text(ColumnKey::Amount), "-12.50");
        assert_eq!(record.edit_text(ColumnKey::Status), "Pending");
    }
}
