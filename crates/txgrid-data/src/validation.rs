// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use txgrid_app::money::{amount_to_cents, cents_to_amount};
use txgrid_app::{Category, MoneyError, Record, RecordId, Status};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid timestamp {0:?}")]
    InvalidDate(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("unknown status {0:?}")]
    UnknownStatus(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// One element of the dataset array as it appears on the wire. Every field
/// is optional here so a missing one is reported against its record index.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WireRecord<'a> {
    pub id: RecordId,
    pub date: &'a str,
    pub merchant: &'a str,
    pub category: Category,
    pub amount: f64,
    pub status: Status,
    pub description: &'a str,
}

impl<'a> From<&'a Record> for WireRecord<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            id: record.id,
            date: &record.date,
            merchant: &record.merchant,
            category: record.category,
            amount: cents_to_amount(record.amount_cents),
            status: record.status,
            description: &record.description,
        }
    }
}

pub fn validate_record(raw: RawRecord) -> ValidationResult<Record> {
    let id = raw.id.ok_or(ValidationError::MissingField("id"))?;
    let date = raw.date.ok_or(ValidationError::MissingField("date"))?;
    validate_timestamp(&date)?;
    let merchant = raw.merchant.ok_or(ValidationError::MissingField("merchant"))?;
    let category = raw
        .category
        .ok_or(ValidationError::MissingField("category"))?;
    let category = Category::parse(&category).ok_or(ValidationError::UnknownCategory(category))?;
    let amount = raw.amount.ok_or(ValidationError::MissingField("amount"))?;
    let amount_cents = amount_to_cents(amount)?;
    let status = raw.status.ok_or(ValidationError::MissingField("status"))?;
    let status = Status::parse(&status).ok_or(ValidationError::UnknownStatus(status))?;
    let description = raw
        .description
        .ok_or(ValidationError::MissingField("description"))?;

    Ok(Record {
        id: RecordId::new(id),
        date,
        merchant,
        category,
        amount_cents,
        status,
        description,
    })
}

pub fn validate_timestamp(input: &str) -> ValidationResult<OffsetDateTime> {
    OffsetDateTime::parse(input, &Rfc3339)
        .map_err(|_| ValidationError::InvalidDate(input.to_owned()))
}
