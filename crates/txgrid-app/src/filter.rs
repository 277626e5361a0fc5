// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Record, Status};

/// Active row predicates. The merchant query is stored already trimmed and
/// lowercased; the two predicates are always AND-combined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    merchant_query: String,
    status: Option<Status>,
}

impl FilterState {
    pub fn new(merchant_input: &str, status: Option<Status>) -> Self {
        Self {
            merchant_query: normalize_query(merchant_input),
            status,
        }
    }

    pub fn with_merchant_query(&self, merchant_input: &str) -> Self {
        Self {
            merchant_query: normalize_query(merchant_input),
            status: self.status,
        }
    }

    pub fn with_status(&self, status: Option<Status>) -> Self {
        Self {
            merchant_query: self.merchant_query.clone(),
            status,
        }
    }

    pub fn merchant_query(&self) -> &str {
        &self.merchant_query
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_empty(&self) -> bool {
        self.merchant_query.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }
        self.merchant_query.is_empty()
            || record
                .merchant
                .to_lowercase()
                .contains(self.merchant_query.as_str())
    }
}

pub fn normalize_query(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Positions of the records passing `state`, in dataset order.
pub fn filter(records: &[Record], state: &FilterState) -> Vec<usize> {
    if state.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| state.matches(record))
        .map(|(position, _)| position)
        .collect()
}
