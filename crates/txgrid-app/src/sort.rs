// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{ColumnKey, FieldType, FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Single-column sort. A key without a direction (or the reverse) is not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    By {
        key: ColumnKey,
        direction: SortDirection,
    },
}

impl SortState {
    pub const fn key(self) -> Option<ColumnKey> {
        match self {
            Self::Unsorted => None,
            Self::By { key, .. } => Some(key),
        }
    }

    pub const fn direction(self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::By { direction, .. } => Some(direction),
        }
    }

    /// Header-click cycle: new column ascends, ascending flips to descending,
    /// descending clears.
    pub fn toggled(self, clicked: ColumnKey) -> Self {
        match self {
            Self::By {
                key,
                direction: SortDirection::Asc,
            } if key == clicked => Self::By {
                key,
                direction: SortDirection::Desc,
            },
            Self::By {
                key,
                direction: SortDirection::Desc,
            } if key == clicked => Self::Unsorted,
            _ => Self::By {
                key: clicked,
                direction: SortDirection::Asc,
            },
        }
    }

    pub fn indicator(self, column: ColumnKey) -> &'static str {
        match self {
            Self::By {
                key,
                direction: SortDirection::Asc,
            } if key == column => " ▲",
            Self::By {
                key,
                direction: SortDirection::Desc,
            } if key == column => " ▼",
            _ => "",
        }
    }
}

/// Case-folded primary key with a tie-break that puts lowercase before
/// uppercase, approximating default locale collation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    folded: String,
    tie: String,
}

impl CollationKey {
    fn new(value: &str) -> Self {
        let tie = value
            .chars()
            .map(|ch| {
                if ch.is_lowercase() {
                    ch.to_ascii_uppercase()
                } else if ch.is_uppercase() {
                    ch.to_ascii_lowercase()
                } else {
                    ch
                }
            })
            .collect();
        Self {
            folded: value.to_lowercase(),
            tie,
        }
    }
}

// Variant order is significant: missing values sort first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Missing,
    Number(i64),
    Text(CollationKey),
}

/// Total order used for sorting one column: a missing value sorts first,
/// numeric columns compare numerically, everything else compares as collated
/// text.
fn sort_key(value: Option<&FieldValue<'_>>, field_type: FieldType) -> SortKey {
    let Some(value) = value else {
        return SortKey::Missing;
    };
    if field_type.is_numeric()
        && let Some(number) = value.as_number()
    {
        return SortKey::Number(number);
    }
    SortKey::Text(CollationKey::new(&value.display()))
}

/// Orders the filtered positions by `state`.
///
/// The ascending order is computed with a stable sort and, for descending
/// order, the whole result is reversed afterwards. Records that compare equal
/// therefore appear in reverse filtered order under a descending sort. This is
/// relied upon by callers and must not be replaced with a reversed comparator.
pub fn sort(records: &[Record], filtered: &[usize], state: SortState) -> Vec<usize> {
    let mut ordered = filtered.to_vec();
    let SortState::By { key, direction } = state else {
        return ordered;
    };

    let field_type = key.field_type();
    ordered.sort_by_cached_key(|position| {
        let value = records[*position].field(key);
        sort_key(Some(&value), field_type)
    });
    if direction == SortDirection::Desc {
        ordered.reverse();
    }
    ordered
}
