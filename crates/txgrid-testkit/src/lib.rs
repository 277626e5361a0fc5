// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, Time};
use txgrid_app::{Category, Record, RecordId, Status};

/// Merchants are drawn from `Merchant 1..=MERCHANT_COUNT`.
pub const MERCHANT_COUNT: usize = 5_000;

const REFERENCE_YEAR: i32 = 2026;
const DATE_SPREAD_DAYS: i64 = 365;
const MIN_AMOUNT_CENTS: i64 = -100_000;
const MAX_AMOUNT_CENTS: i64 = 399_999;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible transactions. The same seed always yields
/// the same sequence.
#[derive(Debug, Clone)]
pub struct TransactionFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl TransactionFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn transaction(&mut self, id: i64) -> Record {
        let days_back = self.int_range_i64(0, DATE_SPREAD_DAYS - 1);
        let date = reference_now() - Duration::days(days_back);
        let merchant = format!("Merchant {}", self.rng.int_n(MERCHANT_COUNT) + 1);
        let category = Category::ALL[self.rng.int_n(Category::ALL.len())];
        let amount_cents = self.int_range_i64(MIN_AMOUNT_CENTS, MAX_AMOUNT_CENTS);
        let status = Status::ALL[self.rng.int_n(Status::ALL.len())];
        let description = format!("Transaction {id} at {}", self.token(8));

        Record {
            id: RecordId::new(id),
            date: format_timestamp(date),
            merchant,
            category,
            amount_cents,
            status,
            description,
        }
    }

    /// Records with ids `1..=count`, generated lazily.
    pub fn transactions(&mut self, count: usize) -> impl Iterator<Item = Record> + '_ {
        (1..=count as i64).map(move |id| self.transaction(id))
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(BASE36[self.rng.int_n(BASE36.len())]))
            .collect()
    }
}

pub fn sample_records(count: usize, seed: u64) -> Vec<Record> {
    TransactionFaker::new(seed).transactions(count).collect()
}

/// Five fixed records with merchants `Merchant 1..=5`.
pub fn fixture_records() -> Vec<Record> {
    let statuses = [
        Status::Completed,
        Status::Pending,
        Status::Failed,
        Status::Completed,
        Status::Pending,
    ];
    statuses
        .into_iter()
        .enumerate()
        .map(|(index, status)| {
            let id = index as i64 + 1;
            Record {
                id: RecordId::new(id),
                date: format!("2026-01-{:02}T09:30:00.000Z", id),
                merchant: format!("Merchant {id}"),
                category: Category::ALL[index],
                amount_cents: id * 1_111,
                status,
                description: format!("Transaction {id} at fixture"),
            }
        })
        .collect()
}

pub fn temp_dataset_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("transactions.json");
    Ok((dir, path))
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
    .expect("timestamp format has no fallible components")
}

fn reference_now() -> OffsetDateTime {
    let date =
        Date::from_calendar_date(REFERENCE_YEAR, Month::January, 1).expect("valid calendar date");
    let noon = Time::from_hms(12, 0, 0).expect("valid noon");
    date.with_time(noon).assume_utc()
}

#[cfg(test)]
mod tests {
    use super::{
        MAX_AMOUNT_CENTS, MIN_AMOUNT_CENTS, TransactionFaker, fixture_records, sample_records,
        temp_dataset_path,
    };
    use std::collections::BTreeSet;
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    #[test]
    fn same_seed_same_records() {
        assert_eq!(sample_records(50, 42), sample_records(50, 42));
        assert_ne!(sample_records(50, 42), sample_records(50, 43));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(TransactionFaker::new(0).seed(), 1);
        assert_eq!(sample_records(5, 0), sample_records(5, 1));
    }

    #[test]
    fn fields_stay_in_range() {
        let records = sample_records(2_000, 7);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.id.get(), index as i64 + 1);
            assert!((MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS).contains(&record.amount_cents));

            let number = record
                .merchant
                .strip_prefix("Merchant ")
                .and_then(|rest| rest.parse::<usize>().ok())
                .expect("merchant follows the naming pattern");
            assert!((1..=super::MERCHANT_COUNT).contains(&number));

            assert!(
                record
                    .description
                    .starts_with(&format!("Transaction {} at ", record.id))
            );
            OffsetDateTime::parse(&record.date, &Rfc3339).expect("date is RFC 3339");
        }
    }

    #[test]
    fn variety_across_records() {
        let records = sample_records(500, 3);
        let statuses = records.iter().map(|r| r.status).collect::<BTreeSet<_>>();
        let categories = records.iter().map(|r| r.category).collect::<BTreeSet<_>>();
        assert_eq!(statuses.len(), 3);
        assert_eq!(categories.len(), 10);
        assert!(records.iter().any(|r| r.amount_cents < 0));
    }

    #[test]
    fn fixture_has_five_merchants() {
        let records = fixture_records();
        assert_eq!(records.len(), 5);
        assert_eq!(records[2].merchant, "Merchant 3");
    }

    #[test]
    fn temp_dataset_path_lives_in_temp_dir() -> anyhow::Result<()> {
        let (dir, path) = temp_dataset_path()?;
        assert!(path.starts_with(dir.path()));
        Ok(())
    }
}
