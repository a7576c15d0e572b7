//! Parsers that turn raw interactive strings into typed, range-checked fields.
//!
//! Every parser trims its input first and rejects blank input with
//! [`CollectionError::EmptyInput`]. Type and range failures come back as
//! [`CollectionError::InvalidField`] naming the field.

use crate::error::{CollectionError, Field, Result};
use crate::model::{RecordDraft, StatsEntry};
use std::ops::RangeInclusive;

pub const RATING_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const RARITY_RANGE: RangeInclusive<i64> = 1..=100;

pub fn non_empty(field: Field, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::EmptyInput(field));
    }
    Ok(trimmed.to_string())
}

pub fn integer(field: Field, raw: &str) -> Result<i64> {
    let value = non_empty(field, raw)?;
    value
        .parse()
        .map_err(|_| CollectionError::invalid(field, "must be an integer"))
}

pub fn year(raw: &str) -> Result<i32> {
    let value = non_empty(Field::Year, raw)?;
    value
        .parse()
        .map_err(|_| CollectionError::invalid(Field::Year, "must be an integer (e.g. 2021)"))
}

pub fn rating(raw: &str) -> Result<f64> {
    let value = non_empty(Field::Rating, raw)?;
    let rating: f64 = value
        .parse()
        .map_err(|_| CollectionError::invalid(Field::Rating, "must be a decimal number"))?;
    // NaN fails the range check as well
    if !RATING_RANGE.contains(&rating) {
        return Err(CollectionError::invalid(
            Field::Rating,
            "must be between 0.0 and 10.0",
        ));
    }
    Ok(rating)
}

pub fn rarity(raw: &str) -> Result<i64> {
    let rarity = integer(Field::Rarity, raw)?;
    if !RARITY_RANGE.contains(&rarity) {
        return Err(CollectionError::invalid(
            Field::Rarity,
            "must be between 1 and 100",
        ));
    }
    Ok(rarity)
}

pub fn record_id(raw: &str) -> Result<u64> {
    let value = non_empty(Field::Id, raw)?;
    value
        .parse()
        .map_err(|_| CollectionError::invalid(Field::Id, "must be a positive integer"))
}

/// Raw strings for a new record, in prompt order.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub name: String,
    pub category: String,
    pub year: String,
    pub creator: String,
    pub rating: String,
}

impl RawRecord {
    /// Validates fields in prompt order and stops at the first failure.
    pub fn parse(&self) -> Result<RecordDraft> {
        let name = non_empty(Field::Name, &self.name)?;
        let category = non_empty(Field::Category, &self.category)?;
        let year = year(&self.year)?;
        let creator = non_empty(Field::Creator, &self.creator)?;
        let rating = rating(&self.rating)?;
        Ok(RecordDraft {
            name,
            category,
            year,
            creator,
            rating,
        })
    }
}

/// Raw strings for a stats entry, in prompt order.
#[derive(Debug, Clone, Default)]
pub struct RawStats {
    pub power: String,
    pub popularity: String,
    pub views: String,
    pub rarity: String,
}

impl RawStats {
    pub fn parse(&self) -> Result<StatsEntry> {
        Ok(StatsEntry {
            power: integer(Field::Power, &self.power)?,
            popularity: integer(Field::Popularity, &self.popularity)?,
            views: integer(Field::Views, &self.views)?,
            rarity: rarity(&self.rarity)?,
        })
    }
}
