use std::fmt;
use thiserror::Error;

/// The user-facing input fields, used to make validation errors specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Year,
    Creator,
    Rating,
    Power,
    Popularity,
    Views,
    Rarity,
    Id,
    Query,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Year => "year",
            Field::Creator => "creator",
            Field::Rating => "rating",
            Field::Power => "power",
            Field::Popularity => "popularity",
            Field::Views => "views",
            Field::Rarity => "rarity",
            Field::Id => "ID",
            Field::Query => "search query",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("Empty input is not allowed ({0})")]
    EmptyInput(Field),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: Field, reason: String },

    #[error("Encoding error: {0}")]
    Encoding(#[from] bitcode::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("No IDs left after {0}")]
    IdsExhausted(u64),
}

impl CollectionError {
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        CollectionError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Validation failures are reported to the user and abort the current input flow.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CollectionError::EmptyInput(_) | CollectionError::InvalidField { .. }
        )
    }
}

/// The ID that follows `id`, or [`CollectionError::IdsExhausted`] at `u64::MAX`.
pub fn id_after(id: u64) -> Result<u64> {
    id.checked_add(1).ok_or(CollectionError::IdsExhausted(id))
}

pub type Result<T> = std::result::Result<T, CollectionError>;
