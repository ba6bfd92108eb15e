//! Theme error types

use crate::schema::SemanticType;
use thiserror::Error;
use visage_paint::ColorParseError;

/// Errors building a configuration document
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The document text is not a JSON object
    #[error("Invalid configuration document: {0}")]
    InvalidDocument(String),
}

/// Why a single field value could not be coerced
///
/// Always recovered locally by leaving the field at its prior value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The raw value has the wrong JSON shape
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// A color string failed to parse
    #[error(transparent)]
    Color(#[from] ColorParseError),

    /// A color list had no parseable entry
    #[error("no valid color in list of {0}")]
    EmptyColorList(usize),

    /// A number that is not integral or does not fit
    #[error("{0} is not an integer in range")]
    NotInteger(String),

    /// A number that is not finite
    #[error("{0} is not a finite number")]
    NotFinite(String),

    /// A string outside the declared variants
    #[error("{value:?} is not one of {variants:?}")]
    UnknownVariant {
        value: String,
        variants: &'static [&'static str],
    },

    /// The semantic type has no native counterpart
    #[error("{0:?} fields are not supported")]
    Unsupported(SemanticType),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
