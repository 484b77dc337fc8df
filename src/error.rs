//! Load-time errors.
//!
//! Validation itself never fails: unknown regions and categories are ordinary
//! [`ValidationResult`](crate::ValidationResult) outcomes. Everything here is a
//! defect in the pattern data, and a table that hits one is never built.

use crate::category::Category;
use crate::patterns::inclusion::InclusionError;
use std::path::PathBuf;
use thiserror::Error;

/// Which of a category's two patterns an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Shape,
    Possible,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Shape => f.write_str("shape"),
            PatternKind::Possible => f.write_str("possible"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    /// Table source is not valid JSON or does not follow the table schema.
    #[error("malformed pattern table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read pattern table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("region code must not be empty")]
    EmptyRegionCode,

    #[error("region {region}: unknown category '{name}'")]
    UnknownCategory { region: String, name: String },

    /// Two category keys name the same category, e.g. `general` and `General`.
    #[error("region {region}: category {category} is defined more than once")]
    DuplicateCategory { region: String, category: Category },

    #[error("region {region}: the general category is required")]
    MissingGeneral { region: String },

    #[error("region {region}: category {category} has no possible pattern and general defines none to inherit")]
    MissingPossible { region: String, category: Category },

    #[error("region {region}: {kind} pattern of {category} does not compile: {source}")]
    Pattern {
        region: String,
        category: Category,
        kind: PatternKind,
        #[source]
        source: regex::Error,
    },

    #[error("region {region}: cannot decide whether the possible pattern of {category} covers its shape: {source}")]
    Inclusion {
        region: String,
        category: Category,
        #[source]
        source: InclusionError,
    },

    /// The shape pattern accepts a string its possible pattern rejects.
    #[error("region {region}: possible pattern of {category} rejects '{witness}' accepted by its shape pattern")]
    NotSuperset {
        region: String,
        category: Category,
        witness: String,
    },

    #[error("region {region}: example '{example}' of {category} fails its {kind} pattern")]
    Example {
        region: String,
        category: Category,
        kind: PatternKind,
        example: String,
    },
}
