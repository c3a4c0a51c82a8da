use thiserror::Error;

/// Why a content bundle was rejected
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content bundle is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("too many particle types for u8 ids: {0}")]
    TooManyTypes(usize),

    #[error("particle type key must not be empty")]
    EmptyKey,

    #[error("particle type key {0:?} is reserved")]
    ReservedKey(String),

    #[error("duplicate particle type key: {0}")]
    DuplicateKey(String),

    #[error("content bundle has no {0:?} type to fall back on")]
    MissingFallback(&'static str),

    #[error("{key}: {field} must be a finite number")]
    NonFinite { key: String, field: &'static str },

    #[error("{key}: {field} must not be negative")]
    Negative { key: String, field: &'static str },

    #[error("{key}: invalid color {value:?}, expected #rrggbb")]
    InvalidColor { key: String, value: String },

    #[error("{context} refers to unknown particle type {key:?}")]
    UnknownType { context: String, key: String },

    #[error("duplicate interaction {element} -> {neighbor}")]
    DuplicateInteraction { element: String, neighbor: String },

    #[error("duplicate reaction {reactant} + {partner}")]
    DuplicateReaction { reactant: String, partner: String },
}
