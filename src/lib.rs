//! Consistency engine for sets of Flutter `.arb` localization files.
//!
//! Documents are parsed into [`ArbDocument`]s, collected in a
//! [`TranslationSet`] that keeps the key vocabulary in line across locales,
//! and inspected through the grouped completeness view and per-key rows.
//! [`protocol::Core`] exposes all of it as a line-oriented JSON sidecar.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod services;

pub use crate::{
    error::{ArbError, Result},
    model::document::{ArbDocument, DocumentSummary, Placeholder},
    model::key_status::{KeyGroup, KeyStatus, FALLBACK_GROUP},
    model::project::ProjectBundle,
    services::grouping::group,
    services::projection::{
        project_key, write_placeholder, write_translation, PlaceholderEdit, TranslationRow,
    },
    services::session::Session,
    services::translation_set::TranslationSet,
};
