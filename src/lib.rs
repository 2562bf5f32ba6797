//! capitask — a local-first issue tracker built around a single JSON
//! document.
//!
//! The interesting parts live in three layers:
//! - [`normalize`] turns whatever was persisted (or imported) into a valid
//!   [`model::Document`], falling back to seed data on corruption.
//! - [`relations`] owns both sides of every typed relation edge between
//!   issues, so no caller can create an asymmetric link.
//! - [`gantt`] derives a render-ready timeline layout (day columns, grouped
//!   rows, bar geometry, connector paths) from the active issues.
//!
//! Everything else is the CLI shell around those layers.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod gantt;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod relations;
pub mod sanitize;
pub mod storage;

pub use error::{CapitaskError, Result};
