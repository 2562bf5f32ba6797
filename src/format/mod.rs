//! Output formatting (CSV export).

pub mod csv;
