//! Localized labels for issue types and statuses.
//!
//! Only the CSV export and display surfaces localize; the wire format and
//! all internal logic stay on the canonical English strings.

use crate::model::{IssueType, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Resolve a language from a BCP47-ish tag by 2-letter prefix match.
    ///
    /// Anything that is not recognizably Russian or English falls back to
    /// English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let prefix: String = tag.trim().chars().take(2).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "ru" => Self::Ru,
            _ => Self::En,
        }
    }

    /// Resolve the preferred language: explicit preference first, then the
    /// environment locale, then English.
    #[must_use]
    pub fn resolve(preference: Option<Self>, env_locale: Option<&str>) -> Self {
        preference.unwrap_or_else(|| env_locale.map(Self::from_tag).unwrap_or_default())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    #[must_use]
    pub const fn issue_type_label(self, issue_type: IssueType) -> &'static str {
        match (self, issue_type) {
            (Self::En, t) => t.as_str(),
            (Self::Ru, IssueType::Task) => "Задача",
            (Self::Ru, IssueType::Bug) => "Баг",
            (Self::Ru, IssueType::Story) => "История",
        }
    }

    #[must_use]
    pub const fn status_label(self, status: Status) -> &'static str {
        match (self, status) {
            (Self::En, s) => s.as_str(),
            (Self::Ru, Status::ToDo) => "К выполнению",
            (Self::Ru, Status::InProgress) => "В работе",
            (Self::Ru, Status::Done) => "Готово",
        }
    }

    /// CSV export column headers, in order.
    #[must_use]
    pub const fn csv_headers(self) -> [&'static str; 6] {
        match self {
            Self::En => ["ID", "Title", "Type", "Status", "Points", "Assignee"],
            Self::Ru => ["ID", "Название", "Тип", "Статус", "Поинты", "Исполнитель"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = crate::error::CapitaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            other => Err(crate::error::CapitaskError::validation(
                "language",
                format!("unknown language '{other}' (expected en or ru)"),
            )),
        }
    }
}
