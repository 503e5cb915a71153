use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where an engagement currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Audit,
    Optimisation,
    Scaling,
    Completed,
}

impl Status {
    /// Every status, in the order the form offers them.
    pub const ALL: [Self; 4] = [
        Self::Audit,
        Self::Optimisation,
        Self::Scaling,
        Self::Completed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "Audit",
            Self::Optimisation => "Optimisation",
            Self::Scaling => "Scaling",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Status`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub got: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status: '{}'", self.got)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audit" => Ok(Self::Audit),
            "optimisation" | "optimization" => Ok(Self::Optimisation),
            "scaling" => Ok(Self::Scaling),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError { got: s.to_string() }),
        }
    }
}

/// One tracked client engagement.
///
/// `id` is assigned once at creation and never changes. Required text fields
/// are only checked when a draft is saved, so a loaded record may still hold
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client_name: String,
    pub status: Status,
    pub last_updated: DateTime<Utc>,
    pub description: String,
    pub phase: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
}
