use crate::output::CliError;
use projtrack_core::error::TrackerError;
use projtrack_core::model::project::Status;

pub const MAX_ID_LEN: usize = 120;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
    pub suggestion: String,
    pub code: &'static str,
}

impl ValidationError {
    pub fn new(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
        code: &'static str,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
            code,
        }
    }

    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(
            format!("invalid {} '{}': {}", self.field, self.value, self.reason),
            self.suggestion.clone(),
            self.code,
        )
    }
}

/// Check a project id argument: full (`p_aurora_001`) or partial (`aurora`).
pub fn validate_project_id(s: &str) -> Result<(), ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::new(
            "project_id",
            s,
            "must not be empty",
            "use an ID like p_aurora_001 or a prefix like aurora",
            "invalid_project_id",
        ));
    }
    if value.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::new(
            "project_id",
            s,
            format!("must be <= {MAX_ID_LEN} characters"),
            "use `pt list` to copy the project ID",
            "invalid_project_id",
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new(
            "project_id",
            s,
            "may only contain ASCII letters, numbers, '_' or '-'",
            "use `pt list` to copy the project ID",
            "invalid_project_id",
        ));
    }
    Ok(())
}

/// Parse a `--status` value.
pub fn parse_status(s: &str) -> Result<Status, ValidationError> {
    s.parse::<Status>().map_err(|e| {
        let err = TrackerError::from(e);
        ValidationError::new("status", s, "unknown status", err.suggestion(), err.error_code())
    })
}
