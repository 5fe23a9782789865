//! Error taxonomy for the simulation core

use thiserror::Error;

/// Failures reported by the simulation core.
///
/// Runtime variants (`NotFound`, `NoSelection`, `InvalidTimeScale`) are
/// reported to the caller and otherwise treated as no-ops. `InvalidConfiguration`
/// is only produced while building the body registry at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("no body named {0:?} in the registry")]
    NotFound(String),
    #[error("invalid catalog entry {body:?}: {reason}")]
    InvalidConfiguration { body: String, reason: String },
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
    #[error("time scale must be a finite, non-negative number (got {0})")]
    InvalidTimeScale(f32),
    #[error("no body is selected")]
    NoSelection,
}

impl CoreError {
    pub fn invalid(body: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            body: body.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_body() {
        let err = CoreError::NotFound("Pluto".into());
        assert_eq!(err.to_string(), "no body named \"Pluto\" in the registry");

        let err = CoreError::invalid("Mars", "orbital period must be positive");
        assert!(err.to_string().contains("Mars"));
        assert!(err.to_string().contains("orbital period"));
    }
}
