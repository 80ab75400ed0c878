//! Validation error taxonomy
//!
//! Every way an untrusted model response can fail is a distinct variant, so
//! callers never have to inspect message strings.

/// Why a model response was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not decodable as JSON at all
    #[error("malformed response at line {line}, column {column}: {message}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
    },

    /// Decoded, but a required field is missing, mistyped or out of range
    #[error("schema mismatch at `{path}`: {reason}")]
    SchemaMismatch { path: String, reason: String },

    /// A scenario or edge reference does not resolve
    #[error("dangling reference at `{path}`: `{id}` is not declared")]
    DanglingReference { path: String, id: String },

    /// An enumerated field holds a value outside its closed set
    #[error("invalid value `{value}` for `{field}` (expected one of: {expected})")]
    InvalidEnum {
        field: String,
        value: String,
        expected: String,
    },
}

impl ValidationError {
    /// Short, stable classification name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::InvalidEnum { .. } => "invalid_enum",
        }
    }

    /// Field path the error points at, if any
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Malformed { .. } => None,
            Self::SchemaMismatch { path, .. } | Self::DanglingReference { path, .. } => Some(path),
            Self::InvalidEnum { field, .. } => Some(field),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = ValidationError::InvalidEnum {
            field: "competitorProfile.threatLevel".to_string(),
            value: "Unknown".to_string(),
            expected: "Moderate, High, Critical".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("competitorProfile.threatLevel"));
        assert!(text.contains("Unknown"));
        assert_eq!(err.kind(), "invalid_enum");
        assert_eq!(err.path(), Some("competitorProfile.threatLevel"));
    }

    #[test]
    fn malformed_from_serde() {
        let err: ValidationError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "malformed");
        assert!(err.path().is_none());
    }
}
