//! # Metadata Errors
//!
//! Compiling a query never fails: unknown fields coming from untrusted input
//! are dropped rather than rejected. The only hard failure is wiring up entity
//! metadata from a type that is not record-shaped, which is a configuration
//! bug on the caller's side. That condition is reported here, at the point
//! where metadata is constructed, so the compiler itself never has to abort.
//!
//! ```rust,ignore
//! use paginate_sql::{EntityMetadata, MetadataError};
//!
//! let metadata = EntityMetadata::from_record(&User::default(), &[("lastName", "last_name")])?;
//!
//! // A bare string is not a record
//! let err = EntityMetadata::from_record(&"oops", &[]).unwrap_err();
//! assert!(matches!(err, MetadataError::NotARecord { .. }));
//! ```

use std::fmt;

/// Error raised while building [`EntityMetadata`](crate::EntityMetadata).
#[derive(Debug)]
pub enum MetadataError {
    /// The sample value did not serialize to a struct or map.
    NotARecord {
        /// Rust type name of the offending sample
        type_name: &'static str,
    },

    /// The sample value could not be serialized at all.
    Serialize(serde_json::Error),
}

impl MetadataError {
    /// Create a `NotARecord` error for type `T`
    #[must_use]
    pub fn not_a_record<T: ?Sized>() -> Self {
        Self::NotARecord {
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARecord { type_name } => {
                write!(f, "entity metadata requires a record type, got `{type_name}`")
            }
            Self::Serialize(err) => write!(f, "failed to inspect entity record: {err}"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotARecord { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_record_display() {
        let err = MetadataError::not_a_record::<i32>();
        assert_eq!(
            err.to_string(),
            "entity metadata requires a record type, got `i32`"
        );
    }

    #[test]
    fn test_serialize_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MetadataError = json_err.into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to inspect entity record"));
    }

    #[test]
    fn test_error_trait() {
        let err = MetadataError::not_a_record::<str>();
        let _: &dyn std::error::Error = &err;
    }
}
