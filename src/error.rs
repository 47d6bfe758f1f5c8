use serde::{ser::Serializer, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::interface::config::ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] crate::build::OutputError),

    /// A node kind that an earlier desugaring pass must have removed.
    #[error("{construct} nodes must be rewritten before code generation")]
    NotRewritten { construct: String },

    #[error("Unbalanced indent: unindent below zero while generating {context}")]
    UnbalancedIndent { context: String },

    #[error("Circular type hierarchy detected: {0}")]
    CircularType(String),

    #[error("Duplicate type name in generation unit: {0}")]
    DuplicateType(String),

    #[error("Missing identifier name for {0}")]
    MissingName(String),

    #[error("Invalid generation unit {unit}: {reason}")]
    InvalidUnit { unit: String, reason: String },

    #[error("Code generation failed: {0}")]
    CodeGeneration(String),
}

impl Error {
    pub fn not_rewritten(construct: &str) -> Self {
        Error::NotRewritten {
            construct: construct.to_string(),
        }
    }

    pub fn invalid_unit(unit: &str, reason: impl Into<String>) -> Self {
        Error::InvalidUnit {
            unit: unit.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures that indicate a bug upstream of the generator rather
    /// than a problem with the environment.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::NotRewritten { .. }
                | Error::UnbalancedIndent { .. }
                | Error::CircularType(_)
                | Error::DuplicateType(_)
                | Error::MissingName(_)
        )
    }
}

impl From<crate::build::DependencyError> for Error {
    fn from(err: crate::build::DependencyError) -> Self {
        match err {
            crate::build::DependencyError::CircularDependency(names) => Error::CircularType(names),
            crate::build::DependencyError::DuplicateNode(name) => Error::DuplicateType(name),
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    mod error_variants {
        use super::*;

        #[test]
        fn test_io_error_creation() {
            let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
            let err = Error::from(io_err);
            assert!(matches!(err, Error::Io(_)));
            assert!(err.to_string().contains("file not found"));
        }

        #[test]
        fn test_not_rewritten_error() {
            let err = Error::not_rewritten("ArrayAccess");
            assert!(matches!(err, Error::NotRewritten { .. }));
            assert_eq!(
                err.to_string(),
                "ArrayAccess nodes must be rewritten before code generation"
            );
        }

        #[test]
        fn test_unbalanced_indent_error() {
            let err = Error::UnbalancedIndent {
                context: "Foo".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "Unbalanced indent: unindent below zero while generating Foo"
            );
        }

        #[test]
        fn test_invalid_unit_error() {
            let err = Error::invalid_unit("Foo.java", "no output path");
            assert_eq!(
                err.to_string(),
                "Invalid generation unit Foo.java: no output path"
            );
        }

        #[test]
        fn test_dependency_error_conversion() {
            let err = Error::from(crate::build::DependencyError::CircularDependency(
                "A, B".to_string(),
            ));
            assert!(matches!(err, Error::CircularType(_)));
            assert!(err.to_string().contains("A, B"));
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn test_internal_errors() {
            assert!(Error::not_rewritten("Lambda").is_internal());
            assert!(Error::DuplicateType("Foo".to_string()).is_internal());
            assert!(Error::CircularType("Foo".to_string()).is_internal());
        }

        #[test]
        fn test_environment_errors_are_not_internal() {
            let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
            assert!(!Error::from(io_err).is_internal());
            assert!(!Error::invalid_unit("x", "y").is_internal());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize_not_rewritten_error() {
            let err = Error::not_rewritten("MethodReference");
            let serialized = serde_json::to_string(&err).unwrap();
            assert!(serialized.contains("MethodReference"));
        }

        #[test]
        fn test_serialize_io_error() {
            let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
            let err = Error::from(io_err);
            let serialized = serde_json::to_string(&err).unwrap();
            assert!(serialized.contains("not found"));
        }
    }

    mod result_type {
        use super::*;

        #[test]
        fn test_result_err() {
            let result: Result<i32> = Err(Error::CodeGeneration("test".to_string()));
            assert!(result.is_err());
        }

        #[test]
        fn test_result_ok() {
            let result: Result<i32> = Ok(42);
            assert_eq!(result.unwrap(), 42);
        }
    }
}
