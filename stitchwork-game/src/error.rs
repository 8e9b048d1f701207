use std::fmt;

use thiserror::Error;

/// Errors raised while loading configuration or constructing parts.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("configuration document `{document}` not found")]
    ResourceNotFound { document: String },
    #[error("failed to read configuration document `{document}`")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "configuration document `{document}` is malformed at line {line}, column {column}: {message}"
    )]
    ConfigParse {
        document: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("entry `{name}` in `{document}` does not match its template: {message}")]
    InvalidTemplate {
        document: String,
        name: String,
        message: String,
    },
    #[error("part `{name}` not found")]
    UnknownPart { name: String },
    #[error("title `{name}` not found")]
    UnknownTitle { name: String },
    #[error("title `{title}` uses invalid scaling metric `{scaling}`")]
    InvalidScaling { title: String, scaling: String },
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

impl ForgeError {
    pub(crate) fn config_parse(document: &str, err: &serde_json::Error) -> Self {
        Self::ConfigParse {
            document: document.to_string(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_template(document: &str, name: &str, err: &serde_json::Error) -> Self {
        Self::InvalidTemplate {
            document: document.to_string(),
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}

/// Which capacity-limited collection of a part rejected an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    Female,
    Male,
    Slot,
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Female => "female socket",
            Self::Male => "male socket",
            Self::Slot => "slot",
        };
        f.write_str(label)
    }
}

/// Returned when a socket or slot is already at capacity.
///
/// The rejected item is handed back so the caller keeps ownership of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityError<T> {
    pub kind: SocketKind,
    pub max: u32,
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Recover the item that could not be installed.
    pub fn into_element(self) -> T {
        self.element
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {} is in use ({} max)", self.kind, self.max)
    }
}

impl<T: fmt::Debug> std::error::Error for CapacityError<T> {}
