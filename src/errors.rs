use std::fmt;

/// Binding error
///
/// Returned by [`bind`](crate::bind) on the first failure encountered.
/// Remaining fields are not processed; fields written before the failure keep
/// their new values.
#[derive(Debug)]
pub enum BindError {
    /// The parameter store could not be built from the request
    ///
    /// Raised before any field processing when lazy materialization of the
    /// query/form store fails.
    Materialize {
        /// The underlying materialization failure
        source: MaterializeError,
    },
    /// A raw parameter value was not valid when percent-decoded
    ///
    /// Percent-decoding happens before any type conversion; a value that does
    /// not decode to well-formed UTF-8 aborts the call.
    Decode {
        /// Name of the offending parameter
        param: String,
        /// The underlying decoding failure
        source: std::string::FromUtf8Error,
    },
    /// A parameter marked `required` was missing or empty
    MissingParameter {
        /// Name of the missing parameter
        param: String,
        /// Identifier of the field it binds to
        field: &'static str,
    },
    /// A time-valued field matched none of the accepted timestamp formats
    InvalidTimeFormat {
        /// Identifier of the field whose value could not be parsed
        field: &'static str,
    },
    /// The field's declared type is outside the supported set
    ///
    /// Supported types are `String`, signed integers, `bool`, `f32`/`f64`,
    /// and `chrono::DateTime<Utc>`. Raised only when a non-empty value is
    /// present for the parameter.
    UnsupportedType {
        /// Identifier of the field
        field: &'static str,
        /// The declared type, as written
        type_name: &'static str,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::Materialize { source } => {
                write!(f, "error building parameter store from request: {source}")
            }
            BindError::Decode { param, source } => {
                write!(f, "error decoding value for param {param}: {source}")
            }
            BindError::MissingParameter { param, field } => {
                write!(f, "missing required param {param} for field {field}")
            }
            BindError::InvalidTimeFormat { field } => {
                write!(f, "invalid time format for field {field}")
            }
            BindError::UnsupportedType { field, type_name } => {
                write!(f, "unsupported type {type_name} for field {field}")
            }
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::Materialize { source } => Some(source),
            BindError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parameter-store materialization error
///
/// Returned by [`ParamSource::materialize`](crate::ParamSource::materialize)
/// when the query/form key-value store cannot be built from the request.
#[derive(Debug)]
pub enum MaterializeError {
    /// A form-encoded body was not valid UTF-8
    InvalidBodyEncoding {
        /// The underlying UTF-8 failure
        source: std::str::Utf8Error,
    },
    /// A parameter key was not valid when percent-decoded
    InvalidKey {
        /// The raw, undecoded key
        key: String,
        /// The underlying decoding failure
        source: std::string::FromUtf8Error,
    },
}

impl fmt::Display for MaterializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterializeError::InvalidBodyEncoding { source } => {
                write!(f, "form body is not valid UTF-8: {source}")
            }
            MaterializeError::InvalidKey { key, source } => {
                write!(f, "parameter key {key} is not valid when decoded: {source}")
            }
        }
    }
}

impl std::error::Error for MaterializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaterializeError::InvalidBodyEncoding { source } => Some(source),
            MaterializeError::InvalidKey { source, .. } => Some(source),
        }
    }
}
