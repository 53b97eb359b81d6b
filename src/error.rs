// error.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
use std::fmt;

/// Static map Error types
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// A numeric field is present but could not be parsed.
    InvalidNumber {
        /// Name of the field
        field: &'static str,
        /// Offending value
        value: String,
    },
    /// A required field is missing.
    MissingField(&'static str),
    /// An encoded polyline is malformed.
    InvalidPolyline(),
    /// Error while decoding JSON parameters.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidNumber { field, value } => {
                write!(f, "Invalid number for {}: {:?}", field, value)
            }
            Error::MissingField(field) => write!(f, "Missing field {}", field),
            Error::InvalidPolyline() => write!(f, "Invalid polyline data"),
            Error::Json(e) => write!(f, "JSON {:?}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let e = Error::InvalidNumber {
            field: "strokeWeight",
            value: "thick".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid number for strokeWeight: \"thick\"");
        assert_eq!(
            Error::MissingField("latitude").to_string(),
            "Missing field latitude"
        );
    }
}
