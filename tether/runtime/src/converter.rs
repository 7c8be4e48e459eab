//! Body conversion between action field values and [`ActionBody`] payloads.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::body::ActionBody;

/// Converts response bodies into typed values.
///
/// The target type of [`Converter::from_body`] carries the field's full
/// static type, nested type arguments included.
pub trait Converter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn from_body<T: DeserializeOwned>(&self, body: &ActionBody) -> Result<T, Self::Error>;
}

/// Errors from [`JsonConverter`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The body is not valid JSON for the requested type
    #[error("Failed to decode body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body is backed by a file that could not be read
    #[error("Failed to read file-backed body '{path}': {source}")]
    FileBody {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// JSON conversion via `serde_json`.
///
/// ## Examples
///
/// ```
/// use tether_runtime::{ActionBody, Converter, JsonConverter};
///
/// let body = ActionBody::bytes("application/json", br#"[1, 2, 3]"#.to_vec());
/// let numbers: Vec<u8> = JsonConverter.from_body(&body).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonConverter;

/// MIME type of JSON bodies.
pub const JSON_MIME: &str = "application/json";

impl Converter for JsonConverter {
    type Error = ConvertError;

    fn from_body<T: DeserializeOwned>(&self, body: &ActionBody) -> Result<T, Self::Error> {
        let content = body.load().map_err(|source| ConvertError::FileBody {
            path: body.path().map(PathBuf::from).unwrap_or_default(),
            source,
        })?;
        serde_json::from_slice(&content).map_err(ConvertError::Decode)
    }
}
