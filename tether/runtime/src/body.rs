//! Request part and response body payloads.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// MIME type used when a body is built from raw bytes without one.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A body payload, either held in memory or backed by a file on disk.
///
/// ## Examples
///
/// ```
/// use tether_runtime::ActionBody;
///
/// let body = ActionBody::bytes("text/plain", "hi".as_bytes().to_vec());
/// assert_eq!(body.mime_type(), "text/plain");
/// assert_eq!(body.to_string(), "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionBody {
    /// In-memory content.
    Bytes { mime_type: String, content: Bytes },
    /// Content streamed from a file when the request is sent.
    File { mime_type: String, path: PathBuf },
}

impl ActionBody {
    pub fn bytes(mime_type: impl Into<String>, content: impl Into<Bytes>) -> Self {
        ActionBody::Bytes {
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub fn file(mime_type: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ActionBody::File {
            mime_type: mime_type.into(),
            path: path.into(),
        }
    }

    /// An empty in-memory body.
    pub fn empty() -> Self {
        Self::bytes(OCTET_STREAM, Bytes::new())
    }

    pub fn mime_type(&self) -> &str {
        match self {
            ActionBody::Bytes { mime_type, .. } | ActionBody::File { mime_type, .. } => mime_type,
        }
    }

    /// In-memory content, `None` for file-backed bodies.
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            ActionBody::Bytes { content, .. } => Some(content.as_ref()),
            ActionBody::File { .. } => None,
        }
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ActionBody::File { path, .. } => Some(path.as_path()),
            ActionBody::Bytes { .. } => None,
        }
    }

    /// Loads the content, reading the backing file if there is one.
    ///
    /// ## Errors
    ///
    /// Returns the I/O error from reading a file-backed body.
    pub fn load(&self) -> io::Result<Bytes> {
        match self {
            ActionBody::Bytes { content, .. } => Ok(content.clone()),
            ActionBody::File { path, .. } => fs::read(path).map(Bytes::from),
        }
    }
}

impl Default for ActionBody {
    fn default() -> Self {
        Self::empty()
    }
}

/// In-memory bodies render as (lossy) UTF-8 text, file bodies as their path.
impl fmt::Display for ActionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionBody::Bytes { content, .. } => f.write_str(&String::from_utf8_lossy(content)),
            ActionBody::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl From<Vec<u8>> for ActionBody {
    fn from(content: Vec<u8>) -> Self {
        Self::bytes(OCTET_STREAM, content)
    }
}

impl From<Bytes> for ActionBody {
    fn from(content: Bytes) -> Self {
        Self::bytes(OCTET_STREAM, content)
    }
}

impl From<String> for ActionBody {
    fn from(text: String) -> Self {
        Self::bytes("text/plain; charset=utf-8", text)
    }
}
