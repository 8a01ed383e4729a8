use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub type ArgMap = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hex content: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported encoding `{0}`")]
    UnsupportedEncoding(String),
}

/// Encoded bytes as they travel over the wire.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BytesEnvelope {
    pub content: String,
    pub encoding: BytesEncoding,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BytesEncoding {
    Base64,
    Hex,
}

impl BytesEnvelope {
    /// Wraps content that is already hex encoded. The content is not validated.
    pub fn hex(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: BytesEncoding::Hex,
        }
    }

    pub fn from_bytes_hex(bytes: impl AsRef<[u8]>) -> Self {
        Self::hex(hex::encode(bytes))
    }

    pub fn from_bytes_base64(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            encoding: BytesEncoding::Base64,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        self.encoding.decode(&self.content)
    }
}

impl BytesEncoding {
    pub fn decode(&self, content: &str) -> Result<Vec<u8>, DecodeError> {
        match self {
            BytesEncoding::Hex => Ok(hex::decode(content)?),
            BytesEncoding::Base64 => Ok(base64::engine::general_purpose::STANDARD.decode(content)?),
        }
    }
}

/// Encoding tag of a compiled template. Unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TirEncoding {
    Hex,
    Base64,
    Other(String),
}

impl From<String> for TirEncoding {
    fn from(value: String) -> Self {
        match value.as_str() {
            "hex" => TirEncoding::Hex,
            "base64" => TirEncoding::Base64,
            _ => TirEncoding::Other(value),
        }
    }
}

impl From<TirEncoding> for String {
    fn from(value: TirEncoding) -> Self {
        match value {
            TirEncoding::Hex => "hex".to_string(),
            TirEncoding::Base64 => "base64".to_string(),
            TirEncoding::Other(x) => x,
        }
    }
}

impl From<BytesEncoding> for TirEncoding {
    fn from(value: BytesEncoding) -> Self {
        match value {
            BytesEncoding::Hex => TirEncoding::Hex,
            BytesEncoding::Base64 => TirEncoding::Base64,
        }
    }
}

/// Compiled transaction template, as produced by code generation.
///
/// `bytecode` is accepted as a deprecated alias of `content` when decoding;
/// serialization always emits `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TirInfo {
    pub version: String,
    #[serde(alias = "bytecode")]
    pub content: String,
    pub encoding: TirEncoding,
}

impl TirInfo {
    pub fn new(
        version: impl Into<String>,
        content: impl Into<String>,
        encoding: impl Into<TirEncoding>,
    ) -> Self {
        Self {
            version: version.into(),
            content: content.into(),
            encoding: encoding.into(),
        }
    }

    pub fn hex(version: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(version, content, TirEncoding::Hex)
    }

    pub fn decode_content(&self) -> Result<Vec<u8>, DecodeError> {
        match &self.encoding {
            TirEncoding::Hex => BytesEncoding::Hex.decode(&self.content),
            TirEncoding::Base64 => BytesEncoding::Base64.decode(&self.content),
            TirEncoding::Other(x) => Err(DecodeError::UnsupportedEncoding(x.clone())),
        }
    }
}
