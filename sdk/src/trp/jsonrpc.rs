//! JSON-RPC 2.0 framing, independent of TRP semantics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Error;

pub const VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: String,
}

impl<'a, P: Serialize> JsonRpcRequest<'a, P> {
    /// Builds a request with a fresh random (v4) correlation id.
    pub fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: VERSION,
            method,
            params,
            id: Uuid::new_v4().to_string(),
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(|e| Error::EncodingError(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Option<String>,
    pub result: Option<Value>,
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcError {}

impl JsonRpcResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|e| Error::DeserializationError(e.to_string()))
    }

    /// Returns the raw result. An `error` member wins even when `result` is also present.
    pub fn into_result(self) -> Result<Value, Error> {
        if let Some(error) = self.error {
            return Err(Error::RpcError(error));
        }

        self.result.ok_or_else(|| {
            Error::DeserializationError("response carries neither result nor error".to_string())
        })
    }
}
