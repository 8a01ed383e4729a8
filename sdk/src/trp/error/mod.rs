use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use super::jsonrpc::JsonRpcError;

pub mod pretty;

/// Error codes the resolver uses for well-known rejections.
pub mod codes {
    pub const UNSUPPORTED_TIR: i64 = -32000;
    pub const MISSING_TX_ARG: i64 = -32001;
    pub const INPUT_NOT_RESOLVED: i64 = -32002;
    pub const TX_SCRIPT_FAILURE: i64 = -32003;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid client options: {0}")]
    InvalidOptions(String),

    #[error("failed to encode request: {0}")]
    EncodingError(String),

    #[error("network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    #[error(transparent)]
    RpcError(JsonRpcError),

    #[error("failed to deserialize response: {0}")]
    DeserializationError(String),

    #[error("invalid witness: {0}")]
    InvalidWitness(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout(error)
        } else {
            Error::NetworkError(error)
        }
    }
}

impl Error {
    /// The resolver diagnostic carried by a protocol error, if any.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::RpcError(payload) => payload.diagnostic(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSpaceDiagnostic {
    pub matched: Vec<String>,
    pub by_address_count: Option<usize>,
    pub by_asset_class_count: Option<usize>,
    pub by_ref_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputQueryDiagnostic {
    pub address: Option<String>,
    pub min_amount: HashMap<String, String>,
    pub refs: Vec<String>,
    pub support_many: bool,
    pub collateral: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("input `{name}` not resolved")]
pub struct InputNotResolvedDiagnostic {
    pub name: String,
    pub query: InputQueryDiagnostic,
    pub search_space: SearchSpaceDiagnostic,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("TIR version {provided} is not supported, expected {expected}")]
pub struct UnsupportedTirDiagnostic {
    pub provided: String,
    pub expected: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("tx script returned failure")]
pub struct TxScriptFailureDiagnostic {
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("missing argument `{key}` of type {ty}")]
pub struct MissingTxArgDiagnostic {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Typed view over the `data` of a well-known resolver error.
#[derive(Debug, Clone, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    UnsupportedTir(UnsupportedTirDiagnostic),

    #[error(transparent)]
    MissingTxArg(MissingTxArgDiagnostic),

    #[error(transparent)]
    InputNotResolved(InputNotResolvedDiagnostic),

    #[error(transparent)]
    TxScriptFailure(TxScriptFailureDiagnostic),
}

fn expect_data<T: DeserializeOwned>(payload: &JsonRpcError) -> Option<T> {
    let data = payload.data.clone()?;
    serde_json::from_value(data).ok()
}

impl JsonRpcError {
    /// Decodes `data` according to `code`. Unknown codes and mismatched payloads yield `None`.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self.code {
            codes::UNSUPPORTED_TIR => expect_data(self).map(Diagnostic::UnsupportedTir),
            codes::MISSING_TX_ARG => expect_data(self).map(Diagnostic::MissingTxArg),
            codes::INPUT_NOT_RESOLVED => expect_data(self).map(Diagnostic::InputNotResolved),
            codes::TX_SCRIPT_FAILURE => expect_data(self).map(Diagnostic::TxScriptFailure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rpc(code: i64, data: Option<serde_json::Value>) -> JsonRpcError {
        JsonRpcError {
            code,
            message: "rejected".to_string(),
            data,
        }
    }

    #[test]
    fn missing_arg_diagnostic_is_decoded() {
        let err = Error::RpcError(rpc(
            codes::MISSING_TX_ARG,
            Some(json!({ "key": "quantity", "type": "Int" })),
        ));

        match err.diagnostic() {
            Some(Diagnostic::MissingTxArg(d)) => {
                assert_eq!(d.key, "quantity");
                assert_eq!(d.ty, "Int");
            }
            other => panic!("unexpected diagnostic: {other:?}"),
        }
    }

    #[test]
    fn input_not_resolved_diagnostic_is_decoded() {
        let payload = rpc(
            codes::INPUT_NOT_RESOLVED,
            Some(json!({
                "name": "source",
                "query": {
                    "address": "addr_test1",
                    "min_amount": { "lovelace": "2000000" },
                    "refs": [],
                    "support_many": false,
                    "collateral": false,
                },
                "search_space": {
                    "matched": [],
                    "by_address_count": 0,
                    "by_asset_class_count": null,
                    "by_ref_count": null,
                },
            })),
        );

        let Some(Diagnostic::InputNotResolved(d)) = payload.diagnostic() else {
            panic!("expected input-not-resolved diagnostic");
        };

        assert_eq!(d.to_string(), "input `source` not resolved");
        assert_eq!(d.search_space.by_address_count, Some(0));
    }

    #[test]
    fn mismatched_data_yields_no_diagnostic() {
        assert!(rpc(codes::UNSUPPORTED_TIR, Some(json!("oops"))).diagnostic().is_none());
        assert!(rpc(codes::TX_SCRIPT_FAILURE, None).diagnostic().is_none());
        assert!(rpc(-1, Some(json!({ "logs": [] }))).diagnostic().is_none());
    }

    #[test]
    fn non_protocol_errors_carry_no_diagnostic() {
        let err = Error::HttpError(500, "internal error".to_string());
        assert!(err.diagnostic().is_none());
        assert_eq!(err.to_string(), "HTTP error 500: internal error");
    }
}
