use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub mod args;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod error;
pub mod jsonrpc;
pub mod witness;

pub use args::{ArgMap, Bytes};
pub use error::{Diagnostic, Error};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use witness::{SubmitWitness, VKeyWitness, WitnessInput};

use crate::core::{BytesEnvelope, TirInfo};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const RESOLVE_METHOD: &str = "trp.resolve";
pub const SUBMIT_METHOD: &str = "trp.submit";

#[derive(Deserialize, Debug, Clone, Serialize)]
pub struct SubmitParams {
    pub tx: BytesEnvelope,
    pub witnesses: Vec<WitnessInput>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResponse {
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEnvelope {
    pub tx: String,
    pub hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub endpoint: String,
    pub headers: HashMap<String, String>,
    pub env_args: HashMap<String, Value>,
    /// `None` or zero falls back to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_env_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env_args.insert(key.into(), value.into());
        self
    }

    pub fn with_env_args(mut self, env_args: HashMap<String, Value>) -> Self {
        self.env_args.extend(env_args);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn effective_timeout(&self) -> Duration {
        match self.timeout {
            Some(x) if !x.is_zero() => x,
            _ => DEFAULT_TIMEOUT,
        }
    }

    fn validate_endpoint(&self) -> Result<reqwest::Url, Error> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::InvalidOptions("endpoint is required".to_string()));
        }

        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| Error::InvalidOptions(format!("invalid endpoint `{}`: {e}", self.endpoint)))
    }

    fn header_map(&self) -> Result<header::HeaderMap, Error> {
        let mut headers = header::HeaderMap::new();

        for (key, value) in &self.headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::InvalidOptions(format!("invalid header name `{key}`: {e}")))?;

            let value = header::HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidOptions(format!("invalid value for header `{key}`: {e}")))?;

            if headers.contains_key(&name) {
                return Err(Error::InvalidOptions(format!("duplicate header `{key}`")));
            }

            headers.insert(name, value);
        }

        // content type is fixed, regardless of what the caller configured
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

/// A compiled template paired with the arguments it should be resolved with.
#[derive(Debug, Clone, Serialize)]
pub struct ProtoTxRequest<A = ArgMap> {
    pub tir: TirInfo,
    pub args: A,
}

impl<A: Serialize> ProtoTxRequest<A> {
    pub fn new(tir: TirInfo, args: A) -> Self {
        Self { tir, args }
    }
}

#[derive(Serialize)]
struct ResolveParams<'a> {
    tir: &'a TirInfo,
    args: ArgMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a HashMap<String, Value>>,
}

/// Client for the Transaction Resolve Protocol (TRP)
///
/// Cloning is cheap and clones share the same connection pool. A client holds no
/// per-call state, so concurrent calls need no external locking.
#[derive(Debug, Clone)]
pub struct Client {
    options: ClientOptions,
    endpoint: reqwest::Url,
    headers: header::HeaderMap,
    client: reqwest::Client,
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let endpoint = options.validate_endpoint()?;
        let headers = options.header_map()?;

        let client = reqwest::Client::builder()
            .timeout(options.effective_timeout())
            .build()
            .map_err(|e| Error::InvalidOptions(format!("can't build HTTP client: {e}")))?;

        Ok(Self {
            options,
            endpoint,
            headers,
            client,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Performs a single JSON-RPC exchange and returns the raw `result` member.
    pub async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value, Error> {
        let request = JsonRpcRequest::new(method, params);
        let body = request.to_vec()?;

        tracing::debug!(method, id = %request.id, endpoint = %self.endpoint, "sending trp request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::trace!(method, id = %request.id, %status, "trp response received");

        // If the response at the HTTP level is not successful, return an error
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<failed to read response body: {e}>"),
            };
            return Err(Error::HttpError(status.as_u16(), body));
        }

        let body = response.bytes().await?;

        JsonRpcResponse::from_slice(&body)?.into_result()
    }

    pub async fn resolve<A: Serialize>(
        &self,
        proto_tx: ProtoTxRequest<A>,
    ) -> Result<TxEnvelope, Error> {
        let env = if self.options.env_args.is_empty() {
            None
        } else {
            Some(&self.options.env_args)
        };

        let params = ResolveParams {
            tir: &proto_tx.tir,
            args: args::to_args_object(&proto_tx.args)?,
            env,
        };

        let response = self.call(RESOLVE_METHOD, params).await?;

        serde_json::from_value(response).map_err(|e| Error::DeserializationError(e.to_string()))
    }

    pub async fn submit(
        &self,
        tx: &TxEnvelope,
        witnesses: Vec<WitnessInput>,
    ) -> Result<SubmitResponse, Error> {
        let params = SubmitParams {
            tx: BytesEnvelope::hex(tx.tx.as_str()),
            witnesses,
        };

        let response = self.call(SUBMIT_METHOD, params).await?;

        serde_json::from_value(response).map_err(|e| Error::DeserializationError(e.to_string()))
    }
}
