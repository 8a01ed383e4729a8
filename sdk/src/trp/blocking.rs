//! Synchronous facade over [`super::Client`].
//!
//! Each call blocks the current thread for one round trip. Do not use from inside an
//! async runtime; `block_on` panics when nested.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ClientOptions, Error, ProtoTxRequest, SubmitResponse, TxEnvelope, WitnessInput};

#[derive(Debug, Clone)]
pub struct Client {
    inner: super::Client,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::InvalidOptions(format!("can't start runtime: {e}")))?;

        Ok(Self {
            inner: super::Client::new(options)?,
            runtime: Arc::new(runtime),
        })
    }

    pub fn options(&self) -> &ClientOptions {
        self.inner.options()
    }

    pub fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value, Error> {
        self.runtime.block_on(self.inner.call(method, params))
    }

    pub fn resolve<A: Serialize>(&self, proto_tx: ProtoTxRequest<A>) -> Result<TxEnvelope, Error> {
        self.runtime.block_on(self.inner.resolve(proto_tx))
    }

    pub fn submit(
        &self,
        tx: &TxEnvelope,
        witnesses: Vec<WitnessInput>,
    ) -> Result<SubmitResponse, Error> {
        self.runtime.block_on(self.inner.submit(tx, witnesses))
    }
}
