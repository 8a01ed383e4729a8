//! Client for the Transaction Resolution Protocol (TRP).
//!
//! A compiled transaction template ([`TirInfo`]) plus concrete arguments are sent to a
//! resolver with [`trp::Client::resolve`]; the signed result goes back through
//! [`trp::Client::submit`].

pub mod core;
pub mod trp;

pub use crate::core::{ArgMap, BytesEncoding, BytesEnvelope, TirEncoding, TirInfo};
pub use crate::trp::{Client, ClientOptions, Error, ProtoTxRequest, TxEnvelope};
