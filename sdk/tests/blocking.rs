#![cfg(feature = "blocking")]

use axum::http::StatusCode;
use serde_json::json;

use trp_client::trp::{blocking, WitnessInput};
use trp_client::{ArgMap, ClientOptions, Error, ProtoTxRequest, TirInfo, TxEnvelope};

mod common;

use common::{rpc_result, MockServer};

fn start_server(status: StatusCode, reply: String) -> (tokio::runtime::Runtime, MockServer) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start(status, reply));
    (runtime, server)
}

#[test]
fn blocking_resolve_and_submit() {
    let (_runtime, server) = start_server(
        StatusCode::OK,
        rpc_result(json!({ "tx": "abcd", "hash": "1234" })),
    );

    let client = blocking::Client::new(ClientOptions::new(&server.endpoint)).unwrap();

    let envelope = client
        .resolve(ProtoTxRequest::new(TirInfo::hex("1", "deadbeef"), ArgMap::new()))
        .unwrap();

    assert_eq!(
        envelope,
        TxEnvelope {
            tx: "abcd".to_string(),
            hash: "1234".to_string(),
        }
    );

    // the canned reply also carries a `hash`, which is all submit needs
    let submitted = client
        .submit(&envelope, vec![WitnessInput::from("ff00")])
        .unwrap();

    assert_eq!(submitted.hash, "1234");
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn blocking_client_is_usable_from_many_threads() {
    let (_runtime, server) = start_server(
        StatusCode::OK,
        rpc_result(json!({ "tx": "abcd", "hash": "1234" })),
    );

    let client = blocking::Client::new(ClientOptions::new(&server.endpoint)).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let client = &client;
            scope.spawn(move || {
                client
                    .resolve(ProtoTxRequest::new(TirInfo::hex("1", "00"), ArgMap::new()))
                    .unwrap();
            });
        }
    });

    assert_eq!(server.requests().len(), 4);
}

#[test]
fn blocking_http_error_keeps_status_and_body() {
    let (_runtime, server) = start_server(StatusCode::BAD_GATEWAY, "upstream down".to_string());

    let client = blocking::Client::new(ClientOptions::new(&server.endpoint)).unwrap();
    let err = client.call("trp.resolve", json!({})).unwrap_err();

    assert!(matches!(err, Error::HttpError(502, body) if body == "upstream down"));
}
