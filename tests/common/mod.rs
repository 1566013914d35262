//! Shared test fixtures for the client integration tests.
//!
//! Provides a [`ScriptedTransport`] that answers requests from a queue of
//! canned replies and records what was sent, plus helpers that build a client
//! over an in-memory store.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use lostfound_client::config;
use lostfound_client::{HttpReply, LostFoundClient, LostFoundError, MemoryStore, Result, Transport};

/// One request as seen by the transport.
#[derive(Debug, Clone)]
pub struct SentRequest {
    /// `"GET"` or `"POST"`.
    pub method: &'static str,
    pub path: String,
    pub bearer: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<HttpReply>>,
    sent: Vec<SentRequest>,
}

/// Transport answering from a queue. Clones share the same queue, so a test
/// keeps one handle while the client owns another.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with a JSON body.
    pub fn reply_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(HttpReply::new(status, body.to_string())))
    }

    /// Queue a reply with a raw body.
    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpReply::new(status, body)))
    }

    /// Queue a transport-level failure.
    pub fn fail(&self) -> &Self {
        self.push(Err(LostFoundError::InvalidArgument(
            "connection refused".to_string(),
        )))
    }

    fn push(&self, reply: Result<HttpReply>) -> &Self {
        self.script.lock().unwrap().replies.push_back(reply);
        self
    }

    /// Requests sent so far, in order.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.script.lock().unwrap().sent.clone()
    }

    pub fn last_sent(&self) -> Option<SentRequest> {
        self.sent().pop()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        bearer: Option<&str>,
        body: serde_json::Value,
    ) -> Result<HttpReply> {
        let mut script = self.script.lock().unwrap();
        script.sent.push(SentRequest {
            method,
            path: path.to_string(),
            bearer: bearer.map(str::to_string),
            body,
        });
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {} {}", method, path))
    }
}

impl Transport for ScriptedTransport {
    fn post_json(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpReply> {
        self.record("POST", path, bearer, body.clone())
    }

    fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<HttpReply> {
        self.record("GET", path, bearer, serde_json::Value::Null)
    }
}

/// Client over an empty in-memory store (no session).
pub fn anonymous_client(transport: &ScriptedTransport) -> LostFoundClient {
    LostFoundClient::builder()
        .storage(Box::new(MemoryStore::new()))
        .transport(Box::new(transport.clone()))
        .build()
        .unwrap()
}

/// Client over an in-memory store holding the access token `test-token`.
pub fn signed_in_client(transport: &ScriptedTransport) -> LostFoundClient {
    LostFoundClient::builder()
        .storage(Box::new(MemoryStore::with_values([(
            config::ACCESS_TOKEN_KEY,
            "test-token",
        )])))
        .transport(Box::new(transport.clone()))
        .build()
        .unwrap()
}

/// A search response body with `n` items.
pub fn results_body(n: usize, page: u32, total_pages: u32) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "id": format!("id-{}", i),
                "slug": format!("item-{}", i),
                "title": format!("Item {}", i),
                "description": "Black leather",
                "status": "Lost",
                "category": "Wallets",
                "sub_category": null,
                "country": "UK",
                "state": "London",
                "city": "Camden",
                "zipcode": "NW1",
                "created_at": "2025-01-02T10:00:00",
                "image_url": null,
            })
        })
        .collect();
    serde_json::json!({
        "status": "success",
        "results": items,
        "page": page,
        "total_pages": total_pages,
        "total_items": n,
        "per_page": 10,
    })
}
