#![allow(dead_code)]

use callwhiz::{ApiVersion, CallWhiz};
use httpmock::MockServer;
use serde_json::{Value, json};

pub const API_KEY: &str = "cw_test_123456789";

pub fn client(server: &MockServer) -> CallWhiz {
    client_with_version(server, ApiVersion::V2)
}

pub fn client_with_version(server: &MockServer, version: ApiVersion) -> CallWhiz {
    CallWhiz::builder()
        .api_key(API_KEY)
        .version(version)
        .base_url(server.url("/v1"))
        .build()
        .expect("client builds")
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn failure(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": { "code": code, "message": message, "details": {} }
    })
}

/// A v2 agent payload carrying every field the client serializes.
pub fn agent_payload(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "status": "active",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "voice": "Calvin",
        "model": "nano",
        "language": "en",
        "accent": null,
        "llm": null,
        "settings": null,
        "prompt": "hi",
        "first_message": null,
        "webhook_ids": [],
        "has_stages": false,
        "stage_count": 0,
        "call_count": 0,
        "total_duration": 0
    })
}

pub fn call_payload(id: &str) -> Value {
    json!({
        "call_id": id,
        "status": "initiated",
        "agent_id": "agent_123",
        "phone_number": "+15551234567",
        "created_at": "2024-01-01T10:00:00Z",
        "estimated_cost": 0.05,
        "context": {"customer_name": "John Doe"},
        "metadata": {"test": true}
    })
}

pub fn webhook_payload(id: &str) -> Value {
    json!({
        "webhook_id": id,
        "url": "https://example.com/webhook",
        "events": ["call.started", "call.completed"],
        "agent_ids": ["agent_123"],
        "active": true,
        "created_at": "2024-01-01T10:00:00Z",
        "secret": "whsec_test123"
    })
}
