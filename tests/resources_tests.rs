mod common;

use callwhiz::{
    CallStatus, CreateUserWebhookRequest, CreateWebhookRequest, ErrorKind, HttpMethod,
    ListCallsParams, ListConversationsParams, ListPhoneNumbersParams, ListUserWebhooksParams,
    Metadata, ParameterDefinition, ParameterType, StartCallRequest, UpdateUserWebhookRequest,
    UpdateWebhookRequest, UsageParams, UsagePeriod, WebhookRetryPolicy,
};
use chrono::{DateTime, Utc};
use common::{call_payload, client, ok, webhook_payload};
use httpmock::prelude::*;
use serde_json::json;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

#[tokio::test]
async fn start_call_with_context() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/v1/calls").json_body(json!({
                "agent_id": "agent_123",
                "phone_number": "+15551234567",
                "context": {"customer_name": "John Doe"},
                "webhook_url": "https://example.com/webhook"
            }));
            then.status(200).json_body(ok(call_payload("call_123")));
        })
        .await;

    let mut context = Metadata::new();
    context.insert("customer_name".to_string(), json!("John Doe"));
    let call = client(&server)
        .start_call(
            StartCallRequest::new("agent_123", "+15551234567")
                .context(context)
                .webhook_url("https://example.com/webhook"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(call.call_id, "call_123");
    assert_eq!(call.status, CallStatus::Initiated);
    assert_eq!(call.metadata.and_then(|m| m.get("test").cloned()), Some(json!(true)));
}

#[tokio::test]
async fn start_call_rejects_bad_number_locally() {
    let server = MockServer::start_async().await;
    let err = client(&server)
        .start_call(StartCallRequest::new("agent_123", "555-1234"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn list_calls_with_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/calls")
                .query_param("page", "1")
                .query_param("limit", "20")
                .query_param("agent_id", "agent_123")
                .query_param("status", "completed")
                .query_param("from_date", "2024-01-01T00:00:00Z")
                .query_param("to_date", "2024-01-31T00:00:00Z");
            then.status(200)
                .json_body(ok(json!([call_payload("call_1"), call_payload("call_2")])));
        })
        .await;

    let calls = client(&server)
        .list_calls(
            ListCallsParams::default()
                .agent_id("agent_123")
                .status(CallStatus::Completed)
                .from_date(ts("2024-01-01T00:00:00Z"))
                .to_date(ts("2024-01-31T00:00:00Z")),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        calls.iter().map(|c| c.call_id.as_str()).collect::<Vec<_>>(),
        ["call_1", "call_2"]
    );
}

#[tokio::test]
async fn list_calls_rejects_inverted_range() {
    let server = MockServer::start_async().await;
    let err = client(&server)
        .list_calls(
            ListCallsParams::default()
                .from_date(ts("2024-02-01T00:00:00Z"))
                .to_date(ts("2024-01-01T00:00:00Z")),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn call_transcript_and_recording() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/calls/call_123/transcript");
            then.status(200).json_body(ok(json!({
                "call_id": "call_123",
                "transcript": [
                    {"timestamp": "2024-01-01T10:00:00Z", "speaker": "agent", "text": "Hello!"},
                    {"timestamp": "2024-01-01T10:00:05Z", "speaker": "customer", "text": "Hi", "audio_duration": 0.8}
                ],
                "summary": "Greeting exchanged",
                "duration": 5,
                "word_count": 2
            })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/calls/call_123/recording");
            then.status(200).json_body(ok(json!({
                "call_id": "call_123",
                "recording_url": "https://cdn.example.com/rec.mp3",
                "duration": 5,
                "format": "mp3",
                "size_bytes": 40960,
                "expires_at": "2024-01-02T10:00:00Z"
            })));
        })
        .await;

    let client = client(&server);
    let transcript = client.get_call_transcript("call_123").await.unwrap();
    assert_eq!(transcript.transcript.len(), 2);
    assert_eq!(transcript.transcript[1].speaker, "customer");
    assert_eq!(transcript.transcript[1].audio_duration, Some(0.8));

    let recording = client.get_call_recording("call_123").await.unwrap();
    assert_eq!(recording.format, "mp3");
    assert_eq!(recording.expires_at, ts("2024-01-02T10:00:00Z"));
}

#[tokio::test]
async fn create_webhook_with_retry_policy() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/v1/webhooks").json_body(json!({
                "url": "https://example.com/webhook",
                "events": ["call.completed"],
                "active": false,
                "retry_policy": {"max_retries": 5, "retry_delay": 30}
            }));
            then.status(200).json_body(ok(webhook_payload("webhook_123")));
        })
        .await;

    let webhook = client(&server)
        .create_webhook(
            CreateWebhookRequest::new("https://example.com/webhook", ["call.completed"])
                .active(false)
                .retry_policy(WebhookRetryPolicy {
                    max_retries: 5,
                    retry_delay: 30,
                }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(webhook.webhook_id, "webhook_123");
    assert_eq!(webhook.secret.as_deref(), Some("whsec_test123"));
}

#[tokio::test]
async fn webhook_crud() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/webhooks");
            then.status(200).json_body(ok(json!([webhook_payload("w1"), webhook_payload("w2")])));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/webhooks/w1");
            then.status(200).json_body(ok(webhook_payload("w1")));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(Method::PUT)
                .path("/v1/webhooks/w1")
                .json_body(json!({"active": false}));
            then.status(200).json_body(ok(webhook_payload("w1")));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/v1/webhooks/w1");
            then.status(200).json_body(ok(json!(null)));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/webhooks/events");
            then.status(200).json_body(ok(json!(["call.started", "call.completed"])));
        })
        .await;

    let client = client(&server);
    assert_eq!(client.list_webhooks().await.unwrap().len(), 2);
    assert_eq!(client.get_webhook("w1").await.unwrap().agent_ids, ["agent_123"]);
    client
        .update_webhook("w1", UpdateWebhookRequest::new().active(false))
        .await
        .unwrap();
    update.assert_async().await;
    assert!(client.delete_webhook("w1").await.unwrap());
    assert!(client
        .list_webhook_events()
        .await
        .unwrap()
        .contains(&"call.started".to_string()));
}

fn user_webhook_payload(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "lookup_order",
        "description": "Find an order by id",
        "url": "https://api.shop.test/orders",
        "method": "GET",
        "parameters": [
            {"name": "order_id", "type": "string", "description": "Order id", "required": true}
        ],
        "agent_id": "agent_123",
        "created_at": "2024-03-01T00:00:00Z",
        "updated_at": "2024-03-01T00:00:00Z"
    })
}

#[tokio::test]
async fn user_webhook_lifecycle() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/v1/user-webhooks").json_body(json!({
                "name": "lookup_order",
                "description": "Find an order by id",
                "url": "https://api.shop.test/orders",
                "method": "GET",
                "parameters": [
                    {"name": "order_id", "type": "string", "description": "Order id", "required": true}
                ],
                "agent_id": "agent_123"
            }));
            then.status(200).json_body(ok(user_webhook_payload("uw_1")));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/user-webhooks")
                .query_param("agent_id", "agent_123");
            then.status(200).json_body(ok(json!([user_webhook_payload("uw_1")])));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(Method::PUT)
                .path("/v1/user-webhooks/uw_1")
                .json_body(json!({"agent_id": null, "timeout_seconds": 0}));
            then.status(200).json_body(ok(user_webhook_payload("uw_1")));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/v1/user-webhooks/uw_1");
            then.status(200).json_body(ok(json!({})));
        })
        .await;

    let client = client(&server);
    let created = client
        .create_user_webhook(
            CreateUserWebhookRequest::new(
                "lookup_order",
                "Find an order by id",
                "https://api.shop.test/orders",
            )
            .method(HttpMethod::Get)
            .agent_id("agent_123")
            .parameter(
                ParameterDefinition::new("order_id", ParameterType::String, "Order id").required(),
            ),
        )
        .await
        .unwrap();
    create.assert_async().await;
    assert_eq!(created.method, HttpMethod::Get);
    assert!(created.active);
    assert_eq!(created.parameters[0].param_type, ParameterType::String);

    let listed = client
        .list_user_webhooks(ListUserWebhooksParams::default().agent_id("agent_123"))
        .await
        .unwrap();
    list.assert_async().await;
    assert_eq!(listed, vec![created]);

    client
        .update_user_webhook(
            "uw_1",
            UpdateUserWebhookRequest::new().clear_agent_id().timeout_seconds(0),
        )
        .await
        .unwrap();
    update.assert_async().await;

    assert!(client.delete_user_webhook("uw_1").await.unwrap());
}

#[tokio::test]
async fn credits_endpoints() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/credits");
            then.status(200).json_body(ok(json!({
                "user_id": "u1", "credits": 120.5, "total_purchased": 200.0, "total_used": 79.5
            })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/credits/simple");
            then.status(200).json_body(ok(json!({"credits": 120.5})));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/credits/users/u2");
            then.status(200).json_body(ok(json!({"user_id": "u2", "credits": 3.0})));
        })
        .await;

    let client = client(&server);
    let detailed = client.get_credits().await.unwrap();
    assert_eq!(detailed.user_id, "u1");
    assert!((detailed.total_used - 79.5).abs() < f64::EPSILON);
    assert!((client.get_credits_simple().await.unwrap().credits - 120.5).abs() < f64::EPSILON);
    let other = client.get_user_credits("u2").await.unwrap();
    assert_eq!(other.user_id, "u2");
    assert!(other.total_purchased.abs() < f64::EPSILON);
}

#[tokio::test]
async fn phone_numbers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/phone-numbers")
                .query_param("status", "active");
            then.status(200).json_body(ok(json!([
                {"id": "pn_1", "number": "+15550001111", "status": "active", "capabilities": ["voice"]},
                {"id": "pn_2", "phone_number": "+15550002222", "status": "active", "agent_id": "agent_123"}
            ])));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/phone-numbers/pn_2");
            then.status(200).json_body(ok(json!(
                {"id": "pn_2", "phone_number": "+15550002222", "status": "active", "agent_id": "agent_123"}
            )));
        })
        .await;

    let client = client(&server);
    let numbers = client
        .list_phone_numbers(ListPhoneNumbersParams::default().status("active"))
        .await
        .unwrap();
    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers[0].phone_number, "+15550001111");
    assert_eq!(numbers[0].capabilities, ["voice"]);

    let number = client.get_phone_number("pn_2").await.unwrap();
    assert_eq!(number.agent_id.as_deref(), Some("agent_123"));
}

#[tokio::test]
async fn usage_and_limits() {
    let server = MockServer::start_async().await;
    let usage = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/usage")
                .query_param("period", "week");
            then.status(200).json_body(ok(json!({
                "period": "week",
                "from_date": "2024-01-01T00:00:00Z",
                "to_date": "2024-01-08T00:00:00Z",
                "api_calls": {"total": 42},
                "voice_calls": {"total": 7, "minutes": 31},
                "rate_limits": {"per_minute": 60}
            })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/usage/credits");
            then.status(200).json_body(ok(json!({
                "balance": 25.0,
                "currency": "USD",
                "low_balance_threshold": 5.0,
                "auto_recharge_enabled": false,
                "last_recharged_at": null,
                "usage_this_month": 12.5
            })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/usage/limits");
            then.status(200).json_body(ok(json!({
                "plan": "starter",
                "limits": {"agents": 5},
                "current_usage": {"agents": 2}
            })));
        })
        .await;

    let client = client(&server);
    let stats = client.get_usage(UsageParams::new(UsagePeriod::Week)).await.unwrap();
    usage.assert_async().await;
    assert_eq!(stats.voice_calls.get("minutes"), Some(&json!(31)));

    let balance = client.get_credit_balance().await.unwrap();
    assert_eq!(balance.currency, "USD");
    assert!(!balance.auto_recharge_enabled);
    assert_eq!(balance.last_recharged_at, None);

    let limits = client.get_account_limits().await.unwrap();
    assert_eq!(limits.plan, "starter");
}

#[tokio::test]
async fn conversations() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/v1/conversations")
                .query_param("agent_id", "agent_123")
                .query_param("limit", "5");
            then.status(200).json_body(ok(json!([{
                "conversation_id": "conv_1",
                "call_id": "call_1",
                "agent_id": "agent_123",
                "phone_number": "+15551234567",
                "started_at": "2024-01-01T10:00:00Z",
                "ended_at": "2024-01-01T10:05:00Z",
                "duration": 300,
                "message_count": 12,
                "summary": null,
                "outcome": "resolved"
            }])));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/v1/conversations/conv_1");
            then.status(200).json_body(ok(json!({
                "conversation_id": "conv_1",
                "call_id": "call_1",
                "agent_id": "agent_123",
                "phone_number": "+15551234567",
                "started_at": "2024-01-01T10:00:00Z",
                "ended_at": null,
                "duration": 300,
                "messages": [
                    {"timestamp": "2024-01-01T10:00:00Z", "speaker": "agent", "text": "Hello", "audio_duration": 1.2}
                ],
                "summary": "Order status",
                "outcome": "resolved",
                "metadata": null
            })));
        })
        .await;

    let client = client(&server);
    let list = client
        .list_conversations(ListConversationsParams::default().agent_id("agent_123").limit(5))
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].message_count, 12);
    assert_eq!(list[0].ended_at, Some(ts("2024-01-01T10:05:00Z")));

    let detail = client.get_conversation("conv_1").await.unwrap();
    assert_eq!(detail.messages.len(), 1);
    assert_eq!(detail.summary.as_deref(), Some("Order status"));
}
