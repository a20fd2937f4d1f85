mod common;

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use hookd::actor::Actor;
use hookd::clock::FixedClock;
use hookd::hook::{HookError, HookPipeline};
use hookd::record::PendingChange;

fn payload(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn pipeline_at(now_ms: i64) -> (HookPipeline, Arc<FixedClock>) {
    common::init_tracing();
    let clock = Arc::new(FixedClock::new(now_ms));
    let pipeline = HookPipeline::with_builtin_stamps(clock.clone());
    (pipeline, clock)
}

#[tokio::test]
async fn anonymous_create_is_rejected_with_401() -> Result<()> {
    let (pipeline, _) = pipeline_at(1_700_000_000_000);
    let pending = PendingChange::create("posts", payload(&[("title", json!("hi"))]));

    let err = pipeline
        .dispatch(None, pending)
        .await
        .expect_err("anonymous create must be rejected");

    assert_eq!(err.status_code(), 401);
    assert_eq!(err.message(), "You must be logged in");
    assert!(matches!(err, HookError::Rejected(_)));
    Ok(())
}

#[tokio::test]
async fn anonymous_update_is_rejected_with_401() -> Result<()> {
    let (pipeline, _) = pipeline_at(1_700_000_000_000);
    let pending = PendingChange::update(
        "posts",
        Uuid::new_v4(),
        payload(&[("createdAt", json!(100)), ("creatorId", json!("u1"))]),
        payload(&[("title", json!("hi"))]),
    );

    let err = pipeline
        .dispatch(None, pending)
        .await
        .expect_err("anonymous update must be rejected");

    assert_eq!(err.status_code(), 401);
    assert_eq!(err.message(), "You must be logged in");
    Ok(())
}

// Scenario from the original behavior: actor u1, payload carries a title and
// a smuggled updatedAt, clock at 1700000000000ms.
#[tokio::test]
async fn create_stamps_created_at_and_creator_id() -> Result<()> {
    let (pipeline, _) = pipeline_at(1_700_000_000_000);
    let pending = PendingChange::create(
        "posts",
        payload(&[("title", json!("hi")), ("updatedAt", json!(999))]),
    );

    let committed = pipeline.dispatch(Some(Actor::new("u1")), pending).await?;

    assert_eq!(committed.get("createdAt"), Some(&json!(1_700_000_000_i64)));
    assert_eq!(committed.get("creatorId"), Some(&json!("u1")));
    assert_eq!(committed.get("title"), Some(&json!("hi")));
    assert!(!committed.contains("updatedAt"));
    assert_eq!(committed.excluded().to_vec(), vec!["updatedAt".to_string()]);
    Ok(())
}

#[tokio::test]
async fn create_overrides_client_supplied_audit_fields() -> Result<()> {
    let (pipeline, _) = pipeline_at(1_700_000_000_999);
    let pending = PendingChange::create(
        "posts",
        payload(&[
            ("title", json!("hi")),
            ("createdAt", json!(1)),
            ("creatorId", json!("someone-else")),
        ]),
    );

    let committed = pipeline.dispatch(Some(Actor::new("u1")), pending).await?;

    // Millisecond clock truncates to whole seconds
    assert_eq!(committed.get("createdAt"), Some(&json!(1_700_000_000_i64)));
    assert_eq!(committed.get("creatorId"), Some(&json!("u1")));
    Ok(())
}

#[tokio::test]
async fn update_stamps_updated_at_and_drops_provenance_fields() -> Result<()> {
    let (pipeline, _) = pipeline_at(1_700_000_050_000);
    let pending = PendingChange::update(
        "posts",
        Uuid::new_v4(),
        payload(&[("createdAt", json!(1_700_000_000)), ("creatorId", json!("u1"))]),
        payload(&[
            ("title", json!("edited")),
            ("createdAt", json!(0)),
            ("creatorId", json!("intruder")),
        ]),
    );

    let committed = pipeline.dispatch(Some(Actor::new("u2")), pending).await?;

    assert_eq!(committed.get("updatedAt"), Some(&json!(1_700_000_050_i64)));
    assert_eq!(committed.get("title"), Some(&json!("edited")));
    assert!(!committed.contains("createdAt"));
    assert!(!committed.contains("creatorId"));

    let mut excluded = committed.excluded().to_vec();
    excluded.sort();
    assert_eq!(excluded, vec!["createdAt".to_string(), "creatorId".to_string()]);
    Ok(())
}

#[tokio::test]
async fn repeated_updates_yield_non_decreasing_updated_at() -> Result<()> {
    let (pipeline, clock) = pipeline_at(1_700_000_000_000);
    let actor = Actor::new("u1");
    let id = Uuid::new_v4();
    let original = payload(&[("createdAt", json!(100)), ("creatorId", json!("u1"))]);

    let first = pipeline
        .dispatch(
            Some(actor.clone()),
            PendingChange::update("posts", id, original.clone(), payload(&[("title", json!("a"))])),
        )
        .await?;

    // Same instant: stamp must not move backwards
    let second = pipeline
        .dispatch(
            Some(actor.clone()),
            PendingChange::update("posts", id, original.clone(), payload(&[("title", json!("b"))])),
        )
        .await?;

    clock.advance(2_000);
    let third = pipeline
        .dispatch(
            Some(actor),
            PendingChange::update("posts", id, original, payload(&[("title", json!("c"))])),
        )
        .await?;

    let stamp = |c: &hookd::record::CommittedChange| {
        c.get("updatedAt").and_then(Value::as_i64).expect("updatedAt stamped")
    };
    assert!(stamp(&first) <= stamp(&second));
    assert!(stamp(&second) <= stamp(&third));
    assert_eq!(stamp(&third), 1_700_000_002);

    for committed in [&first, &second, &third] {
        assert!(!committed.contains("createdAt"));
        assert!(!committed.contains("creatorId"));
    }
    Ok(())
}

#[tokio::test]
async fn non_object_payload_is_invalid() -> Result<()> {
    let err = PendingChange::create_from_json("posts", json!("just a string"))
        .expect_err("non-object payloads are invalid");

    let hook_err: HookError = err.into();
    assert_eq!(hook_err.status_code(), 400);
    Ok(())
}
