use engine::{Currency, Engine, EntryKind, MemoryStorage, Money};
use insight::{InsightClient, InsightConfig, InsightError, fallback};

fn ledger() -> Engine<MemoryStorage> {
    let mut engine = Engine::builder()
        .storage(MemoryStorage::new())
        .build()
        .unwrap();
    let asha = engine.add_person("Asha").unwrap();
    engine
        .add_entry(asha, EntryKind::Lend, Money::new(250_00), "Food")
        .unwrap();
    engine
}

#[tokio::test]
async fn missing_key_returns_the_fallback() {
    let client = InsightClient::new(InsightConfig::default()).unwrap();
    let engine = ledger();

    let err = client
        .try_insights(engine.people(), Currency::Inr)
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::MissingApiKey));

    let insight = client.insights(engine.people(), Currency::Inr).await;
    assert_eq!(insight, fallback());
}

#[tokio::test]
async fn unreachable_service_returns_the_fallback() {
    // Port 9 (discard) is closed on test machines: the connection is refused.
    let client = InsightClient::new(InsightConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9/v1beta/".to_string(),
        timeout_secs: 2,
        ..InsightConfig::default()
    })
    .unwrap();
    let engine = ledger();

    let err = client
        .try_insights(engine.people(), Currency::Inr)
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::Network(_)));

    let insight = client.insights(engine.people(), Currency::Inr).await;
    assert_eq!(insight, fallback());
}
