// Tests for the model fallback cascade using a scripted mock generator.
//
// These validate FallbackGenerator behavior without real API calls: attempt
// order, deduplication, short-circuiting, and which error surfaces when
// every candidate fails.

mod test_utils;

use futures_util::StreamExt;
use spyglass_core::GenerateRequest;
use spyglass_error::SpyglassErrorKind;
use spyglass_interface::{Streaming, TextGenerator};
use spyglass_models::FallbackGenerator;
use test_utils::{MockGenerator, MockReply};

fn two_fallbacks() -> Vec<String> {
    vec![
        "gemini-2.5-flash-lite".to_string(),
        "gemini-2.0-flash".to_string(),
    ]
}

#[tokio::test]
async fn test_first_success_short_circuits() -> anyhow::Result<()> {
    let mock = MockGenerator::new_success("Immediate answer");
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let response = cascade.generate(&request).await?;

    assert_eq!(response.text(), "Immediate answer");
    assert_eq!(cascade.inner().call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_cascade_tries_fallbacks_in_order() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![
        MockReply::QuotaExhausted,
        MockReply::QuotaExhausted,
        MockReply::Text("Third time lucky".to_string()),
    ]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let response = cascade.generate(&request).await?;

    assert_eq!(response.text(), "Third time lucky");
    assert_eq!(cascade.inner().call_count(), 3);
    assert_eq!(
        cascade.inner().requested_models(),
        vec![
            Some("gemini-2.5-flash".to_string()),
            Some("gemini-2.5-flash-lite".to_string()),
            Some("gemini-2.0-flash".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_requested_model_is_not_retried_as_fallback() -> anyhow::Result<()> {
    let mock = MockGenerator::new_fail_then_succeed(1, "Recovered");
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    // Requesting a model that also appears in the fallback list must not
    // produce a duplicate attempt against it.
    let request = GenerateRequest::builder()
        .messages(vec![spyglass_core::Message::user("Say hello")])
        .model("gemini-2.5-flash-lite")
        .build()?;
    let response = cascade.generate(&request).await?;

    assert_eq!(response.text(), "Recovered");
    assert_eq!(
        cascade.inner().requested_models(),
        vec![
            Some("gemini-2.5-flash-lite".to_string()),
            Some("gemini-2.0-flash".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_model_not_found_also_cascades() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![
        MockReply::ModelNotFound,
        MockReply::Text("Found a working model".to_string()),
    ]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let response = cascade.generate(&request).await?;

    assert_eq!(response.text(), "Found a working model");
    assert_eq!(cascade.inner().call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unrelated_error_stops_cascade() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![MockReply::Unauthorized]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let result = cascade.generate(&request).await;

    // A bad API key is not fixed by switching models.
    assert!(result.is_err());
    assert_eq!(cascade.inner().call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_raising_fallback_is_skipped() -> anyhow::Result<()> {
    // Once the cascade is walking the fallback list, any raising model is
    // skipped, even when its error is not a quota or not-found condition.
    let mock = MockGenerator::new_sequence(vec![
        MockReply::QuotaExhausted,
        MockReply::Unauthorized,
        MockReply::Text("Survived the bad fallback".to_string()),
    ]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let response = cascade.generate(&request).await?;

    assert_eq!(response.text(), "Survived the bad fallback");
    assert_eq!(cascade.inner().call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_all_candidates_failing_reports_last_error() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![
        MockReply::QuotaExhausted,
        MockReply::QuotaExhausted,
        MockReply::ModelNotFound,
    ]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let err = cascade
        .generate(&request)
        .await
        .expect_err("every candidate should fail");

    assert_eq!(cascade.inner().call_count(), 3);
    match err.kind() {
        SpyglassErrorKind::Gemini(gemini) => {
            // The final attempt failed with model-not-found, and that is
            // the error the caller sees.
            assert!(gemini.kind.is_model_not_found());
            assert!(!gemini.kind.is_quota_exhausted());
        }
        other => panic!("expected Gemini error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_no_fallbacks_behaves_like_inner() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![MockReply::QuotaExhausted]);
    let cascade = FallbackGenerator::new(mock, Vec::new());

    let request = GenerateRequest::from_prompt("Say hello");
    let result = cascade.generate(&request).await;

    assert!(result.is_err());
    assert_eq!(cascade.inner().call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_streaming_cascade_skips_exhausted_models() -> anyhow::Result<()> {
    let mock = MockGenerator::new_sequence(vec![
        MockReply::QuotaExhausted,
        MockReply::Text("Streamed text".to_string()),
    ]);
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    let request = GenerateRequest::from_prompt("Say hello");
    let mut stream = cascade.generate_stream(&request).await?;

    let mut collected = String::new();
    while let Some(chunk) = stream.next().await {
        collected.push_str(&chunk?.content);
    }

    assert_eq!(collected, "Streamed text");
    assert_eq!(cascade.inner().call_count(), 2);
    assert_eq!(
        cascade.inner().requested_models(),
        vec![
            Some("gemini-2.5-flash".to_string()),
            Some("gemini-2.5-flash-lite".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_provider_identity_delegates_to_inner() -> anyhow::Result<()> {
    let mock = MockGenerator::new_success("ok");
    let cascade = FallbackGenerator::new(mock, two_fallbacks());

    assert_eq!(cascade.provider_name(), "mock");
    assert_eq!(cascade.model_name(), "gemini-2.5-flash");
    Ok(())
}
