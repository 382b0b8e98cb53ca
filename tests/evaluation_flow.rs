//! End-to-end evaluation flows against a mocked chat-completions endpoint.

use std::sync::Arc;
use std::time::Duration;

use design_critic::{
    AbsoluteEvaluator, CriticError, DesignPrinciple, LlmError, OpenAiVisionModel, Preference,
    RelativeEvaluator, SchemaError, VisionModelConfig,
};
use image::{DynamicImage, Rgba, RgbaImage};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn solid(rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba(rgba)))
}

fn model_for(server: &MockServer) -> Arc<OpenAiVisionModel> {
    Arc::new(OpenAiVisionModel::new(VisionModelConfig {
        base_url: server.uri(),
        api_key: Some("sk-test".to_string()),
        ..VisionModelConfig::default()
    }))
}

/// Chat-completions body whose reply text is `content`.
fn completion_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"content": content}}]
    }))
}

#[tokio::test]
async fn absolute_batch_returns_one_validated_result_per_sample() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(r#"{"score": 7, "explanation": "ok"}"#))
        .expect(3)
        .mount(&server)
        .await;

    let evaluator = AbsoluteEvaluator::new(model_for(&server));
    let samples = evaluator
        .score(&solid([120, 40, 40, 255]), DesignPrinciple::Alignment, 3)
        .await
        .unwrap();

    assert_eq!(samples.len(), 3);
    for sample in samples {
        let result = sample.unwrap();
        assert_eq!(result.score, 7);
        assert_eq!(result.explanation, "ok");
    }
}

#[tokio::test]
async fn out_of_range_score_surfaces_as_schema_error_not_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(r#"{"score": 99, "explanation": "generous"}"#))
        .mount(&server)
        .await;

    let evaluator = AbsoluteEvaluator::new(model_for(&server));
    let samples = evaluator
        .score(&solid([0, 0, 0, 255]), DesignPrinciple::Whitespace, 1)
        .await
        .unwrap();

    assert!(matches!(
        samples[0].as_ref().unwrap_err(),
        CriticError::Schema(SchemaError::ScoreOutOfRange { score: 99 })
    ));
}

#[tokio::test]
async fn relative_request_references_two_distinct_image_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(
            r#"{"better_design": "small", "explanation": "close"}"#,
        ))
        .mount(&server)
        .await;

    let evaluator = RelativeEvaluator::new(model_for(&server));
    evaluator
        .compare(
            &solid([255, 0, 0, 255]),
            &solid([0, 0, 255, 255]),
            DesignPrinciple::Overlap,
            1,
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let parts = body["messages"][1]["content"].as_array().unwrap();
    let image_urls: Vec<&str> = parts
        .iter()
        .filter(|part| part["type"] == "image_url")
        .map(|part| part["image_url"]["url"].as_str().unwrap())
        .collect();

    assert_eq!(image_urls.len(), 2);
    assert_ne!(image_urls[0], image_urls[1]);
    for url in image_urls {
        assert!(url.starts_with("data:image/png;base64,"));
    }
}

#[tokio::test]
async fn relative_preference_parses_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(
            r#"{"better_design": "both", "explanation": "tied"}"#,
        ))
        .mount(&server)
        .await;

    let evaluator = RelativeEvaluator::new(model_for(&server));
    let samples = evaluator
        .compare(
            &solid([10, 10, 10, 255]),
            &solid([20, 20, 20, 255]),
            DesignPrinciple::Whitespace,
            1,
        )
        .await
        .unwrap();

    let result = samples.into_iter().next().unwrap().unwrap();
    assert_eq!(result.preference, Preference::Both);
    assert_eq!(result.explanation, "tied");
}

#[tokio::test]
async fn zero_samples_issue_no_http_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(r#"{"score": 5, "explanation": "x"}"#))
        .expect(0)
        .mount(&server)
        .await;

    let evaluator = AbsoluteEvaluator::new(model_for(&server));
    let samples = evaluator
        .score(&solid([5, 5, 5, 255]), DesignPrinciple::Alignment, 0)
        .await
        .unwrap();

    assert!(samples.is_empty());
}

#[tokio::test]
async fn rejected_credentials_map_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let evaluator = AbsoluteEvaluator::new(model_for(&server));
    let samples = evaluator
        .score(&solid([1, 2, 3, 255]), DesignPrinciple::Overlap, 1)
        .await
        .unwrap();

    assert!(matches!(
        samples[0].as_ref().unwrap_err(),
        CriticError::Llm(LlmError::Auth { status: 401, .. })
    ));
}

#[tokio::test]
async fn slow_endpoint_surfaces_typed_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            completion_reply(r#"{"score": 6, "explanation": "late"}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let model = Arc::new(OpenAiVisionModel::new(VisionModelConfig {
        base_url: server.uri(),
        api_key: Some("sk-test".to_string()),
        request_timeout: Duration::from_millis(100),
        ..VisionModelConfig::default()
    }));

    let evaluator = AbsoluteEvaluator::new(model);
    let samples = evaluator
        .score(&solid([8, 8, 8, 255]), DesignPrinciple::Alignment, 1)
        .await
        .unwrap();

    assert!(matches!(
        samples[0].as_ref().unwrap_err(),
        CriticError::Llm(LlmError::Timeout { .. })
    ));
}

#[tokio::test]
async fn one_failing_sample_does_not_drop_the_batch_count() {
    // Two samples race against a mock that answers the first request well
    // and the second with garbage; both slots must come back.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(r#"{"score": 2, "explanation": "weak"}"#))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply("not json at all"))
        .mount(&server)
        .await;

    let evaluator = AbsoluteEvaluator::new(model_for(&server));
    let samples = evaluator
        .score(&solid([30, 30, 30, 255]), DesignPrinciple::Overlap, 2)
        .await
        .unwrap();

    assert_eq!(samples.len(), 2);
    let ok_count = samples.iter().filter(|s| s.is_ok()).count();
    let schema_errors = samples
        .iter()
        .filter(|s| matches!(s, Err(CriticError::Schema(_))))
        .count();
    assert_eq!(ok_count, 1);
    assert_eq!(schema_errors, 1);
}
