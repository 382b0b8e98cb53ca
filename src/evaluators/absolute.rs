use std::sync::Arc;

use image::DynamicImage;

use super::results::EvaluationResult;
use super::run_samples;
use crate::error::{Result, SampleResult};
use crate::media::Base64Png;
use crate::prompts::{self, DesignPrinciple};
use crate::providers::{VisionModel, VisionRequest};

/// Scores one design image on the 1..=10 scale against one design principle.
///
/// Stateless apart from the model handle; every call composes, dispatches
/// and validates independently.
pub struct AbsoluteEvaluator {
    model: Arc<dyn VisionModel>,
}

impl AbsoluteEvaluator {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Low-level entry point: raw instruction text plus an optional custom
    /// system template.
    ///
    /// Dispatches `num_return` independent requests with identical input and
    /// returns one slot per sample. The outer `Result` covers setup
    /// (template rendering, image encoding); a sample's transport or schema
    /// failure lands in its own slot.
    pub async fn evaluate(
        &self,
        image: &DynamicImage,
        principle_text: &str,
        system_template: Option<&str>,
        num_return: usize,
    ) -> Result<Vec<SampleResult<EvaluationResult>>> {
        let template = system_template.unwrap_or(prompts::DEFAULT_ABSOLUTE_SYSTEM_TEMPLATE);
        let system = prompts::render_system_prompt(template, principle_text)?;
        let payload = Base64Png::encode(image)?;

        let request = VisionRequest {
            system,
            user_text: prompts::ABSOLUTE_USER_PROMPT.to_string(),
            images: vec![payload],
        };

        tracing::debug!(num_return, "scoring design image");
        Ok(run_samples(&self.model, &request, num_return, EvaluationResult::from_reply).await)
    }

    /// Catalog shortcut: look up the principle's instruction text and use
    /// the default system template.
    pub async fn score(
        &self,
        image: &DynamicImage,
        principle: DesignPrinciple,
        num_return: usize,
    ) -> Result<Vec<SampleResult<EvaluationResult>>> {
        self.evaluate(image, principle.instruction(), None, num_return)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CriticError, SchemaError};
    use crate::evaluators::testing::{FailingModel, ScriptedModel};
    use image::{Rgba, RgbaImage};

    fn one_pixel() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([200, 10, 10, 255])))
    }

    fn evaluator(reply: &str) -> (Arc<ScriptedModel>, AbsoluteEvaluator) {
        let model = Arc::new(ScriptedModel::replying(reply));
        (model.clone(), AbsoluteEvaluator::new(model))
    }

    #[tokio::test]
    async fn returns_one_slot_per_sample() {
        let (model, evaluator) = evaluator(r#"{"score": 7, "explanation": "ok"}"#);
        let samples = evaluator
            .score(&one_pixel(), DesignPrinciple::Alignment, 3)
            .await
            .unwrap();

        assert_eq!(samples.len(), 3);
        for sample in samples {
            assert_eq!(sample.unwrap().score, 7);
        }
        assert_eq!(model.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn zero_samples_issue_no_requests() {
        let (model, evaluator) = evaluator(r#"{"score": 5, "explanation": "x"}"#);
        let samples = evaluator
            .score(&one_pixel(), DesignPrinciple::Overlap, 0)
            .await
            .unwrap();

        assert!(samples.is_empty());
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_score_fails_the_sample() {
        let (_, evaluator) = evaluator(r#"{"score": 99, "explanation": "generous"}"#);
        let samples = evaluator
            .score(&one_pixel(), DesignPrinciple::Whitespace, 2)
            .await
            .unwrap();

        assert_eq!(samples.len(), 2);
        for sample in samples {
            assert!(matches!(
                sample.unwrap_err(),
                CriticError::Schema(SchemaError::ScoreOutOfRange { score: 99 })
            ));
        }
    }

    #[tokio::test]
    async fn transport_failure_fills_each_slot() {
        let evaluator = AbsoluteEvaluator::new(Arc::new(FailingModel));
        let samples = evaluator
            .score(&one_pixel(), DesignPrinciple::Alignment, 2)
            .await
            .unwrap();

        assert_eq!(samples.len(), 2);
        for sample in samples {
            assert!(matches!(sample.unwrap_err(), CriticError::Llm(_)));
        }
    }

    #[tokio::test]
    async fn composed_request_embeds_principle_and_single_image() {
        let (model, evaluator) = evaluator(r#"{"score": 4, "explanation": "meh"}"#);
        evaluator
            .score(&one_pixel(), DesignPrinciple::Overlap, 1)
            .await
            .unwrap();

        let seen = model.seen.lock().unwrap();
        let request = &seen[0];
        assert!(request.system.contains("Overlapping elements are common"));
        assert!(request.system.contains("Grade seriously"));
        assert_eq!(request.user_text, "Please score the following images.");
        assert_eq!(request.images.len(), 1);
    }

    #[tokio::test]
    async fn custom_template_without_placeholder_fails_fast() {
        let (model, evaluator) = evaluator(r#"{"score": 4, "explanation": "x"}"#);
        let err = evaluator
            .evaluate(
                &one_pixel(),
                DesignPrinciple::Alignment.instruction(),
                Some("You are a stern judge."),
                1,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CriticError::Prompt(_)));
        assert!(model.seen.lock().unwrap().is_empty());
    }
}
