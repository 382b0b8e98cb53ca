use std::sync::Arc;

use image::DynamicImage;

use super::results::RelativeEvaluationResult;
use super::run_samples;
use crate::error::{Result, SampleResult};
use crate::media::Base64Png;
use crate::prompts::{self, DesignPrinciple};
use crate::providers::{VisionModel, VisionRequest};

/// Compares two design images under one design principle and reports a
/// preference judgment per sample.
pub struct RelativeEvaluator {
    model: Arc<dyn VisionModel>,
}

impl RelativeEvaluator {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Low-level entry point: raw instruction text plus an optional custom
    /// system template.
    ///
    /// Both images are encoded and embedded, in (a, b) order matching the
    /// labels in the user prompt.
    pub async fn evaluate(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
        principle_text: &str,
        system_template: Option<&str>,
        num_return: usize,
    ) -> Result<Vec<SampleResult<RelativeEvaluationResult>>> {
        let template = system_template.unwrap_or(prompts::DEFAULT_RELATIVE_SYSTEM_TEMPLATE);
        let system = prompts::render_system_prompt(template, principle_text)?;
        let payload_a = Base64Png::encode(image_a)?;
        let payload_b = Base64Png::encode(image_b)?;

        let request = VisionRequest {
            system,
            user_text: prompts::RELATIVE_USER_PROMPT.to_string(),
            images: vec![payload_a, payload_b],
        };

        tracing::debug!(num_return, "comparing design images");
        Ok(run_samples(
            &self.model,
            &request,
            num_return,
            RelativeEvaluationResult::from_reply,
        )
        .await)
    }

    /// Catalog shortcut: look up the principle's instruction text and use
    /// the default system template.
    pub async fn compare(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
        principle: DesignPrinciple,
        num_return: usize,
    ) -> Result<Vec<SampleResult<RelativeEvaluationResult>>> {
        self.evaluate(image_a, image_b, principle.instruction(), None, num_return)
            .await
    }
}
