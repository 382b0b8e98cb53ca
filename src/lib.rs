#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! LLM-as-judge evaluation of graphic-design images.
//!
//! The crate holds no evaluation algorithm of its own: it composes a
//! multimodal chat prompt (system text + user text + inline base64 PNG
//! payloads), dispatches it to a vision-capable chat model behind the
//! [`providers::VisionModel`] abstraction, and parses the structured JSON
//! reply into validated result types.
//!
//! Two evaluators share that pipeline:
//! - [`evaluators::AbsoluteEvaluator`] scores one image on a 1..=10 scale
//!   against a design principle.
//! - [`evaluators::RelativeEvaluator`] compares two images and reports a
//!   preference judgment.

pub mod error;
pub mod evaluators;
pub mod media;
pub mod prompts;
pub mod providers;

pub use error::{CriticError, EncodeError, LlmError, PromptError, Result, SampleResult, SchemaError};
pub use evaluators::{
    AbsoluteEvaluator, EvaluationResult, Preference, RelativeEvaluationResult, RelativeEvaluator,
};
pub use prompts::DesignPrinciple;
pub use providers::{OpenAiVisionModel, VisionModel, VisionModelConfig, VisionRequest};
