//! Typed containers for the model's JSON replies.
//!
//! Parsing is an explicit two-step: serde into a raw wire shape, then a
//! validating constructor. Constraint violations surface as
//! [`SchemaError`] and are never clamped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SchemaError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Absolute score for one image against one design principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    /// 1..=10 inclusive; enforced at construction.
    pub score: u8,
    pub explanation: String,
}

#[derive(Deserialize)]
struct RawEvaluation {
    score: i64,
    explanation: String,
}

impl EvaluationResult {
    pub fn new(score: i64, explanation: impl Into<String>) -> Result<Self, SchemaError> {
        let validated = u8::try_from(score)
            .ok()
            .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
            .ok_or(SchemaError::ScoreOutOfRange { score })?;
        Ok(Self {
            score: validated,
            explanation: explanation.into(),
        })
    }

    /// Parse and validate a raw model reply.
    pub fn from_reply(reply: &str) -> Result<Self, SchemaError> {
        let raw: RawEvaluation = serde_json::from_str(reply)?;
        Self::new(raw.score, raw.explanation)
    }
}

/// Tags accepted from the comparison reply.
///
/// The user prompt frames the question as "which design (a/b) is better",
/// but the wire schema enumerates magnitudes of difference rather than side
/// labels. Kept verbatim so replies shaped by the deployed prompt keep
/// parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    None,
    Small,
    Medium,
    Large,
    Both,
}

/// Preference judgment for a pair of images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeEvaluationResult {
    pub preference: Preference,
    pub explanation: String,
}

#[derive(Deserialize)]
struct RawRelative {
    better_design: String,
    explanation: String,
}

impl RelativeEvaluationResult {
    pub fn new(tag: &str, explanation: impl Into<String>) -> Result<Self, SchemaError> {
        let preference = Preference::from_str(tag).map_err(|_| SchemaError::UnknownPreference {
            tag: tag.to_string(),
        })?;
        Ok(Self {
            preference,
            explanation: explanation.into(),
        })
    }

    /// Parse and validate a raw model reply. The wire field is
    /// `better_design`, matching the JSON example in the deployed prompt.
    pub fn from_reply(reply: &str) -> Result<Self, SchemaError> {
        let raw: RawRelative = serde_json::from_str(reply)?;
        Self::new(&raw.better_design, raw.explanation)
    }
}
