//! Prompt catalog: design-principle instruction texts and the system/user
//! prompt templates they are spliced into.
//!
//! All texts are process-wide immutable data. The instruction wording is
//! carried over verbatim from the deployed prompts (typos included) so that
//! replies stay comparable across runs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::PromptError;

/// Named evaluative lens applied to a graphic-design image.
///
/// Parsing from a string is the validation boundary: anything outside the
/// three known tags fails at `FromStr`, so code past that point never sees
/// an unknown principle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DesignPrinciple {
    Alignment,
    Overlap,
    Whitespace,
}

impl DesignPrinciple {
    /// The literal evaluation-instruction text for this principle.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Alignment => ALIGNMENT_PRINCIPLE,
            Self::Overlap => OVERLAP_PRINCIPLE,
            Self::Whitespace => WHITESPACE_PRINCIPLE,
        }
    }
}

const ALIGNMENT_PRINCIPLE: &str = "\
Correct alignment is an important aspect of design that has been modeled in other layout applications. Text and graphic elements are aligned on the page to indicate organizational structure and aesthetics.

Please evaluate the alignment of the input graphic design considering the following points.

1. Alignment along with the horizontal and vertical direction is considered.
2. The elements that align at a glance but slight misalignment are penalized because it is visually displeasing.
3. Larger alignment groups (i.e., aligned elements that are distant from each other) are preferred as they produce simpler designs with more unity between elements.";

const OVERLAP_PRINCIPLE: &str = "\
Overlapping elements are common in many designs and absent from others.
Less or proper overlapping might be considered aesthetically pleasing, but others are not.

Please consider the following points to evaluate the overlap.

1. The three types of overlap, the overlap of elements on text, the overlap of text on graphics, and the overlap of graphics on other graphics, are considered.
2. Hard-to-read text because of insufficient color contrast between a text and the background color is penalized.
3. The graphic design that includes elements extending past the boundaries is also penalized.";

const WHITESPACE_PRINCIPLE: &str = "\
White space in graphic designs is fundamental for readability and aesthetics. Element distance is also closely related to the principle of proximity, as elements placed near each other may appear to be related. White space also influences the overall design style; many modern designs use significant white space. White space 'trapped' between elements can also be distracting.

Evaluate the white space considering the following points.

1.A large ratio of white space that is not covered by design elements (e.g., graphics and tests) is preferred.
2. However, the graphic design with a too large region of empty white space on the image is undesirable.
3. The greater the distance between each element is preferred.
4. Uniformed vertical spacing of each text element is preferred.
5. Wider border margins for each element are preferred.";

/// Placeholder that system templates must carry; rendering substitutes the
/// principle's instruction text here.
pub const PRINCIPLE_PLACEHOLDER: &str = "{design_principle}";

/// Default system template for absolute (single-image) scoring.
pub const DEFAULT_ABSOLUTE_SYSTEM_TEMPLATE: &str = r#"You are an autonomous AI Assistant who aids designers by providing insightful, objective, and constructive critiques of graphic design projects. Your goals are: "Deliver comprehensive and unbiased evaluations of graphic designs based on the following design principles."

Grade seriously. The range of scores is from 1 to 10. A flawless design can earn 10 points, a mediocre design can only earn 7 points, a design with obvious shortcomings can only earn 4 points, and a very poor design can only earn 1-2 points.

{design_principle}

If the output is too long, it will be truncated. Only respond in JSON format, no other information. Example of output for a better graphic design:

{
    "score": 6,
    "explanation": "Please concisely explain the reason of the score."
}"#;

/// Default system template for relative (two-image) comparison.
pub const DEFAULT_RELATIVE_SYSTEM_TEMPLATE: &str = r#"You are an autonomous AI Assistant who aids designers by providing insightful, objective, and constructive
critiques of graphic design projects.

Your goals are: "Deliver comprehensive and unbiased evaluations of graphic designs based on the following design principles."

{design_principle}

If the output is too long, it will be truncated. Only respond in JSON format, no other information. Example of output for a better graphic design (a):

{
    "better_design": "a",
    "explanation": "(Please concisely explain the reason of choice.)"
}

If both images are the same quality, answer

{
    "better_design": "both",
    "explanation": "(Please concisely explain the reason of choice.)"
}
"#;

/// Fixed user-message text accompanying the single image in absolute scoring.
pub const ABSOLUTE_USER_PROMPT: &str = "Please score the following images.";

/// Fixed user-message text accompanying the two labeled images in relative
/// comparison.
pub const RELATIVE_USER_PROMPT: &str = "\
Which of the following graphic designs has better quality regarding the above-described points? (a)[image] (b)[image]
";

/// Substitute `principle_text` into `template`.
///
/// A template without the placeholder would silently drop the principle, so
/// that is rejected up front rather than discovered in model replies.
pub fn render_system_prompt(
    template: &str,
    principle_text: &str,
) -> Result<String, PromptError> {
    if !template.contains(PRINCIPLE_PLACEHOLDER) {
        return Err(PromptError::MissingPlaceholder {
            placeholder: PRINCIPLE_PLACEHOLDER,
        });
    }
    Ok(template.replace(PRINCIPLE_PLACEHOLDER, principle_text))
}
