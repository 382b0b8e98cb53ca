pub mod openai;
pub mod sanitize;
pub mod traits;

pub use openai::{OpenAiVisionModel, VisionModelConfig};
pub use sanitize::sanitize_api_error;
pub use traits::{VisionModel, VisionRequest};
