//! The two evaluators share one pipeline: compose prompt, fan out
//! `num_return` identical requests, validate each reply the moment it
//! arrives. They differ only in image count and result schema.

mod absolute;
mod relative;
pub mod results;

pub use absolute::AbsoluteEvaluator;
pub use relative::RelativeEvaluator;
pub use results::{EvaluationResult, Preference, RelativeEvaluationResult};

use std::sync::Arc;

use futures_util::future::join_all;

use crate::error::{CriticError, SampleResult, SchemaError};
use crate::providers::{VisionModel, VisionRequest};

/// Dispatch `num_return` independent requests with identical input and
/// validate each reply.
///
/// Samples are non-interacting: one slot failing transport or schema
/// validation leaves the others untouched. `num_return == 0` issues no
/// requests.
pub(crate) async fn run_samples<T>(
    model: &Arc<dyn VisionModel>,
    request: &VisionRequest,
    num_return: usize,
    parse: impl Fn(&str) -> Result<T, SchemaError>,
) -> Vec<SampleResult<T>> {
    if num_return == 0 {
        return Vec::new();
    }

    let calls = (0..num_return).map(|_| model.complete(request));
    join_all(calls)
        .await
        .into_iter()
        .enumerate()
        .map(|(sample, reply)| match reply {
            Ok(text) => parse(&text).map_err(|error| {
                tracing::warn!(sample, %error, "reply failed schema validation");
                CriticError::from(error)
            }),
            Err(error) => {
                tracing::warn!(sample, %error, "model request failed");
                Err(CriticError::from(error))
            }
        })
        .collect()
}
