use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `design-critic`.
///
/// Each stage of the evaluation pipeline defines its own error variant so
/// callers can match on the failure class: schema violations are distinct
/// from transport failures, which are distinct from prompt or encoding
/// mistakes.
#[derive(Debug, Error)]
pub enum CriticError {
    // ── Prompt composition ──────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),

    // ── Image encoding ──────────────────────────────────────────────────
    #[error("encode: {0}")]
    Encode(#[from] EncodeError),

    // ── Reply validation ────────────────────────────────────────────────
    #[error("schema: {0}")]
    Schema(#[from] SchemaError),

    // ── Model transport ─────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Prompt errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("system template is missing the {placeholder} placeholder")]
    MissingPlaceholder { placeholder: &'static str },
}

// ─── Encoding errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("png encode failed: {0}")]
    Png(#[from] image::ImageError),
}

// ─── Schema errors ───────────────────────────────────────────────────────────

/// The model's reply did not satisfy the requested output schema.
///
/// Never coerced or clamped: an out-of-range score or unknown preference tag
/// fails the sample it belongs to.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("reply was not the requested JSON shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("score {score} outside the 1..=10 scale")]
    ScoreOutOfRange { score: i64 },

    #[error("unknown preference tag {tag:?}")]
    UnknownPreference { tag: String },
}

// ─── Model transport errors ──────────────────────────────────────────────────

/// Failure talking to the hosted model. No retry is performed here; backoff
/// policy belongs to the caller or the provider client.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },

    #[error("{provider} authentication failed ({status})")]
    Auth { provider: String, status: u16 },

    #[error("{provider} rate-limited ({status})")]
    RateLimited { provider: String, status: u16 },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, CriticError>;

/// Outcome of one independent model sample within a batch.
///
/// A failed sample occupies its own slot instead of failing the batch, so a
/// caller can always tell N results apart from fewer-than-N.
pub type SampleResult<T> = std::result::Result<T, CriticError>;
