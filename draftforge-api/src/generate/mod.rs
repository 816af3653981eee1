/// Content generation adapters
///
/// This module defines the contract for drafting and rewriting section
/// content through an external generative model, plus its implementations:
///
/// - **Gemini**: the production adapter calling the Google Generative
///   Language API
/// - **Mock**: deterministic canned output for tests and demos
///
/// # The always-succeeds contract
///
/// Neither operation can fail from the caller's point of view. Document
/// creation must never block on an AI outage, so on any failure (missing
/// key, network, quota, malformed response) the adapter logs the cause and
/// returns a fallback marked `degraded`:
///
/// - `draft` falls back to a placeholder naming the section
/// - `rewrite` falls back to the existing text, byte-for-byte; a failed
///   refinement never loses the prior content
///
/// The `degraded` flag travels to the HTTP response as structured metadata;
/// raw error text never lands in user-facing content.
///
/// Calls are single-shot and awaited inline: no retry, no streaming, no
/// rate limiting. One route invocation issues exactly one call per section.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;

pub use gemini::GeminiGenerator;
pub use mock::MockGenerator;

/// Output of a draft or rewrite call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The text to persist
    pub text: String,

    /// True when the adapter fell back because the model call failed
    pub degraded: bool,
}

impl Generated {
    /// Real model output.
    pub fn ok(text: String) -> Self {
        Generated {
            text,
            degraded: false,
        }
    }

    /// Fallback output after a failed model call.
    pub fn fallback(text: String) -> Self {
        Generated {
            text,
            degraded: true,
        }
    }
}

/// Content generation contract
///
/// Implementations must uphold the always-succeeds contract documented at
/// the module level.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the adapter name, used for logging.
    fn name(&self) -> &str;

    /// Drafts content for an empty section from its title.
    async fn draft(&self, title: &str) -> Generated;

    /// Rewrites existing content according to a free-form instruction.
    async fn rewrite(&self, existing: &str, instruction: &str) -> Generated;
}

/// Builds the placeholder text for a failed draft.
///
/// Deliberately carries no error detail; the cause goes to the logs and the
/// degradation itself is reported via [`Generated::degraded`].
pub(crate) fn draft_placeholder(title: &str) -> String {
    format!(
        "[Placeholder] Content for \"{}\" could not be generated.",
        title
    )
}
