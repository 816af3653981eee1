/// Mock generator for testing and demos
///
/// Emits deterministic output so tests can assert on exact content, and can
/// be flipped into failure mode to exercise the degraded-fallback path
/// without touching the network.
///
/// # Example
///
/// ```
/// use draftforge_api::generate::{Generator, MockGenerator};
///
/// # async fn example() {
/// let generator = MockGenerator::new();
/// let drafted = generator.draft("Intro").await;
/// assert!(!drafted.degraded);
/// assert!(drafted.text.contains("Intro"));
///
/// let outage = MockGenerator::failing();
/// let fallback = outage.rewrite("keep me", "rewrite").await;
/// assert!(fallback.degraded);
/// assert_eq!(fallback.text, "keep me");
/// # }
/// ```

use super::{draft_placeholder, Generated, Generator};
use async_trait::async_trait;

/// Mock generator implementation
pub struct MockGenerator {
    /// When true, every call takes the degraded-fallback path
    fail: bool,
}

impl MockGenerator {
    /// Creates a mock that succeeds with canned output.
    pub fn new() -> Self {
        MockGenerator { fail: false }
    }

    /// Creates a mock that simulates a model outage.
    pub fn failing() -> Self {
        MockGenerator { fail: true }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn draft(&self, title: &str) -> Generated {
        if self.fail {
            return Generated::fallback(draft_placeholder(title));
        }
        Generated::ok(format!("Mock draft for section: {}", title))
    }

    async fn rewrite(&self, existing: &str, instruction: &str) -> Generated {
        if self.fail {
            return Generated::fallback(existing.to_string());
        }
        Generated::ok(format!("Rewritten per \"{}\": {}", instruction, existing))
    }
}
