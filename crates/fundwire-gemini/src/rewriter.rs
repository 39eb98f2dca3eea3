//! Template validation and rewrite on top of the Gemini client.
//!
//! The oracle is neither idempotent nor deterministic; the contract is only
//! that conforming input comes back in extractable shape and everything else
//! comes back as the sentinel.

use std::time::Duration;

use fundwire_core::{is_sentinel, RewriteOutcome};

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::prompt::rewrite_prompt;

/// Production rewriter: one oracle round-trip per post, with a bounded retry
/// on rate limiting.
pub struct GeminiRewriter {
    client: GeminiClient,
    max_retries: u32,
    fallback_cooldown_secs: u64,
}

impl GeminiRewriter {
    #[must_use]
    pub fn new(client: GeminiClient, max_retries: u32, fallback_cooldown_secs: u64) -> Self {
        Self {
            client,
            max_retries,
            fallback_cooldown_secs,
        }
    }

    /// Runs the template check and rewrite for one post body.
    ///
    /// Rate limiting is retried up to `max_retries` additional attempts,
    /// sleeping whole seconds per the provider hint (else the fallback
    /// cooldown). Every other failure maps to `TransientFailure` without
    /// retry — the item stays unrecorded and is re-attempted on a later run.
    pub async fn rewrite(&self, body: &str) -> RewriteOutcome {
        let prompt = rewrite_prompt(body);
        let mut attempt = 0u32;

        loop {
            match self.client.generate(&prompt).await {
                Ok(text) => {
                    if is_sentinel(&text) {
                        return RewriteOutcome::NonConforming;
                    }
                    return RewriteOutcome::Conforming(text);
                }
                Err(GeminiError::RateLimited { retry_after_secs }) => {
                    if attempt >= self.max_retries {
                        tracing::warn!(
                            attempts = attempt + 1,
                            "rate limit retry budget exhausted"
                        );
                        return RewriteOutcome::TransientFailure(
                            "rate limit retry budget exhausted".to_string(),
                        );
                    }
                    attempt += 1;
                    let cooldown_secs = retry_after_secs.unwrap_or(self.fallback_cooldown_secs);
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        cooldown_secs,
                        "Gemini rate limited — cooling down before retry"
                    );
                    tokio::time::sleep(Duration::from_secs(cooldown_secs)).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Gemini rewrite failed");
                    return RewriteOutcome::TransientFailure(err.to_string());
                }
            }
        }
    }
}
