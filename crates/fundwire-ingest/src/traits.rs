//! Trait seams for the ingest pipeline's collaborators.
//!
//! The pipeline only needs "give me a batch of posts" and "validate/rewrite
//! one post"; putting those behind traits keeps it testable with
//! deterministic doubles — no network, no API keys.

use std::future::Future;

use fundwire_core::{RewriteOutcome, TimelinePost};
use fundwire_gemini::GeminiRewriter;
use fundwire_timeline::TimelineClient;

/// Fetches a bounded batch of recent posts for one watched account.
/// Implementations never fail: a fetch problem is an empty batch.
pub trait PostFetcher {
    fn fetch(
        &self,
        handle: &str,
        max_items: usize,
    ) -> impl Future<Output = Vec<TimelinePost>>;
}

impl PostFetcher for TimelineClient {
    async fn fetch(&self, handle: &str, max_items: usize) -> Vec<TimelinePost> {
        self.fetch_user_posts(handle, max_items).await
    }
}

/// Decides template conformance and produces the rewritten announcement for
/// one post body.
pub trait Rewriter {
    fn rewrite(&self, body: &str) -> impl Future<Output = RewriteOutcome>;
}

impl Rewriter for GeminiRewriter {
    async fn rewrite(&self, body: &str) -> RewriteOutcome {
        GeminiRewriter::rewrite(self, body).await
    }
}
