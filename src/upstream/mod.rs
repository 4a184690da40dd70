// ============================================================================
// Upstream Collaborators
// ============================================================================
//
// Narrow interfaces over the three backend services the gateway fronts:
// - news store: paginated, search-filtered list + single item
// - comment store: per-item list + creation
// - moderation: approve/reject gate for comment content
//
// Each collaborator is a trait so the orchestration core has zero knowledge
// of how the stores are reached; the HTTP implementations share one
// UpstreamClient.
//
// ============================================================================

pub mod censor;
pub mod client;
pub mod comments;
pub mod news;

pub use censor::{HttpModerator, Moderator, Verdict};
pub use client::{UpstreamClient, UpstreamError, UpstreamRequest};
pub use comments::{CommentStore, HttpCommentStore};
pub use news::{HttpNewsStore, NewsStore};
