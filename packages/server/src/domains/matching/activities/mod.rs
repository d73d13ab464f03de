pub mod queries;
pub mod respond_to_match;
pub mod spawn_matches;

pub use queries::{list_matches_for_request, list_pending_matches};
pub use respond_to_match::{respond_to_match, MatchResponse};
pub use spawn_matches::spawn_matches_for_request;
