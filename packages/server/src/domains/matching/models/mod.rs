pub mod collaboration_match;

pub use collaboration_match::{CollaborationMatch, MatchStatus};
