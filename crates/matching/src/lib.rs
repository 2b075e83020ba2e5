//! Match engine for lost and found reports.
//!
//! This crate provides:
//! - The item model and closed category set
//! - A pairwise match score in `[0, 1]`
//! - Deduplicated, ranked dashboard suggestions
//! - A single-item "similar items" lookup
//!
//! All operations are pure and total over their inputs; callers fetch the
//! item collections and hand them over.

mod config;
mod error;
mod item;
mod score;
mod similar;
mod suggest;

pub use config::{DEFAULT_MAX_SIMILAR, DEFAULT_MAX_SUGGESTIONS, DEFAULT_THRESHOLD, MatchConfig};
pub use error::{MatchError, MatchErrorCode, Result};
pub use item::{Category, Item, ItemStatus, ItemType};
pub use score::{
    CATEGORY_WEIGHT, KEYWORD_WEIGHT, ScoreBreakdown, TITLE_WEIGHT, keyword_overlap, match_score,
    percent, score_breakdown, tokenize,
};
pub use similar::{find_similar, find_similar_with};
pub use suggest::{MatchSuggestion, rank_suggestions, rank_suggestions_with};
