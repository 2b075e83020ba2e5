//! Pairwise match score.
//!
//! Three signals are summed and the total is capped at 1.0:
//!
//! | Signal | Weight | Fires when |
//! |---|---|---|
//! | category | 0.4 | both non-empty and equal |
//! | keywords | up to 0.3 | description tokens overlap |
//! | title | 0.3 | one lowercased title contains the other |

use crate::item::Item;
use serde::Serialize;
use std::collections::HashSet;

/// Contribution of an exact category match.
pub const CATEGORY_WEIGHT: f64 = 0.4;

/// Contribution of a full description overlap.
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Contribution of a title containment.
pub const TITLE_WEIGHT: f64 = 0.3;

/// Per-signal contributions for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub category: f64,
    pub keywords: f64,
    pub title: f64,
    /// Sum of the signals, capped at 1.0
    pub total: f64,
}

/// Lowercased whitespace-separated tokens of a description.
pub fn tokenize(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn count_present(tokens: &[String], other: &HashSet<&str>) -> usize {
    tokens.iter().filter(|t| other.contains(t.as_str())).count()
}

/// Number of shared tokens between two token lists.
///
/// Every occurrence in one list whose token appears anywhere in the other is
/// counted. The larger of the two directional counts is returned so the
/// result does not depend on argument order when a word repeats.
pub fn keyword_overlap(a: &[String], b: &[String]) -> usize {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    count_present(a, &set_b).max(count_present(b, &set_a))
}

fn category_signal(a: &str, b: &str) -> f64 {
    if !a.is_empty() && a == b {
        CATEGORY_WEIGHT
    } else {
        0.0
    }
}

fn keyword_signal(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    let longest = tokens_a.len().max(tokens_b.len()).max(1);
    let common = keyword_overlap(&tokens_a, &tokens_b);
    common as f64 / longest as f64 * KEYWORD_WEIGHT
}

fn title_signal(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.contains(&b) || b.contains(&a) {
        TITLE_WEIGHT
    } else {
        0.0
    }
}

/// Score two items and report each signal separately.
pub fn score_breakdown(a: &Item, b: &Item) -> ScoreBreakdown {
    let category = category_signal(&a.category, &b.category);
    let keywords = keyword_signal(&a.description, &b.description);
    let title = title_signal(&a.title, &b.title);

    ScoreBreakdown {
        category,
        keywords,
        title,
        total: (category + keywords + title).min(1.0),
    }
}

/// Heuristic similarity of two items in `[0, 1]`.
///
/// Total and symmetric: `match_score(a, b) == match_score(b, a)`, and empty
/// fields simply contribute nothing.
///
/// ```
/// use retrievix_match::{match_score, Item, ItemType};
///
/// let lost = Item::new("L-1", ItemType::Lost)
///     .with_category("Electronics")
///     .with_title("iPhone 14")
///     .with_description("black phone with case");
/// let found = Item::new("F-1", ItemType::Found)
///     .with_category("Electronics")
///     .with_title("iPhone")
///     .with_description("black phone found near station");
///
/// assert!((match_score(&lost, &found) - 0.82).abs() < 1e-9);
/// ```
pub fn match_score(a: &Item, b: &Item) -> f64 {
    score_breakdown(a, b).total
}

/// Score as a whole percentage, `round(score * 100)`.
pub fn percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
