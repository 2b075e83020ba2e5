//! Dashboard suggestions: the best found items across all of a user's lost
//! items.

use crate::config::MatchConfig;
use crate::item::{Item, ItemType};
use crate::score::{match_score, percent};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A found item surfaced as a likely match for one of the user's lost items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSuggestion {
    /// The candidate found item
    pub item: Item,
    /// Raw score in `[0, 1]`
    pub score: f64,
    /// `round(score * 100)`
    pub percent: u8,
    /// The lost item that produced `score`
    pub source_lost_item_id: String,
}

/// One retained (lost, found) pair, by index.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    lost: usize,
    found: usize,
    score: f64,
    percent: u8,
}

/// Rank suggestions with the default threshold and cap.
pub fn rank_suggestions(lost_items: &[Item], found_items: &[Item]) -> Vec<MatchSuggestion> {
    rank_suggestions_with(lost_items, found_items, &MatchConfig::default())
}

/// Rank the found items that best match any of `lost_items`.
///
/// Every lost × found pair is scored; pairs above the threshold become
/// candidates in generation order (lost-major). Candidates are deduplicated by
/// found-item id, keeping the first position and taking over score and
/// source of any later occurrence with a strictly higher percentage. The
/// result is stable-sorted by percentage, highest first, so candidates that
/// round to the same percentage keep their encounter order. It is capped at
/// `max_suggestions`.
///
/// Entries of the wrong type in either list are skipped.
pub fn rank_suggestions_with(
    lost_items: &[Item],
    found_items: &[Item],
    config: &MatchConfig,
) -> Vec<MatchSuggestion> {
    let lost = only_type(lost_items, ItemType::Lost);
    let found = only_type(found_items, ItemType::Found);
    if lost.is_empty() || found.is_empty() {
        return Vec::new();
    }

    let candidates = score_pairs(&lost, &found, config);

    let mut kept: Vec<Candidate> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for candidate in candidates {
        let id = found[candidate.found].id.as_str();
        match position.get(id) {
            Some(&at) => {
                if candidate.percent > kept[at].percent {
                    kept[at] = candidate;
                }
            }
            None => {
                position.insert(id, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept.sort_by(|a, b| b.percent.cmp(&a.percent));
    kept.truncate(config.max_suggestions);

    kept.into_iter()
        .map(|c| MatchSuggestion {
            item: found[c.found].clone(),
            score: c.score,
            percent: c.percent,
            source_lost_item_id: lost[c.lost].id.clone(),
        })
        .collect()
}

fn only_type(items: &[Item], wanted: ItemType) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| {
            let keep = item.item_type == wanted;
            if !keep {
                debug!(id = %item.id, expected = %wanted, "skipping item of the wrong type");
            }
            keep
        })
        .collect()
}

fn score_row(lost_idx: usize, lost: &Item, found: &[&Item], config: &MatchConfig) -> Vec<Candidate> {
    found
        .iter()
        .enumerate()
        .filter_map(|(found_idx, candidate)| {
            let score = match_score(lost, candidate);
            config.is_match(score).then(|| Candidate {
                lost: lost_idx,
                found: found_idx,
                score,
                percent: percent(score),
            })
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn score_pairs(lost: &[&Item], found: &[&Item], config: &MatchConfig) -> Vec<Candidate> {
    use rayon::prelude::*;

    // Rows come back in lost-item order, so generation order is unchanged.
    let rows: Vec<Vec<Candidate>> = lost
        .par_iter()
        .enumerate()
        .map(|(idx, item)| score_row(idx, item, found, config))
        .collect();
    rows.into_iter().flatten().collect()
}

#[cfg(not(feature = "parallel"))]
fn score_pairs(lost: &[&Item], found: &[&Item], config: &MatchConfig) -> Vec<Candidate> {
    lost.iter()
        .enumerate()
        .flat_map(|(idx, item)| score_row(idx, item, found, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn lost(id: &str, category: &str, title: &str, description: &str) -> Item {
        Item::new(id, ItemType::Lost)
            .with_category(category)
            .with_title(title)
            .with_description(description)
    }

    fn found(id: &str, category: &str, title: &str, description: &str) -> Item {
        Item::new(id, ItemType::Found)
            .with_category(category)
            .with_title(title)
            .with_description(description)
    }

    #[test]
    fn test_empty_inputs() {
        let l = vec![lost("L-1", "Keys", "Keys", "keys")];
        let f = vec![found("F-1", "Keys", "Keys", "keys")];
        assert!(rank_suggestions(&[], &f).is_empty());
        assert!(rank_suggestions(&l, &[]).is_empty());
    }

    #[test]
    fn test_single_match() {
        let l = vec![lost("L-1", "Electronics", "iPhone 14", "black phone with case")];
        let f = vec![
            found("F-1", "Electronics", "iPhone", "black phone found near station"),
            found("F-2", "Books", "Novel", "paperback"),
        ];

        let suggestions = rank_suggestions(&l, &f);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].item.id, "F-1");
        assert_eq!(suggestions[0].percent, 82);
        assert_eq!(suggestions[0].source_lost_item_id, "L-1");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Title containment alone scores exactly 0.3
        let l = vec![lost("L-1", "Bags", "Umbrella", "long black")];
        let f = vec![found("F-1", "Other", "umbrella", "small green")];
        assert!((match_score(&l[0], &f[0]) - 0.3).abs() < 1e-12);
        assert!(rank_suggestions(&l, &f).is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_position_and_best_source() {
        let l = vec![
            lost("L-1", "Keys", "", ""),
            lost("L-2", "Keys", "House keys", "brass key ring"),
        ];
        let f = vec![
            found("F-1", "Keys", "House keys", "brass key ring"),
            found("F-2", "Keys", "Bike lock key", ""),
        ];

        let suggestions = rank_suggestions(&l, &f);
        let ids: Vec<&str> = suggestions.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, ["F-1", "F-2"]);

        // F-1 was first produced by L-1 (0.4) and improved by L-2 (1.0)
        assert_eq!(suggestions[0].percent, 100);
        assert_eq!(suggestions[0].source_lost_item_id, "L-2");
        // F-2 scores 0.4 against both; the first occurrence stays
        assert_eq!(suggestions[1].source_lost_item_id, "L-1");
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let l = vec![lost("L-1", "Bags", "", "")];
        let f: Vec<Item> = (0..4)
            .map(|i| found(&format!("F-{i}"), "Bags", "", ""))
            .collect();

        let ids: Vec<String> = rank_suggestions(&l, &f)
            .into_iter()
            .map(|s| s.item.id)
            .collect();
        assert_eq!(ids, ["F-0", "F-1", "F-2", "F-3"]);
    }

    #[test]
    fn test_equal_percentages_keep_encounter_order() {
        // 0.4375 and 0.4429 both show as 44%
        let l = vec![lost("L-1", "Keys", "", "a b c d e f g")];
        let f = vec![
            found("F-1", "Keys", "", "a q r s t u v w"),
            found("F-2", "Keys", "", "a q r s t u v"),
        ];

        let suggestions = rank_suggestions(&l, &f);
        let got: Vec<(&str, u8)> = suggestions
            .iter()
            .map(|s| (s.item.id.as_str(), s.percent))
            .collect();
        assert_eq!(got, [("F-1", 44), ("F-2", 44)]);
        assert!(suggestions[0].score < suggestions[1].score);
    }

    #[test]
    fn test_dedup_ignores_gains_below_one_percent() {
        let l = vec![
            lost("L-1", "Keys", "", "a b c d e f g h"),
            lost("L-2", "Keys", "", "a b c d e f g"),
        ];
        let f = vec![found("F-1", "Keys", "", "a q r s t u v")];

        // L-1 gives 0.4375 and L-2 gives 0.4429, both 44%
        let suggestions = rank_suggestions(&l, &f);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].source_lost_item_id, "L-1");
        assert_eq!(suggestions[0].percent, 44);
    }

    #[test]
    fn test_sorted_and_capped() {
        let l = vec![lost("L-1", "Bags", "Red backpack", "red canvas backpack")];
        let mut f: Vec<Item> = (0..6)
            .map(|i| found(&format!("C-{i}"), "Bags", "", ""))
            .collect();
        f.push(found("BEST", "Bags", "backpack", "red canvas backpack"));

        let suggestions = rank_suggestions(&l, &f);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].item.id, "BEST");
        assert_eq!(suggestions[1].item.id, "C-0");
    }

    #[test]
    fn test_configured_cap_and_threshold() {
        let l = vec![lost("L-1", "Bags", "", "")];
        let f: Vec<Item> = (0..4)
            .map(|i| found(&format!("F-{i}"), "Bags", "", ""))
            .collect();

        let config = MatchConfig::new(0.3, 2, 3).unwrap();
        assert_eq!(rank_suggestions_with(&l, &f, &config).len(), 2);

        let strict = MatchConfig::new(0.5, 5, 3).unwrap();
        assert!(rank_suggestions_with(&l, &f, &strict).is_empty());
    }

    #[test]
    fn test_wrong_types_are_skipped() {
        let l = vec![
            found("F-9", "Keys", "Keys", "keys"),
            lost("L-1", "Keys", "Keys", "keys"),
        ];
        let f = vec![
            lost("L-2", "Keys", "Keys", "keys"),
            found("F-1", "Keys", "Keys", "keys"),
        ];

        let suggestions = rank_suggestions(&l, &f);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].item.id, "F-1");
        assert_eq!(suggestions[0].source_lost_item_id, "L-1");
    }

    fn arb_items(item_type: ItemType, prefix: &'static str) -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(
            (
                0..8usize,
                prop::sample::select(vec!["", "Keys", "Bags"]),
                prop::sample::select(vec!["", "wallet", "black wallet", "keys"]),
                prop::collection::vec(prop::sample::select(vec!["black", "leather", "key", "ring"]), 0..4),
            ),
            0..12,
        )
        .prop_map(move |rows| {
            rows.into_iter()
                .map(|(n, category, title, words)| {
                    Item::new(format!("{prefix}-{n}"), item_type)
                        .with_category(category)
                        .with_title(title)
                        .with_description(words.join(" "))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_ranking_invariants(
            l in arb_items(ItemType::Lost, "L"),
            f in arb_items(ItemType::Found, "F"),
        ) {
            let suggestions = rank_suggestions(&l, &f);

            prop_assert!(suggestions.len() <= 5);

            let ids: HashSet<&str> = suggestions.iter().map(|s| s.item.id.as_str()).collect();
            prop_assert_eq!(ids.len(), suggestions.len());

            for pair in suggestions.windows(2) {
                prop_assert!(pair[0].percent >= pair[1].percent);
            }

            for s in &suggestions {
                prop_assert!(s.score > 0.3);
                prop_assert_eq!(s.item.item_type, ItemType::Found);
                let source = l.iter().find(|i| i.id == s.source_lost_item_id);
                prop_assert!(source.is_some());
            }
        }
    }
}
