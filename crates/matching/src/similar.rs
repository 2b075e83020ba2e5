//! "You might be interested in" lookup for a single item.

use crate::config::MatchConfig;
use crate::item::Item;
use crate::score::match_score;
use tracing::debug;

/// Similar items with the default threshold and cap.
pub fn find_similar<'a>(reference: &Item, pool: &'a [Item]) -> Vec<&'a Item> {
    find_similar_with(reference, pool, &MatchConfig::default())
}

/// Items of the opposite type that share the reference's category or score
/// above the threshold against it, in pool order, at most `max_similar`.
///
/// Pool entries of the reference's own type (including the reference itself)
/// are skipped.
pub fn find_similar_with<'a>(
    reference: &Item,
    pool: &'a [Item],
    config: &MatchConfig,
) -> Vec<&'a Item> {
    let wanted = reference.item_type.opposite();

    pool.iter()
        .filter(|candidate| {
            if candidate.item_type != wanted || candidate.id == reference.id {
                debug!(id = %candidate.id, "skipping same-type item");
                return false;
            }
            let same_category =
                !reference.category.is_empty() && candidate.category == reference.category;
            same_category || config.is_match(match_score(reference, candidate))
        })
        .take(config.max_similar)
        .collect()
}
