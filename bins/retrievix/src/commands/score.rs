//! Score command - explain the match score of two items

use super::print_json;
use crate::backend::Context;
use retrievix_cli::output::{Status, item_line, percent_badge};
use retrievix_cli::progress::with_spinner;
use retrievix_match::{percent, score_breakdown};
use retrievix_store::{ItemStore, MatchService};
use serde_json::json;

pub async fn run<S: ItemStore>(
    service: &MatchService<S>,
    a: &str,
    b: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let store = service.store();
    let (left, right) = with_spinner("Fetching items...", ctx.spinner, async {
        tokio::try_join!(store.get(a), store.get(b))
    })
    .await?;

    if left.item_type == right.item_type {
        return Err(retrievix_core::Error::validation(format!(
            "{} and {} are both {} items; scores compare a lost item with a found one",
            left.id, right.id, left.item_type
        ))
        .with_suggestion("Pass one lost and one found item id")
        .into());
    }

    let breakdown = score_breakdown(&left, &right);
    let pct = percent(breakdown.total);
    let is_match = service.config().is_match(breakdown.total);

    if ctx.json() {
        return print_json(&json!({
            "a": left.id,
            "b": right.id,
            "breakdown": breakdown,
            "percent": pct,
            "isMatch": is_match,
        }));
    }

    Status::header("Match score");
    println!("  {}", item_line(&left));
    println!("  {}", item_line(&right));
    println!();
    println!("  category  {:.2}", breakdown.category);
    println!("  keywords  {:.2}", breakdown.keywords);
    println!("  title     {:.2}", breakdown.title);
    println!("  total     {:.2}  {}", breakdown.total, percent_badge(pct));
    println!();
    if is_match {
        Status::success("Above the match threshold");
    } else {
        Status::info(&format!(
            "Below the match threshold ({:.2})",
            service.config().threshold
        ));
    }
    Ok(())
}
