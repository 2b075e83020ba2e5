//! Similar command - item detail with related reports

use super::print_json;
use crate::backend::Context;
use owo_colors::OwoColorize;
use retrievix_cli::output::{Status, item_line, percent_badge};
use retrievix_cli::progress::with_spinner;
use retrievix_store::{ItemStore, MatchService};

pub async fn run<S: ItemStore>(
    service: &MatchService<S>,
    id: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let detail = with_spinner("Fetching item...", ctx.spinner, service.similar_to(id)).await?;

    if ctx.json() {
        return print_json(&detail);
    }

    let item = &detail.item;
    Status::header(&item.title);
    println!("  {}", item_line(item));
    if !item.description.is_empty() {
        println!("  {}", item.description);
    }
    if !item.contact_info.is_empty() {
        println!("  {} {}", "Contact:".dimmed(), item.contact_info);
    }

    Status::header("You might be interested in");
    if detail.similar.is_empty() {
        Status::info("No similar items");
    }
    for similar in &detail.similar {
        println!("  {} {}", percent_badge(similar.percent), item_line(&similar.item));
    }
    Ok(())
}
