//! Browse command - filtered, paginated listing

use super::print_json;
use crate::backend::Context;
use owo_colors::OwoColorize;
use retrievix_cli::output::{Status, format_count, item_line};
use retrievix_cli::progress::with_spinner;
use retrievix_match::ItemType;
use retrievix_store::{BrowseFilter, BrowsePage, ItemStore, MatchService, PageLink, browse};

pub async fn run<S: ItemStore>(
    service: &MatchService<S>,
    item_type: ItemType,
    filter: &BrowseFilter,
    page: usize,
    ctx: &Context,
) -> anyhow::Result<()> {
    let items = with_spinner(
        "Fetching items...",
        ctx.spinner,
        service.store().list(Some(item_type)),
    )
    .await?;
    let result = browse(&items, filter, page, ctx.per_page);

    if ctx.json() {
        return print_json(&result);
    }

    Status::header(&format!(
        "{} items ({})",
        capitalize(item_type.as_str()),
        format_count(result.total_items, "match", "matches")
    ));
    if result.items.is_empty() {
        Status::info("Nothing on this page");
    }
    for item in &result.items {
        println!("  {}", item_line(item));
    }
    if let Some(bar) = page_bar(&result) {
        println!();
        println!("  {bar}");
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// `‹ 1 … 4 [5] 6 … 10 ›`, or `None` for a single page.
fn page_bar(page: &BrowsePage) -> Option<String> {
    let links = page.page_links();
    if links.is_empty() {
        return None;
    }
    let mut parts: Vec<String> = Vec::with_capacity(links.len() + 2);
    if page.has_previous() {
        parts.push("‹".to_string());
    }
    parts.extend(links.iter().map(|link| match link {
        PageLink::Page(n) => n.to_string(),
        PageLink::Current(n) => format!("[{n}]").bold().to_string(),
        PageLink::Gap => "…".to_string(),
    }));
    if page.has_next() {
        parts.push("›".to_string());
    }
    Some(parts.join(" "))
}
