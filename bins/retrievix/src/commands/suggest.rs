//! Suggest and dashboard commands

use super::print_json;
use crate::backend::Context;
use owo_colors::OwoColorize;
use retrievix_cli::output::{Status, format_count, item_line, percent_badge};
use retrievix_cli::progress::with_spinner;
use retrievix_match::{Item, MatchSuggestion};
use retrievix_store::{ItemStore, MatchService, Session};
use serde_json::json;

pub async fn run<S: ItemStore>(
    service: &MatchService<S>,
    user: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = Session::new(user);
    let suggestions =
        with_spinner("Matching...", ctx.spinner, service.suggestions(&session)).await?;

    if ctx.json() {
        return print_json(&suggestions);
    }
    print_suggestions(&suggestions);
    Ok(())
}

pub async fn dashboard<S: ItemStore>(
    service: &MatchService<S>,
    user: &str,
    with_metrics: bool,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = Session::new(user);
    let dashboard =
        with_spinner("Loading dashboard...", ctx.spinner, service.dashboard(&session)).await?;

    if ctx.json() {
        let mut output = json!({ "dashboard": dashboard });
        if with_metrics {
            output["metrics"] = retrievix_telemetry::metrics().export_json();
        }
        return print_json(&output);
    }

    print_items("Your lost items", &dashboard.my_lost);
    print_items("Your found items", &dashboard.my_found);
    print_suggestions(&dashboard.suggestions);

    if with_metrics {
        Status::header("Metrics");
        print_json(&retrievix_telemetry::metrics().export_json())?;
    }
    Ok(())
}

fn print_items(title: &str, items: &[Item]) {
    Status::header(&format!("{title} ({})", items.len()));
    if items.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for item in items {
        println!("  {}", item_line(item));
    }
}

fn print_suggestions(suggestions: &[MatchSuggestion]) {
    Status::header("Possible matches");
    if suggestions.is_empty() {
        Status::info("No matches yet. New found reports are checked every time you look.");
        return;
    }
    for s in suggestions {
        println!(
            "  {} {} {}",
            percent_badge(s.percent),
            item_line(&s.item),
            format!("for {}", s.source_lost_item_id).dimmed()
        );
    }
    println!();
    Status::success(&format_count(suggestions.len(), "match", "matches"));
}
