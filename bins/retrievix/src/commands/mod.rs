//! CLI command implementations

pub mod browse;
pub mod categories;
pub mod login;
pub mod report;
pub mod score;
pub mod similar;
pub mod suggest;

use crate::Commands;
use crate::backend::Context;
use retrievix_store::{ItemStore, MatchService};
use serde::Serialize;

/// Whether a command modified the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ReadOnly,
    Changed,
}

/// Dispatch a store-backed command.
pub async fn run<S: ItemStore>(
    command: &Commands,
    service: &MatchService<S>,
    ctx: &Context,
) -> anyhow::Result<Effect> {
    match command {
        Commands::Score { a, b } => score::run(service, a, b, ctx).await?,
        Commands::Suggest { user } => suggest::run(service, user, ctx).await?,
        Commands::Dashboard { user, with_metrics } => {
            suggest::dashboard(service, user, *with_metrics, ctx).await?
        }
        Commands::Similar { id } => similar::run(service, id, ctx).await?,
        Commands::Browse {
            item_type,
            search,
            category,
            location,
            date,
            page,
        } => {
            let filter = retrievix_store::BrowseFilter {
                search: search.clone(),
                category: category.clone(),
                location: location.clone(),
                date: date.clone(),
            };
            browse::run(service, *item_type, &filter, *page, ctx).await?
        }
        Commands::Report {
            item_type,
            title,
            category,
            description,
            location,
            date,
            contact,
            image,
            user,
        } => {
            let mut item = retrievix_store::NewItem::new(*item_type);
            item.title = title.clone();
            item.category = category.clone();
            item.description = description.clone();
            item.location = location.clone();
            item.date = date.clone();
            item.contact_info = contact.clone();
            if let Some(path) = image {
                item.image = report::image_data_uri(path).await?;
            }
            report::report(service, item, user, ctx).await?;
            return Ok(Effect::Changed);
        }
        Commands::Delete { id, user } => {
            report::delete(service, id, user, ctx).await?;
            return Ok(Effect::Changed);
        }
        Commands::Resolve { id, user } => {
            report::resolve(service, id, user, ctx).await?;
            return Ok(Effect::Changed);
        }
        // Handled before a store is opened
        Commands::Categories | Commands::Login { .. } | Commands::Register { .. } => {}
    }
    Ok(Effect::ReadOnly)
}

/// Pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
