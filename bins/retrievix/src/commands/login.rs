//! Login and register commands for the remote service

use super::print_json;
use crate::backend::Context;
use retrievix_api_client::{Registration, RetrievixClient};
use retrievix_cli::output::Status;
use retrievix_cli::progress::with_spinner;

pub async fn run(
    client: &RetrievixClient,
    email: &str,
    password: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = with_spinner("Signing in...", ctx.spinner, client.auth().login(email, password)).await?;

    if ctx.json() {
        return print_json(&session);
    }
    Status::success(&format!("Signed in as {} ({})", session.name, session.user_id));
    println!("Use --user {} with other commands.", session.user_id);
    Ok(())
}

pub async fn register(
    client: &RetrievixClient,
    registration: &Registration,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = with_spinner(
        "Creating account...",
        ctx.spinner,
        client.auth().register(registration),
    )
    .await?;

    if ctx.json() {
        return print_json(&session);
    }
    Status::success(&format!("Registered {} ({})", session.name, session.user_id));
    println!("Use --user {} with other commands.", session.user_id);
    Ok(())
}
