//! Report, delete and resolve commands

use super::print_json;
use crate::backend::Context;
use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use retrievix_cli::output::{Status, item_line};
use retrievix_cli::progress::with_spinner;
use retrievix_store::{ItemStore, MatchService, NewItem, Session};
use serde_json::json;
use std::path::Path;

pub async fn report<S: ItemStore>(
    service: &MatchService<S>,
    item: NewItem,
    user: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let validation = item.validate();
    if !ctx.json() {
        for warning in validation.warnings() {
            Status::warning(&warning.message);
        }
    }

    let session = Session::new(user);
    let stored = with_spinner(
        "Submitting report...",
        ctx.spinner,
        service.store().insert(item, &session),
    )
    .await?;

    if ctx.json() {
        return print_json(&stored);
    }
    Status::success(&format!("Reported {}", item_line(&stored)));
    Status::info(&format!("See possible matches with `retrievix similar {}`", stored.id));
    Ok(())
}

pub async fn delete<S: ItemStore>(
    service: &MatchService<S>,
    id: &str,
    user: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = Session::new(user);
    with_spinner("Deleting...", ctx.spinner, service.store().delete(id, &session)).await?;

    if ctx.json() {
        return print_json(&json!({ "deleted": id }));
    }
    Status::success(&format!("Deleted {id}"));
    Ok(())
}

pub async fn resolve<S: ItemStore>(
    service: &MatchService<S>,
    id: &str,
    user: &str,
    ctx: &Context,
) -> anyhow::Result<()> {
    let session = Session::new(user);
    let item = with_spinner(
        "Updating...",
        ctx.spinner,
        service.store().resolve(id, &session),
    )
    .await?;

    if ctx.json() {
        return print_json(&item);
    }
    Status::success(&format!("Resolved {}", item_line(&item)));
    Ok(())
}

/// Read an image file into a data URI. Unknown extensions get a generic
/// media type, which report validation then rejects.
pub async fn image_data_uri(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading image {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        media_type(path),
        STANDARD.encode(bytes)
    ))
}

fn media_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrievix_store::IMAGE_PREFIXES;

    #[test]
    fn test_media_type() {
        assert_eq!(media_type(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(media_type(Path::new("scan.tif")), "image/tiff");
        assert_eq!(media_type(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(media_type(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_known_media_types_are_accepted_prefixes() {
        for name in ["a.jpg", "a.png", "a.gif", "a.tiff", "a.bmp", "a.webp", "a.svg"] {
            let prefix = format!("data:{}", media_type(Path::new(name)));
            assert!(IMAGE_PREFIXES.contains(&prefix.as_str()), "{prefix}");
        }
    }
}
