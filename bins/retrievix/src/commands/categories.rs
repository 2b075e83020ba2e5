//! Categories command - list the accepted category labels

use super::print_json;
use crate::backend::Context;
use retrievix_match::Category;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let labels = Category::labels();
    if ctx.json() {
        return print_json(&labels);
    }
    for label in labels {
        println!("{label}");
    }
    Ok(())
}
