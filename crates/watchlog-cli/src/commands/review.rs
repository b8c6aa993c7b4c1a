use anyhow::{anyhow, Result};
use clap::Args;
use watchlog_enrich::generate_review;

use crate::commands::AppContext;
use crate::output::Output;

#[derive(Args)]
pub struct ReviewArgs {
    /// Entry ID (or unambiguous prefix)
    pub id: String,
}

pub async fn run_review(args: ReviewArgs, output: &Output) -> Result<()> {
    let mut ctx = AppContext::open()?;
    let id = ctx.resolve_id(&args.id)?;

    let (title, rating, kind) = {
        let record = ctx
            .store
            .get(&id)
            .ok_or_else(|| anyhow!("No entry matches id '{}'", id))?;
        (record.title.clone(), record.rating, record.media_kind)
    };

    let client = ctx.ai_client()?;
    let review = generate_review(&client, &title, rating, kind).await;

    ctx.store.update(&id, |record| record.review = review.clone());
    ctx.flush()?;

    output.success(format!("Review for '{}':", title));
    output.info(review);
    Ok(())
}
