use anyhow::{bail, Result};
use clap::{ArgAction, Args};
use dialoguer::Confirm;

use crate::commands::AppContext;
use crate::output::Output;

#[derive(Args)]
pub struct DeleteArgs {
    /// Entry IDs (or unambiguous prefixes)
    pub ids: Vec<String>,

    /// Delete every entry
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "ids")]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub yes: bool,
}

pub fn run_delete(args: DeleteArgs, output: &Output) -> Result<()> {
    if !args.all && args.ids.is_empty() {
        bail!("Nothing to delete: pass entry IDs or --all");
    }

    let mut ctx = AppContext::open()?;

    let (ids, prompt) = if args.all {
        let count = ctx.store.len();
        (Vec::new(), format!("Delete all {} entries? This cannot be undone", count))
    } else {
        let ids: Vec<String> = args
            .ids
            .iter()
            .map(|id| ctx.resolve_id(id))
            .collect::<Result<_>>()?;
        (ids.clone(), format!("Delete {} entries? This cannot be undone", ids.len()))
    };

    // Destructive and irreversible, so always confirm unless told not to
    if !args.yes {
        let confirmed = Confirm::new().with_prompt(prompt).default(false).interact()?;
        if !confirmed {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let removed = if args.all {
        ctx.store.clear()
    } else {
        ctx.store.delete_many(&ids)
    };
    ctx.flush()?;

    output.success(format!("Deleted {} entries", removed));
    Ok(())
}
