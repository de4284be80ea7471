//! `buildprofile resolve` command

use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::ResolveArgs;
use buildprofile::ops::{resolve_project, ResolveOptions};
use buildprofile::resolver::EmitFormat;
use buildprofile::util::GlobalContext;

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let format = args
        .format
        .map(|s| s.parse::<EmitFormat>())
        .transpose()
        .map_err(|e| anyhow!("invalid --format: {}", e))?;

    let opts = ResolveOptions {
        format,
        output: args.output,
        provider: args.provider,
        deny_fallback: args.deny_fallback,
    };

    let outcome = resolve_project(ctx, &opts)?;

    match outcome.written_to {
        Some(path) => {
            if ctx.is_verbose() {
                eprintln!(
                    "fingerprint {} -> {}",
                    outcome.serialized.fingerprint(),
                    path.display()
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outcome.serialized.as_str().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
