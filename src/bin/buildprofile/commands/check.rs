//! `buildprofile check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use buildprofile::ops::{check_project, ResolveOptions};
use buildprofile::util::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let opts = ResolveOptions {
        provider: args.provider,
        deny_fallback: args.deny_fallback,
        ..Default::default()
    };

    let resolution = check_project(ctx, &opts)?;

    let profile = &resolution.profile;
    println!(
        "ok: {} {} ({}) minSdk {} targetSdk {} compileSdk {}",
        profile.application_id,
        profile.version_name,
        profile.version_code,
        profile.sdk.min_sdk,
        profile.sdk.target_sdk,
        profile.sdk.compile_sdk
    );
    for (name, variant) in &profile.variants {
        println!(
            "  {:<10} signed by `{}` ({})",
            name, variant.signing.name, variant.signing_source
        );
    }

    Ok(())
}
