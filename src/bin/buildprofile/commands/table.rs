//! `buildprofile table` command

use anyhow::Result;

use crate::cli::TableArgs;
use buildprofile::ops::format_table;
use buildprofile::resolver::CompatibilityTable;

pub fn execute(args: TableArgs) -> Result<()> {
    let table = CompatibilityTable::builtin();

    if args.json {
        let releases: Vec<_> = table
            .releases()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "apiLevel": r.api_level,
                    "version": r.version,
                    "codename": r.codename,
                })
            })
            .collect();
        let doc = serde_json::json!({
            "version": table.version(),
            "floor": table.floor(),
            "runtimes": table.runtimes(),
            "releases": releases,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", format_table(table));
    }

    Ok(())
}
