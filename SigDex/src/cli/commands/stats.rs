//! CLI command for load counts

use crate::cli::GlobalArgs;
use crate::cli::progress::print_heading;

pub fn execute(global: &GlobalArgs, json: bool) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let set = global.load_signatures(settings)?;
    let stats = set.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_heading("Signature dumps");
    println!("  Site records:       {}", stats.site_count);
    println!("  Repo records:       {}", stats.repo_count);
    println!("  Duplicates removed: {}", stats.duplicates_removed);
    println!("  Repo-only names:    {}", stats.unmatched);
    println!("  Merged total:       {}", stats.total);

    Ok(())
}
