//! CLI command for hazedumper offsets

use anyhow::Context;
use sigcore::formats::hazedumper::{OffsetKind, format_offset, format_offsets};

use crate::Toolkit;
use crate::cli::GlobalArgs;
use crate::cli::progress::print_heading;

pub fn execute(global: &GlobalArgs, query: Option<&str>) -> anyhow::Result<()> {
    let toolkit = Toolkit::new(global.settings()?);
    let data = toolkit
        .load_hazedumper()
        .context("Failed to load hazedumper dumps")?;
    let query = query.unwrap_or("").to_lowercase();

    let entries: Vec<_> = data
        .offsets
        .entries()
        .into_iter()
        .filter(|entry| entry.matches_search(&query))
        .collect();
    let patterns: Vec<_> = data
        .config
        .signatures
        .iter()
        .filter(|sig| sig.matches_search(&query))
        .collect();

    if entries.is_empty() && patterns.is_empty() {
        println!("No offsets matching '{query}'");
        return Ok(());
    }

    if !entries.is_empty() {
        print_heading(&format!("Offsets (dump timestamp {})", data.offsets.timestamp));
        for entry in &entries {
            let kind = match entry.kind {
                OffsetKind::Signature => "sig",
                OffsetKind::NetVar => "netvar",
            };
            println!("  {:<40} {:<8} {}", entry.name, kind, format_offset(entry.value));
        }
    }

    if !patterns.is_empty() {
        print_heading("Scan patterns");
        for sig in patterns {
            println!("  {} ({})", sig.name, sig.module);
            println!("    pattern: {}", sig.pattern);
            if !sig.offsets.is_empty() {
                println!("    offsets: {}", format_offsets(&sig.offsets));
            }
        }
    }

    Ok(())
}
