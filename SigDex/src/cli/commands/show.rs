//! CLI command for showing every record of one signature

use console::style;
use sigcore::formats::Signature;

use crate::cli::GlobalArgs;

fn print_record(sig: &Signature) {
    println!("{}", style(&sig.sig_name).bold());
    if let Some(compact) = &sig.sig_name_compact {
        println!("  compact: {compact}");
    }
    println!("  file:    {} (line {})", sig.file_name, sig.line_nr + 1);
    println!("  pattern: {}", sig.pattern);
    if let Some(source) = &sig.source {
        println!("  source:  {source}");
    }
    if let Some(class) = &sig.class_info {
        println!("  class:   {} (vtable index {})", class.name, class.vtable_index);
    }
}

pub fn execute(global: &GlobalArgs, name: &str, json: bool) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let set = global.load_signatures(settings)?;
    let groups = set.identities(name);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No signature named '{name}'");
        return Ok(());
    }

    let count = groups.len();
    for (index, group) in groups.into_iter().enumerate() {
        if count > 1 {
            println!("{}", style(format!("[{}/{count}] {}", index + 1, group[0].file_name)).dim());
        }
        for sig in group {
            print_record(sig);
        }
    }

    Ok(())
}
