//! CLI command for listing merged signatures

use console::style;
use sigcore::formats::Signature;

use crate::cli::GlobalArgs;

const NAME_WIDTH: usize = 56;

/// Cut `text` to `width` characters, marking the cut with `~`
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

fn columns(name: &str, file: &str, source: &str, class: &str) -> String {
    let name = fit(name, NAME_WIDTH);
    let name_width = NAME_WIDTH;
    format!("{name:<name_width$} {file:<18} {source:<12} {class}")
}

fn format_row(sig: &Signature) -> String {
    let class = sig
        .class_info
        .as_ref()
        .map(|class| format!("{} [{}]", class.display_name(), class.vtable_index))
        .unwrap_or_default();

    columns(
        sig.display_name(),
        &sig.file_name,
        sig.source.as_deref().unwrap_or("-"),
        &class,
    )
}

pub fn execute(
    global: &GlobalArgs,
    query: Option<&str>,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let mut set = global.load_signatures(settings)?;
    if let Some(page_size) = page_size {
        anyhow::ensure!(page_size > 0, "--page-size must be at least 1");
        set = set.with_page_size(page_size);
    }

    let query = query.unwrap_or("");
    let page = set.page(query, page);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        if query.is_empty() {
            println!("No signatures loaded");
        } else {
            println!("No signatures matching '{query}'");
        }
        return Ok(());
    }

    println!("{}", style(columns("NAME", "FILE", "SOURCE", "CLASS")).bold());
    for sig in &page.items {
        println!("{}", format_row(sig));
    }
    println!(
        "{}",
        style(format!(
            "Page {}/{} ({} signatures)",
            page.page, page.pages, page.total
        ))
        .dim()
    );

    Ok(())
}
