//! CLI command for trying out bracket compaction

use sigcore::compact::{BracketPair, compact_brackets};

use crate::cli::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    text: &str,
    depth: Option<usize>,
    min: Option<usize>,
    placeholder: Option<&str>,
    pair: Option<BracketPair>,
) -> anyhow::Result<()> {
    let defaults = global.settings()?.compaction;

    let result = compact_brackets(
        text,
        pair.unwrap_or(defaults.pair),
        depth.unwrap_or(defaults.target_depth),
        placeholder.unwrap_or(&defaults.placeholder),
        min.unwrap_or(defaults.min_inner_length),
    );

    match result {
        Some(compacted) => println!("{compacted}"),
        None => println!("unbalanced"),
    }

    Ok(())
}
