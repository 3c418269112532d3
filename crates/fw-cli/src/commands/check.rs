use std::path::Path;

use fw_story::story_stats;

pub fn run(file: &Path) -> Result<(), String> {
    let story = super::load_document(file)?;
    let stats = story_stats(&story);

    println!("  All checks passed for '{}'.", file.display());
    println!(
        "  {} nodes, {} choices, {} endings",
        stats.total_nodes, stats.total_choices, stats.ending_nodes
    );

    Ok(())
}
