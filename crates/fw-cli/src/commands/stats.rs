use std::path::Path;

use comfy_table::Table;

use fw_story::story_stats;

pub fn run(file: &Path) -> Result<(), String> {
    let story = super::load_document(file)?;
    let stats = story_stats(&story);

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec!["Total nodes".to_string(), stats.total_nodes.to_string()]);
    table.add_row(vec!["Ending nodes".to_string(), stats.ending_nodes.to_string()]);
    table.add_row(vec!["Choice nodes".to_string(), stats.choice_nodes.to_string()]);
    table.add_row(vec!["Total choices".to_string(), stats.total_choices.to_string()]);
    table.add_row(vec![
        "Max choices in a node".to_string(),
        stats.max_choices_in_node.to_string(),
    ]);
    table.add_row(vec![
        "Average choices per node".to_string(),
        format!("{:.2}", stats.average_choices_per_node),
    ]);
    table.add_row(vec![
        "Nodes with arrival actions".to_string(),
        stats.nodes_with_actions.to_string(),
    ]);
    table.add_row(vec!["Damage nodes".to_string(), stats.damage_nodes.to_string()]);
    table.add_row(vec!["Healing nodes".to_string(), stats.healing_nodes.to_string()]);
    table.add_row(vec![
        "Unique items".to_string(),
        if stats.unique_items.is_empty() {
            "(none)".to_string()
        } else {
            stats.unique_items.join(", ")
        },
    ]);

    println!("{table}");
    Ok(())
}
