use std::path::Path;

use fw_story::{Choice, StoryDocument, StoryNode};

pub fn run(file: &Path, focus: Option<&str>) -> Result<(), String> {
    let story = super::load_document(file)?;

    if let Some(id) = focus {
        let node = story
            .get(id)
            .ok_or_else(|| format!("node not found: \"{id}\""))?;

        println!("  Graph for: {id}");
        println!();
        render_node(id, node);
    } else {
        println!("  Choice graph for '{}'", file.display());
        println!();
        for (id, node) in story.iter() {
            render_node(id, node);
        }
        render_summary(&story);
    }

    Ok(())
}

fn render_node(id: &str, node: &StoryNode) {
    let marker = match (node.is_ending, node.is_victory) {
        (true, true) => " (victory ending)",
        (true, false) => " (ending)",
        _ => "",
    };
    println!("  [{id}]{marker}");

    for choice in node.choice_list() {
        println!("    --> {} --> [{}]{}", choice.text, choice.to, gate_label(choice));
    }
}

fn gate_label(choice: &Choice) -> String {
    match (&choice.requires, &choice.hide_if) {
        (Some(item), _) => format!(" (requires {item})"),
        (None, Some(item)) => format!(" (hidden by {item})"),
        (None, None) => String::new(),
    }
}

fn render_summary(story: &StoryDocument) {
    let edges: usize = story.iter().map(|(_, n)| n.choice_list().len()).sum();
    let endings = story.iter().filter(|(_, n)| n.is_ending).count();
    println!();
    println!("  {} nodes, {} edges, {} endings", story.len(), edges, endings);
}
