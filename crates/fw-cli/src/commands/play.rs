use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use fw_engine::GameSession;
use fw_save::{JsonFileStore, MemoryStore, SaveStore};

pub fn run(file: &Path, save_dir: Option<&Path>, name: &str) -> Result<(), String> {
    let story = super::load_document(file)?;

    match save_dir {
        Some(dir) => play(GameSession::resume(story, JsonFileStore::new(dir), name)),
        None => play(GameSession::new(story, MemoryStore::new(), name)),
    }
}

fn play<S: SaveStore>(mut session: GameSession<S>) -> Result<(), String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if session.state().is_victory {
            println!();
            println!("{}", "*** You survived the night. ***".green().bold());
            session.clear_save();
            return Ok(());
        }
        if session.state().is_game_over {
            println!();
            println!("{}", "*** Game over. ***".red().bold());
            session.clear_save();
            return Ok(());
        }

        let node = session.current_node().map_err(|e| e.to_string())?;
        println!();
        println!("{}", node.text);

        let player = &session.state().player;
        let hp_line = format!("  {} | {}/{} hp", player.name, player.hp, player.max_hp);
        if player.is_critical() {
            println!("{}", hp_line.red());
        } else {
            println!("{}", hp_line.dimmed());
        }

        let choices: Vec<_> = session
            .available_choices()
            .map_err(|e| e.to_string())?
            .into_iter()
            .cloned()
            .collect();
        for (i, choice) in choices.iter().enumerate() {
            if session.can_select(choice) {
                println!("  [{}] {}", i + 1, choice.text);
            } else {
                let item = choice.requires.as_deref().unwrap_or_default();
                println!("{}", format!("  [{}] {} (requires {item})", i + 1, choice.text).dimmed());
            }
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            return Ok(()); // EOF: leave the autosave in place for resume
        };
        let input = line.map_err(|e| e.to_string())?;
        let input = input.trim();

        match input {
            "q" | "quit" => return Ok(()),
            _ => match input.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if let Err(e) = session.choose(n - 1) {
                        println!("{}", format!("  {e}").yellow());
                    }
                }
                _ => println!("{}", "  Enter a choice number, or q to quit.".yellow()),
            },
        }
    }
}
