//! Deckforge Application
//!
//! Headless host for the editor core: loads a deck and an optional editor
//! configuration, replays a command script and returns the resulting deck.

mod script;
mod shortcuts;

pub use script::{Command, Script};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};

use clap::Parser;
use deckforge_core::{Deck, DeckResult, Editor, EditorConfig};
use std::path::{Path, PathBuf};

/// Replay an editing script against a slide deck and print the result
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "deckforge",
    about = "Replay an editing script against a slide deck and print the resulting deck JSON",
    version
)]
pub struct AppArgs {
    /// Deck file. Missing means start from a single empty slide
    #[arg(value_name = "DECK")]
    pub deck: Option<PathBuf>,

    /// JSON command script to replay
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Editor configuration file
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the keyboard shortcut table
    #[arg(long)]
    pub shortcuts: bool,
}

fn load_deck(path: &Path) -> DeckResult<Deck> {
    let json = std::fs::read_to_string(path)?;
    let deck = Deck::from_json(&json)?;
    log::info!("Loaded deck {} ({} slides)", path.display(), deck.len());
    Ok(deck)
}

/// Load inputs, replay the script and return the final deck as JSON.
pub fn run(args: &AppArgs) -> DeckResult<String> {
    if args.shortcuts {
        ShortcutRegistry::print_all();
    }

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let deck = match &args.deck {
        Some(path) if path.exists() => load_deck(path)?,
        Some(path) => {
            log::info!("{} not found, starting a new deck", path.display());
            Deck::with_blank_slide()
        }
        None => Deck::with_blank_slide(),
    };

    let mut editor = Editor::with_deck(deck, config);
    if let Some(path) = &args.script {
        let script = Script::load(path)?;
        log::info!("Replaying {} commands from {}", script.len(), path.display());
        script.run(&mut editor);
    }

    editor.into_deck().to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::DeckError;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_args() {
        let args = AppArgs::try_parse_from([
            "deckforge",
            "deck.json",
            "--config",
            "cfg.json",
            "script.json",
        ])
        .unwrap();
        assert_eq!(args.deck, Some(PathBuf::from("deck.json")));
        assert_eq!(args.script, Some(PathBuf::from("script.json")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(!args.shortcuts);

        let args = AppArgs::try_parse_from(["deckforge", "-c", "cfg.json", "--shortcuts"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(args.shortcuts);

        assert_eq!(AppArgs::try_parse_from(["deckforge"]).unwrap(), AppArgs::default());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(AppArgs::try_parse_from(["deckforge", "deck.json", "--config"]).is_err());
        assert!(AppArgs::try_parse_from(["deckforge", "--verbose"]).is_err());
        assert!(AppArgs::try_parse_from(["deckforge", "a.json", "b.json", "c.json"]).is_err());
    }

    #[test]
    fn test_run_without_deck() {
        let deck = Deck::from_json(&run(&AppArgs::default()).unwrap()).unwrap();
        assert_eq!(deck.len(), 1);
        assert!(deck.slides[0].is_empty());
    }

    #[test]
    fn test_run_loads_existing_deck() {
        let mut deck = Deck::with_blank_slide();
        deck.push_slide(deckforge_core::Slide::new());
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "deck.json", &deck.to_json().unwrap());

        let args = AppArgs {
            deck: Some(path),
            ..AppArgs::default()
        };
        let loaded = Deck::from_json(&run(&args).unwrap()).unwrap();
        assert_eq!(loaded, deck);
    }

    #[test]
    fn test_run_reports_unreadable_deck() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let args = AppArgs {
            deck: Some(dir.path().to_path_buf()),
            ..AppArgs::default()
        };
        assert!(matches!(run(&args), Err(DeckError::Io(_))));
    }

    #[test]
    fn test_run_script_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "config.json", r#"{ "min_width": 80, "min_height": 40 }"#);
        let script = write_file(
            &dir,
            "script.json",
            r#"[
                { "op": "add_elements", "elements": [
                    { "x": 10, "y": 10, "width": 20, "height": 20,
                      "type": "shape", "shape": "rectangle" }
                ] }
            ]"#,
        );

        let args = AppArgs {
            deck: Some(dir.path().join("missing.json")),
            script: Some(script),
            config: Some(config),
            shortcuts: false,
        };
        let deck = Deck::from_json(&run(&args).unwrap()).unwrap();
        let element = &deck.slides[0].elements[0];
        assert_eq!(element.geometry.width, 80.0);
        assert_eq!(element.geometry.height, 40.0);
    }

    #[test]
    fn test_run_reports_bad_script() {
        let dir = tempfile::tempdir().unwrap();
        let args = AppArgs {
            deck: Some(dir.path().join("deck.json")),
            script: Some(write_file(&dir, "script.json", "not json")),
            ..AppArgs::default()
        };
        assert!(matches!(run(&args), Err(DeckError::Json(_))));
    }
}
