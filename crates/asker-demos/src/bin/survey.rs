#![forbid(unsafe_code)]

//! Static prompt sequence: one of every prompt kind.
//!
//! Run with `cargo run --bin survey`. Escape steps back one prompt; Ctrl-C
//! aborts.

use asker::{CheckboxItem, ChoiceItem, ListItem, Prompt, Prompter, PrompterConfig};
use asker_style::{Style, StyledLine};
use asker_term::PromptTerminal;

fn main() {
    asker_demos::init_tracing();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let terminal = PromptTerminal::open()?;
    let mut prompter = Prompter::new(terminal, PrompterConfig::from_env());

    let prompts = vec![
        Prompt::text(
            "banner",
            vec![StyledLine::styled("Developer survey", Style::new().bold())],
        ),
        Prompt::input("name", "What is your name?").with_default("anonymous"),
        Prompt::input("token", "Paste an API token")
            .with_mask('*')
            .with_validator(|s| {
                if s.len() >= 8 {
                    Ok(())
                } else {
                    Err("token must be at least 8 characters".into())
                }
            }),
        Prompt::list(
            "editor",
            "Preferred editor",
            vec![
                ListItem::new("vim", "Vim"),
                ListItem::new("emacs", "Emacs"),
                ListItem::new("helix", "Helix"),
                ListItem::separator("── graphical ──"),
                ListItem::new("vscode", "VS Code"),
                ListItem::new("zed", "Zed").with_disabled("not installed"),
            ],
        ),
        Prompt::checkbox(
            "langs",
            "Languages you use",
            vec![
                CheckboxItem::new("rust", "Rust").checked(),
                CheckboxItem::new("go", "Go"),
                CheckboxItem::new("python", "Python"),
                CheckboxItem::new("cobol", "COBOL").with_disabled("mainframe offline"),
            ],
        ),
        Prompt::choice(
            "ship",
            "Ship it?",
            vec![
                ChoiceItem::new('y', "yes", "Ship now").with_default(),
                ChoiceItem::new('l', "later", "Ship later"),
                ChoiceItem::new('n', "never", "Never ship"),
            ],
        ),
        Prompt::confirm("subscribe", "Subscribe to the newsletter?", false),
    ];

    let header = vec![StyledLine::plain("asker survey demo")];
    let results = prompter.prompt(header, &prompts)?;

    println!("collected {} answers:", results.len());
    let mut names: Vec<_> = results.keys().collect();
    names.sort();
    for name in names {
        println!("  {name}: {:?}", results[name]);
    }
    Ok(())
}
