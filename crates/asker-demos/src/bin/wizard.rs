#![forbid(unsafe_code)]

//! Dynamic prompt flow: the next batch depends on earlier answers.
//!
//! Escape on a batch's first prompt steps back into the previous batch.

use asker::{Confirmation, ListItem, Prompt, PromptResult, Prompter, PrompterConfig, ResultMap};
use asker_style::StyledLine;
use asker_term::PromptTerminal;

fn main() {
    asker_demos::init_tracing();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn next_batch(done: &ResultMap) -> Option<Vec<Prompt>> {
    if !done.contains_key("kind") {
        return Some(vec![Prompt::list(
            "kind",
            "What are we deploying?",
            vec![
                ListItem::new("service", "A network service"),
                ListItem::new("job", "A batch job"),
            ],
        )]);
    }

    if done.get("kind").and_then(PromptResult::as_str) == Some("service")
        && !done.contains_key("port")
    {
        return Some(vec![
            Prompt::input("port", "Listen port").with_default("8080").with_validator(|s| {
                s.parse::<u16>().map(|_| ()).map_err(|_| "ports are 0-65535".into())
            }),
            Prompt::confirm("tls", "Terminate TLS here?", true),
        ]);
    }

    if !done.contains_key("confirmed") {
        return Some(vec![Prompt::confirm("confirmed", "Apply this plan?", false)]);
    }

    None
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let terminal = PromptTerminal::open()?;
    let config = PrompterConfig::from_env().with_cancellable_first_prompt(true);
    let mut prompter = Prompter::new(terminal, config);

    let header = vec![StyledLine::plain("deploy wizard")];
    let results = prompter.prompt_with(header, next_batch)?;

    if results.get("confirmed").and_then(PromptResult::as_confirmation) == Some(Confirmation::Yes)
    {
        println!("applying: {results:?}");
    } else {
        println!("aborted");
    }
    Ok(())
}
