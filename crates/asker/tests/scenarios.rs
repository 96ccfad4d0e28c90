//! End-to-end prompt scenarios: scripted input bytes in, committed result
//! maps out, over headless terminals.

use asker::{
    CheckboxItem, ChoiceItem, Confirmation, ListItem, Prompt, PromptError, PromptResult,
    Prompter, PrompterConfig,
};
use asker_style::StyledLine;
use asker_term::PromptTerminal;

fn prompter(input: &[u8]) -> Prompter {
    Prompter::new(
        PromptTerminal::headless(24, 80, input.to_vec()),
        PrompterConfig::unix(),
    )
}

fn prompter_sized(rows: u16, cols: u16, input: &[u8]) -> Prompter {
    Prompter::new(
        PromptTerminal::headless(rows, cols, input.to_vec()),
        PrompterConfig::unix(),
    )
}

fn cancellable_prompter(input: &[u8]) -> Prompter {
    Prompter::new(
        PromptTerminal::headless(24, 80, input.to_vec()),
        PrompterConfig::unix().with_cancellable_first_prompt(true),
    )
}

fn abc_list() -> Vec<ListItem> {
    vec![
        ListItem::new("a", "Alpha"),
        ListItem::new("b", "Beta"),
        ListItem::new("c", "Gamma"),
    ]
}

// ── Input ────────────────────────────────────────────────────────────────

#[test]
fn input_empty_commit_uses_default() {
    let mut p = prompter(b"\r");
    let prompts = vec![Prompt::input("u", "User?").with_default("John Doe")];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("John Doe".into()));
}

#[test]
fn input_typed_text_wins_over_default() {
    let mut p = prompter(b"Ann\r");
    let prompts = vec![Prompt::input("u", "User?").with_default("John Doe")];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("Ann".into()));
}

#[test]
fn input_editing_at_the_cursor() {
    // Type "ad", go left, insert "bc" before 'd', delete nothing extra.
    let mut p = prompter(b"ad\x1b[Dbc\r");
    let prompts = vec![Prompt::input("u", "User?")];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("abcd".into()));
}

#[test]
fn input_backspace_and_home_end() {
    // "xy", Home, Backspace (no-op at column 0), End, Backspace deletes 'y'.
    let mut p = prompter(b"xy\x01\x7f\x05\x7f\r");
    let prompts = vec![Prompt::input("u", "User?")];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("x".into()));
}

#[test]
fn input_mask_hides_the_echo() {
    let mut p = prompter(b"secret\r");
    let prompts = vec![Prompt::input("pw", "Password?").with_mask('*')];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["pw"], PromptResult::Input("secret".into()));

    let output = String::from_utf8_lossy(p.terminal().output()).into_owned();
    assert!(!output.contains("secret"));
    assert!(output.contains("******"));
}

#[test]
fn input_validator_reports_inline_and_retries() {
    let mut p = prompter(b"abc\r\x7f\x7f\x7f42\r");
    let prompts = vec![Prompt::input("n", "Port?")
        .with_validator(|s| s.parse::<u16>().map(|_| ()).map_err(|_| "not a number".into()))];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["n"], PromptResult::Input("42".into()));

    let output = String::from_utf8_lossy(p.terminal().output()).into_owned();
    assert!(output.contains("Error: not a number"));
}

// ── List ─────────────────────────────────────────────────────────────────

#[test]
fn list_down_then_enter_selects_second() {
    let mut p = prompter(b"\x1b[B\r");
    let prompts = vec![Prompt::list("p", "Pick", abc_list())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("b".into()));
}

#[test]
fn list_skips_disabled_items() {
    let items = vec![
        ListItem::new("a", "Alpha"),
        ListItem::new("b", "Beta").with_disabled("unavailable"),
        ListItem::new("c", "Gamma"),
    ];
    let mut p = prompter(b"\x1b[B\r");
    let prompts = vec![Prompt::list("p", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("c".into()));
}

#[test]
fn list_wraps_backwards_from_the_top() {
    let mut p = prompter(b"\x1b[A\r");
    let prompts = vec![Prompt::list("p", "Pick", abc_list())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("c".into()));
}

#[test]
fn list_wraps_forwards_past_the_end() {
    let mut p = prompter(b"\x1b[B\x1b[B\x1b[B\r");
    let prompts = vec![Prompt::list("p", "Pick", abc_list())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("a".into()));
}

#[test]
fn list_shortcut_key_jumps() {
    let items = vec![
        ListItem::new("a", "Alpha").with_key('a'),
        ListItem::new("b", "Beta").with_key('b'),
        ListItem::new("c", "Gamma").with_key('c'),
    ];
    let mut p = prompter(b"c\r");
    let prompts = vec![Prompt::list("p", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("c".into()));
}

#[test]
fn list_with_no_items_commits_the_sentinel() {
    let mut p = prompter(b"");
    let prompts = vec![Prompt::list("p", "Pick", Vec::new())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List(String::new()));
}

#[test]
fn list_multi_column_right_arrow() {
    let items: Vec<ListItem> = (1..=8)
        .map(|i| ListItem::new(&format!("i{i}"), &format!("item{i}")))
        .collect();
    let mut p = prompter(b"\x1b[C\r");
    let prompts = vec![Prompt::list("p", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("i2".into()));
}

#[test]
fn list_paginates_when_taller_than_the_terminal() {
    // Five items keep the layout single-column; a four-row terminal leaves
    // three body rows, so the window must slide to keep the cursor visible.
    let items: Vec<ListItem> = (0..5)
        .map(|i| ListItem::new(&format!("i{i}"), &format!("entry number {i}")))
        .collect();
    let script = b"\x1b[B\x1b[B\x1b[B\x1b[B\r".to_vec();
    let mut p = prompter_sized(4, 80, &script);
    let prompts = vec![Prompt::list("p", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("i4".into()));
}

#[test]
fn list_taller_than_terminal_grows_columns() {
    // Thirty wide items cannot stack in nine body rows, so the layout
    // squeezes into more columns; linear navigation still walks item order.
    let wide = "x".repeat(60);
    let items: Vec<ListItem> = (0..30)
        .map(|i| ListItem::new(&format!("i{i}"), &format!("{wide}{i}")))
        .collect();
    let script: Vec<u8> = b"\x1b[B"
        .iter()
        .copied()
        .cycle()
        .take(3 * 15)
        .chain(b"\r".iter().copied())
        .collect();
    let mut p = prompter_sized(10, 80, &script);
    let prompts = vec![Prompt::list("p", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["p"], PromptResult::List("i15".into()));
}

// ── Checkbox ─────────────────────────────────────────────────────────────

#[test]
fn checkbox_toggles_two_items() {
    let items = vec![CheckboxItem::new("x", "X"), CheckboxItem::new("y", "Y")];
    let mut p = prompter(b" \x1b[B \r");
    let prompts = vec![Prompt::checkbox("c", "Which?", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    let set = results["c"].as_set().unwrap();
    assert_eq!(
        set.iter().cloned().collect::<Vec<_>>(),
        vec!["x".to_string(), "y".to_string()]
    );
}

#[test]
fn checkbox_toggle_off_removes() {
    let items = vec![
        CheckboxItem::new("x", "X").checked(),
        CheckboxItem::new("y", "Y"),
    ];
    let mut p = prompter(b" \r");
    let prompts = vec![Prompt::checkbox("c", "Which?", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert!(results["c"].as_set().unwrap().is_empty());
}

#[test]
fn checkbox_initially_checked_on_disabled_item_is_dropped() {
    let items = vec![
        CheckboxItem::new("x", "X").checked().with_disabled("locked"),
        CheckboxItem::new("y", "Y").checked(),
    ];
    let mut p = prompter(b"\r");
    let prompts = vec![Prompt::checkbox("c", "Which?", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    let set = results["c"].as_set().unwrap();
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec!["y".to_string()]);
}

#[test]
fn checkbox_space_on_disabled_item_is_ignored() {
    // Cursor starts on the only selectable item; the disabled one can never
    // host the cursor, so space toggles the selectable one only.
    let items = vec![
        CheckboxItem::new("x", "X").with_disabled("locked"),
        CheckboxItem::new("y", "Y"),
    ];
    let mut p = prompter(b" \r");
    let prompts = vec![Prompt::checkbox("c", "Which?", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    let set = results["c"].as_set().unwrap();
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec!["y".to_string()]);
}

// ── Choice ───────────────────────────────────────────────────────────────

fn yes_no_choice() -> Vec<ChoiceItem> {
    vec![
        ChoiceItem::new('y', "yes", "Yes please").with_default(),
        ChoiceItem::new('n', "no", "No thanks"),
    ]
}

#[test]
fn choice_enter_commits_the_default() {
    let mut p = prompter(b"\r");
    let prompts = vec![Prompt::choice("c", "Continue?", yes_no_choice())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["c"], PromptResult::Choice("yes".into()));
}

#[test]
fn choice_key_is_case_insensitive() {
    let mut p = prompter(b"N\r");
    let prompts = vec![Prompt::choice("c", "Continue?", yes_no_choice())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["c"], PromptResult::Choice("no".into()));
}

#[test]
fn choice_ignores_unbound_keys() {
    let mut p = prompter(b"zq y");
    let prompts = vec![Prompt::choice("c", "Continue?", yes_no_choice())];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["c"], PromptResult::Choice("yes".into()));
}

#[test]
fn choice_enter_without_default_keeps_waiting() {
    let items = vec![
        ChoiceItem::new('a', "a", "First"),
        ChoiceItem::new('b', "b", "Second"),
    ];
    let mut p = prompter(b"\r\rb");
    let prompts = vec![Prompt::choice("c", "Pick", items)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["c"], PromptResult::Choice("b".into()));
}

// ── Confirm ──────────────────────────────────────────────────────────────

#[test]
fn confirm_enter_takes_the_default() {
    let mut p = prompter(b"\r");
    let prompts = vec![Prompt::confirm("ok", "Proceed?", true)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["ok"], PromptResult::Confirm(Confirmation::Yes));
}

#[test]
fn confirm_n_overrides_the_default() {
    let mut p = prompter(b"n\r");
    let prompts = vec![Prompt::confirm("ok", "Proceed?", true)];
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["ok"], PromptResult::Confirm(Confirmation::No));
}

// ── Text ─────────────────────────────────────────────────────────────────

#[test]
fn text_commits_without_input() {
    let prompts = vec![
        Prompt::text("banner", vec![StyledLine::plain("Welcome aboard")]),
        Prompt::input("u", "User?").with_default("guest"),
    ];
    let mut p = prompter(b"\r");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["banner"], PromptResult::Text);
    assert_eq!(results["u"], PromptResult::Input("guest".into()));

    let output = String::from_utf8_lossy(p.terminal().output()).into_owned();
    assert!(output.contains("Welcome aboard"));
}

// ── Back navigation and cancellation ─────────────────────────────────────

#[test]
fn escape_steps_back_one_prompt() {
    // Commit u, escape on v (rewinding u), commit u again, commit v.
    let prompts = vec![
        Prompt::input("u", "First?").with_default("A"),
        Prompt::input("v", "Second?").with_default("B"),
    ];
    let mut p = prompter(b"\r\x1b\r\r");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("A".into()));
    assert_eq!(results["v"], PromptResult::Input("B".into()));
    assert_eq!(results.len(), 2);
}

#[test]
fn escape_back_over_a_text_block() {
    // Escape on the input rewinds the text block; both end committed.
    let prompts = vec![
        Prompt::text(
            "t",
            vec![StyledLine::plain("line one"), StyledLine::plain("line two")],
        ),
        Prompt::input("u", "User?").with_default("guest"),
    ];
    let mut p = prompter(b"\x1b\r");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["t"], PromptResult::Text);
    assert_eq!(results["u"], PromptResult::Input("guest".into()));
}

#[test]
fn escape_on_cancellable_first_prompt_returns_empty() {
    let prompts = vec![Prompt::input("u", "User?")];
    let mut p = cancellable_prompter(b"\x1b");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert!(results.is_empty());
    assert!(!p.terminal().is_raw());
}

#[test]
fn escape_on_uncancellable_first_prompt_reprompts() {
    let prompts = vec![Prompt::input("u", "User?").with_default("A")];
    let mut p = prompter(b"\x1b\r");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    assert_eq!(results["u"], PromptResult::Input("A".into()));
}

#[test]
fn interrupt_raises_after_restore() {
    let prompts = vec![Prompt::list("p", "Pick", abc_list())];
    let mut p = prompter(b"\x03");
    let err = p.prompt(Vec::new(), &prompts).unwrap_err();
    assert!(matches!(err, PromptError::Interrupted));
    assert!(!p.terminal().is_raw());
}

#[test]
fn result_keys_match_prompt_names() {
    let prompts = vec![
        Prompt::input("alpha", "A?").with_default("1"),
        Prompt::confirm("beta", "B?", false),
        Prompt::list("gamma", "C?", abc_list()),
    ];
    let mut p = prompter(b"\r\r\r");
    let results = p.prompt(Vec::new(), &prompts).unwrap();
    let mut keys: Vec<_> = results.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["alpha", "beta", "gamma"]);
}

// ── Dynamic provider ─────────────────────────────────────────────────────

#[test]
fn dynamic_runs_batches_until_none() {
    let mut p = prompter(b"\r\r");
    let results = p
        .prompt_with(Vec::new(), |done| {
            if done.is_empty() {
                Some(vec![Prompt::input("u", "User?").with_default("A")])
            } else if !done.contains_key("v") {
                Some(vec![Prompt::input("v", "Host?").with_default("B")])
            } else {
                None
            }
        })
        .unwrap();
    assert_eq!(results["u"], PromptResult::Input("A".into()));
    assert_eq!(results["v"], PromptResult::Input("B".into()));
}

#[test]
fn dynamic_back_crosses_batch_boundaries() {
    // u commits; v escapes back into the previous batch; u re-commits;
    // v commits.
    let mut p = prompter(b"\r\x1b\r\r");
    let results = p
        .prompt_with(Vec::new(), |done| {
            if !done.contains_key("u") {
                Some(vec![Prompt::input("u", "User?").with_default("A")])
            } else if !done.contains_key("v") {
                Some(vec![Prompt::input("v", "Host?").with_default("B")])
            } else {
                None
            }
        })
        .unwrap();
    assert_eq!(results["u"], PromptResult::Input("A".into()));
    assert_eq!(results["v"], PromptResult::Input("B".into()));
    assert_eq!(results.len(), 2);
}

#[test]
fn dynamic_escape_out_of_first_batch_cancels() {
    let mut p = cancellable_prompter(b"\x1b");
    let results = p
        .prompt_with(Vec::new(), |done| {
            if done.is_empty() {
                Some(vec![Prompt::input("u", "User?")])
            } else {
                None
            }
        })
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn dynamic_provider_sees_prior_answers() {
    let mut p = prompter(b"\rmars\r");
    let results = p
        .prompt_with(Vec::new(), |done| match done.get("world") {
            None => Some(vec![Prompt::confirm("world", "Terraform?", true)]),
            Some(PromptResult::Confirm(Confirmation::Yes)) if !done.contains_key("name") => {
                Some(vec![Prompt::input("name", "Planet name?")])
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(results["name"], PromptResult::Input("mars".into()));
}
