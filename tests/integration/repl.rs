//! Integration tests for the REPL
//!
//! Tests scripted sessions against the valley bundle.

use std::cell::RefCell;
use std::rc::Rc;

use itemquery_foundation::Result;
use itemquery_runtime::{LineEditor, Outcome, ReadResult, Repl};

use super::session;

/// Replays scripted lines and records what was added to history.
struct ScriptedEditor {
    lines: std::vec::IntoIter<String>,
    history: Rc<RefCell<Vec<String>>>,
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.borrow_mut().push(line.to_string());
    }

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl(lines: &[&str]) -> (Repl<ScriptedEditor>, Rc<RefCell<Vec<String>>>) {
    let history = Rc::new(RefCell::new(Vec::new()));
    let editor = ScriptedEditor {
        lines: lines
            .iter()
            .map(|line| (*line).to_string())
            .collect::<Vec<_>>()
            .into_iter(),
        history: Rc::clone(&history),
    };
    (Repl::with_editor(editor, session()).without_banner(), history)
}

fn text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Continue(text) => text,
        Outcome::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn shop_listing_shows_terms() {
    let (mut repl, _) = repl(&[]);
    let out = text(repl.eval(":shop Blacksmith").unwrap());
    assert!(out.contains("Copper Axe [(T)CopperAxe]"));
    assert!(out.contains("2000g"));
    assert!(out.contains("trade=(O)334x5"));

    let out = text(repl.eval(":shop SeedShop").unwrap());
    assert!(out.contains("(out of season)"));
}

#[test]
fn purchases_show_in_the_next_listing() {
    let (mut repl, _) = repl(&[]);
    assert_eq!(text(repl.eval(":buy Blacksmith 1 4").unwrap()), "paid 300g\n");
    let out = text(repl.eval(":shop Blacksmith").unwrap());
    assert!(out.contains("stock=16"));
}

#[test]
fn reseeding_changes_the_session_seed() {
    let (mut repl, _) = repl(&[]);
    assert_eq!(text(repl.eval(":seed 99").unwrap()), "seed: 99\n");
    assert_eq!(repl.session().data().world.seed, 99);
    assert!(repl.eval(":seed minus-one").is_err());
}

#[test]
fn resolvers_are_listed() {
    let (mut repl, _) = repl(&[]);
    let out = text(repl.eval(":resolvers").unwrap());
    assert!(out.lines().any(|line| line == "TOOL_UPGRADES"));
    assert_eq!(out.lines().count(), 8);
}

#[test]
fn scripted_run_records_history() {
    let (mut repl, history) = repl(&["", ":max 2", "ALL_ITEMS (F)", ":bogus", ":quit", ":max 5"]);
    repl.run().unwrap();
    assert_eq!(repl.session().max_items(), Some(2));
    assert_eq!(
        *history.borrow(),
        vec![":max 2", "ALL_ITEMS (F)", ":bogus", ":quit"]
    );
}
