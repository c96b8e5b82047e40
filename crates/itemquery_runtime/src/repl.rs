//! The interactive REPL.
//!
//! Any line not starting with `:` is resolved as an item query. Lines
//! starting with `:` are commands; see [`COMMANDS`].

use std::fmt::Write as _;
use std::path::Path;

use itemquery_engine::{ReportedError, SearchMode};
use itemquery_foundation::{Error, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// REPL commands with their help text.
pub const COMMANDS: [(&str, &str); 9] = [
    (":shop", ":shop ID           build a shop's stock"),
    (":buy", ":buy SHOP N [COUNT] buy entry N from a shop"),
    (":mode", ":mode all|items|first|random  set the search mode"),
    (":max", ":max N|off         limit results per query"),
    (":repeat", ":repeat on|off     skip repeated items"),
    (":seed", ":seed N            reseed every random stream"),
    (":resolvers", ":resolvers         list resolver keys"),
    (":help", ":help              show this help"),
    (":quit", ":quit              exit"),
];

/// What the REPL should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and keep going.
    Continue(String),
    /// Exit the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session, history_file: Option<&Path>) -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new(history_file)?, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(keywords(&session));
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "iq> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session mutably.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(Outcome::Continue(text)) => print!("{text}"),
                Ok(Outcome::Quit) => break,
                Err(e) => eprintln!("\x1b[31mError: {e}\x1b[0m"),
            }
        }

        if let Err(e) = self.editor.save_history() {
            tracing::warn!(error = %e, "failed to save history");
        }
        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed commands or unknown shops. Query
    /// errors are part of the printed output instead.
    pub fn eval(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Outcome::Continue(format_query(&self.session, line)));
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();
        let text = match (name.as_str(), args.as_slice()) {
            ("quit" | "q" | "exit", []) => return Ok(Outcome::Quit),
            ("help" | "h", []) => help(),
            ("shop", [id]) => format_shop(&self.session, id)?,
            ("buy", [shop, index, rest @ ..]) if rest.len() <= 1 => {
                let index = parse_number(index, "entry")?;
                let count = rest.first().map_or(Ok(1), |count| parse_number(count, "count"))?;
                let paid = self.session.buy(shop, index, count)?;
                format!("paid {paid}g\n")
            }
            ("mode", [mode]) => {
                self.session.set_search_mode(parse_mode(mode)?);
                format!("search mode: {:?}\n", self.session.search_mode())
            }
            ("max", [max]) => {
                let max = if max.eq_ignore_ascii_case("off") {
                    None
                } else {
                    Some(parse_number(max, "max")?)
                };
                self.session.set_max_items(max);
                format!("max items: {}\n", max.map_or("off".to_string(), |m| m.to_string()))
            }
            ("repeat", [flag]) => {
                let avoid = match flag.to_ascii_lowercase().as_str() {
                    "on" => true,
                    "off" => false,
                    _ => return Err(Error::invalid_argument(format!("expected on or off, got '{flag}'"))),
                };
                self.session.set_avoid_repeat(avoid);
                format!("avoid repeats: {avoid}\n")
            }
            ("seed", [seed]) => {
                self.session.set_seed(parse_number(seed, "seed")?)?;
                format!("seed: {seed}\n")
            }
            ("resolvers", []) => {
                let mut text = self.session.resolver_keys().join("\n");
                text.push('\n');
                text
            }
            _ => {
                return Err(Error::invalid_argument(format!(
                    "unknown command ':{command}' (try :help)"
                )));
            }
        };
        Ok(Outcome::Continue(text))
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!(
            "\x1b[1;36mitemquery\x1b[0m v{}\nType a query like \x1b[33mALL_ITEMS (O)\x1b[0m, or :help.\n",
            env!("CARGO_PKG_VERSION")
        );
    }
}

impl<E: LineEditor> std::fmt::Debug for Repl<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repl")
            .field("session", &self.session)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

fn keywords(session: &Session) -> Vec<String> {
    let mut keywords: Vec<String> = session
        .resolver_keys()
        .into_iter()
        .map(str::to_string)
        .collect();
    keywords.extend(session.shop_ids().into_iter().map(str::to_string));
    keywords.extend(COMMANDS.iter().map(|(name, _)| (*name).to_string()));
    keywords
}

fn help() -> String {
    let mut text = String::from("QUERY              resolve an item query\n");
    for (_, line) in COMMANDS {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::invalid_argument(format!("invalid {what} '{raw}'")))
}

fn parse_mode(raw: &str) -> Result<SearchMode> {
    match raw.to_ascii_lowercase().as_str() {
        "all" => Ok(SearchMode::All),
        "items" => Ok(SearchMode::AllOfTypeItem),
        "first" => Ok(SearchMode::FirstOfTypeItem),
        "random" => Ok(SearchMode::RandomOfTypeItem),
        _ => Err(Error::invalid_argument(format!(
            "unknown search mode '{raw}' (all, items, first, random)"
        ))),
    }
}

fn push_errors(text: &mut String, errors: &[ReportedError]) {
    for error in errors {
        let _ = writeln!(text, "\x1b[31merror\x1b[0m in '{}': {}", error.query, error.message);
    }
}

/// Formats the results of a query, one per line.
#[must_use]
pub fn format_query(session: &Session, query: &str) -> String {
    let outcome = session.query(query);
    let mut text = String::new();
    for (n, result) in outcome.items.iter().enumerate() {
        let _ = writeln!(text, "{n:>3}. {result}");
    }
    if outcome.items.is_empty() && outcome.errors.is_empty() {
        text.push_str("(no items)\n");
    }
    push_errors(&mut text, &outcome.errors);
    text
}

/// Formats a shop's stock, one entry per line.
///
/// # Errors
///
/// Returns an error if no shop has the given ID.
pub fn format_shop(session: &Session, id: &str) -> Result<String> {
    let outcome = session.build_shop(id)?;
    let mut text = String::new();
    for (n, (salable, entry)) in outcome.stock.iter().enumerate() {
        let _ = write!(text, "{n:>3}. {salable}  {}g  stock={}", entry.price, entry.stock);
        if let Some(trade) = &entry.trade_item_id {
            let _ = write!(text, "  trade={trade}x{}", entry.trade_item_amount);
        }
        if entry.out_of_season {
            text.push_str("  (out of season)");
        }
        text.push('\n');
    }
    if outcome.stock.is_empty() {
        text.push_str("(nothing for sale)\n");
    }
    push_errors(&mut text, &outcome.errors);
    Ok(text)
}
