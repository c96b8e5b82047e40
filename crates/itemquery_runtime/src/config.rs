//! Runtime configuration.

use std::path::PathBuf;

/// Environment variable read for the log filter.
pub const LOG_ENV: &str = "ITEMQUERY_LOG";

/// Log filter used when neither the environment nor `--log` sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for a CLI run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Game data bundle to load. Without one, an empty catalog is used.
    pub data_path: Option<PathBuf>,
    /// Overrides the world seed from the data file.
    pub seed: Option<u64>,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// REPL history file.
    pub history_file: Option<PathBuf>,
    /// Run the given queries and shops, then exit without a REPL.
    pub batch: bool,
    /// Queries to run before the REPL starts.
    pub queries: Vec<String>,
    /// Shops to build before the REPL starts.
    pub shops: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            history_file: None,
            batch: false,
            queries: Vec::new(),
            shops: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the data file.
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Builder method to override the world seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Builder method to set the history file.
    #[must_use]
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// Builder method to enable batch mode.
    #[must_use]
    pub const fn batch(mut self) -> Self {
        self.batch = true;
        self
    }

    /// Builder method to queue a query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    /// Builder method to queue a shop.
    #[must_use]
    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shops.push(shop.into());
        self
    }

    /// Parses command line arguments, not including the program name.
    ///
    /// Returns `Ok(None)` when help or version output was requested and
    /// printed instead.
    ///
    /// # Errors
    ///
    /// Returns a message for unknown options or missing values.
    pub fn from_args<I>(args: I) -> Result<Option<Self>, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| format!("{name} requires a value"))
            };
            match arg.as_str() {
                "-h" | "--help" => {
                    print_help();
                    return Ok(None);
                }
                "-V" | "--version" => {
                    println!("itemquery {}", env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                "-b" | "--batch" => config.batch = true,
                "-d" | "--data" => config.data_path = Some(PathBuf::from(value("--data")?)),
                "-s" | "--seed" => {
                    let raw = value("--seed")?;
                    config.seed = Some(
                        raw.parse()
                            .map_err(|_| format!("invalid --seed value: {raw}"))?,
                    );
                }
                "--log" => config.log_filter = value("--log")?,
                "--history" => config.history_file = Some(PathBuf::from(value("--history")?)),
                "-e" | "--eval" => config.queries.push(value("-e")?),
                "--shop" => config.shops.push(value("--shop")?),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option: {other}"));
                }
                path if config.data_path.is_none() => config.data_path = Some(PathBuf::from(path)),
                extra => return Err(format!("unexpected argument: {extra}")),
            }
        }

        Ok(Some(config))
    }
}

fn print_help() {
    println!(
        "\x1b[1mitemquery\x1b[0m - Resolve item queries and build shop stock

\x1b[1mUSAGE:\x1b[0m
    itemquery [OPTIONS] [DATA]

\x1b[1mARGUMENTS:\x1b[0m
    [DATA]              Game data JSON file (same as --data)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -d, --data FILE     Game data JSON file
    -s, --seed N        Override the world seed
    -e, --eval QUERY    Resolve a query (repeatable)
    --shop ID           Build a shop's stock (repeatable)
    -b, --batch         Run -e/--shop and exit (no REPL)
    --log FILTER        Log filter, like 'debug' (env: {LOG_ENV})
    --history FILE      REPL history file

\x1b[1mEXAMPLES:\x1b[0m
    itemquery data/valley.json
    itemquery data/valley.json -b -e 'RANDOM_ITEMS (O) 1 100'
    itemquery data/valley.json -b --shop SeedShop --seed 42

\x1b[1mREPL COMMANDS:\x1b[0m
    QUERY               Resolve an item query
    :shop ID            Build a shop's stock
    :help               List every command"
    );
}
