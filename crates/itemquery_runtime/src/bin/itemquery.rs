//! itemquery CLI entry point.

use std::env;
use std::process::ExitCode;

use itemquery_runtime::{
    GameData, LOG_ENV, Repl, RuntimeConfig, Session, format_query, format_shop,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(itemquery_runtime::DEFAULT_LOG_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(config) = RuntimeConfig::from_args(env::args().skip(1))? else {
        return Ok(());
    };
    init_tracing(&config);

    let mut session = match &config.data_path {
        Some(path) => Session::from_data(GameData::load(path)?)?,
        None => Session::new()?,
    };
    if let Some(seed) = config.seed {
        session.set_seed(seed)?;
    }

    for query in &config.queries {
        println!("\x1b[1m{query}\x1b[0m");
        print!("{}", format_query(&session, query));
    }
    for shop in &config.shops {
        println!("\x1b[1mshop {shop}\x1b[0m");
        print!("{}", format_shop(&session, shop)?);
    }

    if config.batch {
        return Ok(());
    }

    let mut repl = Repl::new(session, config.history_file.as_deref())?;
    if !config.queries.is_empty() || !config.shops.is_empty() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(())
}
