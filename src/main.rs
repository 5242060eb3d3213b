use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use clap::Parser as ClapParser;
use tracing::{debug, info};
use storr::config::{Config, OutputFormat};
use storr::error::{diagnostics, StorrError};
use storr::{dump, Lexer};

#[derive(ClapParser)]
#[command(author, version, about = "Storr lexer: prints the tokens of a source file")]
struct Cli {
    /// Source file to scan
    file: PathBuf,
    /// Output format (overrides the config file and STORR_FORMAT)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Prefix each token with its line and column
    #[arg(long)]
    positions: bool,
    /// Leave comment tokens out of the dump
    #[arg(long)]
    skip_comments: bool,
    /// Exit with status 1 when the source contains illegal tokens
    #[arg(long)]
    strict: bool,
}

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=storr=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn resolve_config(cli: &Cli) -> Result<Config, StorrError> {
    let mut config = Config::load()?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.positions |= cli.positions;
    config.skip_comments |= cli.skip_comments;
    config.strict |= cli.strict;
    debug!(?config, "resolved config");
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), StorrError> {
    let config = resolve_config(cli)?;

    debug!(path = %cli.file.display(), "reading source");
    let source_code = fs::read_to_string(&cli.file).map_err(|source| StorrError::Io {
        path: cli.file.clone(),
        source,
    })?;

    let tokens = Lexer::new(&source_code).tokenize();
    let reports = diagnostics(&cli.file, &tokens);
    info!(tokens = tokens.len(), illegal = reports.len(), "scan complete");

    print!("{}", dump::render(&tokens, &config)?);

    for report in &reports {
        eprint!("{}", report);
    }
    if config.strict && !reports.is_empty() {
        return Err(StorrError::Lexing(reports.len()));
    }
    Ok(())
}

fn main() -> ExitCode {
    // clap reports usage errors with status 2; this tool promises 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(1)
        }
    }
}
