use std::io::{Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Pretty,
    Lines,
}

#[derive(Parser, Debug)]
#[command(
    name = "kvconf-cli",
    about = "Parse a `key = value` config file and print its entries",
    version
)]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Print only the value of this key
    #[arg(long)]
    get: Option<String>,

    /// Accept Unicode letters in keys
    #[arg(long, default_value_t = false)]
    unicode_keys: bool,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = kvconf::Options {
        unicode_keys: args.unicode_keys,
    };

    let config = match &args.input {
        Some(path) => kvconf::read_config_from_file(path, &options)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => kvconf::read_config(stdin().lock(), &options)
            .context("failed to read config from stdin")?,
    };

    let mut out = stdout().lock();
    if let Some(key) = &args.get {
        match config.get(key) {
            Some(value) => writeln!(out, "{value}")?,
            None => bail!("key {key:?} not found"),
        }
        return Ok(());
    }

    match args.format {
        FormatArg::Json => writeln!(out, "{}", serde_json::to_string(config.as_map())?)?,
        FormatArg::Pretty => writeln!(out, "{}", serde_json::to_string_pretty(config.as_map())?)?,
        FormatArg::Lines => {
            let text = kvconf::encode::to_string(config.as_map(), &options)
                .context("cannot print entries as lines")?;
            out.write_all(text.as_bytes())?
        }
    }

    Ok(())
}
