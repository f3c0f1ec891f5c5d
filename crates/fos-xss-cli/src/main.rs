//! fos-xss - sanitize HTML from a file or stdin
//!
//! Usage: fos-xss [--whitelist FILE [--extend]] [INPUT]
//!
//! The sanitized HTML is written to stdout. Logging goes to stderr and is
//! controlled with `RUST_LOG` (default `warn`).

use anyhow::{bail, Context, Result};
use fos_xss::{Whitelist, XssFilter};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Mimalloc global allocator (optional feature)
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const USAGE: &str = "\
Usage: fos-xss [OPTIONS] [INPUT]

Reads HTML from INPUT (or stdin when INPUT is missing or '-') and writes
the sanitized HTML to stdout.

Options:
  -w, --whitelist FILE  JSON whitelist {\"tag\": [\"attr\", ...]} replacing the default
  -e, --extend          Merge the --whitelist file into the default instead
  -h, --help            Print this help
";

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    whitelist: Option<PathBuf>,
    extend: bool,
    input: Option<PathBuf>,
}

/// Parse arguments (without the program name). `None` means help was asked for.
fn parse_args<I>(args: I) -> Result<Option<Args>>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-w" | "--whitelist" => {
                let Some(path) = args.next() else {
                    bail!("{} requires a file argument", arg);
                };
                parsed.whitelist = Some(PathBuf::from(path));
            }
            "-e" | "--extend" => parsed.extend = true,
            "-" => parsed.input = None,
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            path => {
                if parsed.input.is_some() {
                    bail!("Only one input file is supported");
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }

    if parsed.extend && parsed.whitelist.is_none() {
        bail!("--extend requires --whitelist");
    }
    Ok(Some(parsed))
}

/// Build the whitelist the filter should use
fn load_whitelist(args: &Args) -> Result<Whitelist> {
    let Some(path) = &args.whitelist else {
        return Ok(Whitelist::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read whitelist {}", path.display()))?;
    let loaded = Whitelist::from_json(&json)
        .with_context(|| format!("Invalid whitelist {}", path.display()))?;
    tracing::info!("Loaded whitelist {} ({} tags)", path.display(), loaded.len());

    if !args.extend {
        return Ok(loaded);
    }
    let mut whitelist = Whitelist::default();
    whitelist.extend(&loaded);
    Ok(whitelist)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        print!("{}", USAGE);
        return Ok(());
    };

    let filter = XssFilter::new().with_whitelist(load_whitelist(&args)?);
    let html = read_input(args.input.as_ref())?;
    let clean = filter.sanitize(&html);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(clean.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write output")?;

    Ok(())
}
