//! PunkScript command line encoder
//!
//! Reads a text file, writes the symbol-only document that rebuilds it and
//! prints the document stats.
//!
//! Usage: `punkscript [INPUT] [OUTPUT] [--config FILE] [--root NAME] ...`

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use punk_core::{DeclarationKeyword, EncoderConfig, ExportStyle, QuotePolicy};
use punk_encoder::generate_document;

#[derive(Parser, Debug)]
#[command(name = "punkscript")]
#[command(about = "Encode text as a symbol-only JavaScript document")]
struct Args {
    /// Text file to encode
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Where to write the document
    #[arg(default_value = "output.js")]
    output: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root namespace variable
    #[arg(long)]
    root: Option<String>,

    /// Emit a `var`/`let` declaration preamble
    #[arg(long)]
    strict: bool,

    /// Declaration keyword used with --strict
    #[arg(long, value_parser = parse_declaration)]
    declaration: Option<DeclarationKeyword>,

    /// Quote policy, e.g. "smart backtick" or "cycle single double"
    #[arg(long)]
    quotes: Option<QuotePolicy>,

    /// Seed for the random quote policy
    #[arg(long)]
    seed: Option<u64>,

    /// Runs must occur more often than this to enter the dictionary
    #[arg(long)]
    threshold: Option<usize>,

    /// Leave the result as the completion value instead of exporting it
    #[arg(long)]
    no_export: bool,

    /// Print the stats as JSON
    #[arg(long)]
    json_stats: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn parse_declaration(s: &str) -> Result<DeclarationKeyword, String> {
    match s {
        "var" => Ok(DeclarationKeyword::Var),
        "let" => Ok(DeclarationKeyword::Let),
        other => Err(format!("expected var or let, got {:?}", other)),
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<EncoderConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(EncoderConfig::default()),
    }
}

fn apply_flags(config: &mut EncoderConfig, args: &Args) {
    if let Some(root) = &args.root {
        config.root_variable = root.clone();
    }
    if args.strict {
        config.strict_declaration = true;
    }
    if let Some(declaration) = args.declaration {
        if !config.strict_declaration {
            warn!("--declaration has no effect without --strict");
        }
        config.declaration = declaration;
    }
    if let Some(policy) = &args.quotes {
        config.quote_policy = policy.clone();
    }
    if args.seed.is_some() {
        config.quote_seed = args.seed;
    }
    if let Some(threshold) = args.threshold {
        config.frequency_threshold = threshold;
    }
    if args.no_export {
        config.export = ExportStyle::Binding;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_json);

    let mut config = load_config(args.config.as_deref())?;
    apply_flags(&mut config, &args);

    let input = fs::read_to_string(&args.input)?;
    info!(input = %args.input.display(), "encoding");

    let doc = generate_document(&input, &config)?;
    fs::write(&args.output, doc.source())?;
    info!(output = %args.output.display(), "document written");

    if args.json_stats {
        println!("{}", serde_json::to_string_pretty(doc.stats())?);
    } else {
        println!("{}", doc.stats());
    }
    Ok(())
}
