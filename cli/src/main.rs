//! errorsig CLI: resolve EVM custom error selectors from the terminal.
//!
//! # Commands
//! ```text
//! errorsig resolve  <SELECTOR> [--all] [--json]
//! errorsig decode   --data <HEX> [--json]
//! errorsig selector <SIGNATURE> [--json]
//! errorsig list     [--set <NAME>] [--json]
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use errorsig_core::{resolver, Catalog, ErrorDefinition, Resolution, Selector};
use errorsig_evm::decode_revert_hex;
use std::path::PathBuf;

mod config;
mod logging;

use config::{Config, SetSource};

#[derive(Parser)]
#[command(
    name = "errorsig",
    about = "Resolve EVM custom error selectors against known contract ABIs",
    long_about = "
errorsig: map the 4-byte selector of a failed transaction back to the custom
error that produced it. Searches project ABIs first, then the bundled ABIs.

ENVIRONMENT VARIABLES:
  RUST_LOG    Log filter directives (overrides the config file)
",
    version
)]
struct Cli {
    /// YAML or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra ABI set, searched before the bundled sets (repeatable)
    #[arg(long = "abi", value_name = "NAME=PATH", global = true)]
    abis: Vec<SetSource>,

    /// Do not load the bundled ABI sets
    #[arg(long, global = true)]
    no_bundled: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a 4-byte error selector (e.g. 0x9996b315)
    Resolve {
        /// Selector as hex, `0x` prefix optional
        selector: String,
        /// Show every catalog entry carrying the selector
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode full revert data (selector + ABI-encoded arguments)
    Decode {
        /// Revert data (0x-prefixed hex)
        #[arg(long)]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the canonical signature and selector of an error
    Selector {
        /// Error signature, e.g. "AddressEmptyCode(address)"
        signature: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog entries with their selectors
    List {
        /// Only list this ABI set
        #[arg(long)]
        set: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.verbose {
        config.log.level = "debug".into();
    }
    logging::init_tracing(&config.log);

    // `selector` needs no catalog
    if let Commands::Selector { signature, json } = &cli.command {
        return cmd_selector(signature, *json);
    }

    config.catalog.sets.extend(cli.abis.iter().cloned());
    if cli.no_bundled {
        config.catalog.bundled = false;
    }
    let catalog = config.catalog.build().context("building error catalog")?;
    tracing::debug!(
        version = catalog.version(),
        sets = catalog.sets().len(),
        errors = catalog.len(),
        "catalog ready"
    );

    match &cli.command {
        Commands::Resolve {
            selector,
            all,
            json,
        } => cmd_resolve(&catalog, selector, *all, *json),
        Commands::Decode { data, json } => cmd_decode(&catalog, data, *json),
        Commands::List { set, json } => cmd_list(&catalog, set.as_deref(), *json),
        Commands::Selector { .. } => Ok(()),
    }
}

fn cmd_resolve(catalog: &Catalog, observed: &str, all: bool, json: bool) -> Result<()> {
    let selector: Selector = observed
        .parse()
        .with_context(|| format!("invalid selector {observed:?}"))?;
    let resolution = resolver::resolve(catalog, selector);
    let candidates = if all {
        resolver::candidates(catalog, selector)
    } else {
        vec![]
    };

    if json {
        let out = if all {
            serde_json::json!({ "resolution": resolution, "candidates": candidates })
        } else {
            serde_json::to_value(resolution)?
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{resolution}");
    if let Resolution::Found(m) = resolution {
        println!("  Set:        {}", m.set);
        println!("  Signature:  {}", m.entry.signature);
        println!("  Selector:   {}", m.entry.selector);
        println!("  Definition: {}", m.definition());
    }
    if all && !candidates.is_empty() {
        println!("  Candidates:");
        for candidate in &candidates {
            println!("    {candidate}");
        }
    }
    Ok(())
}

fn cmd_decode(catalog: &Catalog, data: &str, json: bool) -> Result<()> {
    let decoded = decode_revert_hex(catalog, data)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    println!("{decoded}");
    if let Some(err) = &decoded.error {
        println!("  Set:        {}", err.set);
        println!("  Signature:  {}", err.signature);
        for arg in &err.args {
            println!("  {:<10}  {} = {}", arg.ty, arg.name, arg.value);
        }
    }
    Ok(())
}

fn cmd_selector(signature: &str, json: bool) -> Result<()> {
    let def: ErrorDefinition = signature.parse()?;
    let canonical = def.signature();
    let selector = def.selector();
    if json {
        let out = serde_json::json!({ "signature": canonical, "selector": selector });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{selector}  {canonical}");
    }
    Ok(())
}

fn cmd_list(catalog: &Catalog, set: Option<&str>, json: bool) -> Result<()> {
    let sets: Vec<_> = match set {
        Some(name) => vec![catalog
            .set(name)
            .ok_or_else(|| anyhow!("no ABI set named {name:?}"))?],
        None => catalog.sets().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    for s in sets {
        println!("{} ({} errors)", s.name(), s.len());
        for entry in s.entries() {
            println!("  {}  {}", entry.selector, entry.signature);
        }
    }
    Ok(())
}
