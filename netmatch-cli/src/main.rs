//! Netmatch CLI - query a netlist snapshot for templates and nets.

use clap::{Parser, Subcommand, ValueEnum};
use netmatch::{EngineOptions, MatchResult, MatchingEngine, NetlistIndex, Query};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(name = "netmatch")]
#[command(about = "Netlist template and net pattern matching tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON netlist snapshot
    #[arg(short, long, value_name = "FILE", global = true)]
    netlist: Option<PathBuf>,

    /// Number of queries to memoize (0 disables the cache)
    #[arg(long, global = true)]
    cache_capacity: Option<usize>,

    /// Largest bus expansion accepted before a pattern is matched literally
    #[arg(long, global = true)]
    max_expansion: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find nets matching a pattern
    Find {
        /// Net name, regex, or bus notation such as data[0:7]
        #[arg(value_name = "NET")]
        net: String,

        /// Template name or regex (defaults to the top cell)
        #[arg(short, long)]
        template: Option<String>,

        /// Treat the template as a regular expression
        #[arg(long)]
        template_regex: bool,

        /// Treat the net as a regular expression
        #[arg(long)]
        net_regex: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with code 2 when nothing matches
        #[arg(long)]
        fail_on_empty: bool,
    },

    /// List all templates in load order
    Templates,

    /// List the nets of one template
    Nets {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Expand bus notation without loading a netlist
    Expand {
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// One `template:net` per line
    Plain,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut options = EngineOptions::default();
    if let Some(capacity) = cli.cache_capacity {
        options.cache_capacity = capacity;
    }
    if let Some(limit) = cli.max_expansion {
        options.max_bus_expansion = limit;
    }

    let exit_code = match cli.command {
        Commands::Expand { pattern } => {
            handle_expand(&pattern, &options);
            0
        }
        command => match load_engine(cli.netlist.as_deref(), options) {
            Ok(engine) => run(&engine, command),
            Err(message) => {
                eprintln!("Error: {}", message);
                1
            }
        },
    };

    process::exit(exit_code);
}

fn load_engine(path: Option<&Path>, options: EngineOptions) -> Result<MatchingEngine, String> {
    let path = path.ok_or_else(|| "--netlist <FILE> is required for this command".to_string())?;
    let index = NetlistIndex::from_json_file(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(MatchingEngine::with_options(Arc::new(index), options))
}

fn run(engine: &MatchingEngine, command: Commands) -> i32 {
    match command {
        Commands::Find {
            net,
            template,
            template_regex,
            net_regex,
            format,
            fail_on_empty,
        } => {
            let query = Query::new(template, net, template_regex, net_regex);
            let result = engine.find(&query);
            output_result(&query, &result, &format);
            if fail_on_empty && result.net_matches().is_empty() {
                2
            } else {
                0
            }
        }
        Commands::Templates => {
            for template in engine.get_all_templates() {
                if template == engine.top_cell() {
                    println!("{} (top)", template);
                } else {
                    println!("{}", template);
                }
            }
            0
        }
        Commands::Nets { template } => {
            for net in engine.get_all_nets(&template) {
                println!("{}", net);
            }
            0
        }
        Commands::Expand { pattern } => {
            handle_expand(&pattern, engine.options());
            0
        }
    }
}

fn handle_expand(pattern: &str, options: &EngineOptions) {
    let expander = netmatch::BusNotationExpander::with_limit(options.max_bus_expansion);
    match expander.expand(pattern) {
        Ok(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        Err(e) => {
            tracing::warn!("{}", e);
            println!("{}", pattern);
        }
    }
}

fn output_result(query: &Query, result: &MatchResult, format: &OutputFormat) {
    match format {
        OutputFormat::Human => output_human(query, result),
        OutputFormat::Json => output_json(query, result),
        OutputFormat::Plain => {
            for net in result.net_matches() {
                println!("{}", net);
            }
        }
    }
}

fn output_human(query: &Query, result: &MatchResult) {
    println!("\nQuery: {}", query.net_pattern);
    println!("{}", "─".repeat(60));

    if result.template_matches().is_empty() {
        println!("  No matching templates");
        return;
    }
    println!("  Templates: {}", result.template_matches().join(", "));

    if result.net_matches().is_empty() {
        println!("  No matching nets");
        return;
    }
    println!("\n  NETS:");
    for net in result.net_matches() {
        println!("    - {}", net);
    }
    println!("\n  Summary:");
    println!("    Templates: {}", result.template_matches().len());
    println!("    Nets:      {}", result.net_matches().len());
}

fn output_json(query: &Query, result: &MatchResult) {
    let output = serde_json::json!({
        "query": query,
        "net_matches": result.net_matches(),
        "template_matches": result.template_matches(),
        "summary": {
            "templates": result.template_matches().len(),
            "nets": result.net_matches().len(),
        }
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}
