//! modelgraph CLI - dependency queries and reordering for equation models.

mod colors;
mod graph;
mod query;
mod sort;
mod summary;

use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use modelgraph_core::EngineConfig;

#[derive(Parser)]
#[command(name = "modelgraph")]
#[command(about = "Dependency graphs for equation-based models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON engine configuration
    #[arg(long, global = true)]
    config: Option<String>,

    /// Treat common math function names (exp, log, ...) as reserved words
    #[arg(long, global = true)]
    math_functions: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GraphFormat {
    Dot,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the model's equations in dependency order
    Sort {
        /// Path to the model file
        model: String,

        /// Output path (default: <model>_sorted.ode)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List what a symbol depends on
    Deps {
        /// Path to the model file
        model: String,

        /// Symbol to query
        symbol: String,

        /// Include indirect dependencies
        #[arg(short, long)]
        transitive: bool,
    },

    /// List what depends on a symbol
    Dependents {
        /// Path to the model file
        model: String,

        /// Symbol to query
        symbol: String,

        /// Include indirect dependents
        #[arg(short, long)]
        transitive: bool,
    },

    /// Export the dependency graph rooted at a symbol
    Graph {
        /// Path to the model file
        model: String,

        /// Root symbol
        symbol: String,

        /// Follow dependents instead of dependencies
        #[arg(long)]
        inverse: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "dot")]
        format: GraphFormat,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List defined symbols, or every referenced symbol
    Names {
        /// Path to the model file
        model: String,

        /// List referenced symbols (including external ones)
        #[arg(long)]
        referenced: bool,
    },

    /// Show closure sizes for every defined symbol
    Summary {
        /// Path to the model file
        model: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Helper to format modelgraph-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(core_err) = err.downcast_ref::<modelgraph_core::Error>() {
            anyhow::anyhow!("{}", core_err.with_hint())
        } else {
            err
        }
    };

    let config = load_config(cli.config.as_deref(), cli.math_functions).map_err(format_error)?;

    match cli.command {
        Commands::Sort { model, output } => {
            sort::execute(&model, output.as_deref(), &config).map_err(format_error)?;
        }

        Commands::Deps {
            model,
            symbol,
            transitive,
        } => {
            query::dependencies(&model, &symbol, transitive, &config).map_err(format_error)?;
        }

        Commands::Dependents {
            model,
            symbol,
            transitive,
        } => {
            query::dependents(&model, &symbol, transitive, &config).map_err(format_error)?;
        }

        Commands::Graph {
            model,
            symbol,
            inverse,
            format,
            output,
        } => {
            graph::execute(&model, &symbol, inverse, format, output.as_deref(), &config)
                .map_err(format_error)?;
        }

        Commands::Names { model, referenced } => {
            query::names(&model, referenced, &config).map_err(format_error)?;
        }

        Commands::Summary { model } => {
            summary::execute(&model, &config).map_err(format_error)?;
        }
    }

    Ok(())
}

/// Build the engine configuration from `--config` and flags.
fn load_config(path: Option<&str>, math_functions: bool) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_json_file(Path::new(path))?,
        None => EngineConfig::default(),
    };
    if math_functions {
        config = config.with_math_functions();
    }
    tracing::debug!("Engine configuration: {:?}", config);
    Ok(config)
}
