use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use segmux::config::{load_config, MuxConfig};
use segmux::lifecycle::register_routes;
use segmux::routing::ServeMux;

#[derive(Parser)]
#[command(name = "segmux-cli")]
#[command(about = "Inspect and test segmux route tables", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "segmux.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the route table and report the first fault
    Check,
    /// Print the route tree as JSON
    Routes,
    /// Resolve a request against the route table
    Resolve {
        /// HTTP method, e.g. GET
        method: String,
        /// Request path, e.g. /catalog/42
        path: String,
    },
}

/// Route table whose handlers are the configured route names.
fn named_mux(config: &MuxConfig) -> Result<ServeMux<String>, Box<dyn std::error::Error>> {
    let mux = ServeMux::new().trailing_slash(config.routing.trailing_slash);
    register_routes(&mux, &config.routes, |route| route.name.clone())?;
    Ok(mux)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Check => {
            let mux = named_mux(&config)?;
            println!(
                "ok: {} routes, {} nodes",
                config.routes.len(),
                mux.snapshot().node_count()
            );
        }
        Commands::Routes => {
            let mux = named_mux(&config)?;
            println!("{}", serde_json::to_string_pretty(&mux.snapshot())?);
        }
        Commands::Resolve { method, path } => {
            let mux = named_mux(&config)?;
            match mux.resolve(&method, &path) {
                Ok(resolved) => {
                    let out = serde_json::json!({
                        "route": resolved.handler,
                        "params": resolved.params,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
