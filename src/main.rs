use std::sync::Arc;

use clap::Parser;

use routegate::config::{load_config, schema_json};
use routegate::startup;
use routegate::utils::logger::init_logging;

#[derive(Parser, Debug)]
#[command(name = "routegate", about = "Navigation guard and browser probe sidecar")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "./config.yaml")]
    config: String,

    /// Print the configuration JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.schema {
        match schema_json() {
            Ok(schema) => {
                println!("{}", schema);
                return;
            }
            Err(e) => {
                eprintln!("Error rendering configuration schema: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config_path = cli.config;
    let config = match load_config(&config_path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
