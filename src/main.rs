// Copyright 2025 The Shelf Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

use shelf_server::{load_config_file, save_config_file, ShelfServer, ShelfServerConfig};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Standalone book catalog server with self-describing API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run {
        /// Path to the configuration file
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,

        /// Override the server port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate a configuration file without starting the server
    Validate {
        /// Path to the configuration file to validate
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,

        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { config, port }) => run_server(config, port).await,
        Some(Commands::Validate {
            config,
            show_resolved,
        }) => validate_config(config, show_resolved),
        None => run_server(cli.config, cli.port).await,
    }
}

/// Run the Shelf Server
async fn run_server(config_path: PathBuf, port_override: Option<u16>) -> Result<()> {
    // Load .env from the config file's directory if present (feeds the
    // ${VAR} interpolation in the config file)
    let env_file_loaded = if let Some(config_dir) = config_path.parent() {
        let env_file = config_dir.join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(_) => true,
                Err(e) => {
                    eprintln!("Warning: Failed to load .env file: {e}");
                    false
                }
            }
        } else {
            false
        }
    } else {
        false
    };

    // Create a default config file when none exists
    let (mut config, logging_initialized) = if !config_path.exists() {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
        env_logger::init();

        warn!(
            "Config file '{}' not found. Creating default configuration.",
            config_path.display()
        );

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut default_config = ShelfServerConfig::default();
        if let Some(port) = port_override {
            default_config.server.port = port;
            info!("Using command line port {port} in default configuration");
        }

        save_config_file(&default_config, &config_path)?;

        info!(
            "Default configuration created at: {}",
            config_path.display()
        );

        (default_config, true)
    } else {
        (load_config_file(&config_path)?, false)
    };

    if !logging_initialized {
        // Config log level applies unless RUST_LOG was set by the user
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", &config.server.log_level);
        }
        env_logger::init();
    }

    info!("Starting Shelf Server");
    debug!("Debug logging is enabled");

    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }

    info!("Config file: {}", config_path.display());

    if let Some(port) = port_override {
        config.server.port = port;
    }
    info!("Port: {}", config.server.port);

    let server = ShelfServer::from_config(config)?;
    server.run().await?;

    Ok(())
}

/// Validate a configuration file
fn validate_config(config_path: PathBuf, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    match load_config_file(&config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid");

            if show_resolved {
                println!();
                println!("Resolved settings:");
                println!("  App name: {}", config.app.name);
                println!("  Host: {}", config.server.host);
                println!("  Port: {}", config.server.port);
                println!("  Log level: {}", config.server.log_level);
                println!("  Read only: {}", config.server.read_only);
                println!("  Docs path: {}", config.docs.path);
                if config.cors.allowed_origins.is_empty() {
                    println!("  CORS: any origin");
                } else {
                    println!("  CORS: {}", config.cors.allowed_origins.join(", "));
                }
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}
