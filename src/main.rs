//! Synesthesia - turn text, colors and numbers into sound

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use synesthesia::config;
use synesthesia::mapping::{ContentMapper, ScaleKind};
use synesthesia::server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synesthesia=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mapper = ContentMapper::default();

    match cli.command {
        Commands::Serve {
            config: config_path,
            host,
            port,
        } => {
            let mut cfg = config::load_or_default(&config_path)?;
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            cfg.validate()?;

            println!("Starting Synesthesia at http://{}", cfg.bind_addr());
            println!("  Default scale: {}", cfg.default_scale());
            match &cfg.server.static_dir {
                Some(dir) => println!("  Static files: {:?}", dir),
                None => println!("  Static files: (none, API only)"),
            }
            println!("  Press Ctrl+C to stop\n");

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::serve(cfg))?;
        }

        Commands::Detect { content } => {
            print_json(&mapper.detect(&content))?;
        }

        Commands::Text { text, scale } => {
            print_json(&mapper.map_text(&text, ScaleKind::select(&scale)))?;
        }

        Commands::Color { hex } => {
            print_json(&mapper.map_color(&hex))?;
        }

        Commands::Number { value } => {
            let pattern = mapper
                .map_number(&Value::String(value.clone()))
                .with_context(|| format!("cannot map {:?}", value))?;
            print_json(&pattern)?;
        }

        Commands::Auto { content } => {
            print_json(&mapper.map_auto(&Value::String(content)))?;
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Bind address: {}", cfg.bind_addr());
                    match &cfg.server.static_dir {
                        Some(dir) => println!("  Static files: {:?}", dir),
                        None => println!("  Static files: (none)"),
                    }
                    println!("  Default scale: {}", cfg.default_scale());
                    println!("  Preferences: {:?}", cfg.preferences.backend);
                    if cfg.preferences.backend == config::BackendKind::File {
                        println!("    - {:?}", cfg.preferences.path);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = "synesthesia.yaml";
            if std::path::Path::new(path).exists() {
                println!("synesthesia.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, config::EXAMPLE_CONFIG)?;
                println!("Created synesthesia.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
