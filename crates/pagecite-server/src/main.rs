//! Pagecite Server CLI
//!
//! Starts the HTTP server for document question answering.

use anyhow::{Context, Result};
use pagecite_server::{config::ServerConfig, init_tracing, start_server};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    }

    init_tracing();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)
            .with_context(|| format!("Failed to load configuration from {}", config_path))?
    } else {
        tracing::info!("No config file specified, using defaults");
        ServerConfig::default()
    };

    start_server(config).await.context("Server stopped")?;

    Ok(())
}

fn print_help() {
    println!("Pagecite Server - Ask questions about PDF documents");
    println!();
    println!("USAGE:");
    println!("    pagecite-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 5000)");
    println!("    - documents_dir: Directory of uploaded PDFs (default: 'uploads')");
    println!("    - api_key_env: Variable holding the API key (default: 'OPENROUTER_API_KEY')");
    println!("    - [llm]: base_url, model, app_title, max_tokens, temperature, timeout_secs");
    println!("    - [qa]: max_prompt_content_chars, model_timeout_secs");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
