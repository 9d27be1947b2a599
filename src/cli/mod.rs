use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod models;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8501")]
        port: String,
    },
    /// Start an interactive chat session
    Chat {
        /// Model to chat with; defaults to the configured model
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature between 0.0 and 1.0
        #[arg(long)]
        temperature: Option<f64>,

        /// Override the assistant's system prompt
        #[arg(long)]
        system_prompt: Option<String>,
    },
    /// List the models advertised by the backend
    Models {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    // Pick up a local .env before any config is read
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Chat {
            model,
            temperature,
            system_prompt,
        }) => {
            chat::run(model, temperature, system_prompt).await?;
        }
        Some(Command::Models {}) => {
            models::run().await?;
        }
        None => {}
    }

    Ok(())
}
