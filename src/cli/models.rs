use anyhow::Result;

use crate::core::AppConfig;
use crate::ollama::OllamaClient;

pub async fn run() -> Result<()> {
    let config = AppConfig::default();
    let client = OllamaClient::new(&config.ollama_base_url);

    match client.list_models().await {
        Ok(models) if models.is_empty() => {
            println!(
                "No models found. Pull one with `ollama pull {}`.",
                config.default_model
            );
        }
        Ok(models) => {
            for name in models {
                println!("{}", name);
            }
        }
        Err(err) => {
            println!(
                "Could not reach Ollama at {}: {}",
                config.ollama_base_url, err
            );
        }
    }

    Ok(())
}
