use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ConversationSession, SessionConfig};
use crate::core::AppConfig;
use crate::ollama::{ChatError, OllamaClient};

pub async fn run(
    model: Option<String>,
    temperature: Option<f64>,
    system_prompt: Option<String>,
) -> Result<()> {
    let config = AppConfig::default();

    let client = OllamaClient::new(&config.ollama_base_url);
    let mut session = ConversationSession::new(client);

    if !session.check_connection().await {
        println!("Could not connect to Ollama at {}.", config.ollama_base_url);
        println!(
            "Start it with `ollama serve` and pull a model with `ollama pull {}`.",
            config.default_model
        );
        return Ok(());
    }

    // Prefer the configured model when the backend advertises it,
    // otherwise fall back to the first advertised model
    let model = model.unwrap_or_else(|| {
        let available = session.available_models();
        if available.is_empty() || available.iter().any(|m| *m == config.default_model) {
            config.default_model.clone()
        } else {
            available[0].clone()
        }
    });

    let session_config = SessionConfig::new(
        &model,
        system_prompt.as_deref().unwrap_or(&config.system_prompt),
        temperature.unwrap_or(config.temperature),
        config.history_window,
    );

    println!(
        "Hello! I'm {}, your AI assistant powered by Ollama. Chatting with {}.",
        config.app_name, model
    );
    println!("Type /clear to reset the conversation, Ctrl-D to exit.");

    let mut rl = DefaultEditor::new().expect("Editor failed");

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim() == "/clear" {
                    session.clear();
                    println!("Chat cleared.");
                    continue;
                }

                match session.submit(&line, &session_config).await {
                    Ok(turn) => println!("{}", turn.content),
                    Err(ChatError::EmptyInput) => println!("Please enter a message."),
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
