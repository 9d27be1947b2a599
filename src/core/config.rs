use std::env;

/// Default persona prompt for the assistant, overridable per request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Flasq, a helpful and \
professional AI assistant specialized in coding and programming languages. \
Provide clear, concise, and accurate responses. When helping with code, \
include explanations and best practices.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub ollama_base_url: String,
    pub default_model: String,
    pub page_title: String,
    pub app_name: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub history_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let ollama_base_url = env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string())
            .trim_end_matches('/')
            .to_string();
        let default_model =
            env::var("DEFAULT_MODEL").unwrap_or_else(|_| "llama3.2:1b".to_string());
        let page_title =
            env::var("PAGE_TITLE").unwrap_or_else(|_| "Flasq AI Assistant".to_string());
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "Flasq".to_string());
        let system_prompt =
            env::var("SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let temperature = env::var("TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.7)
            .clamp(0.0, 1.0);
        let history_window = env::var("HISTORY_WINDOW")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(20);

        Self {
            ollama_base_url,
            default_model,
            page_title,
            app_name,
            system_prompt,
            temperature,
            history_window,
        }
    }
}
