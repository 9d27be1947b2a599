//! Flasq is a chat client for a locally hosted, Ollama-compatible
//! inference server. The conversation session and backend client live
//! in the library so the HTTP API and the terminal REPL share them.
pub mod api;
pub mod chat;
pub mod cli;
pub mod core;
pub mod ollama;
