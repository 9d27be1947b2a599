//! Public types for the model listing API
use serde::Serialize;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}
