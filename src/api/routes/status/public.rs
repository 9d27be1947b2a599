//! Public types for the status API
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub app_name: String,
    pub page_title: String,
    pub base_url: String,
    pub default_model: String,
    pub connected: bool,
}
