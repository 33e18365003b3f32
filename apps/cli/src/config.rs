use std::path::PathBuf;

use tarushiru_ai::DEFAULT_GEMINI_MODEL;

pub struct Config {
    pub data_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub ai_model: String,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let data_path = std::env::var("TARUSHIRU_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/tarushiru_data.json"));
        let gemini_api_key = std::env::var("TARUSHIRU_GEMINI_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let ai_model =
            std::env::var("TARUSHIRU_AI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
        let log_format =
            std::env::var("TARUSHIRU_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        Self {
            data_path,
            gemini_api_key,
            ai_model,
            log_format,
        }
    }
}
