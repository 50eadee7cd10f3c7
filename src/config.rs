#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}
