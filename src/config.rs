#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub bank_url: String,
    pub bank_timeout_ms: u64,
    pub ledger_buffer: usize,
    pub bank_mock_behavior: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8090".to_string()),
            bank_url: std::env::var("BANK_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            bank_timeout_ms: std::env::var("BANK_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(5000),
            ledger_buffer: std::env::var("LEDGER_BUFFER")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1024),
            bank_mock_behavior: std::env::var("BANK_MOCK_BEHAVIOR")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}
