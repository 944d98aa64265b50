use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Conversation Store Args ---
    /// Conversation store type (memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "memory")]
    pub history_type: String,

    /// Maximum number of recent messages handed to the responder per reply. 0 means no limit.
    #[arg(long, env = "HISTORY_LIMIT", default_value = "50")]
    pub history_limit: usize,

    // --- Responder Args ---
    /// Intent matching strategy for canned answers (keyword, fuzzy, llm)
    #[arg(long, env = "RESPONDER_TYPE", default_value = "keyword")]
    pub responder_type: String,

    /// Minimum Jaro-Winkler similarity for the fuzzy strategy to accept a match (0.0 to 1.0).
    #[arg(long, env = "FUZZY_THRESHOLD", default_value = "0.85")]
    pub fuzzy_threshold: f64,

    /// Simulated reply latency in milliseconds. The widget shows its typing indicator during this window.
    #[arg(long, env = "REPLY_DELAY_MS", default_value = "1000")]
    pub reply_delay_ms: u64,

    /// Path to the FAQ definition file. The built-in SoftSell question set is used when the file is absent.
    #[arg(long, env = "FAQ_PATH", default_value = "json/faq.json")]
    pub faq_path: String,

    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (placeholder)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "placeholder")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider. The placeholder never sends it; a real key stays server-side.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for chat completion
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Host address and port for the WebSocket server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Optional port for the HTTP API server. The HTTP API is disabled when unset.
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Optional API Key required for widget clients to connect to the WebSocket server. If set, clients must sign their handshake with it.
    #[arg(long, env = "SERVER_API_KEY")]
    pub server_api_key: Option<String>,

    /// Optional path to the TLS certificate file (PEM format) for enabling WSS/HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling WSS/HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

#[cfg(test)]
impl Args {
    /// Defaults with zero reply latency so tests don't sleep.
    pub fn for_test() -> Self {
        let mut args = <Args as Parser>::parse_from(["softsell-agent"]);
        args.reply_delay_ms = 0;
        args
    }
}
