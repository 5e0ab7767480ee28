use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub output_path: PathBuf,
    pub debug_config: DebugConfig,
}

pub struct ApiConfig {
    /// Only needed when the reply is fetched from the API
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

// Keeps the key out of the logs
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct DebugConfig {
    /// Read the reply from this file instead of calling the API
    pub reply_file: Option<PathBuf>,
    pub skip_write: bool,
}
