use crate::config::model::{ApiConfig, Config, DebugConfig};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-opus-4-5";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_OUTPUT_PATH: &str = "index.html";

pub fn load_config() -> Config {
    let api_key = load_optional_config("ANTHROPIC_API_KEY");
    let base_url = load_string_config("ANTHROPIC_BASE_URL", DEFAULT_BASE_URL);
    let model = load_string_config("ANTHROPIC_MODEL", DEFAULT_MODEL);
    let max_tokens = load_number_config("ANTHROPIC_MAX_TOKENS", DEFAULT_MAX_TOKENS);
    let timeout_secs = load_number_config("ANTHROPIC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
    let output_path = PathBuf::from(load_string_config("OUTPUT_PATH", DEFAULT_OUTPUT_PATH));

    let debug_reply_file = load_optional_config("DEBUG_REPLY_FILE").map(PathBuf::from);
    let debug_skip_write = load_bool_config("DEBUG_SKIP_WRITE", false);

    Config {
        api: ApiConfig {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        },
        output_path,
        debug_config: DebugConfig {
            reply_file: debug_reply_file,
            skip_write: debug_skip_write,
        },
    }
}

fn load_optional_config(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn load_string_config(name: &str, default: &str) -> String {
    load_optional_config(name).unwrap_or_else(|| default.to_string())
}

fn load_bool_config(name: &str, default: bool) -> bool {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected either 'true' or 'false'",
                name
            )
        })
}

fn load_number_config<T: FromStr>(name: &str, default: T) -> T {
    match load_optional_config(name) {
        Some(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("Invalid config '{}'. Expected a positive integer.", name)),
        None => default,
    }
}
