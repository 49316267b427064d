/// Model used when `GEMINI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Base URL of the Generative Language REST API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const ENDPOINT_VAR: &str = "GEMINI_ENDPOINT";

/// Connection settings for the inference endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

// Hand-written so the key never reaches a log line
impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

impl AnalysisConfig {
    /// Reads the process environment on native targets.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// The browser has no environment, so the values are baked in at build time.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            match name {
                API_KEY_VAR => option_env!("GEMINI_API_KEY"),
                MODEL_VAR => option_env!("GEMINI_MODEL"),
                ENDPOINT_VAR => option_env!("GEMINI_ENDPOINT"),
                _ => None,
            }
            .map(str::to_owned)
        })
    }

    /// Builds a config from any key/value source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR),
            model: get(MODEL_VAR).unwrap_or(defaults.model),
            endpoint: get(ENDPOINT_VAR)
                .map(|endpoint| endpoint.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.endpoint),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
