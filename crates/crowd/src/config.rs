//! Configuration for the orchestrator.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::OrchestratorError;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How many prior turns are handed to generation.
    pub context_turns: usize,

    /// Shortest gap between two replies to the same message.
    pub stagger_min: Duration,

    /// Longest gap between two replies to the same message.
    pub stagger_max: Duration,

    /// Upper bound on a single generation call.
    pub generation_timeout: Duration,

    /// Token budget for replies.
    pub response_max_tokens: u32,

    /// Sampling temperature for replies and spontaneous lines.
    pub response_temperature: f32,

    /// Token budget for spontaneous lines.
    pub spontaneous_max_tokens: u32,

    /// JSON roster to load instead of the built-in agents.
    pub agents_file: Option<PathBuf>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            context_turns: 3,
            stagger_min: Duration::from_millis(500),
            stagger_max: Duration::from_millis(1500),
            generation_timeout: Duration::from_secs(30),
            response_max_tokens: 150,
            response_temperature: 0.9,
            spontaneous_max_tokens: 100,
            agents_file: None,
        }
    }
}

impl OrchestratorConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CROWD_CONTEXT_TURNS` - Prior turns sent to generation (default: 3)
    /// - `CROWD_STAGGER_MIN_MS` - Minimum gap between replies (default: 500)
    /// - `CROWD_STAGGER_MAX_MS` - Maximum gap between replies (default: 1500)
    /// - `CROWD_GENERATION_TIMEOUT_SECS` - Per-call timeout (default: 30)
    /// - `CROWD_RESPONSE_MAX_TOKENS` - Reply token budget (default: 150)
    /// - `CROWD_RESPONSE_TEMPERATURE` - Sampling temperature (default: 0.9)
    /// - `CROWD_SPONTANEOUS_MAX_TOKENS` - Spontaneous token budget (default: 100)
    /// - `CROWD_AGENTS_FILE` - JSON roster path (default: built-in roster)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let defaults = Self::default();

        let config = Self {
            context_turns: parse_var("CROWD_CONTEXT_TURNS").unwrap_or(defaults.context_turns),
            stagger_min: parse_var("CROWD_STAGGER_MIN_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.stagger_min),
            stagger_max: parse_var("CROWD_STAGGER_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.stagger_max),
            generation_timeout: parse_var("CROWD_GENERATION_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.generation_timeout),
            response_max_tokens: parse_var("CROWD_RESPONSE_MAX_TOKENS")
                .unwrap_or(defaults.response_max_tokens),
            response_temperature: parse_var("CROWD_RESPONSE_TEMPERATURE")
                .unwrap_or(defaults.response_temperature),
            spontaneous_max_tokens: parse_var("CROWD_SPONTANEOUS_MAX_TOKENS")
                .unwrap_or(defaults.spontaneous_max_tokens),
            agents_file: env::var("CROWD_AGENTS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        if self.stagger_min > self.stagger_max {
            return Err(OrchestratorError::InvalidConfig(format!(
                "stagger_min ({:?}) is larger than stagger_max ({:?})",
                self.stagger_min, self.stagger_max
            )));
        }
        if self.generation_timeout.is_zero() {
            return Err(OrchestratorError::InvalidConfig(
                "generation_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Builder for OrchestratorConfig.
#[derive(Debug, Default)]
pub struct OrchestratorConfigBuilder {
    config: OrchestratorConfig,
}

impl OrchestratorConfigBuilder {
    /// Set how many prior turns reach generation.
    pub fn context_turns(mut self, turns: usize) -> Self {
        self.config.context_turns = turns;
        self
    }

    /// Set the gap range between successive replies.
    pub fn stagger(mut self, min: Duration, max: Duration) -> Self {
        self.config.stagger_min = min;
        self.config.stagger_max = max;
        self
    }

    /// Set the per-call generation timeout.
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.config.generation_timeout = timeout;
        self
    }

    /// Set the reply token budget.
    pub fn response_max_tokens(mut self, tokens: u32) -> Self {
        self.config.response_max_tokens = tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn response_temperature(mut self, temperature: f32) -> Self {
        self.config.response_temperature = temperature;
        self
    }

    /// Set the spontaneous token budget.
    pub fn spontaneous_max_tokens(mut self, tokens: u32) -> Self {
        self.config.spontaneous_max_tokens = tokens;
        self
    }

    /// Load agents from a JSON file.
    pub fn agents_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.agents_file = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OrchestratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();

        assert_eq!(config.context_turns, 3);
        assert_eq!(config.stagger_min, Duration::from_millis(500));
        assert_eq!(config.stagger_max, Duration::from_millis(1500));
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert!(config.agents_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = OrchestratorConfig::builder()
            .context_turns(5)
            .stagger(Duration::ZERO, Duration::from_millis(10))
            .generation_timeout(Duration::from_secs(2))
            .response_max_tokens(60)
            .response_temperature(0.4)
            .spontaneous_max_tokens(40)
            .agents_file("agents.json")
            .build();

        assert_eq!(config.context_turns, 5);
        assert_eq!(config.stagger_max, Duration::from_millis(10));
        assert_eq!(config.generation_timeout, Duration::from_secs(2));
        assert_eq!(config.response_max_tokens, 60);
        assert_eq!(config.response_temperature, 0.4);
        assert_eq!(config.spontaneous_max_tokens, 40);
        assert_eq!(config.agents_file, Some(PathBuf::from("agents.json")));
    }

    #[test]
    fn test_validate_rejects_inverted_stagger() {
        let config = OrchestratorConfig::builder()
            .stagger(Duration::from_millis(900), Duration::from_millis(100))
            .build();
        assert!(matches!(
            config.validate(),
            Err(OrchestratorError::InvalidConfig(_))
        ));
    }

    // Environment-based scenarios share one test: env vars are process-global.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        const VARS: &[&str] = &[
            "CROWD_CONTEXT_TURNS",
            "CROWD_STAGGER_MIN_MS",
            "CROWD_STAGGER_MAX_MS",
            "CROWD_GENERATION_TIMEOUT_SECS",
            "CROWD_RESPONSE_MAX_TOKENS",
            "CROWD_RESPONSE_TEMPERATURE",
            "CROWD_SPONTANEOUS_MAX_TOKENS",
            "CROWD_AGENTS_FILE",
        ];
        let clear = || VARS.iter().for_each(|v| std::env::remove_var(v));

        // Nothing set
        clear();
        let config = OrchestratorConfig::from_env().unwrap();
        assert_eq!(config.context_turns, 3);
        assert_eq!(config.stagger_min, Duration::from_millis(500));

        // Values set, garbage ignored
        clear();
        std::env::set_var("CROWD_CONTEXT_TURNS", "5");
        std::env::set_var("CROWD_STAGGER_MIN_MS", "100");
        std::env::set_var("CROWD_STAGGER_MAX_MS", "200");
        std::env::set_var("CROWD_GENERATION_TIMEOUT_SECS", "abc");
        std::env::set_var("CROWD_AGENTS_FILE", "/etc/crowd/agents.json");
        let config = OrchestratorConfig::from_env().unwrap();
        assert_eq!(config.context_turns, 5);
        assert_eq!(config.stagger_min, Duration::from_millis(100));
        assert_eq!(config.stagger_max, Duration::from_millis(200));
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(
            config.agents_file,
            Some(PathBuf::from("/etc/crowd/agents.json"))
        );

        // Inverted range is an error
        clear();
        std::env::set_var("CROWD_STAGGER_MIN_MS", "2000");
        assert!(OrchestratorConfig::from_env().is_err());

        clear();
    }
}
