use marker::feedback::ai_feedback::AiFeedback;
use marker::traits::provider::GradingProvider;
use std::sync::Arc;
use util::config::AppConfig;

/// Shared state handed to every handler.
///
/// Holds the loaded configuration and, when an API key is configured, the external
/// grading provider. Cloning is cheap; the provider (and its HTTP client) is shared.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    provider: Option<Arc<dyn GradingProvider>>,
}

impl AppState {
    /// Builds the state from configuration, creating the DeepSeek provider if a key is set.
    pub fn new(config: AppConfig) -> Self {
        let provider = AiFeedback::from_config(&config)
            .map(|provider| Arc::new(provider) as Arc<dyn GradingProvider>);
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// Replaces the grading provider.
    pub fn with_provider(mut self, provider: Arc<dyn GradingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn provider(&self) -> Option<Arc<dyn GradingProvider>> {
        self.provider.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker::feedback::auto_feedback::AutoFeedback;

    #[test]
    fn no_key_means_no_provider() {
        let state = AppState::new(AppConfig::default());
        assert!(state.provider().is_none());
        assert_eq!(state.config().port, 3000);
    }

    #[test]
    fn key_creates_deepseek_provider() {
        let config = AppConfig {
            deepseek_api_key: "sk-test".into(),
            ..AppConfig::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.provider().map(|p| p.name()), Some("deepseek"));
    }

    #[test]
    fn provider_can_be_replaced() {
        let state = AppState::new(AppConfig::default()).with_provider(Arc::new(AutoFeedback));
        assert_eq!(state.provider().map(|p| p.name()), Some("heuristic"));
    }
}
