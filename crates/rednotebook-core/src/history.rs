// Re-exports from rednotebook-history and the bridge from AppConfig.
pub use rednotebook_history::{
    Action, HistoryConfig, HistoryManager, HistoryObserver, NoopObserver,
};

use rednotebook_config::AppConfig;

/// Tag carried by actions that change a day's text.
pub const DAY_TEXT_TAG: &str = "day_text";

/// Tag carried by actions that change a day's tag set.
pub const TAGS_TAG: &str = "tags";

/// Builds the history bounds from the user configuration.
pub fn history_config(config: &AppConfig) -> HistoryConfig {
    let (size, buffer) = config.history_bounds();
    HistoryConfig::new(size, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_config_from_app_config() {
        let config = AppConfig {
            history_size: 7,
            history_buffer: 3,
            ..AppConfig::default()
        };
        assert_eq!(history_config(&config), HistoryConfig::new(7, 3));
    }

    #[test]
    fn test_default_bounds_match() {
        assert_eq!(
            history_config(&AppConfig::default()),
            HistoryConfig::default()
        );
    }
}
