use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Animation curve applied to scroll progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Cubic,
    Quintic,
}

impl EasingType {
    pub const ALL: [EasingType; 6] = [
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::Cubic,
        EasingType::Quintic,
    ];
}

/// Timing of a single digit scroll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Duration of one scroll animation, whatever its distance
    #[serde(default = "default_scroll_duration")]
    pub duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate used while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl ScrollConfig {
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Frame interval while animating
    #[inline]
    pub fn tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

/// How a number is broken into digit scrollers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Number of fractional digits displayed
    #[serde(default)]
    pub decimal_places: usize,
    /// Text placed before the digits (after the negative sign)
    #[serde(default)]
    pub prefix: Option<String>,
    /// Text placed after the digits
    #[serde(default)]
    pub suffix: Option<String>,
    /// Decimal separator
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Height of one digit cell in rows
    #[serde(default = "default_cell_height")]
    pub cell_height: u16,
    /// Lowest label on each digit strip
    #[serde(default)]
    pub digit_min: i64,
    /// Highest label on each digit strip
    #[serde(default = "default_digit_max")]
    pub digit_max: i64,
    /// Draw the fade mask over each digit strip
    #[serde(default = "default_true")]
    pub overlay: bool,
    /// Scroll into the first value instead of showing it directly
    #[serde(default)]
    pub animate_initial: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            decimal_places: 0,
            prefix: None,
            suffix: None,
            separator: default_separator(),
            cell_height: default_cell_height(),
            digit_min: 0,
            digit_max: default_digit_max(),
            overlay: default_true(),
            animate_initial: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Color theme name
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme(),
        }
    }
}

/// Largest number of labels one digit wheel may hold
pub const MAX_DIGIT_LABELS: u32 = u16::MAX as u32;

/// Largest accepted `ticker.max_step`
pub const MAX_TICKER_STEP: f64 = 1e9;

/// Random-walk value source for the TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Milliseconds between generated values
    #[serde(default = "default_ticker_interval")]
    pub interval_ms: u64,
    /// Largest absolute change per step
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    /// Fixed seed for a reproducible walk
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_ticker_interval(),
            max_step: default_max_step(),
            seed: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_scroll_duration() -> u64 {
    300
}

fn default_animation_fps() -> u32 {
    60
}

fn default_separator() -> String {
    ".".to_string()
}

fn default_cell_height() -> u16 {
    3
}

fn default_digit_max() -> i64 {
    9
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme() -> String {
    "gruvbox-dark".to_string()
}

fn default_ticker_interval() -> u64 {
    900
}

fn default_max_step() -> f64 {
    25.0
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/tumbler/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tumbler")
            .join("config.toml")
    }

    /// Reject values the counters cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let counter = &self.counter;
        if counter.cell_height == 0 {
            return Err(crate::Error::Config("counter.cell_height must be at least 1".into()));
        }
        if counter.decimal_places > 9 {
            return Err(crate::Error::Config(format!(
                "counter.decimal_places must be at most 9, got {}",
                counter.decimal_places
            )));
        }
        if counter.digit_min >= counter.digit_max {
            return Err(crate::Error::Config(format!(
                "counter.digit_min ({}) must be less than counter.digit_max ({})",
                counter.digit_min, counter.digit_max
            )));
        }
        if self.scroll.duration_ms > 60_000 {
            return Err(crate::Error::Config(format!(
                "scroll.duration_ms must be at most 60000, got {}",
                self.scroll.duration_ms
            )));
        }
        let labels = i128::from(counter.digit_max) - i128::from(counter.digit_min) + 1;
        if labels > i128::from(MAX_DIGIT_LABELS) {
            return Err(crate::Error::Config(format!(
                "counter digit range holds {} labels, at most {} are allowed",
                labels, MAX_DIGIT_LABELS
            )));
        }
        let max_step = self.ticker.max_step;
        if !max_step.is_finite() || max_step <= 0.0 || max_step > MAX_TICKER_STEP {
            return Err(crate::Error::Config(format!(
                "ticker.max_step must be in (0, {}], got {}",
                MAX_TICKER_STEP, max_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scroll.duration_ms, 300);
        assert_eq!(config.scroll.easing, EasingType::Linear);
        assert_eq!(config.scroll.animation_fps, 60);
        assert_eq!(config.counter.digit_min, 0);
        assert_eq!(config.counter.digit_max, 9);
        assert_eq!(config.counter.separator, ".");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [scroll]
            easing = "ease-in-out"

            [counter]
            decimal_places = 2
            prefix = "$"
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.easing, EasingType::EaseInOut);
        assert_eq!(config.scroll.duration_ms, 300);
        assert_eq!(config.counter.decimal_places, 2);
        assert_eq!(config.counter.prefix.as_deref(), Some("$"));
        assert_eq!(config.counter.cell_height, 3);
    }

    #[test]
    fn test_tick_duration_fallback() {
        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_duration(), Duration::from_millis(16));
        assert_eq!(ScrollConfig::default().duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_validate_rejects_bad_digit_range() {
        let mut config = AppConfig::default();
        config.counter.digit_min = 5;
        config.counter.digit_max = 5;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_huge_digit_range() {
        let mut config = AppConfig::default();
        config.counter.digit_min = -9_000_000_000_000_000_000;
        config.counter.digit_max = 9_000_000_000_000_000_000;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));

        config.counter.digit_min = 0;
        config.counter.digit_max = i64::from(MAX_DIGIT_LABELS) - 1;
        assert!(config.validate().is_ok());
        config.counter.digit_max += 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_ticker_step() {
        let config: AppConfig = toml::from_str("[ticker]\nmax_step = inf").unwrap();
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));

        let config: AppConfig = toml::from_str("[ticker]\nmax_step = 1e307").unwrap();
        assert!(config.validate().is_err());

        let config: AppConfig = toml::from_str("[ticker]\nmax_step = nan").unwrap();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ticker.max_step = MAX_TICKER_STEP;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cell_height() {
        let mut config = AppConfig::default();
        config.counter.cell_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = std::env::temp_dir().join(format!("tumbler-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.counter.suffix = Some(" pts".into());
        config.ticker.seed = Some(7);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.counter.suffix.as_deref(), Some(" pts"));
        assert_eq!(loaded.ticker.seed, Some(7));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tumbler-definitely-missing").join("config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.ui.theme, "gruvbox-dark");
    }
}
