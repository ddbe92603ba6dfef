use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level, used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Tuning for the scroll synchronization engine.
///
/// All lengths are in host layout units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tab that is active before any scroll or press
    #[serde(default)]
    pub initial_active_index: usize,
    /// Expected tabs row height until the tabs bar is measured
    #[serde(default = "default_tab_height")]
    pub tab_height: f64,
    /// Scroll distance after which the nav overlay is fully solid
    #[serde(default = "default_nav_appear_threshold")]
    pub nav_appear_threshold: f64,
    /// Nav bar content height, used before the overlay is measured
    #[serde(default = "default_nav_bar_height")]
    pub nav_bar_height: f64,
    /// Top safe-area inset added to the nav fallback height
    #[serde(default)]
    pub safe_area_top: f64,
    /// How long visibility updates are ignored after a tab press
    #[serde(default = "default_suppression_ms")]
    pub suppression_ms: u64,
    /// Minimum visible fraction (0.0-1.0) for a row to count as visible
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Minimum interval between scroll notifications from the host
    #[serde(default = "default_scroll_event_throttle_ms")]
    pub scroll_event_throttle_ms: u64,
    /// Extra offset so a section header is not clipped under the tabs border
    #[serde(default = "default_view_offset_epsilon")]
    pub view_offset_epsilon: f64,
    /// View offset factor applied when pressing the first tab
    #[serde(default = "default_first_tab_offset_multiplier")]
    pub first_tab_offset_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_active_index: 0,
            tab_height: default_tab_height(),
            nav_appear_threshold: default_nav_appear_threshold(),
            nav_bar_height: default_nav_bar_height(),
            safe_area_top: 0.0,
            suppression_ms: default_suppression_ms(),
            visibility_threshold: default_visibility_threshold(),
            scroll_event_throttle_ms: default_scroll_event_throttle_ms(),
            view_offset_epsilon: default_view_offset_epsilon(),
            first_tab_offset_multiplier: default_first_tab_offset_multiplier(),
        }
    }
}

impl EngineConfig {
    /// Nav overlay height assumed before the first layout event
    pub fn fallback_nav_height(&self) -> f64 {
        (self.nav_bar_height + self.safe_area_top).max(0.0)
    }

    pub fn suppression_window(&self) -> Duration {
        Duration::from_millis(self.suppression_ms)
    }

    pub fn scroll_event_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_event_throttle_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Smooth scrolling for programmatic scrolls
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Terminal layout in engine units
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
            layout: LayoutConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Easing curve used by smooth scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate programmatic scrolls
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Terminal rows moved per line scroll
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Row heights of the terminal host, in engine units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Units covered by one terminal row
    #[serde(default = "default_units_per_row")]
    pub units_per_row: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_section_header_height")]
    pub section_header_height: f64,
    #[serde(default = "default_item_height")]
    pub item_height: f64,
    #[serde(default = "default_tab_height")]
    pub tabs_bar_height: f64,
    #[serde(default = "default_layout_nav_height")]
    pub nav_bar_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            units_per_row: default_units_per_row(),
            header_height: default_header_height(),
            section_header_height: default_section_header_height(),
            item_height: default_item_height(),
            tabs_bar_height: default_tab_height(),
            nav_bar_height: default_layout_nav_height(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a string (theme name) or a map with 'name' and optional 'colors'",
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub bg0: Option<String>,
    /// Tabs and nav background
    pub bg1: Option<String>,
    /// Inactive tab background
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Secondary foreground
    pub fg1: Option<String>,
    /// Active tab / accent
    pub accent: Option<String>,
    /// Header image placeholder
    pub hero: Option<String>,
    /// Price text
    pub price: Option<String>,
    pub error: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-Tab>" (Shift+Tab), "<CR>", "<Esc>", "<BS>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to top (first row)
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom (last row)
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Press the tab after the active one
    #[serde(default = "default_key_next_tab")]
    pub next_tab: String,
    /// Press the tab before the active one
    #[serde(default = "default_key_prev_tab")]
    pub prev_tab: String,
    /// Nav bar search button
    #[serde(default = "default_key_search")]
    pub search: String,
    /// Nav bar back button
    #[serde(default = "default_key_back")]
    pub back: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_tab: default_key_next_tab(),
            prev_tab: default_key_prev_tab(),
            search: default_key_search(),
            back: default_key_back(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_tab() -> String { "]".to_string() }
fn default_key_prev_tab() -> String { "[".to_string() }
fn default_key_search() -> String { "/".to_string() }
fn default_key_back() -> String { "<BS>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stickytabs")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tab_height() -> f64 {
    48.0
}

fn default_nav_appear_threshold() -> f64 {
    124.0
}

fn default_nav_bar_height() -> f64 {
    56.0
}

fn default_suppression_ms() -> u64 {
    500
}

fn default_visibility_threshold() -> f64 {
    0.4
}

fn default_scroll_event_throttle_ms() -> u64 {
    16 // ~60fps
}

fn default_view_offset_epsilon() -> f64 {
    1.0
}

fn default_first_tab_offset_multiplier() -> f64 {
    6.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    250
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_units_per_row() -> f64 {
    16.0
}

fn default_header_height() -> f64 {
    240.0
}

fn default_section_header_height() -> f64 {
    32.0
}

fn default_item_height() -> f64 {
    48.0
}

fn default_layout_nav_height() -> f64 {
    48.0
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/stickytabs/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("stickytabs")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns stdout
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("stickytabs.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_active_index, 0);
        assert_eq!(config.tab_height, 48.0);
        assert_eq!(config.nav_appear_threshold, 124.0);
        assert_eq!(config.fallback_nav_height(), 56.0);
        assert_eq!(config.suppression_window(), Duration::from_millis(500));
        assert_eq!(config.scroll_event_throttle(), Duration::from_millis(16));
        assert_eq!(config.first_tab_offset_multiplier, 6.0);
    }

    #[test]
    fn test_fallback_nav_height_includes_inset() {
        let config = EngineConfig {
            safe_area_top: 44.0,
            ..Default::default()
        };
        assert_eq!(config.fallback_nav_height(), 100.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [engine]
            nav_appear_threshold = 24.0

            [ui]
            theme = "nord"

            [ui.scroll]
            easing = "ease-out"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.nav_appear_threshold, 24.0);
        assert_eq!(config.engine.tab_height, 48.0);
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.scroll.easing, EasingType::EaseOut);
        assert_eq!(config.keymap.next_tab, "]");
    }

    #[test]
    fn test_theme_as_table() {
        let config: UiConfig = toml::from_str(
            r##"
            [theme]
            name = "dracula"
            colors = { accent = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(config.theme.name, "dracula");
        assert_eq!(config.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("stickytabs-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.engine.suppression_ms = 750;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.engine, config.engine);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_default() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/stickytabs.toml")).unwrap();
        assert_eq!(loaded.engine, EngineConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = std::env::temp_dir().join(format!("stickytabs-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[engine\nbroken").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        std::fs::remove_dir_all(&dir).ok();
    }
}
