//! Interaction configuration.
//!
//! Every timing, threshold, label, and color the page script uses lives here.
//! Stock defaults reproduce the stock portfolio behavior; a site overrides only
//! what it wants to change.
//!
//! ## Where Config Comes From
//!
//! - **Authoring**: a sparse `folio.toml` next to the site sources, checked
//!   and rendered by the `folio-ui` CLI.
//! - **In the page**: the CLI's `snippet` command serializes the merged config
//!   to JSON inside `<script type="application/json" id="folio-config">`.
//!   The browser binding reads that element at startup; when it is missing
//!   the stock defaults apply.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [navigation]
//! scrolled_offset = 50.0      # scrollY past which the navbar turns opaque
//! fallback_height = 80.0      # navbar height when .nav is missing
//! scroll_margin = 20.0        # extra gap above a scrolled-to section
//! collapse_width = 768.0      # viewport width that closes the mobile menu
//! resize_debounce_ms = 250
//!
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! skills_stagger = 0.1        # seconds per item in .skills-grid
//! projects_stagger = 0.15     # seconds per item in .projects-grid
//! hero_delay_ms = 300
//! hero_step_ms = 200
//!
//! [active_links]
//! lookahead = 200.0           # px below scrollY used to pick the section
//!
//! [contact]
//! send_delay_ms = 1500
//! restore_delay_ms = 3000
//!
//! [notifications]
//! lifetime_ms = 5000
//! exit_ms = 300
//!
//! [effects]
//! parallax_rate = 0.1
//! parallax_shrink = 0.05
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Id of the `<script type="application/json">` element carrying page config.
pub const PAGE_CONFIG_ID: &str = "folio-config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full interaction configuration.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Mobile menu, navbar styling, and anchor scrolling.
    pub navigation: NavigationConfig,
    /// Scroll-reveal and hero fade-in.
    pub reveal: RevealConfig,
    /// Active nav link tracking.
    pub active_links: ActiveLinksConfig,
    /// Contact form simulation.
    pub contact: ContactConfig,
    /// Toast notifications.
    pub notifications: NotificationsConfig,
    /// Parallax strength.
    pub effects: EffectsConfig,
}

impl UiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("navigation.scrolled_offset", self.navigation.scrolled_offset),
            ("navigation.fallback_height", self.navigation.fallback_height),
            ("navigation.scroll_margin", self.navigation.scroll_margin),
            ("navigation.collapse_width", self.navigation.collapse_width),
            ("reveal.skills_stagger", self.reveal.skills_stagger),
            ("reveal.projects_stagger", self.reveal.projects_stagger),
            ("active_links.lookahead", self.active_links.lookahead),
            ("effects.parallax_rate", self.effects.parallax_rate),
            ("effects.parallax_shrink", self.effects.parallax_shrink),
        ];
        for (key, value) in finite {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a non-negative number"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if self.reveal.selectors.is_empty() {
            return Err(ConfigError::Validation(
                "reveal.selectors must not be empty".into(),
            ));
        }
        if self.navigation.collapse_width == 0.0 {
            return Err(ConfigError::Validation(
                "navigation.collapse_width must be non-zero".into(),
            ));
        }
        if self.effects.parallax_shrink > 1.0 {
            return Err(ConfigError::Validation(
                "effects.parallax_shrink must be at most 1".into(),
            ));
        }
        if self.contact.sending_label.trim().is_empty() || self.contact.sent_label.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "contact labels must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config, as embedded in a page.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Compact JSON form for embedding in a page.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Navigation controller and smooth-scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Vertical scroll offset past which the navbar switches to its scrolled look.
    pub scrolled_offset: f64,
    /// Navbar height used when `.nav` is absent or reports zero height.
    pub fallback_height: f64,
    /// Extra space left above a section after scrolling to it.
    pub scroll_margin: f64,
    /// Viewport width above which the mobile menu is closed on resize.
    pub collapse_width: f64,
    /// Quiet period before a resize is acted on.
    pub resize_debounce_ms: u32,
    /// Navbar background while at the top of the page.
    pub resting_background: String,
    /// Navbar background once scrolled.
    pub scrolled_background: String,
    /// Navbar shadow once scrolled.
    pub scrolled_shadow: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_offset: 50.0,
            fallback_height: 80.0,
            scroll_margin: 20.0,
            collapse_width: 768.0,
            resize_debounce_ms: 250,
            resting_background: "rgba(255, 255, 255, 0.95)".to_string(),
            scrolled_background: "rgba(255, 255, 255, 0.98)".to_string(),
            scrolled_shadow: "0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string(),
        }
    }
}

/// Scroll-reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Elements that fade in as they scroll into view.
    pub selectors: Vec<String>,
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    /// Root margin for the intersection watcher.
    pub root_margin: String,
    /// Per-item transition delay (seconds) inside `.skills-grid`.
    pub skills_stagger: f64,
    /// Per-item transition delay (seconds) inside `.projects-grid`.
    pub projects_stagger: f64,
    /// Hero elements faded in on load, in order.
    pub hero_selectors: Vec<String>,
    /// Delay before the first hero element appears.
    pub hero_delay_ms: u32,
    /// Additional delay per subsequent hero element.
    pub hero_step_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: [
                ".card",
                ".timeline-item",
                ".highlight-item",
                ".activity-item",
                ".cert-item",
            ]
            .map(String::from)
            .to_vec(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            skills_stagger: 0.1,
            projects_stagger: 0.15,
            hero_selectors: [
                ".hero-title",
                ".hero-subtitle",
                ".hero-description",
                ".hero-stats",
                ".hero-actions",
                ".profile-photo",
            ]
            .map(String::from)
            .to_vec(),
            hero_delay_ms: 300,
            hero_step_ms: 200,
        }
    }
}

/// Active nav link tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActiveLinksConfig {
    /// Distance below the top of the viewport used as the reference point.
    pub lookahead: f64,
}

impl Default for ActiveLinksConfig {
    fn default() -> Self {
        Self { lookahead: 200.0 }
    }
}

/// Contact form simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Simulated send latency.
    pub send_delay_ms: u32,
    /// How long the "sent" state stays before the button is restored.
    pub restore_delay_ms: u32,
    pub sending_label: String,
    pub sent_label: String,
    pub sent_background: String,
    pub restored_background: String,
    /// Toast shown after the simulated send.
    pub success_message: String,
    /// Toast shown when validation fails.
    pub invalid_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: 1500,
            restore_delay_ms: 3000,
            sending_label: "Sending...".to_string(),
            sent_label: "Message Sent!".to_string(),
            sent_background: "linear-gradient(135deg, #10b981, #22c55e)".to_string(),
            restored_background:
                "linear-gradient(135deg, var(--primary-blue), var(--primary-green))".to_string(),
            success_message: "Thank you for your message! I'll get back to you soon.".to_string(),
            invalid_message: "Please fix the errors and try again.".to_string(),
        }
    }
}

/// Toast notification timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Time a toast stays on screen before it slides out.
    pub lifetime_ms: u32,
    /// Slide-out transition length; the node is removed afterwards.
    pub exit_ms: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: 5000,
            exit_ms: 300,
        }
    }
}

/// Cosmetic effect strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Fraction of the scroll offset applied as vertical translation.
    pub parallax_rate: f64,
    /// Scale reduction reached when the hero has fully scrolled away.
    pub parallax_shrink: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            parallax_rate: 0.1,
            parallax_shrink: 0.05,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(UiConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<UiConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: UiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<UiConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Config for a page, given the text of its embedded config element.
///
/// A page without the element gets the stock defaults. So does one whose
/// JSON does not parse or validate; that case is logged and never stops the
/// page from booting.
pub fn page_config(embedded: Option<&str>) -> UiConfig {
    let Some(json) = embedded else {
        return UiConfig::default();
    };
    match UiConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "ignoring invalid page config");
            UiConfig::default()
        }
    }
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio-ui Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Scroll offset (px) past which the navbar switches to its scrolled look.
scrolled_offset = 50.0

# Navbar height (px) assumed when the .nav element is missing.
fallback_height = 80.0

# Extra space (px) left above a section after scrolling to it.
scroll_margin = 20.0

# Viewport width (px) above which the mobile menu is closed on resize.
collapse_width = 768.0

# Quiet period (ms) before a resize is acted on.
resize_debounce_ms = 250

resting_background = "rgba(255, 255, 255, 0.95)"
scrolled_background = "rgba(255, 255, 255, 0.98)"
scrolled_shadow = "0 4px 6px -1px rgba(0, 0, 0, 0.1)"

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Elements that fade in as they scroll into view.
selectors = [".card", ".timeline-item", ".highlight-item", ".activity-item", ".cert-item"]

# Visible fraction (0-1) that counts as "in view".
threshold = 0.1

# Shrinks the viewport bottom so elements reveal slightly before fully entering.
root_margin = "0px 0px -50px 0px"

# Per-item transition delay in seconds inside .skills-grid / .projects-grid.
skills_stagger = 0.1
projects_stagger = 0.15

# Hero elements faded in on load, in order.
hero_selectors = [".hero-title", ".hero-subtitle", ".hero-description", ".hero-stats", ".hero-actions", ".profile-photo"]
hero_delay_ms = 300
hero_step_ms = 200

# ---------------------------------------------------------------------------
# Active nav links
# ---------------------------------------------------------------------------
[active_links]
# Distance (px) below the top of the viewport used to pick the current section.
lookahead = 200.0

# ---------------------------------------------------------------------------
# Contact form (simulated send, nothing leaves the browser)
# ---------------------------------------------------------------------------
[contact]
send_delay_ms = 1500
restore_delay_ms = 3000
sending_label = "Sending..."
sent_label = "Message Sent!"
sent_background = "linear-gradient(135deg, #10b981, #22c55e)"
restored_background = "linear-gradient(135deg, var(--primary-blue), var(--primary-green))"
success_message = "Thank you for your message! I'll get back to you soon."
invalid_message = "Please fix the errors and try again."

# ---------------------------------------------------------------------------
# Notifications
# ---------------------------------------------------------------------------
[notifications]
# Time (ms) a toast stays on screen, then the slide-out transition length.
lifetime_ms = 5000
exit_ms = 300

# ---------------------------------------------------------------------------
# Effects
# ---------------------------------------------------------------------------
[effects]
# Hero photo moves by scrollY * parallax_rate and shrinks by up to parallax_shrink.
parallax_rate = 0.1
parallax_shrink = 0.05
"##
}
