//! CLI output formatting.
//!
//! # Settings-First Display
//!
//! `check` prints what the page will actually do, grouped by feature, rather
//! than echoing the TOML back. Each group is a header line followed by
//! indented detail lines:
//!
//! ```text
//! Config: folio.toml
//!
//! Navigation
//!     Opaque navbar past 50px
//!     Menu closes above 768px (250ms debounce)
//!     Scroll margin 20px (fallback navbar 80px)
//! Reveal
//!     5 selectors, threshold 0.1, root margin 0px 0px -50px 0px
//!     Stagger: skills 0.1s, projects 0.15s
//!     Hero: 6 selectors from 300ms every 200ms
//! Active links
//!     Lookahead 200px
//! Contact form
//!     Send 1500ms, restore 3000ms
//! Notifications
//!     Visible 5000ms, exit 300ms
//! Effects
//!     Parallax 0.1, shrink 0.05
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::UiConfig;
use crate::css;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn detail(text: String) -> String {
    format!("{}{}", indent(1), text)
}

/// Where the checked config came from.
fn source_line(path: &Path, found: bool) -> String {
    if found {
        format!("Config: {}", path.display())
    } else {
        format!("Config: stock defaults ({} not found)", path.display())
    }
}

/// Format the resolved config as feature groups.
pub fn format_config_summary(config: &UiConfig) -> Vec<String> {
    let nav = &config.navigation;
    let reveal = &config.reveal;
    let contact = &config.contact;
    let notifications = &config.notifications;
    let effects = &config.effects;

    vec![
        "Navigation".to_string(),
        detail(format!("Opaque navbar past {}", css::px(nav.scrolled_offset))),
        detail(format!(
            "Menu closes above {} ({}ms debounce)",
            css::px(nav.collapse_width),
            nav.resize_debounce_ms
        )),
        detail(format!(
            "Scroll margin {} (fallback navbar {})",
            css::px(nav.scroll_margin),
            css::px(nav.fallback_height)
        )),
        "Reveal".to_string(),
        detail(format!(
            "{} selectors, threshold {}, root margin {}",
            reveal.selectors.len(),
            css::number(reveal.threshold),
            reveal.root_margin
        )),
        detail(format!(
            "Stagger: skills {}, projects {}",
            css::seconds(reveal.skills_stagger),
            css::seconds(reveal.projects_stagger)
        )),
        detail(format!(
            "Hero: {} selectors from {}ms every {}ms",
            reveal.hero_selectors.len(),
            reveal.hero_delay_ms,
            reveal.hero_step_ms
        )),
        "Active links".to_string(),
        detail(format!("Lookahead {}", css::px(config.active_links.lookahead))),
        "Contact form".to_string(),
        detail(format!(
            "Send {}ms, restore {}ms",
            contact.send_delay_ms, contact.restore_delay_ms
        )),
        "Notifications".to_string(),
        detail(format!(
            "Visible {}ms, exit {}ms",
            notifications.lifetime_ms, notifications.exit_ms
        )),
        "Effects".to_string(),
        detail(format!(
            "Parallax {}, shrink {}",
            css::number(effects.parallax_rate),
            css::number(effects.parallax_shrink)
        )),
    ]
}

/// Format the full `check` report: source line, blank, summary.
pub fn format_check_output(path: &Path, found: bool, config: &UiConfig) -> Vec<String> {
    let mut lines = vec![source_line(path, found), String::new()];
    lines.extend(format_config_summary(config));
    lines
}

/// Print the `check` report to stdout.
pub fn print_check_output(path: &Path, found: bool, config: &UiConfig) {
    for line in format_check_output(path, found, config) {
        println!("{}", line);
    }
}
