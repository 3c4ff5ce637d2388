//! Toast notifications.
//!
//! One toast at a time: showing a new one removes whatever is on screen. A
//! toast slides in from the right on the next frame, slides back out after
//! `lifetime_ms`, and is detached `exit_ms` later. The close button removes
//! it immediately; timers that fire for a toast that is already gone do
//! nothing.
//!
//! The message is always set as text, never parsed as markup.

use tracing::debug;

use crate::config::NotificationsConfig;
use crate::platform::{Dom, Handle, Platform, Wake};

pub const NOTIFICATION: &str = "notification";
pub const STYLES_CLASS: &str = "notification-styles";
const CLOSE: &str = "notification-close";

/// Stylesheet injected into `<head>` the first time a toast is shown. Also
/// carries the `.form-control.error` field highlight.
pub const NOTICE_STYLES: &str = r#"
.notification-content {
    display: flex;
    align-items: center;
    gap: 0.75rem;
}
.notification-icon {
    font-size: 1.25rem;
    flex-shrink: 0;
}
.notification-message {
    flex: 1;
    font-weight: 500;
    line-height: 1.4;
}
.notification-close {
    background: none;
    border: none;
    font-size: 1.5rem;
    cursor: pointer;
    opacity: 0.7;
    transition: opacity 0.2s;
    color: inherit;
    padding: 0;
    width: 24px;
    height: 24px;
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 50%;
}
.notification-close:hover {
    opacity: 1;
    background: rgba(0, 0, 0, 0.1);
}
.form-control.error {
    border-color: #ef4444;
    box-shadow: 0 0 0 3px rgba(239, 68, 68, 0.1);
}
"#;

const OFFSCREEN: &str = "translateX(500px)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

/// Icon and colors for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub icon: &'static str,
    pub background: &'static str,
    pub color: &'static str,
    pub border: &'static str,
}

impl NoticeKind {
    /// Exact, case-sensitive names; anything else is `Info`.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "success" => NoticeKind::Success,
            "error" => NoticeKind::Error,
            "warning" => NoticeKind::Warning,
            _ => NoticeKind::Info,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            NoticeKind::Success => Palette {
                icon: "✅",
                background: "#f0fdf4",
                color: "#166534",
                border: "#bbf7d0",
            },
            NoticeKind::Error => Palette {
                icon: "❌",
                background: "#fef2f2",
                color: "#dc2626",
                border: "#fecaca",
            },
            NoticeKind::Warning => Palette {
                icon: "⚠️",
                background: "#fffbeb",
                color: "#d97706",
                border: "#fed7aa",
            },
            NoticeKind::Info => Palette {
                icon: "ℹ️",
                background: "#eff6ff",
                color: "#1d4ed8",
                border: "#dbeafe",
            },
        }
    }
}

/// A toast that was just put on screen, with its two follow-up timers.
#[derive(Debug, Clone, PartialEq)]
pub struct Shown<E> {
    pub node: E,
    pub enter: Handle,
    pub dismiss: Handle,
}

pub struct Notifier {
    config: NotificationsConfig,
}

impl Notifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self { config }
    }

    /// Replace any toast on screen with a new one. Returns `None` when the
    /// document has no body to attach to.
    pub fn show<P: Platform>(&self, platform: &mut P, message: &str, kind: NoticeKind) -> Option<Shown<P::Element>> {
        let body = platform.body()?;
        for old in platform.query_all(&format!(".{NOTIFICATION}")) {
            platform.remove(&old);
        }
        ensure_styles(platform);

        let node = build(platform, message, kind);
        platform.append_child(&body, &node);

        let enter = platform.schedule(Wake::NextFrame);
        let dismiss = platform.schedule(Wake::After(f64::from(self.config.lifetime_ms)));
        debug!(kind = kind.name(), "notification shown");
        Some(Shown { node, enter, dismiss })
    }

    /// Start the slide-out. Returns the removal timer, or `None` when the
    /// toast is already gone.
    pub fn dismiss<P: Platform>(&self, platform: &mut P, node: &P::Element) -> Option<Handle> {
        if !platform.is_connected(node) {
            return None;
        }
        platform.set_style(node, "transform", OFFSCREEN);
        platform.set_style(node, "opacity", "0");
        Some(platform.schedule(Wake::After(f64::from(self.config.exit_ms))))
    }
}

/// Slide a freshly appended toast into view.
pub fn enter<D: Dom>(dom: &mut D, node: &D::Element) {
    if dom.is_connected(node) {
        dom.set_style(node, "transform", "translateX(0)");
    }
}

/// Detach a toast if it is still attached.
pub fn remove<D: Dom>(dom: &mut D, node: &D::Element) {
    if dom.is_connected(node) {
        dom.remove(node);
    }
}

/// Route a delegated click. Returns true when it hit a close button.
pub fn handle_click<D: Dom>(dom: &mut D, target: &D::Element) -> bool {
    if dom.closest(target, &format!(".{CLOSE}")).is_none() {
        return false;
    }
    if let Some(toast) = dom.closest(target, &format!(".{NOTIFICATION}")) {
        dom.remove(&toast);
        debug!("notification closed");
    }
    true
}

fn ensure_styles<D: Dom>(dom: &mut D) {
    if dom.query(&format!(".{STYLES_CLASS}")).is_some() {
        return;
    }
    let Some(head) = dom.head() else {
        return;
    };
    let style = dom.create_element("style");
    dom.set_class_name(&style, STYLES_CLASS);
    dom.set_text(&style, NOTICE_STYLES);
    dom.append_child(&head, &style);
}

fn build<D: Dom>(dom: &mut D, message: &str, kind: NoticeKind) -> D::Element {
    let palette = kind.palette();

    let node = dom.create_element("div");
    dom.set_class_name(&node, &format!("{NOTIFICATION} {NOTIFICATION}--{}", kind.name()));

    let content = dom.create_element("div");
    dom.set_class_name(&content, "notification-content");
    let icon = dom.create_element("span");
    dom.set_class_name(&icon, "notification-icon");
    dom.set_text(&icon, palette.icon);
    let text = dom.create_element("span");
    dom.set_class_name(&text, "notification-message");
    dom.set_text(&text, message);
    let close = dom.create_element("button");
    dom.set_class_name(&close, CLOSE);
    dom.set_text(&close, "×");

    dom.append_child(&content, &icon);
    dom.append_child(&content, &text);
    dom.append_child(&content, &close);
    dom.append_child(&node, &content);

    let border = format!("1px solid {}", palette.border);
    let styles = [
        ("position", "fixed"),
        ("top", "100px"),
        ("right", "20px"),
        ("max-width", "400px"),
        ("background", palette.background),
        ("color", palette.color),
        ("border", border.as_str()),
        ("border-radius", "0.75rem"),
        ("padding", "1rem"),
        (
            "box-shadow",
            "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
        ),
        ("z-index", "10000"),
        ("transform", OFFSCREEN),
        ("transition", "transform 0.3s ease-out, opacity 0.3s ease-out"),
    ];
    for (property, value) in styles {
        dom.set_style(&node, property, value);
    }
    node
}
