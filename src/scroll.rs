//! Smooth scrolling to in-page anchors.
//!
//! The navbar is fixed, so scrolling a section's top edge to the top of the
//! viewport would hide its heading underneath. The target position leaves
//! room for the navbar plus a small margin:
//!
//! ```text
//! top = max(0, section.offsetTop - navbarHeight - margin)
//! ```

use crate::config::NavigationConfig;
use crate::events::Outcome;
use crate::nav::NAVBAR;
use crate::platform::{Dom, ScrollBehavior};
use tracing::debug;

/// Anchors handled by the router.
pub const IN_PAGE_ANCHOR: &str = r##"a[href^="#"]"##;

/// Scroll position that puts a section just below the fixed navbar.
pub fn scroll_offset(section_top: f64, navbar_height: f64, margin: f64) -> f64 {
    (section_top - navbar_height - margin).max(0.0)
}

/// Rendered navbar height, or `fallback` when there is no navbar or it has
/// no height yet.
pub fn navbar_height<D: Dom>(dom: &D, fallback: f64) -> f64 {
    dom.query(NAVBAR)
        .map(|navbar| dom.offset_height(&navbar))
        .filter(|height| *height > 0.0)
        .unwrap_or(fallback)
}

/// Smooth-scroll to the element with `id`. Returns false (and does nothing)
/// when no such element exists.
pub fn scroll_to_section<D: Dom>(dom: &mut D, id: &str, config: &NavigationConfig) -> bool {
    if id.is_empty() {
        return false;
    }
    let Some(section) = dom.element_by_id(id) else {
        debug!(id, "scroll target not found");
        return false;
    };
    let height = navbar_height(dom, config.fallback_height);
    let top = scroll_offset(dom.offset_top(&section), height, config.scroll_margin);
    dom.scroll_to(top, ScrollBehavior::Smooth);
    true
}

/// Route a delegated click on an in-page anchor.
///
/// Any `a[href^="#"]` click suppresses the default jump, whether or not the
/// fragment resolves.
pub fn handle_click<D: Dom>(dom: &mut D, target: &D::Element, config: &NavigationConfig) -> Outcome {
    let Some(anchor) = dom.closest(target, IN_PAGE_ANCHOR) else {
        return Outcome::Continue;
    };
    let href = dom.attribute(&anchor, "href").unwrap_or_default();
    scroll_to_section(dom, href.trim_start_matches('#'), config);
    Outcome::PreventDefault
}
