//! Navigation controller: mobile menu and navbar styling.
//!
//! The menu's open state is the `active` class on both `#nav-toggle` and
//! `#nav-menu`. The two are always flipped together, so reading either one
//! tells you whether the menu is open.
//!
//! | Trigger | Effect |
//! |---------|--------|
//! | click on the toggle | flip open/closed |
//! | click on a `.nav-link` | close |
//! | click outside toggle and menu | close |
//! | `Escape` | close |
//! | resize settles wider than the breakpoint | close |
//! | scroll past the offset | opaque navbar with shadow |
//!
//! A page without the toggle or the menu gets none of the menu behavior; a
//! page without `.nav` gets no background effect.

use crate::config::NavigationConfig;
use crate::events::Outcome;
use crate::platform::{Dom, Handle, Scheduler};
use crate::timing::Debounce;
use tracing::debug;

pub const TOGGLE_ID: &str = "nav-toggle";
pub const MENU_ID: &str = "nav-menu";
pub const NAV_LINK: &str = ".nav-link";
pub const NAVBAR: &str = ".nav";

const OPEN_CLASS: &str = "active";

pub struct Navigation {
    config: NavigationConfig,
    resize: Debounce,
}

impl Navigation {
    pub fn new(config: NavigationConfig) -> Self {
        let resize = Debounce::new(f64::from(config.resize_debounce_ms));
        Self { config, resize }
    }

    /// Route a delegated click.
    ///
    /// A click on the toggle (or anything inside it) flips the menu and is
    /// never treated as an outside click.
    pub fn handle_click<D: Dom>(&self, dom: &mut D, target: &D::Element) -> Outcome {
        let Some((toggle, menu)) = menu_pair(dom) else {
            return Outcome::Continue;
        };

        if dom.contains(&toggle, target) {
            let open = dom.toggle_class(&menu, OPEN_CLASS);
            if open {
                dom.add_class(&toggle, OPEN_CLASS);
            } else {
                dom.remove_class(&toggle, OPEN_CLASS);
            }
            debug!(open, "menu toggled");
            return Outcome::PreventDefault;
        }

        if dom.closest(target, NAV_LINK).is_some() || !dom.contains(&menu, target) {
            close(dom, &toggle, &menu);
        }
        Outcome::Continue
    }

    /// Close the menu on `Escape`. Returns whether it was open.
    pub fn handle_key<D: Dom>(&self, dom: &mut D, key: &str) -> bool {
        key == "Escape" && close_menu(dom)
    }

    /// Restyle the navbar for the current scroll position.
    pub fn handle_scroll<D: Dom>(&self, dom: &mut D) {
        let Some(navbar) = dom.query(NAVBAR) else {
            return;
        };
        if dom.scroll_y() > self.config.scrolled_offset {
            dom.set_style(&navbar, "background", &self.config.scrolled_background);
            dom.set_style(&navbar, "box-shadow", &self.config.scrolled_shadow);
        } else {
            dom.set_style(&navbar, "background", &self.config.resting_background);
            dom.set_style(&navbar, "box-shadow", "none");
        }
    }

    /// Restart the resize quiet period.
    pub fn handle_resize(&mut self, scheduler: &mut impl Scheduler) -> Handle {
        self.resize.trigger(scheduler)
    }

    /// Deliver a fired timer. Returns false when `handle` is not the resize
    /// debounce timer.
    pub fn resize_settled<D: Dom>(&mut self, dom: &mut D, handle: Handle) -> bool {
        if !self.resize.settle(handle) {
            return false;
        }
        if dom.inner_width() > self.config.collapse_width && close_menu(dom) {
            debug!(width = dom.inner_width(), "menu closed on widening viewport");
        }
        true
    }
}

fn menu_pair<D: Dom>(dom: &D) -> Option<(D::Element, D::Element)> {
    Some((dom.element_by_id(TOGGLE_ID)?, dom.element_by_id(MENU_ID)?))
}

fn close<D: Dom>(dom: &mut D, toggle: &D::Element, menu: &D::Element) -> bool {
    let was_open = dom.has_class(menu, OPEN_CLASS);
    dom.remove_class(menu, OPEN_CLASS);
    dom.remove_class(toggle, OPEN_CLASS);
    was_open
}

/// Whether the mobile menu is currently open.
pub fn is_menu_open<D: Dom>(dom: &D) -> bool {
    dom.element_by_id(MENU_ID)
        .is_some_and(|menu| dom.has_class(&menu, OPEN_CLASS))
}

/// Close the mobile menu. Returns whether it was open.
pub fn close_menu<D: Dom>(dom: &mut D) -> bool {
    match menu_pair(dom) {
        Some((toggle, menu)) => close(dom, &toggle, &menu),
        None => false,
    }
}
