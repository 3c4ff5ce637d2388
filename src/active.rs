//! Active nav link tracking.
//!
//! While the page scrolls, the nav link for the section currently being read
//! carries the `active` class. "Currently being read" means the section whose
//! vertical span contains a reference point a little below the top of the
//! viewport (`scrollY + lookahead`).
//!
//! Sections are assumed to be in document order and not to overlap, so the
//! last match is also the innermost one.
//!
//! Recomputing touches every section's geometry, so scroll events only
//! request an animation frame through a [`FrameGate`]; however many scroll
//! events arrive before that frame, the work runs once.

use crate::config::ActiveLinksConfig;
use crate::nav::NAV_LINK;
use crate::platform::{Dom, Handle, Scheduler};
use crate::timing::FrameGate;
use tracing::trace;

pub const SECTIONS: &str = "section[id]";
const ACTIVE_CLASS: &str = "active";

/// Vertical extent of one page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    /// Half-open containment: `[top, top + height)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// The section containing `reference`; the last match wins.
pub fn current_section(spans: &[SectionSpan], reference: f64) -> Option<&str> {
    spans
        .iter()
        .filter(|span| span.contains(reference))
        .last()
        .map(|span| span.id.as_str())
}

pub struct ActiveLinks {
    config: ActiveLinksConfig,
    frame: FrameGate,
}

impl ActiveLinks {
    pub fn new(config: ActiveLinksConfig) -> Self {
        Self {
            config,
            frame: FrameGate::default(),
        }
    }

    /// Coalesce a scroll event into the next animation frame.
    pub fn handle_scroll(&mut self, scheduler: &mut impl Scheduler) -> Option<Handle> {
        self.frame.request(scheduler)
    }

    /// Deliver a fired animation frame. Returns false when `handle` is not
    /// this tracker's frame.
    pub fn frame<D: Dom>(&mut self, dom: &mut D, handle: Handle) -> bool {
        if !self.frame.complete(handle) {
            return false;
        }
        self.refresh(dom);
        true
    }

    /// Recompute the current section and restyle the nav links.
    pub fn refresh<D: Dom>(&self, dom: &mut D) -> Option<String> {
        let spans: Vec<SectionSpan> = dom
            .query_all(SECTIONS)
            .iter()
            .map(|section| SectionSpan {
                id: dom.attribute(section, "id").unwrap_or_default(),
                top: dom.offset_top(section),
                height: dom.client_height(section),
            })
            .collect();

        let reference = dom.scroll_y() + self.config.lookahead;
        let current = current_section(&spans, reference).map(str::to_string);
        let target_href = current.as_ref().map(|id| format!("#{id}"));

        for link in dom.query_all(NAV_LINK) {
            dom.remove_class(&link, ACTIVE_CLASS);
            if target_href.is_some() && dom.attribute(&link, "href") == target_href {
                dom.add_class(&link, ACTIVE_CLASS);
            }
        }
        trace!(section = current.as_deref().unwrap_or(""), reference, "active section");
        current
    }
}
