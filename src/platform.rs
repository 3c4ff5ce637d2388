//! Platform access: the document and the clock.
//!
//! Every feature in this crate is written against two small traits instead of
//! `document` and `window` directly:
//!
//! - [`Dom`]: element lookup, class/style/attribute mutation, geometry, and
//!   the handful of viewport operations the page needs (scroll position,
//!   width, `scrollTo`, intersection watching).
//! - [`Scheduler`]: a millisecond clock plus one-shot timers and animation
//!   frames. Scheduled work is never run by the platform itself; the platform
//!   hands back an [`Event::Wake`](crate::events::Event::Wake) carrying the
//!   [`Handle`] and the controller decides what it meant.
//!
//! The browser implementation lives in `web` (wasm32 only). The
//! test suite uses an in-memory document with a manual clock, so every timed
//! transition can be stepped deterministically.
//!
//! Mutating methods take `&mut self` even though the browser APIs don't need
//! it; the in-memory document does.

use std::fmt;

/// Opaque token identifying one scheduled timer or animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// When a scheduled wake-up should fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wake {
    /// After a delay in milliseconds (`setTimeout`).
    After(f64),
    /// Before the next repaint (`requestAnimationFrame`).
    NextFrame,
}

/// `behavior` member of `ScrollToOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Options for the viewport intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionOptions {
    /// Fraction of the target that must be visible (0.0 - 1.0).
    pub threshold: f64,
    /// CSS margin applied to the root bounds, e.g. `"0px 0px -50px 0px"`.
    pub root_margin: String,
}

/// Document access.
///
/// Selectors are plain CSS selector strings. Implementations backed by a real
/// browser pass them straight to `querySelector`; the in-memory document used
/// by tests understands compound selectors and comma lists, which is all this
/// crate uses.
pub trait Dom {
    /// Element handle. Cheap to clone, compared by identity.
    type Element: Clone + PartialEq + fmt::Debug;

    // -- lookup ---------------------------------------------------------------

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;
    /// The element itself or its nearest ancestor matching `selector`.
    fn closest(&self, el: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn parent(&self, el: &Self::Element) -> Option<Self::Element>;
    fn children(&self, el: &Self::Element) -> Vec<Self::Element>;
    /// Inclusive descendant check, like `Node.contains`.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;
    /// Whether the element is still attached to the document.
    fn is_connected(&self, el: &Self::Element) -> bool;
    fn head(&self) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    // -- attributes, classes, styles -----------------------------------------

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    fn add_class(&mut self, el: &Self::Element, class: &str);
    fn remove_class(&mut self, el: &Self::Element, class: &str);
    fn set_style(&mut self, el: &Self::Element, property: &str, value: &str);

    /// Flip a class and return whether it is now present.
    fn toggle_class(&mut self, el: &Self::Element, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class);
            true
        }
    }

    // -- content and form state ----------------------------------------------

    fn text(&self, el: &Self::Element) -> String;
    fn set_text(&mut self, el: &Self::Element, text: &str);
    /// Current value of an input or textarea. Empty for anything else.
    fn value(&self, el: &Self::Element) -> String;
    fn set_disabled(&mut self, el: &Self::Element, disabled: bool);
    /// `HTMLFormElement.reset()`.
    fn reset_form(&mut self, form: &Self::Element);

    // -- tree mutation --------------------------------------------------------

    fn create_element(&mut self, tag: &str) -> Self::Element;
    fn set_class_name(&mut self, el: &Self::Element, class_name: &str);
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);
    fn remove(&mut self, el: &Self::Element);

    // -- geometry and viewport ------------------------------------------------

    fn offset_top(&self, el: &Self::Element) -> f64;
    fn offset_height(&self, el: &Self::Element) -> f64;
    fn client_height(&self, el: &Self::Element) -> f64;
    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Start watching `el`; the platform reports each entry that becomes
    /// visible as [`Event::Intersect`](crate::events::Event::Intersect).
    fn observe_intersection(&mut self, el: &Self::Element, options: &IntersectionOptions);
}

/// Clock and deferred work.
pub trait Scheduler {
    /// Milliseconds on a monotonic clock (`performance.now()`).
    fn now(&self) -> f64;
    fn schedule(&mut self, wake: Wake) -> Handle;
    /// Cancel a pending wake-up. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: Handle);
    /// A wake-up is about to be delivered. Hosts that keep the callback
    /// alive in a table release it here.
    fn fired(&mut self, _handle: Handle) {}
}

/// Everything the controller needs from its host.
pub trait Platform: Dom + Scheduler {}

impl<T: Dom + Scheduler> Platform for T {}
