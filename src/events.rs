//! Events delivered from the host page to the controller.

use crate::platform::Handle;

/// A single input to [`App::handle`](crate::app::App::handle).
///
/// Click, submit, focus, and input events are delegated: the host installs
/// one listener on the document and forwards the original event target. The
/// controller works out which feature the target belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<E> {
    /// Window `load`: every subresource has finished loading.
    Loaded,
    Click { target: E },
    Submit { form: E },
    Focus { target: E },
    Blur { target: E },
    Input { target: E },
    PointerEnter { target: E },
    PointerLeave { target: E },
    KeyDown { key: String },
    Scroll,
    Resize,
    /// An observed element entered the viewport.
    Intersect { target: E },
    /// A timer or animation frame requested through the scheduler fired.
    Wake(Handle),
}

/// What the host should do with the original browser event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Continue,
    /// Call `preventDefault()`.
    PreventDefault,
}

impl Outcome {
    pub fn prevents_default(self) -> bool {
        self == Outcome::PreventDefault
    }

    /// Combine two outcomes; prevention wins.
    pub fn or(self, other: Outcome) -> Outcome {
        if self.prevents_default() || other.prevents_default() {
            Outcome::PreventDefault
        } else {
            Outcome::Continue
        }
    }
}
