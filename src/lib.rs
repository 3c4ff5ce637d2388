//! # folio-ui
//!
//! The interaction layer of a static portfolio page: mobile navigation,
//! smooth scrolling, scroll-reveal animations, active nav links, a simulated
//! contact form, and toast notifications. Compiled to WebAssembly and loaded
//! by a single `<script type="module">`.
//!
//! # Architecture: Events In, DOM Mutations Out
//!
//! Every feature is written against two small traits instead of the browser
//! directly:
//!
//! ```text
//!   browser listeners ──▶ Event ──▶ App::handle ──▶ Dom / Scheduler calls
//!          ▲                                              │
//!          └──────────── Event::Wake(handle) ◀────────────┘
//!                        (timers, animation frames)
//! ```
//!
//! - [`platform::Dom`] covers element lookup, classes, styles, geometry, and
//!   viewport operations.
//! - [`platform::Scheduler`] covers the clock, timers, and animation frames.
//!   Scheduled work never runs inside the platform; it comes back to the
//!   controller as an event.
//!
//! This keeps every timed transition deterministic under test. The test suite
//! drives the real controller against an in-memory document with a manual
//! clock, stepping through the contact form's 1.5s/3s cycle or a toast's
//! lifetime millisecond by millisecond without a browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | The controller: owns feature state and routes each event |
//! | [`dispatch`] | Serializes host events, queueing ones that arrive mid-dispatch |
//! | [`events`] | Events delivered by the host and the outcome it should apply |
//! | [`platform`] | `Dom` and `Scheduler` traits the features are written against |
//! | [`nav`] | Mobile menu open/close and navbar scroll styling |
//! | [`scroll`] | In-page anchor routing and offset smooth scrolling |
//! | [`reveal`] | Fade-in on scroll with grid stagger, plus the hero entrance |
//! | [`active`] | Highlights the nav link of the section being read |
//! | [`form`] | Contact form validation and the simulated send cycle |
//! | [`notify`] | Single toast notification with enter/dismiss/remove lifecycle |
//! | [`effects`] | Hero photo parallax and card hover lift |
//! | [`timing`] | Frame coalescing and trailing-edge debounce |
//! | [`config`] | `folio.toml` loading, merging, validation, and page JSON |
//! | [`snippet`] | Maud-rendered `<script>` tags that embed config and load the module |
//! | [`output`] | CLI output formatting |
//! | [`css`] | Number formatting for inline style values |
//! | `web` | Browser binding (wasm32 only) |
//!
//! # Design Decisions
//!
//! ## Delegated Events
//!
//! Clicks, submits, focus, and input are caught once on the document and
//! routed by `closest()`. A feature never holds a listener on an element it
//! might not own, and content injected later (toasts) works without extra
//! wiring. The only per-element listeners are hover, because `mouseenter`
//! does not bubble.
//!
//! ## Timers Are Owned
//!
//! Every component that schedules work keeps the handle: the resize
//! debounce, the active-link frame gate, and the contact form each claim
//! their own wake-ups. Everything else (hero fade-in, toast stages) is a
//! one-shot task in a table on the controller. A wake-up that no one claims
//! is stale and is dropped.
//!
//! ## Text Never Becomes Markup
//!
//! Toast messages and validation errors are written with `textContent`.
//! Anything a page passes to `showNotification` is displayed verbatim.
//!
//! ## Missing Markup Is Not an Error
//!
//! A page without a mobile menu, a contact form, or a hero simply doesn't get
//! those features. Lookups return `Option` and absent elements short-circuit
//! silently.

pub mod active;
pub mod app;
pub mod config;
pub mod css;
pub mod dispatch;
pub mod effects;
pub mod events;
pub mod form;
pub mod nav;
pub mod notify;
pub mod output;
pub mod platform;
pub mod reveal;
pub mod scroll;
pub mod snippet;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
