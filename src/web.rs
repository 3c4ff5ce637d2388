//! Browser binding.
//!
//! Implements [`Dom`] and [`Scheduler`] on top of `web-sys` and `gloo`,
//! installs the page listeners, and owns the single [`App`] instance.
//!
//! ## Dispatch
//!
//! The controller lives in a thread-local [`Dispatcher`]. Every browser
//! callback goes through `dispatch`, so an event the browser delivers
//! synchronously from inside another one is queued behind it.
//!
//! ## Timers
//!
//! Each scheduled wake-up is a `gloo` [`Timeout`] or [`AnimationFrame`]
//! kept in a map under its [`Handle`]. Dropping one cancels it. A fired
//! callback's own handle is moved to a retired list instead of being dropped
//! while its closure is still on the stack. The list is cleared when the
//! next wake-up fires.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Reflect};
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ScrollToOptions, Window,
};

use crate::app::App;
use crate::config::{self, PAGE_CONFIG_ID};
use crate::dispatch::Dispatcher;
use crate::effects;
use crate::events::{Event, Outcome};
use crate::notify::NoticeKind;
use crate::platform::{Dom, Handle, IntersectionOptions, ScrollBehavior, Scheduler, Wake};

type IntersectionCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

thread_local! {
    static APP: Dispatcher<WebPlatform> = const { Dispatcher::new() };
    static LISTENERS: RefCell<Vec<EventListener>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Platform
// =============================================================================

/// Held only to keep the callback alive; dropping it cancels the wake-up.
#[allow(dead_code)]
enum Pending {
    Timeout(Timeout),
    Frame(AnimationFrame),
}

pub struct WebPlatform {
    window: Window,
    document: Document,
    observer: Option<(IntersectionObserver, IntersectionCallback)>,
    pending: HashMap<Handle, Pending>,
    retired: Vec<Pending>,
    next_handle: u32,
}

impl WebPlatform {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            observer: None,
            pending: HashMap::new(),
            retired: Vec::new(),
            next_handle: 1,
        }
    }

    fn observer(&mut self, options: &IntersectionOptions) -> Option<&IntersectionObserver> {
        if self.observer.is_none() {
            let callback: IntersectionCallback =
                Closure::new(|entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        if entry.is_intersecting() {
                            let target = entry.target();
                            observer.unobserve(&target);
                            dispatch(Event::Intersect { target });
                        }
                    }
                });
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin);
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => self.observer = Some((observer, callback)),
                Err(err) => {
                    warn!(?err, "IntersectionObserver unavailable; content stays hidden");
                    return None;
                }
            }
        }
        self.observer.as_ref().map(|(observer, _)| observer)
    }
}

fn log_js_error(result: Result<impl Sized, JsValue>, action: &str) {
    if let Err(err) = result {
        warn!(?err, action, "DOM call failed");
    }
}

impl Dom for WebPlatform {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(?err, selector, "bad selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_within(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn closest(&self, el: &Element, selector: &str) -> Option<Element> {
        el.closest(selector).ok().flatten()
    }

    fn parent(&self, el: &Element) -> Option<Element> {
        el.parent_element()
    }

    fn children(&self, el: &Element) -> Vec<Element> {
        let children = el.children();
        (0..children.length()).filter_map(|i| children.item(i)).collect()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node))
    }

    fn is_connected(&self, el: &Element) -> bool {
        el.is_connected()
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(JsCast::unchecked_into)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(JsCast::unchecked_into)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn add_class(&mut self, el: &Element, class: &str) {
        log_js_error(el.class_list().add_1(class), "add class");
    }

    fn remove_class(&mut self, el: &Element, class: &str) {
        log_js_error(el.class_list().remove_1(class), "remove class");
    }

    fn set_style(&mut self, el: &Element, property: &str, value: &str) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            log_js_error(el.style().set_property(property, value), "set style");
        }
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn value(&self, el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_disabled(&mut self, el: &Element, disabled: bool) {
        if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            log_js_error(el.set_attribute("disabled", ""), "disable");
        } else {
            log_js_error(el.remove_attribute("disabled"), "enable");
        }
    }

    fn reset_form(&mut self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn create_element(&mut self, tag: &str) -> Element {
        self.document
            .create_element(tag)
            .expect("tag names used by this crate are valid")
    }

    fn set_class_name(&mut self, el: &Element, class_name: &str) {
        el.set_class_name(class_name);
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        log_js_error(parent.append_child(child), "append child");
    }

    fn remove(&mut self, el: &Element) {
        el.remove();
    }

    fn offset_top(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn client_height(&self, el: &Element) -> f64 {
        f64::from(el.client_height())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe_intersection(&mut self, el: &Element, options: &IntersectionOptions) {
        if let Some(observer) = self.observer(options) {
            observer.observe(el);
        }
    }
}

impl Scheduler for WebPlatform {
    fn now(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    fn schedule(&mut self, wake: Wake) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let pending = match wake {
            Wake::After(ms) => {
                let millis = ms.max(0.0).round() as u32;
                Pending::Timeout(Timeout::new(millis, move || {
                    dispatch(Event::Wake(handle));
                }))
            }
            Wake::NextFrame => Pending::Frame(request_animation_frame(move |_| {
                dispatch(Event::Wake(handle));
            })),
        };
        self.pending.insert(handle, pending);
        handle
    }

    fn cancel(&mut self, handle: Handle) {
        // Dropping the gloo handle clears the timeout or frame request.
        self.pending.remove(&handle);
    }

    /// Park the firing callback until the next wake-up; earlier ones have
    /// returned by now.
    fn fired(&mut self, handle: Handle) {
        self.retired.clear();
        if let Some(pending) = self.pending.remove(&handle) {
            self.retired.push(pending);
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

fn dispatch(event: Event<Element>) -> Outcome {
    APP.with(|app| app.dispatch(event))
}

fn with_app<T>(f: impl FnOnce(&mut App<WebPlatform>) -> T) -> Option<T> {
    APP.with(|app| app.with_app(f))
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

// =============================================================================
// Startup
// =============================================================================

fn page_config(document: &Document) -> config::UiConfig {
    let embedded = document
        .get_element_by_id(PAGE_CONFIG_ID)
        .map(|script| script.text_content().unwrap_or_default());
    config::page_config(embedded.as_deref())
}

fn boot(window: Window, document: Document) {
    let config = page_config(&document);
    let platform = WebPlatform::new(window.clone(), document.clone());
    let app = App::start(platform, config);
    APP.with(|dispatcher| dispatcher.install(app));

    let mut listeners = Vec::new();
    let target: &web_sys::EventTarget = &document;
    let prevent = EventListenerOptions::enable_prevent_default;

    listeners.push(EventListener::new_with_options(target, "click", prevent(), |event| {
        let outcome = event_element(event).map(|target| dispatch(Event::Click { target }));
        if outcome.is_some_and(Outcome::prevents_default) {
            event.prevent_default();
        }
    }));
    listeners.push(EventListener::new_with_options(target, "submit", prevent(), |event| {
        let outcome = event_element(event).map(|form| dispatch(Event::Submit { form }));
        if outcome.is_some_and(Outcome::prevents_default) {
            event.prevent_default();
        }
    }));
    listeners.push(EventListener::new(target, "focusin", |event| {
        if let Some(target) = event_element(event) {
            dispatch(Event::Focus { target });
        }
    }));
    listeners.push(EventListener::new(target, "focusout", |event| {
        if let Some(target) = event_element(event) {
            dispatch(Event::Blur { target });
        }
    }));
    listeners.push(EventListener::new(target, "input", |event| {
        if let Some(target) = event_element(event) {
            dispatch(Event::Input { target });
        }
    }));
    listeners.push(EventListener::new(target, "keydown", |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(Event::KeyDown { key: event.key() });
        }
    }));

    listeners.push(EventListener::new(&window, "scroll", |_| {
        dispatch(Event::Scroll);
    }));
    listeners.push(EventListener::new(&window, "resize", |_| {
        dispatch(Event::Resize);
    }));
    if document.ready_state() == "complete" {
        dispatch(Event::Loaded);
    } else {
        listeners.push(EventListener::once(&window, "load", |_| {
            dispatch(Event::Loaded);
        }));
    }

    // mouseenter/mouseleave don't bubble, so hover is wired per element.
    let hoverable = with_app(|app| {
        app.platform()
            .query_all(&format!("{}, {}", effects::CARD, effects::SKILL_ITEM))
    })
    .unwrap_or_default();
    for el in &hoverable {
        listeners.push(EventListener::new(el, "mouseenter", |event| {
            if let Some(target) = event_element(event) {
                dispatch(Event::PointerEnter { target });
            }
        }));
        listeners.push(EventListener::new(el, "mouseleave", |event| {
            if let Some(target) = event_element(event) {
                dispatch(Event::PointerLeave { target });
            }
        }));
    }

    debug!(count = listeners.len(), "listeners installed");
    LISTENERS.with(|cell| cell.borrow_mut().extend(listeners));
    install_globals(&window);
}

/// Expose the two page-callable helpers on `window` for inline handlers.
fn install_globals(window: &Window) {
    let scroll = Closure::<dyn Fn(String) -> bool>::new(|id: String| scroll_to_section(&id));
    let notify = Closure::<dyn Fn(String, Option<String>)>::new(|message: String, kind: Option<String>| {
        show_notification(&message, kind);
    });
    for (name, function) in [
        ("scrollToSection", scroll.as_ref()),
        ("showNotification", notify.as_ref()),
    ] {
        log_js_error(Reflect::set(window, &JsValue::from_str(name), function), name);
    }
    // Leaked once at startup; the page keeps calling these for its lifetime.
    scroll.forget();
    notify.forget();
}

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();
    init_logging();

    let Some(window) = web_sys::window() else {
        error!("no window; not running in a browser page");
        return;
    };
    let Some(document) = window.document() else {
        error!("window has no document");
        return;
    };

    if document.ready_state() == "loading" {
        let ready = document.clone();
        let listener = EventListener::once(&ready, "DOMContentLoaded", move |_| {
            boot(window, document);
        });
        LISTENERS.with(|cell| cell.borrow_mut().push(listener));
    } else {
        boot(window, document);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "folio-ui loaded");
}

/// Smooth-scroll to the section with `id`. Returns false when it does not
/// exist or the controller has not started.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(id: &str) -> bool {
    with_app(|app| app.scroll_to_section(id)).unwrap_or(false)
}

/// Show a toast. `kind` is `success`, `error`, `warning` or `info`; anything
/// else means `info`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) {
    let kind = NoticeKind::parse(kind.as_deref().unwrap_or_default());
    with_app(|app| app.notify(message, kind));
}

// =============================================================================
// Logging
// =============================================================================

/// Line-buffered writer that forwards each formatted record to the console.
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_writer(Console)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .try_init();
    if result.is_err() {
        web_sys::console::warn_1(&JsValue::from_str("folio-ui: logger already installed"));
    }
}
