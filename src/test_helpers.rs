//! Shared test utilities for the folio-ui test suite.
//!
//! Provides [`FakeDom`], an in-memory document plus manual clock implementing
//! both platform traits, a portfolio page fixture shaped like the markup the
//! controller expects, and a driver that advances the clock while delivering
//! due wake-ups to an [`App`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (dom, page) = portfolio_page();
//! let mut app = App::start(dom, UiConfig::default());
//!
//! app.handle(Event::Click { target: page.toggle });
//! assert!(app.platform().has_class(&page.menu, "active"));
//!
//! advance(&mut app, 1500.0);
//! ```

use std::collections::BTreeMap;

use crate::app::App;
use crate::events::Event;
use crate::platform::{Dom, Handle, IntersectionOptions, ScrollBehavior, Scheduler, Wake};

/// Time the fake scheduler assumes between animation frames.
pub const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    offset_top: f64,
    offset_height: f64,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: Handle,
    due: f64,
}

// =========================================================================
// In-memory document
// =========================================================================

/// Arena-backed document with a manual clock.
///
/// Node 0 is the document itself; `<html>`, `<head>` and `<body>` are created
/// by [`FakeDom::new`].
#[derive(Debug)]
pub struct FakeDom {
    nodes: Vec<Node>,
    head: NodeId,
    body: NodeId,
    scroll_y: f64,
    inner_width: f64,
    scroll_calls: Vec<(f64, ScrollBehavior)>,
    observed: Vec<(NodeId, IntersectionOptions)>,
    now: f64,
    next_handle: u32,
    timers: Vec<Timer>,
    fired: Vec<Handle>,
    on_remove: Option<fn(NodeId)>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node {
                tag: "#document".into(),
                ..Node::default()
            }],
            head: NodeId(0),
            body: NodeId(0),
            scroll_y: 0.0,
            inner_width: 1280.0,
            scroll_calls: Vec::new(),
            observed: Vec::new(),
            now: 0.0,
            next_handle: 1,
            timers: Vec::new(),
            fired: Vec::new(),
            on_remove: None,
        };
        let html = dom.element(NodeId(0), "html", &[]);
        dom.head = dom.element(html, "head", &[]);
        dom.body = dom.element(html, "body", &[]);
        dom
    }

    fn detach(&mut self, el: NodeId) {
        if let Some(parent) = self.nodes[el.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != el);
        }
    }

    /// Run `hook` after every `Dom::remove`, the way a browser fires
    /// `focusout` synchronously when a focused node leaves the document.
    pub fn on_remove(&mut self, hook: fn(NodeId)) {
        self.on_remove = Some(hook);
    }

    /// Wake-ups reported through `Scheduler::fired`, in order.
    pub fn fired_wakes(&self) -> &[Handle] {
        &self.fired
    }

    // -- building -------------------------------------------------------------

    /// Append a new element under `parent`. A `class` attribute is split into
    /// the class list.
    pub fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            if *name == "class" {
                self.set_class_name(&id, value);
            } else {
                self.nodes[id.0].attrs.insert(name.to_string(), value.to_string());
            }
        }
        self.append_child(&parent, &id);
        id
    }

    /// Set `offsetTop` and `offsetHeight`/`clientHeight` of an element.
    pub fn set_geometry(&mut self, el: NodeId, top: f64, height: f64) {
        self.nodes[el.0].offset_top = top;
        self.nodes[el.0].offset_height = height;
    }

    /// Simulate the user typing into a field.
    pub fn type_into(&mut self, el: NodeId, value: &str) {
        self.nodes[el.0].value = value.to_string();
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_inner_width(&mut self, width: f64) {
        self.inner_width = width;
    }

    // -- inspection -----------------------------------------------------------

    pub fn style(&self, el: NodeId, property: &str) -> Option<&str> {
        self.nodes[el.0].styles.get(property).map(String::as_str)
    }

    pub fn is_disabled(&self, el: NodeId) -> bool {
        self.nodes[el.0].disabled
    }

    pub fn scroll_calls(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_calls
    }

    pub fn observed(&self) -> Vec<NodeId> {
        self.observed.iter().map(|(id, _)| *id).collect()
    }

    pub fn observed_options(&self) -> Option<&IntersectionOptions> {
        self.observed.first().map(|(_, options)| options)
    }

    pub fn count(&self, selector: &str) -> usize {
        self.query_all(selector).len()
    }

    pub fn now_ms(&self) -> f64 {
        self.now
    }

    pub fn pending_wakes(&self) -> usize {
        self.timers.len()
    }

    // -- clock ----------------------------------------------------------------

    /// Advance the clock by `ms` and return every wake-up that came due, in
    /// firing order.
    pub fn take_due(&mut self, ms: f64) -> Vec<Handle> {
        let until = self.now + ms;
        let mut fired = Vec::new();
        while let Some(handle) = self.pop_due(until) {
            fired.push(handle);
        }
        self.now = until;
        fired
    }

    /// Remove the earliest wake-up due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: f64) -> Option<Handle> {
        let (index, timer) = self
            .timers
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.handle.cmp(&b.handle)))?;
        self.timers.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.handle)
    }

    // -- tree walking ---------------------------------------------------------

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, el: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .any(|compound| Compound::parse(compound).matches(&self.nodes[el.0]))
    }
}

// =========================================================================
// Minimal selector matching: compound selectors and comma lists
// =========================================================================

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl Compound {
    fn parse(selector: &str) -> Self {
        let mut compound = Compound::default();
        let mut rest = selector;
        let ident_end = |s: &str| {
            s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(s.len())
        };

        let end = ident_end(rest);
        if end > 0 {
            compound.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
        }
        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let end = ident_end(&rest[1..]) + 1;
                    let name = rest[1..end].to_string();
                    if first == '#' {
                        compound.id = Some(name);
                    } else {
                        compound.classes.push(name);
                    }
                    rest = &rest[end..];
                }
                '[' => {
                    let close = rest.find(']').expect("unterminated attribute selector");
                    compound.attrs.push(AttrMatch::parse(&rest[1..close]));
                    rest = &rest[close + 1..];
                }
                other => panic!("unsupported selector syntax {other:?} in {selector:?}"),
            }
        }
        compound
    }

    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|tag| &node.tag != tag) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| node.attrs.get("id") != Some(id)) {
            return false;
        }
        self.classes.iter().all(|c| node.classes.contains(c))
            && self.attrs.iter().all(|a| a.matches(node))
    }
}

impl AttrMatch {
    fn parse(inner: &str) -> Self {
        let unquote = |v: &str| v.trim().trim_matches('"').trim_matches('\'').to_string();
        if let Some((name, value)) = inner.split_once("^=") {
            AttrMatch::Prefix(name.trim().to_string(), unquote(value))
        } else if let Some((name, value)) = inner.split_once('=') {
            AttrMatch::Equals(name.trim().to_string(), unquote(value))
        } else {
            AttrMatch::Exists(inner.trim().to_string())
        }
    }

    fn matches(&self, node: &Node) -> bool {
        let get = |name: &str| {
            if name == "class" && !node.classes.is_empty() {
                Some(node.classes.join(" "))
            } else {
                node.attrs.get(name).cloned()
            }
        };
        match self {
            AttrMatch::Exists(name) => get(name).is_some(),
            AttrMatch::Equals(name, value) => get(name).as_deref() == Some(value.as_str()),
            AttrMatch::Prefix(name, value) => get(name).is_some_and(|v| v.starts_with(value)),
        }
    }
}

// =========================================================================
// Platform implementation
// =========================================================================

impl Dom for FakeDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(NodeId(0))
            .into_iter()
            .find(|n| self.nodes[n.0].attrs.get("id").map(String::as_str) == Some(id))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.descendants(NodeId(0))
            .into_iter()
            .filter(|n| self.matches(*n, selector))
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.descendants(*root)
            .into_iter()
            .find(|n| self.matches(*n, selector))
    }

    fn closest(&self, el: &NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(*el);
        while let Some(id) = current {
            if id.0 != 0 && self.matches(id, selector) {
                return Some(id);
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.nodes[el.0].parent.filter(|p| p.0 != 0)
    }

    fn children(&self, el: &NodeId) -> Vec<NodeId> {
        self.nodes[el.0].children.clone()
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn is_connected(&self, el: &NodeId) -> bool {
        self.contains(&NodeId(0), el)
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.nodes[el.0].attrs.get(name).cloned()
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.nodes[el.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, el: &NodeId, class: &str) {
        if !self.has_class(el, class) {
            self.nodes[el.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, el: &NodeId, class: &str) {
        self.nodes[el.0].classes.retain(|c| c != class);
    }

    fn set_style(&mut self, el: &NodeId, property: &str, value: &str) {
        self.nodes[el.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, el: &NodeId) -> String {
        self.nodes[el.0].text.clone()
    }

    fn set_text(&mut self, el: &NodeId, text: &str) {
        self.nodes[el.0].text = text.to_string();
    }

    fn value(&self, el: &NodeId) -> String {
        self.nodes[el.0].value.clone()
    }

    fn set_disabled(&mut self, el: &NodeId, disabled: bool) {
        self.nodes[el.0].disabled = disabled;
    }

    fn reset_form(&mut self, form: &NodeId) {
        for id in self.descendants(*form) {
            let node = &mut self.nodes[id.0];
            if node.tag == "input" || node.tag == "textarea" {
                node.value.clear();
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn set_class_name(&mut self, el: &NodeId, class_name: &str) {
        self.nodes[el.0].classes = class_name.split_whitespace().map(String::from).collect();
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
    }

    fn remove(&mut self, el: &NodeId) {
        self.detach(*el);
        if let Some(hook) = self.on_remove {
            hook(*el);
        }
    }

    fn offset_top(&self, el: &NodeId) -> f64 {
        self.nodes[el.0].offset_top
    }

    fn offset_height(&self, el: &NodeId) -> f64 {
        self.nodes[el.0].offset_height
    }

    fn client_height(&self, el: &NodeId) -> f64 {
        self.nodes[el.0].offset_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.inner_width
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_calls.push((top, behavior));
    }

    fn observe_intersection(&mut self, el: &NodeId, options: &IntersectionOptions) {
        self.observed.push((*el, options.clone()));
    }
}

impl Scheduler for FakeDom {
    fn now(&self) -> f64 {
        self.now
    }

    fn schedule(&mut self, wake: Wake) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        let due = match wake {
            Wake::After(ms) => self.now + ms,
            Wake::NextFrame => self.now + FRAME_MS,
        };
        self.timers.push(Timer { handle, due });
        handle
    }

    fn cancel(&mut self, handle: Handle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn fired(&mut self, handle: Handle) {
        self.fired.push(handle);
    }
}

// =========================================================================
// Portfolio page fixture
// =========================================================================

/// Handles to the interesting elements of [`portfolio_page`].
#[derive(Debug, Clone)]
pub struct Page {
    pub nav: NodeId,
    pub toggle: NodeId,
    pub toggle_bar: NodeId,
    pub menu: NodeId,
    /// Nav links in order: home, about, skills, projects, contact.
    pub links: Vec<NodeId>,
    /// Sections in order: home, about, skills, projects, contact.
    pub sections: Vec<NodeId>,
    pub hero_title: NodeId,
    pub hero_subtitle: NodeId,
    pub photo: NodeId,
    /// In-page anchor that is not a nav link (`a.btn[href="#contact"]`).
    pub cta: NodeId,
    pub about_card: NodeId,
    pub skills_grid: NodeId,
    pub skill_items: Vec<NodeId>,
    pub projects_grid: NodeId,
    pub project_cards: Vec<NodeId>,
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub message: NodeId,
    pub submit: NodeId,
    /// Plain paragraph outside the navigation.
    pub outside: NodeId,
}

/// Build the stock portfolio page.
///
/// Section geometry: home 0-499, about 500-999, skills 1000-1499,
/// projects 1500-1999, contact 2000-2599. The navbar is 70px tall.
pub fn portfolio_page() -> (FakeDom, Page) {
    let mut dom = FakeDom::new();
    let body = dom.body;

    let nav = dom.element(body, "nav", &[("class", "nav")]);
    dom.set_geometry(nav, 0.0, 70.0);
    let toggle = dom.element(nav, "button", &[("id", "nav-toggle"), ("class", "nav-toggle")]);
    let toggle_bar = dom.element(toggle, "span", &[("class", "bar")]);
    let menu = dom.element(nav, "ul", &[("id", "nav-menu"), ("class", "nav-menu")]);

    let ids = ["home", "about", "skills", "projects", "contact"];
    let mut links = Vec::new();
    for id in ids {
        let li = dom.element(menu, "li", &[]);
        let href = format!("#{id}");
        links.push(dom.element(li, "a", &[("class", "nav-link"), ("href", href.as_str())]));
    }

    let main = dom.element(body, "main", &[]);
    let mut sections = Vec::new();
    let heights = [500.0, 500.0, 500.0, 500.0, 600.0];
    let mut top = 0.0;
    for (id, height) in ids.iter().zip(heights) {
        let class = if *id == "home" { "hero" } else { "section" };
        let section = dom.element(main, "section", &[("id", *id), ("class", class)]);
        dom.set_geometry(section, top, height);
        sections.push(section);
        top += height;
    }

    let hero = sections[0];
    let hero_title = dom.element(hero, "h1", &[("class", "hero-title")]);
    let hero_subtitle = dom.element(hero, "p", &[("class", "hero-subtitle")]);
    let cta = dom.element(hero, "a", &[("class", "btn"), ("href", "#contact")]);
    let photo = dom.element(hero, "img", &[("class", "profile-photo")]);

    let about_card = dom.element(sections[1], "div", &[("class", "card")]);

    let skills_grid = dom.element(sections[2], "div", &[("class", "skills-grid")]);
    let skill_items = (0..3)
        .map(|_| dom.element(skills_grid, "div", &[("class", "skill-item card")]))
        .collect();

    let projects_grid = dom.element(sections[3], "div", &[("class", "projects-grid")]);
    let project_cards = (0..3)
        .map(|_| dom.element(projects_grid, "article", &[("class", "card")]))
        .collect();

    let form = dom.element(sections[4], "form", &[("id", "contact-form")]);
    let group = dom.element(form, "div", &[("class", "form-group")]);
    let name = dom.element(group, "input", &[("type", "text"), ("class", "form-control")]);
    let group = dom.element(form, "div", &[("class", "form-group")]);
    let email = dom.element(group, "input", &[("type", "email"), ("class", "form-control")]);
    let group = dom.element(form, "div", &[("class", "form-group")]);
    let message = dom.element(group, "textarea", &[("class", "form-control")]);
    let submit = dom.element(form, "button", &[("type", "submit"), ("class", "btn")]);
    dom.set_text(&submit, "Send Message");

    let outside = dom.element(sections[1], "p", &[]);

    let page = Page {
        nav,
        toggle,
        toggle_bar,
        menu,
        links,
        sections,
        hero_title,
        hero_subtitle,
        photo,
        cta,
        about_card,
        skills_grid,
        skill_items,
        projects_grid,
        project_cards,
        form,
        name,
        email,
        message,
        submit,
        outside,
    };
    (dom, page)
}

// =========================================================================
// Driving an App
// =========================================================================

/// Advance the clock by `ms`, delivering every wake-up that comes due in
/// order. Work scheduled while advancing fires too if it lands in the window.
pub fn advance(app: &mut App<FakeDom>, ms: f64) {
    let until = app.platform().now_ms() + ms;
    while let Some(handle) = app.platform_mut().pop_due(until) {
        app.handle(Event::Wake(handle));
    }
    app.platform_mut().now = until;
}

/// Fill in the three contact fields.
pub fn fill_form(app: &mut App<FakeDom>, page: &Page, name: &str, email: &str, message: &str) {
    let dom = app.platform_mut();
    dom.type_into(page.name, name);
    dom.type_into(page.email, email);
    dom.type_into(page.message, message);
}
