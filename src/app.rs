//! The page controller.
//!
//! [`App`] owns the platform and the state of every feature. The host feeds
//! it [`Event`]s one at a time and honours the returned [`Outcome`]; nothing
//! else mutates the page.
//!
//! Timed work comes back as [`Event::Wake`]. The handle is offered first to
//! the features that own their own timers (resize debounce, active-link
//! frame, contact form) and then looked up in the table of one-shot tasks.

use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::active::ActiveLinks;
use crate::config::UiConfig;
use crate::effects;
use crate::events::{Event, Outcome};
use crate::form::{ContactForm, FormPhase, FormStep, SubmitResult};
use crate::nav::Navigation;
use crate::notify::{self, NoticeKind, Notifier};
use crate::platform::{Handle, Platform};
use crate::reveal::{self, Reveal};
use crate::scroll;

pub const LOADED_CLASS: &str = "loaded";

/// One-shot work waiting on a scheduler handle.
#[derive(Debug, Clone, PartialEq)]
enum Task<E> {
    HeroFadeIn(E),
    NoticeEnter(E),
    NoticeDismiss(E),
    NoticeRemove(E),
}

pub struct App<P: Platform> {
    platform: P,
    config: UiConfig,
    nav: Navigation,
    reveal: Reveal,
    active: ActiveLinks,
    form: Option<ContactForm<P::Element>>,
    notifier: Notifier,
    tasks: HashMap<Handle, Task<P::Element>>,
}

impl<P: Platform> App<P> {
    /// Wire every feature into the page: hide and watch revealable blocks,
    /// queue the hero fade-in, attach to the contact form, and mark the
    /// current section's nav link.
    pub fn start(mut platform: P, config: UiConfig) -> Self {
        let reveal = Reveal::new(config.reveal.clone());
        let watched = reveal.install(&mut platform);
        let tasks = reveal
            .schedule_hero(&mut platform)
            .into_iter()
            .map(|(handle, el)| (handle, Task::HeroFadeIn(el)))
            .collect();
        let form = ContactForm::find(&platform, config.contact.clone());

        let mut app = Self {
            nav: Navigation::new(config.navigation.clone()),
            reveal,
            active: ActiveLinks::new(config.active_links.clone()),
            form,
            notifier: Notifier::new(config.notifications.clone()),
            tasks,
            config,
            platform,
        };
        let section = app.active.refresh(&mut app.platform);
        info!(
            watched,
            contact_form = app.form.is_some(),
            section = section.as_deref().unwrap_or(""),
            "portfolio interactions ready"
        );
        app
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Phase of the contact form, or `None` when the page has none.
    pub fn form_phase(&self) -> Option<&FormPhase> {
        self.form.as_ref().map(ContactForm::phase)
    }

    /// Smooth-scroll to the element with `id`.
    pub fn scroll_to_section(&mut self, id: &str) -> bool {
        scroll::scroll_to_section(&mut self.platform, id, &self.config.navigation)
    }

    /// Show a toast, replacing any toast already on screen.
    pub fn notify(&mut self, message: &str, kind: NoticeKind) {
        let Some(shown) = self.notifier.show(&mut self.platform, message, kind) else {
            debug!("no document body; notification dropped");
            return;
        };
        self.tasks.insert(shown.enter, Task::NoticeEnter(shown.node.clone()));
        self.tasks.insert(shown.dismiss, Task::NoticeDismiss(shown.node));
    }

    pub fn handle(&mut self, event: Event<P::Element>) -> Outcome {
        match event {
            Event::Loaded => {
                if let Some(body) = self.platform.body() {
                    self.platform.add_class(&body, LOADED_CLASS);
                }
                info!("page loaded");
                Outcome::Continue
            }
            Event::Click { target } => self.click(&target),
            Event::Submit { form } => self.submit(&form),
            Event::Focus { target } => {
                if let Some(contact) = &self.form {
                    contact.focus(&mut self.platform, &target);
                }
                Outcome::Continue
            }
            Event::Blur { target } => {
                if let Some(contact) = &self.form {
                    contact.blur(&mut self.platform, &target);
                }
                Outcome::Continue
            }
            Event::Input { target } => {
                if let Some(contact) = &self.form {
                    contact.input(&mut self.platform, &target);
                }
                Outcome::Continue
            }
            Event::PointerEnter { target } => {
                effects::handle_hover(&mut self.platform, &target, true);
                Outcome::Continue
            }
            Event::PointerLeave { target } => {
                effects::handle_hover(&mut self.platform, &target, false);
                Outcome::Continue
            }
            Event::KeyDown { key } => {
                if self.nav.handle_key(&mut self.platform, &key) {
                    debug!("menu closed by Escape");
                }
                Outcome::Continue
            }
            Event::Scroll => {
                self.nav.handle_scroll(&mut self.platform);
                self.active.handle_scroll(&mut self.platform);
                effects::handle_scroll(&mut self.platform, &self.config.effects);
                Outcome::Continue
            }
            Event::Resize => {
                self.nav.handle_resize(&mut self.platform);
                Outcome::Continue
            }
            Event::Intersect { target } => {
                self.reveal.reveal(&mut self.platform, &target);
                Outcome::Continue
            }
            Event::Wake(handle) => {
                self.wake(handle);
                Outcome::Continue
            }
        }
    }

    fn click(&mut self, target: &P::Element) -> Outcome {
        // The toast lives outside the menu, so its close button counts as an
        // outside click too.
        let nav = self.nav.handle_click(&mut self.platform, target);
        if notify::handle_click(&mut self.platform, target) {
            return nav;
        }
        let anchor = scroll::handle_click(&mut self.platform, target, &self.config.navigation);
        nav.or(anchor)
    }

    fn submit(&mut self, form: &P::Element) -> Outcome {
        let Some(contact) = self.form.as_mut() else {
            return Outcome::Continue;
        };
        if contact.element() != form {
            return Outcome::Continue;
        }
        if let SubmitResult::Invalid(_) = contact.submit(&mut self.platform) {
            let message = self.config.contact.invalid_message.clone();
            self.notify(&message, NoticeKind::Error);
        }
        Outcome::PreventDefault
    }

    fn wake(&mut self, handle: Handle) {
        if self.nav.resize_settled(&mut self.platform, handle) {
            return;
        }
        if self.active.frame(&mut self.platform, handle) {
            return;
        }
        if let Some(contact) = self.form.as_mut() {
            match contact.wake(&mut self.platform, handle) {
                Some(FormStep::Sent) => {
                    let message = self.config.contact.success_message.clone();
                    self.notify(&message, NoticeKind::Success);
                    return;
                }
                Some(FormStep::Restored) => return,
                None => {}
            }
        }

        let Some(task) = self.tasks.remove(&handle) else {
            trace!(%handle, "stale wake-up");
            return;
        };
        match task {
            Task::HeroFadeIn(el) => reveal::show_hero(&mut self.platform, &el),
            Task::NoticeEnter(node) => notify::enter(&mut self.platform, &node),
            Task::NoticeDismiss(node) => {
                if let Some(removal) = self.notifier.dismiss(&mut self.platform, &node) {
                    self.tasks.insert(removal, Task::NoticeRemove(node));
                }
            }
            Task::NoticeRemove(node) => notify::remove(&mut self.platform, &node),
        }
    }
}
