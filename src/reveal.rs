//! Scroll-reveal and hero fade-in.
//!
//! Content blocks start hidden (`fade-in`) and gain `visible` the first time
//! the intersection watcher reports them on screen. The watcher is never told
//! to un-reveal, so a block stays visible after scrolling away.
//!
//! Items inside the two grid layouts cascade in rather than appearing all at
//! once: each gets a `transition-delay` proportional to its position among
//! its siblings.
//!
//! The hero is different: it is above the fold, so its parts fade in on
//! fixed timers right after startup, one after another.

use crate::config::RevealConfig;
use crate::css;
use crate::platform::{Dom, Handle, IntersectionOptions, Scheduler, Wake};

pub const HIDDEN_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

/// Grid layouts whose children reveal with a stagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Skills,
    Projects,
}

impl Grid {
    pub fn class(self) -> &'static str {
        match self {
            Grid::Skills => "skills-grid",
            Grid::Projects => "projects-grid",
        }
    }

    fn of<D: Dom>(dom: &D, parent: &D::Element) -> Option<Grid> {
        [Grid::Skills, Grid::Projects]
            .into_iter()
            .find(|grid| dom.has_class(parent, grid.class()))
    }
}

/// Transition delay in seconds for the item at `index` within `grid`.
pub fn stagger_delay(grid: Grid, index: usize, config: &RevealConfig) -> f64 {
    let step = match grid {
        Grid::Skills => config.skills_stagger,
        Grid::Projects => config.projects_stagger,
    };
    index as f64 * step
}

/// Delay in milliseconds before the hero element at `index` fades in.
pub fn hero_delay(index: usize, config: &RevealConfig) -> f64 {
    f64::from(config.hero_delay_ms) + index as f64 * f64::from(config.hero_step_ms)
}

pub struct Reveal {
    config: RevealConfig,
}

impl Reveal {
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    pub fn options(&self) -> IntersectionOptions {
        IntersectionOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin.clone(),
        }
    }

    /// Hide every revealable element and start watching it. Returns how many
    /// elements were registered.
    pub fn install<D: Dom>(&self, dom: &mut D) -> usize {
        let options = self.options();
        let elements = dom.query_all(&self.config.selectors.join(", "));
        for el in &elements {
            dom.add_class(el, HIDDEN_CLASS);
            dom.observe_intersection(el, &options);
        }
        elements.len()
    }

    /// An observed element entered the viewport.
    pub fn reveal<D: Dom>(&self, dom: &mut D, el: &D::Element) {
        dom.add_class(el, VISIBLE_CLASS);

        let Some(parent) = dom.parent(el) else {
            return;
        };
        let Some(grid) = Grid::of(dom, &parent) else {
            return;
        };
        if let Some(index) = dom.children(&parent).iter().position(|child| child == el) {
            let delay = stagger_delay(grid, index, &self.config);
            dom.set_style(el, "transition-delay", &css::seconds(delay));
        }
    }

    /// Put the hero elements in their starting pose and schedule each one's
    /// fade-in. Returns the timers paired with the element they reveal.
    pub fn schedule_hero<P: Dom + Scheduler>(
        &self,
        platform: &mut P,
    ) -> Vec<(Handle, P::Element)> {
        let elements = platform.query_all(&self.config.hero_selectors.join(", "));
        elements
            .into_iter()
            .enumerate()
            .map(|(index, el)| {
                platform.set_style(&el, "opacity", "0");
                platform.set_style(&el, "transform", "translateY(30px)");
                platform.set_style(
                    &el,
                    "transition",
                    "opacity 0.6s ease-out, transform 0.6s ease-out",
                );
                let handle = platform.schedule(Wake::After(hero_delay(index, &self.config)));
                (handle, el)
            })
            .collect()
    }
}

/// Final pose of a hero element.
pub fn show_hero<D: Dom>(dom: &mut D, el: &D::Element) {
    dom.set_style(el, "opacity", "1");
    dom.set_style(el, "transform", "translateY(0)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn reveal() -> Reveal {
        Reveal::new(RevealConfig::default())
    }

    #[test]
    fn stagger_steps() {
        let config = RevealConfig::default();
        assert_eq!(stagger_delay(Grid::Skills, 0, &config), 0.0);
        assert_eq!(css::seconds(stagger_delay(Grid::Skills, 3, &config)), "0.3s");
        assert_eq!(css::seconds(stagger_delay(Grid::Projects, 2, &config)), "0.3s");
        assert_eq!(css::seconds(stagger_delay(Grid::Projects, 1, &config)), "0.15s");
    }

    #[test]
    fn hero_delays_start_at_300_and_step_200() {
        let config = RevealConfig::default();
        let delays: Vec<f64> = (0..4).map(|i| hero_delay(i, &config)).collect();
        assert_eq!(delays, vec![300.0, 500.0, 700.0, 900.0]);
    }

    #[test]
    fn install_hides_and_observes_matching_elements() {
        let (mut dom, page) = portfolio_page();
        // about card + 3 skill items (also .card) + 3 project cards
        assert_eq!(reveal().install(&mut dom), 7);
        assert!(dom.has_class(&page.about_card, HIDDEN_CLASS));
        assert!(dom.observed().contains(&page.project_cards[2]));

        let options = dom.observed_options().unwrap();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn reveal_outside_grid_has_no_delay() {
        let (mut dom, page) = portfolio_page();
        reveal().reveal(&mut dom, &page.about_card);
        assert!(dom.has_class(&page.about_card, VISIBLE_CLASS));
        assert_eq!(dom.style(page.about_card, "transition-delay"), None);
    }

    #[test]
    fn reveal_in_skills_grid_staggers_by_index() {
        let (mut dom, page) = portfolio_page();
        reveal().reveal(&mut dom, &page.skill_items[2]);
        assert_eq!(dom.style(page.skill_items[2], "transition-delay"), Some("0.2s"));
    }

    #[test]
    fn reveal_in_projects_grid_staggers_by_index() {
        let (mut dom, page) = portfolio_page();
        reveal().reveal(&mut dom, &page.project_cards[0]);
        reveal().reveal(&mut dom, &page.project_cards[1]);
        assert_eq!(dom.style(page.project_cards[0], "transition-delay"), Some("0s"));
        assert_eq!(dom.style(page.project_cards[1], "transition-delay"), Some("0.15s"));
    }

    #[test]
    fn reveal_is_idempotent() {
        let (mut dom, page) = portfolio_page();
        reveal().reveal(&mut dom, &page.about_card);
        reveal().reveal(&mut dom, &page.about_card);
        assert_eq!(dom.count(".card.visible"), 1);
    }

    #[test]
    fn hero_starts_hidden_and_timers_are_staggered() {
        let (mut dom, page) = portfolio_page();
        let scheduled = reveal().schedule_hero(&mut dom);

        // title, subtitle, photo in document order
        let elements: Vec<NodeId> = scheduled.iter().map(|(_, el)| *el).collect();
        assert_eq!(elements, vec![page.hero_title, page.hero_subtitle, page.photo]);
        assert_eq!(dom.style(page.hero_title, "opacity"), Some("0"));
        assert_eq!(dom.style(page.photo, "transform"), Some("translateY(30px)"));

        assert!(dom.take_due(299.0).is_empty());
        assert_eq!(dom.take_due(1.0), vec![scheduled[0].0]);
        assert_eq!(dom.take_due(200.0), vec![scheduled[1].0]);
        assert_eq!(dom.take_due(200.0), vec![scheduled[2].0]);
    }

    #[test]
    fn show_hero_sets_final_pose() {
        let (mut dom, page) = portfolio_page();
        show_hero(&mut dom, &page.hero_title);
        assert_eq!(dom.style(page.hero_title, "opacity"), Some("1"));
        assert_eq!(dom.style(page.hero_title, "transform"), Some("translateY(0)"));
    }
}
