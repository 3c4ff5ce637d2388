//! Cosmetic effects: hero photo parallax and card hover lift.

use crate::config::EffectsConfig;
use crate::css;
use crate::platform::Dom;

pub const HERO: &str = ".hero";
pub const PHOTO: &str = ".profile-photo";
pub const CARD: &str = ".card";
pub const SKILL_ITEM: &str = ".skill-item";

/// Transform for the profile photo at `scroll_y`, or `None` once the hero
/// has scrolled fully out of view (or has no height).
pub fn parallax_transform(scroll_y: f64, hero_height: f64, config: &EffectsConfig) -> Option<String> {
    if hero_height <= 0.0 {
        return None;
    }
    let progress = scroll_y / hero_height;
    if progress > 1.0 {
        return None;
    }
    Some(format!(
        "translateY({}) scale({})",
        css::px(scroll_y * config.parallax_rate),
        css::number(1.0 - progress * config.parallax_shrink)
    ))
}

pub fn handle_scroll<D: Dom>(dom: &mut D, config: &EffectsConfig) {
    let (Some(hero), Some(photo)) = (dom.query(HERO), dom.query(PHOTO)) else {
        return;
    };
    let height = dom.offset_height(&hero);
    if let Some(transform) = parallax_transform(dom.scroll_y(), height, config) {
        dom.set_style(&photo, "transform", &transform);
    }
}

/// Pointer entered or left `target`. Skill items are usually cards too, so
/// they are matched first.
pub fn handle_hover<D: Dom>(dom: &mut D, target: &D::Element, entering: bool) {
    let transform = if dom.has_class(target, "skill-item") {
        if entering {
            "translateY(-4px) scale(1.05)"
        } else {
            "translateY(0) scale(1)"
        }
    } else if dom.has_class(target, "card") {
        if entering { "translateY(-8px)" } else { "translateY(0)" }
    } else {
        return;
    };
    dom.set_style(target, "transform", transform);
}
