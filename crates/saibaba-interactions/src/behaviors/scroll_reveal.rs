use std::rc::Rc;

use saibaba_bridge::config::RevealConfig;

use crate::dom::{Dom, Observation, ObserverOptions};

const REVEAL_SELECTOR: &str = ".feature-card, .news-card, .testimonial, .community-content";

const HIDDEN_OFFSET: &str = "translateY(1.875rem)";
const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Fades content blocks in as they scroll into view.
///
/// Elements are only hidden once an observer is watching them, so a page
/// without intersection support keeps everything visible. Returns the
/// number of elements animated.
pub fn attach<D: Dom + 'static>(dom: Rc<D>, config: &RevealConfig) -> usize {
    if !dom.supports_intersection_observer() {
        log::warn!("IntersectionObserver not supported, scroll reveal disabled");
        return 0;
    }
    let targets = dom.query_all(REVEAL_SELECTOR);
    if targets.is_empty() {
        return 0;
    }

    let options = ObserverOptions {
        threshold: config.threshold,
        root_margin: config.root_margin.clone(),
    };
    let observer_dom = dom.clone();
    let observed = dom.observe_intersections(
        &targets,
        &options,
        Box::new(move |target: &D::Node| {
            observer_dom.set_style(target, "opacity", "1");
            observer_dom.set_style(target, "transform", "translateY(0)");
            Observation::Release
        }),
    );
    if let Err(err) = observed {
        log::warn!("Scroll reveal disabled: {err}");
        return 0;
    }

    for target in &targets {
        dom.set_style(target, "opacity", "0");
        dom.set_style(target, "transform", HIDDEN_OFFSET);
        dom.set_style(target, "transition", TRANSITION);
    }
    targets.len()
}
