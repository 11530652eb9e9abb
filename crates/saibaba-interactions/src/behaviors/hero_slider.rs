use std::{cell::Cell, rc::Rc, time::Duration};

use crate::dom::{Dom, Scheduler};

const SLIDE_SELECTOR: &str = ".hero-slide";
const ACTIVE_CLASS: &str = "active";

/// Auto-advancing hero image rotator.
///
/// Slides are collected once at attach time.
pub struct HeroSlider<D: Dom> {
    dom: Rc<D>,
    slides: Vec<D::Node>,
    current: Cell<usize>,
}

impl<D: Dom + 'static> HeroSlider<D> {
    /// Starts rotating the page's hero slides every `interval`. Pages with
    /// fewer than two slides have nothing to rotate and return `None`.
    pub fn attach<S: Scheduler>(dom: Rc<D>, scheduler: &S, interval: Duration) -> Option<Rc<Self>> {
        let slides = dom.query_all(SLIDE_SELECTOR);
        if slides.len() < 2 {
            log::debug!("{} hero slide(s), rotation disabled", slides.len());
            return None;
        }

        let slider = Rc::new(Self {
            dom,
            slides,
            current: Cell::new(0),
        });
        let this = slider.clone();
        scheduler.set_interval(interval, Box::new(move || this.advance()));
        Some(slider)
    }

    /// Index of the active slide.
    pub fn current(&self) -> usize {
        self.current.get()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Moves to the next slide, wrapping after the last.
    pub fn advance(&self) {
        self.show(self.current.get() + 1);
    }

    /// Activates slide `index`, wrapping modulo the slide count.
    pub fn show(&self, index: usize) {
        let index = index % self.slides.len();
        for slide in &self.slides {
            self.dom.remove_class(slide, ACTIVE_CLASS);
        }
        self.dom.add_class(&self.slides[index], ACTIVE_CLASS);
        self.current.set(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ManualScheduler, MemoryDom};

    const INTERVAL: Duration = Duration::from_millis(5000);

    #[test]
    fn wraps_after_a_full_cycle() {
        let dom = Rc::new(MemoryDom::new());
        let slides: Vec<_> = (0..3)
            .map(|_| dom.add_to_body("div").class("hero-slide").node())
            .collect();
        dom.add_class(&slides[0], "active");
        let scheduler = ManualScheduler::new();
        let slider = HeroSlider::attach(dom.clone(), &scheduler, INTERVAL).unwrap();

        scheduler.advance(INTERVAL);
        assert_eq!(slider.current(), 1);
        assert!(dom.has_class(&slides[1], "active"));
        assert!(!dom.has_class(&slides[0], "active"));

        scheduler.advance(INTERVAL * 2);
        assert_eq!(slider.current(), 0);
        assert!(dom.has_class(&slides[0], "active"));
        assert_eq!(dom.query_all(".hero-slide.active").len(), 1);
    }

    #[test]
    fn single_slide_does_not_rotate() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("div").class("hero-slide");
        let scheduler = ManualScheduler::new();

        assert!(HeroSlider::attach(dom, &scheduler, INTERVAL).is_none());
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn show_wraps_out_of_range_indices() {
        let dom = Rc::new(MemoryDom::new());
        for _ in 0..2 {
            dom.add_to_body("div").class("hero-slide");
        }
        let scheduler = ManualScheduler::new();
        let slider = HeroSlider::attach(dom, &scheduler, INTERVAL).unwrap();

        slider.show(5);
        assert_eq!(slider.current(), 1);
        assert_eq!(slider.len(), 2);
    }
}
