use std::{cell::Cell, rc::Rc};

use crate::dom::{Dom, Scheduler};

const HEADER_SELECTOR: &str = ".header";
const SHRINK_CLASS: &str = "shrink";

/// Shrinks the header once the page scrolls past a threshold.
///
/// Scroll events only schedule a recompute; at most one is pending per
/// animation frame.
pub struct HeaderShrink<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    scheduler: Rc<S>,
    header: D::Node,
    threshold: f64,
    frame_pending: Cell<bool>,
    shrunk: Cell<bool>,
}

impl<D: Dom + 'static, S: Scheduler + 'static> HeaderShrink<D, S> {
    pub fn attach(dom: Rc<D>, scheduler: Rc<S>, threshold: f64) -> Option<Rc<Self>> {
        let Some(header) = dom.query(HEADER_SELECTOR) else {
            log::debug!("No {HEADER_SELECTOR} on the page, header shrink disabled");
            return None;
        };
        let shrunk = dom.has_class(&header, SHRINK_CLASS);
        Some(Rc::new(Self {
            dom,
            scheduler,
            header,
            threshold,
            frame_pending: Cell::new(false),
            shrunk: Cell::new(shrunk),
        }))
    }

    /// Queues a recompute for the next frame unless one is already queued.
    pub fn handle_scroll(self: &Rc<Self>) {
        if self.frame_pending.replace(true) {
            return;
        }
        let this = Rc::clone(self);
        let queued = self
            .scheduler
            .request_animation_frame(Box::new(move || this.update()));
        if let Err(err) = queued {
            log::warn!("Header recompute not scheduled: {err}");
            self.frame_pending.set(false);
        }
    }

    pub fn is_shrunk(&self) -> bool {
        self.shrunk.get()
    }

    fn update(&self) {
        let shrink = self.dom.scroll_y() > self.threshold;
        if shrink {
            self.dom.add_class(&self.header, SHRINK_CLASS);
        } else {
            self.dom.remove_class(&self.header, SHRINK_CLASS);
        }
        self.shrunk.set(shrink);
        self.frame_pending.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        dom::DomError,
        memory::{ManualScheduler, MemoryDom},
    };

    /// Refuses the first `rejections` frame requests, then queues normally.
    struct FlakyFrames {
        inner: ManualScheduler,
        rejections: Cell<usize>,
    }

    impl Scheduler for FlakyFrames {
        fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
            self.inner.set_timeout(delay, callback);
        }

        fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) {
            self.inner.set_interval(period, callback);
        }

        fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DomError> {
            let left = self.rejections.get();
            if left > 0 {
                self.rejections.set(left - 1);
                return Err(DomError::FrameRejected("document hidden".into()));
            }
            self.inner.request_animation_frame(callback)
        }
    }

    #[test]
    fn shrinks_past_threshold_and_restores() {
        let dom = Rc::new(MemoryDom::new());
        let header = dom.add_to_body("header").class("header").node();
        let scheduler = Rc::new(ManualScheduler::new());
        let shrink = HeaderShrink::attach(dom.clone(), scheduler.clone(), 100.0).unwrap();

        dom.set_scroll_y(150.0);
        shrink.handle_scroll();
        scheduler.run_frame();
        assert!(dom.has_class(&header, "shrink"));
        assert!(shrink.is_shrunk());

        dom.set_scroll_y(0.0);
        shrink.handle_scroll();
        scheduler.run_frame();
        assert!(!dom.has_class(&header, "shrink"));
    }

    #[test]
    fn threshold_itself_does_not_shrink() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("header").class("header");
        let scheduler = Rc::new(ManualScheduler::new());
        let shrink = HeaderShrink::attach(dom.clone(), scheduler.clone(), 100.0).unwrap();

        dom.set_scroll_y(100.0);
        shrink.handle_scroll();
        scheduler.run_frame();
        assert!(!shrink.is_shrunk());
    }

    #[test]
    fn bursts_within_a_frame_recompute_once() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("header").class("header");
        let scheduler = Rc::new(ManualScheduler::new());
        let shrink = HeaderShrink::attach(dom.clone(), scheduler.clone(), 100.0).unwrap();

        for y in [20.0, 80.0, 140.0] {
            dom.set_scroll_y(y);
            shrink.handle_scroll();
        }
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert!(shrink.is_shrunk());

        shrink.handle_scroll();
        assert_eq!(scheduler.pending_frames(), 1);
    }

    #[test]
    fn missing_header_is_a_no_op() {
        let dom = Rc::new(MemoryDom::new());
        let scheduler = Rc::new(ManualScheduler::new());
        assert!(HeaderShrink::attach(dom, scheduler, 100.0).is_none());
    }

    #[test]
    fn rejected_frame_does_not_block_later_scrolls() {
        let dom = Rc::new(MemoryDom::new());
        let header = dom.add_to_body("header").class("header").node();
        let scheduler = Rc::new(FlakyFrames {
            inner: ManualScheduler::new(),
            rejections: Cell::new(1),
        });
        let shrink = HeaderShrink::attach(dom.clone(), scheduler.clone(), 100.0).unwrap();

        dom.set_scroll_y(150.0);
        shrink.handle_scroll();
        assert_eq!(scheduler.inner.pending_frames(), 0);

        shrink.handle_scroll();
        assert_eq!(scheduler.inner.pending_frames(), 1);
        scheduler.inner.run_frame();
        assert!(dom.has_class(&header, "shrink"));
    }
}
