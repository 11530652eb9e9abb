//! Toast lifecycle management.
//!
//! The [`Presenter`] renders a toast, transitions it in, and dismisses it
//! either when the user clicks its close button or when its lifetime runs
//! out. Both paths share one guarded dismissal, so a toast is removed
//! exactly once whichever path fires first.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use saibaba_bridge::{config::ToastConfig, notification::NotificationRequest};

use crate::dom::{Dom, DomError, Scheduler};

/// Class of the toast's close button.
pub const CLOSE_BUTTON_CLASS: &str = "notification-close";
/// Class of the toast's root node.
pub const TOAST_CLASS: &str = "notification";
/// Class that makes a toast visible.
pub const SHOW_CLASS: &str = "show";

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted, waiting for the enter transition.
    Entering,
    /// Visible.
    Shown,
    /// Exit transition running; removal is scheduled.
    Leaving,
    /// Detached from the document.
    Removed,
}

/// Handle to a presented toast.
#[derive(Debug, Clone)]
pub struct Toast<N> {
    node: N,
    phase: Rc<Cell<ToastPhase>>,
}

impl<N> Toast<N> {
    /// The toast's root element.
    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase.get()
    }
}

/// Renders and dismisses toasts.
///
/// Cloning is cheap; clones share the same live toast list.
pub struct Presenter<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    scheduler: Rc<S>,
    timing: ToastConfig,
    live: Rc<RefCell<Vec<Toast<D::Node>>>>,
}

impl<D: Dom, S: Scheduler> Clone for Presenter<D, S> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            scheduler: self.scheduler.clone(),
            timing: self.timing.clone(),
            live: self.live.clone(),
        }
    }
}

impl<D: Dom + 'static, S: Scheduler + 'static> Presenter<D, S> {
    pub fn new(dom: Rc<D>, scheduler: Rc<S>, timing: ToastConfig) -> Self {
        Self {
            dom,
            scheduler,
            timing,
            live: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shows `request` as a new toast appended to the body.
    ///
    /// Toasts stack; there is no cap on how many are visible at once.
    pub fn present(&self, request: &NotificationRequest) -> Result<Toast<D::Node>, DomError> {
        let node = self.render(request)?;
        let toast = Toast {
            node,
            phase: Rc::new(Cell::new(ToastPhase::Entering)),
        };
        self.live.borrow_mut().push(toast.clone());
        log::debug!("Presenting {} toast {:?}", request.severity, request.title);

        let this = self.clone();
        let entering = toast.clone();
        self.scheduler.set_timeout(
            millis(self.timing.enter_delay_ms),
            Box::new(move || this.show(&entering)),
        );

        let this = self.clone();
        let expiring = toast.clone();
        self.scheduler.set_timeout(
            millis(self.timing.lifetime_ms),
            Box::new(move || {
                this.dismiss(&expiring);
            }),
        );

        Ok(toast)
    }

    /// Starts hiding `toast` and schedules its removal.
    ///
    /// Returns `false` when the toast is already leaving or gone, in which
    /// case nothing happens.
    pub fn dismiss(&self, toast: &Toast<D::Node>) -> bool {
        match toast.phase.get() {
            ToastPhase::Leaving | ToastPhase::Removed => return false,
            ToastPhase::Entering | ToastPhase::Shown => {}
        }

        self.dom.remove_class(&toast.node, SHOW_CLASS);
        toast.phase.set(ToastPhase::Leaving);

        let this = self.clone();
        let leaving = toast.clone();
        self.scheduler.set_timeout(
            millis(self.timing.exit_transition_ms),
            Box::new(move || this.finish(&leaving)),
        );
        true
    }

    /// Dismisses the live toast rooted at `node`, if any.
    pub fn dismiss_node(&self, node: &D::Node) -> bool {
        let toast = self
            .live
            .borrow()
            .iter()
            .find(|toast| &toast.node == node)
            .cloned();
        match toast {
            Some(toast) => self.dismiss(&toast),
            None => false,
        }
    }

    /// Handles a click on a toast's close button. Returns `true` when the
    /// click belonged to a toast.
    pub fn handle_click(&self, target: &D::Node) -> bool {
        let close_selector = format!(".{CLOSE_BUTTON_CLASS}");
        if self.dom.closest(target, &close_selector).is_none() {
            return false;
        }
        let toast_selector = format!(".{TOAST_CLASS}");
        match self.dom.closest(target, &toast_selector) {
            Some(node) => {
                self.dismiss_node(&node);
                true
            }
            None => false,
        }
    }

    /// Number of toasts not yet removed.
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    fn show(&self, toast: &Toast<D::Node>) {
        if toast.phase.get() == ToastPhase::Entering {
            self.dom.add_class(&toast.node, SHOW_CLASS);
            toast.phase.set(ToastPhase::Shown);
        }
    }

    fn finish(&self, toast: &Toast<D::Node>) {
        if toast.phase.get() != ToastPhase::Leaving {
            return;
        }
        self.dom.remove(&toast.node);
        toast.phase.set(ToastPhase::Removed);
        self.live.borrow_mut().retain(|live| live.node != toast.node);
    }

    fn render(&self, request: &NotificationRequest) -> Result<D::Node, DomError> {
        let dom = &*self.dom;
        let body = dom.body().ok_or(DomError::MissingBody)?;

        let root = dom.create_element("div")?;
        dom.set_attribute(
            &root,
            "class",
            &format!("{TOAST_CLASS} {TOAST_CLASS}-{}", request.severity),
        );
        dom.set_attribute(&root, "role", "status");
        dom.set_attribute(&root, "aria-live", "polite");

        let content = dom.create_element("div")?;
        dom.add_class(&content, "notification-content");
        let title = dom.create_element("strong")?;
        dom.set_text(&title, &request.title);
        let message = dom.create_element("p")?;
        dom.set_text(&message, &request.message);
        dom.append_child(&content, &title);
        dom.append_child(&content, &message);

        let close = dom.create_element("button")?;
        dom.add_class(&close, CLOSE_BUTTON_CLASS);
        dom.set_attribute(&close, "aria-label", "Close notification");
        dom.set_text(&close, "\u{00d7}");

        dom.append_child(&root, &content);
        dom.append_child(&root, &close);
        dom.append_child(&body, &root);
        Ok(root)
    }
}

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}
