use std::{cell::RefCell, rc::Rc};

use crate::dom::Dom;

const SECTION_SELECTOR: &str = "section[id]";
const NAV_LINK_SELECTOR: &str = r##".nav-menu a[href^="#"]"##;
const ACTIVE_CLASS: &str = "active";

/// Highlights the navigation link of the section currently being read.
pub struct ActiveNav<D: Dom> {
    dom: Rc<D>,
    margin: f64,
    current: RefCell<Option<String>>,
}

impl<D: Dom> ActiveNav<D> {
    pub fn new(dom: Rc<D>, margin: f64) -> Self {
        Self {
            dom,
            margin,
            current: RefCell::new(None),
        }
    }

    /// Id of the section whose link is highlighted.
    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Recomputes the current section from the scroll position.
    ///
    /// Sections are scanned in document order and the last one whose top is
    /// at most `margin` pixels below the scroll position wins.
    pub fn handle_scroll(&self) {
        let dom = &*self.dom;
        let scroll_y = dom.scroll_y();
        let current = dom
            .query_all(SECTION_SELECTOR)
            .iter()
            .filter(|section| scroll_y >= dom.offset_top(section) - self.margin)
            .filter_map(|section| dom.attribute(section, "id"))
            .last();

        let wanted = current.as_ref().map(|id| format!("#{id}"));
        for link in dom.query_all(NAV_LINK_SELECTOR) {
            dom.remove_class(&link, ACTIVE_CLASS);
            if wanted.is_some() && dom.attribute(&link, "href") == wanted {
                dom.add_class(&link, ACTIVE_CLASS);
            }
        }

        *self.current.borrow_mut() = current;
    }
}
