use std::rc::Rc;

use saibaba_bridge::Disposition;

use super::mobile_menu::MobileMenu;
use crate::dom::{Dom, anchor_target};

const IN_PAGE_LINK_SELECTOR: &str = r##"a[href^="#"]"##;

/// Smooth scrolling for same-page anchor links, leaving room for the sticky
/// header.
pub struct SmoothScroll<D: Dom> {
    dom: Rc<D>,
    header_offset: f64,
}

impl<D: Dom> SmoothScroll<D> {
    pub fn new(dom: Rc<D>, header_offset: f64) -> Self {
        Self { dom, header_offset }
    }

    /// Document position to scroll to so that `section` sits just below the
    /// header.
    pub fn scroll_offset(&self, section: &D::Node) -> f64 {
        self.dom.bounding_top(section) + self.dom.scroll_y() - self.header_offset
    }

    /// Scrolls to the target of a clicked in-page link, closing the mobile
    /// menu on the way. Links to `#`, `#!` or to missing sections keep their
    /// default behavior.
    pub fn handle_click(&self, target: &D::Node, menu: Option<&MobileMenu<D>>) -> Disposition {
        let dom = &*self.dom;
        let Some(link) = dom.closest(target, IN_PAGE_LINK_SELECTOR) else {
            return Disposition::Proceed;
        };
        let href = dom.attribute(&link, "href").unwrap_or_default();
        let Some(section) = anchor_target(dom, &href) else {
            return Disposition::Proceed;
        };

        if let Some(menu) = menu
            && menu.is_open()
        {
            menu.toggle();
        }

        let top = self.scroll_offset(&section);
        log::debug!("Scrolling to {href} at {top}px");
        dom.scroll_to(top);
        Disposition::PreventDefault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn scrolls_to_section_minus_header() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("section").id("contact").at(2400.0);
        let link = dom.add_to_body("a").attr("href", "#contact").node();
        dom.set_scroll_y(300.0);

        let scroll = SmoothScroll::new(dom.clone(), 100.0);
        assert_eq!(scroll.handle_click(&link, None), Disposition::PreventDefault);
        // bounding top 2100 + scroll 300 - header 100
        assert_eq!(dom.scroll_requests(), vec![2300.0]);
    }

    #[test]
    fn bare_hash_links_are_ignored() {
        let dom = Rc::new(MemoryDom::new());
        let hash = dom.add_to_body("a").attr("href", "#").node();
        let bang = dom.add_to_body("a").attr("href", "#!").node();

        let scroll = SmoothScroll::new(dom.clone(), 100.0);
        assert_eq!(scroll.handle_click(&hash, None), Disposition::Proceed);
        assert_eq!(scroll.handle_click(&bang, None), Disposition::Proceed);
        assert!(dom.scroll_requests().is_empty());
    }

    #[test]
    fn missing_targets_are_ignored() {
        let dom = Rc::new(MemoryDom::new());
        let link = dom.add_to_body("a").attr("href", "#team").node();

        let scroll = SmoothScroll::new(dom.clone(), 100.0);
        assert_eq!(scroll.handle_click(&link, None), Disposition::Proceed);
        assert!(dom.scroll_requests().is_empty());
    }

    #[test]
    fn closes_an_open_mobile_menu() {
        let dom = Rc::new(MemoryDom::new());
        let toggle = dom.add_to_body("button").class("mobile-menu-toggle").node();
        let nav = dom.add_to_body("ul").class("nav-menu").node();
        let link = dom.add(nav, "a").attr("href", "#about").node();
        dom.add_to_body("section").id("about").at(800.0);

        let menu = MobileMenu::attach(dom.clone()).unwrap();
        menu.toggle();
        let scroll = SmoothScroll::new(dom.clone(), 100.0);
        scroll.handle_click(&link, Some(&menu));

        assert!(!menu.is_open());
        assert_eq!(dom.attribute(&toggle, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(dom.scroll_requests(), vec![700.0]);
    }
}
