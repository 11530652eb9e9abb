use std::{cell::Cell, rc::Rc};

use crate::dom::Dom;

pub const TOGGLE_SELECTOR: &str = ".mobile-menu-toggle";
pub const MENU_SELECTOR: &str = ".nav-menu";
/// Header row holding the toggle; clicks inside it never close the menu.
const HEADER_ROW_SELECTOR: &str = ".header-bottom-row";
const OPEN_CLASS: &str = "active";

const TOP_BAR_OPEN: &str = "rotate(45deg) translate(0.375rem, 0.375rem)";
const BOTTOM_BAR_OPEN: &str = "rotate(-45deg) translate(0.375rem, -0.375rem)";

/// The hamburger menu for narrow viewports.
///
/// Open state lives in `open` and is rendered onto the menu's class list,
/// the toggle's `aria-expanded`, and the toggle's three icon bars.
pub struct MobileMenu<D: Dom> {
    dom: Rc<D>,
    toggle: D::Node,
    menu: D::Node,
    open: Cell<bool>,
}

impl<D: Dom> MobileMenu<D> {
    /// Binds to the page's toggle button and menu. Returns `None` when
    /// either is missing.
    pub fn attach(dom: Rc<D>) -> Option<Self> {
        let Some(toggle) = dom.query(TOGGLE_SELECTOR) else {
            log::debug!("No {TOGGLE_SELECTOR} on the page, mobile menu disabled");
            return None;
        };
        let Some(menu) = dom.query(MENU_SELECTOR) else {
            log::debug!("No {MENU_SELECTOR} on the page, mobile menu disabled");
            return None;
        };
        let open = dom.has_class(&menu, OPEN_CLASS);
        Some(Self {
            dom,
            toggle,
            menu,
            open: Cell::new(open),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        self.set_open(!self.open.get());
    }

    /// Closes the menu and resets the icon.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Toggles on clicks on the toggle button; closes on clicks outside
    /// both the header row and the menu.
    pub fn handle_click(&self, target: &D::Node) {
        let dom = &*self.dom;
        if dom.closest(target, TOGGLE_SELECTOR).is_some() {
            self.toggle();
            return;
        }
        if dom.closest(target, HEADER_ROW_SELECTOR).is_none()
            && dom.closest(target, MENU_SELECTOR).is_none()
        {
            self.close();
        }
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
        self.render();
    }

    fn render(&self) {
        let dom = &*self.dom;
        let open = self.open.get();
        if open {
            dom.add_class(&self.menu, OPEN_CLASS);
        } else {
            dom.remove_class(&self.menu, OPEN_CLASS);
        }

        let bars = dom.query_all_in(&self.toggle, "span");
        for (index, bar) in bars.iter().enumerate() {
            let (transform, opacity) = match (open, index) {
                (true, 0) => (TOP_BAR_OPEN, "1"),
                (true, 1) => ("none", "0"),
                (true, 2) => (BOTTOM_BAR_OPEN, "1"),
                _ => ("none", "1"),
            };
            dom.set_style(bar, "transform", transform);
            dom.set_style(bar, "opacity", opacity);
        }

        dom.set_attribute(&self.toggle, "aria-expanded", if open { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    struct Fixture {
        dom: Rc<MemoryDom>,
        toggle: NodeId,
        bars: Vec<NodeId>,
        menu: NodeId,
        link: NodeId,
        outside: NodeId,
    }

    fn fixture() -> Fixture {
        let dom = Rc::new(MemoryDom::new());
        let header = dom.add_to_body("header").class("header").node();
        let row = dom.add(header, "div").class("header-bottom-row").node();
        let toggle = dom
            .add(row, "button")
            .class("mobile-menu-toggle")
            .attr("aria-expanded", "false")
            .node();
        let bars = (0..3).map(|_| dom.add(toggle, "span").node()).collect();
        let menu = dom.add(row, "ul").class("nav-menu").node();
        let link = dom.add(menu, "a").attr("href", "#contact").node();
        let outside = dom.add_to_body("main").node();
        Fixture {
            dom,
            toggle,
            bars,
            menu,
            link,
            outside,
        }
    }

    #[test]
    fn missing_elements_disable_the_menu() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("ul").class("nav-menu");
        assert!(MobileMenu::attach(dom).is_none());
    }

    #[test]
    fn toggling_twice_restores_state() {
        let f = fixture();
        let menu = MobileMenu::attach(f.dom.clone()).unwrap();

        menu.handle_click(&f.bars[1]);
        assert!(menu.is_open());
        assert!(f.dom.has_class(&f.menu, "active"));
        assert_eq!(f.dom.attribute(&f.toggle, "aria-expanded").as_deref(), Some("true"));
        assert_eq!(f.dom.style(f.bars[0], "transform").as_deref(), Some(TOP_BAR_OPEN));
        assert_eq!(f.dom.style(f.bars[1], "opacity").as_deref(), Some("0"));
        assert_eq!(f.dom.style(f.bars[2], "transform").as_deref(), Some(BOTTOM_BAR_OPEN));

        menu.handle_click(&f.toggle);
        assert!(!menu.is_open());
        assert!(!f.dom.has_class(&f.menu, "active"));
        assert_eq!(f.dom.attribute(&f.toggle, "aria-expanded").as_deref(), Some("false"));
    }

    #[test]
    fn outside_click_closes_and_resets_bars() {
        let f = fixture();
        let menu = MobileMenu::attach(f.dom.clone()).unwrap();
        menu.toggle();

        menu.handle_click(&f.outside);
        assert!(!menu.is_open());
        assert_eq!(f.dom.attribute(&f.toggle, "aria-expanded").as_deref(), Some("false"));
        for bar in &f.bars {
            assert_eq!(f.dom.style(*bar, "transform").as_deref(), Some("none"));
            assert_eq!(f.dom.style(*bar, "opacity").as_deref(), Some("1"));
        }
    }

    #[test]
    fn clicks_inside_the_menu_keep_it_open() {
        let f = fixture();
        let menu = MobileMenu::attach(f.dom.clone()).unwrap();
        menu.toggle();

        menu.handle_click(&f.link);
        assert!(menu.is_open());
    }

    #[test]
    fn initial_state_comes_from_markup() {
        let f = fixture();
        f.dom.add_class(&f.menu, "active");
        let menu = MobileMenu::attach(f.dom.clone()).unwrap();
        assert!(menu.is_open());
    }
}
