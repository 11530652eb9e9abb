#![allow(dead_code)]

use std::{rc::Rc, time::Duration};

use saibaba_bridge::{Disposition, PageEvent};
use saibaba_interactions::{
    SiteContext,
    dom::Dom,
    memory::{ManualScheduler, MemoryDom, NodeId},
};

pub struct Page {
    pub dom: Rc<MemoryDom>,
    pub scheduler: Rc<ManualScheduler>,
    pub site: SiteContext<MemoryDom, ManualScheduler>,
}

/// Builds a page with `build` and starts the site on it.
pub fn page(build: impl FnOnce(&MemoryDom)) -> Page {
    page_on(MemoryDom::new(), build)
}

pub fn page_on(dom: MemoryDom, build: impl FnOnce(&MemoryDom)) -> Page {
    let dom = Rc::new(dom);
    build(&dom);
    let scheduler = Rc::new(ManualScheduler::new());
    let site = saibaba_interactions::start(dom.clone(), scheduler.clone());
    Page {
        dom,
        scheduler,
        site,
    }
}

impl Page {
    pub fn click(&self, target: NodeId) -> Disposition {
        self.site.dispatch(PageEvent::Click { target })
    }

    pub fn scroll(&self, y: f64) {
        self.dom.set_scroll_y(y);
        self.site.dispatch(PageEvent::Scroll);
    }

    pub fn wait(&self, ms: u64) {
        self.scheduler.advance(Duration::from_millis(ms));
    }

    pub fn toasts(&self) -> Vec<NodeId> {
        self.dom.query_all(".notification")
    }

    pub fn toast_titles(&self) -> Vec<String> {
        self.dom
            .query_all(".notification strong")
            .iter()
            .map(|title| self.dom.text_content(title))
            .collect()
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.dom
            .query_all(".notification p")
            .iter()
            .map(|message| self.dom.text_content(message))
            .collect()
    }
}

/// An in-page link appended to the body.
pub fn link(dom: &MemoryDom, href: &str) -> NodeId {
    dom.add_to_body("a").attr("href", href).node()
}
