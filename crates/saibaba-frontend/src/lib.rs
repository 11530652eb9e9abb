//! Browser entry point.
//!
//! Binds [`saibaba_interactions`] to the live page: [`WebDom`] and
//! [`BrowserScheduler`] implement its platform traits, and [`run`] forwards
//! document and window events to the site context, calling
//! `preventDefault` when it asks to.

use std::rc::Rc;

use anyhow::{Context, anyhow};
use saibaba_bridge::PageEvent;
use saibaba_interactions::SiteContext;
use wasm_bindgen::{JsCast, prelude::Closure};
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, Window};

pub mod dom;
pub mod scheduler;

pub use crate::dom::WebDom;
pub use crate::scheduler::BrowserScheduler;

pub type Site = SiteContext<WebDom, BrowserScheduler>;

const READY_COMPLETE: &str = "complete";

/// Attaches the site's behaviors to the current page.
pub fn run() -> anyhow::Result<()> {
    let window = web_sys::window().context("no global window")?;
    let document = window.document().context("window has no document")?;
    attach(&window, &document)?;
    Ok(())
}

/// Starts the site on `document` and forwards its events.
///
/// Listener closures are leaked: they live as long as the page. A document
/// that has already finished loading is handled as loaded immediately.
pub fn attach(window: &Window, document: &Document) -> anyhow::Result<Rc<Site>> {
    let dom = Rc::new(WebDom::new(window.clone(), document.clone()));
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    let site = Rc::new(saibaba_interactions::start(dom, scheduler));

    listen(document, "click", false, site.clone(), |event| {
        event_element(event).map(|target| PageEvent::Click { target })
    })?;
    listen(document, "submit", false, site.clone(), |event| {
        event_element(event).map(|form| PageEvent::Submit { form })
    })?;
    listen(window, "scroll", true, site.clone(), |_| Some(PageEvent::Scroll))?;

    if document.ready_state() == READY_COMPLETE {
        log::debug!("Document already loaded");
        site.dispatch(PageEvent::Load);
    } else {
        listen(window, "load", false, site.clone(), |_| Some(PageEvent::Load))?;
    }

    log::debug!("Page listeners attached");
    Ok(site)
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn listen<F>(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    site: Rc<Site>,
    to_page_event: F,
) -> anyhow::Result<()>
where
    F: Fn(&Event) -> Option<PageEvent<Element>> + 'static,
{
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(page_event) = to_page_event(&event) else {
            return;
        };
        if site.dispatch(page_event).is_prevented() {
            event.prevent_default();
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            listener.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| anyhow!("failed to listen for {kind} events: {err:?}"))?;
    listener.forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> (Window, Document) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        (window, document)
    }

    #[wasm_bindgen_test]
    fn body_is_marked_loaded_whenever_attach_runs() {
        let (window, document) = page();
        let body = document.body().unwrap();
        body.class_list().remove_1("loaded").unwrap();

        attach(&window, &document).unwrap();
        if document.ready_state() != READY_COMPLETE {
            window.dispatch_event(&Event::new("load").unwrap()).unwrap();
        }
        assert!(body.class_list().contains("loaded"));
    }

    #[wasm_bindgen_test]
    fn order_catering_click_suppresses_navigation() {
        let (window, document) = page();
        attach(&window, &document).unwrap();

        let link = document.create_element("a").unwrap();
        link.set_attribute("href", "#catering").unwrap();
        link.set_text_content(Some("Order Catering"));
        document.body().unwrap().append_child(&link).unwrap();

        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let click = Event::new_with_event_init_dict("click", &init).unwrap();
        link.dispatch_event(&click).unwrap();

        assert!(click.default_prevented());
        assert!(document.query_selector(".notification").unwrap().is_some());
        link.remove();
    }

    #[wasm_bindgen_test]
    fn unrelated_click_proceeds() {
        let (window, document) = page();
        attach(&window, &document).unwrap();

        let span = document.create_element("span").unwrap();
        document.body().unwrap().append_child(&span).unwrap();

        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let click = Event::new_with_event_init_dict("click", &init).unwrap();
        span.dispatch_event(&click).unwrap();

        assert!(!click.default_prevented());
        span.remove();
    }
}
