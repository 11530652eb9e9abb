//! [`Dom`] over the browser document.

use js_sys::{Array, Reflect};
use saibaba_interactions::dom::{
    Dom, DomError, IntersectionCallback, Observation, ObserverOptions,
};
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, ScrollBehavior,
    ScrollToOptions, Window,
};

const INTERSECTION_OBSERVER: &str = "IntersectionObserver";

/// The live browser document.
///
/// Calls the browser rejects are logged and otherwise treated like a lookup
/// that found nothing.
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

fn logged<T>(result: Result<T, JsValue>, action: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{action} failed: {err:?}");
            None
        }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        logged(self.document.query_selector(selector), selector).flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        logged(self.document.query_selector_all(selector), selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        logged(scope.query_selector(selector), selector).flatten()
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        logged(scope.query_selector_all(selector), selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        logged(node.closest(selector), selector).flatten()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        logged(node.set_attribute(name, value), "setAttribute");
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        logged(node.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, node: &Element, class: &str) {
        logged(node.class_list().remove_1(class), "classList.remove");
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            logged(element.style().set_property(property, value), "style.setProperty");
        }
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document.create_element(tag).map_err(|err| {
            log::debug!("createElement({tag}) rejected: {err:?}");
            DomError::CreateElement(tag.to_owned())
        })
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        logged(parent.append_child(child), "appendChild");
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn bounding_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn scroll_y(&self) -> f64 {
        logged(self.window.scroll_y(), "scrollY").unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn form_value(&self, form: &Element, field: &str) -> Option<String> {
        let form = form.dyn_ref::<HtmlFormElement>()?;
        let data = logged(FormData::new_with_form(form), "new FormData")?;
        data.get(field).as_string()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn supports_intersection_observer(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str(INTERSECTION_OBSERVER)).unwrap_or(false)
    }

    fn observe_intersections(
        &self,
        targets: &[Element],
        options: &ObserverOptions,
        mut on_enter: IntersectionCallback<Element>,
    ) -> Result<(), DomError> {
        if !self.supports_intersection_observer() {
            return Err(DomError::Unsupported(INTERSECTION_OBSERVER));
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if on_enter(&target) == Observation::Release {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| {
                    log::warn!("IntersectionObserver rejected its options: {err:?}");
                    DomError::Unsupported(INTERSECTION_OBSERVER)
                })?;
        for target in targets {
            observer.observe(target);
        }
        callback.forget();
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlInputElement;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const OBSERVER_SETTLE_MS: u32 = 200;

    fn web_dom() -> WebDom {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        WebDom::new(window, document)
    }

    fn contact_form(dom: &WebDom) -> (Element, HtmlInputElement) {
        let form = dom.create_element("form").unwrap();
        let input: HtmlInputElement = dom.create_element("input").unwrap().unchecked_into();
        input.set_name("name");
        dom.append_child(&form, &input);
        dom.append_child(&dom.body().unwrap(), &form);
        (form, input)
    }

    #[wasm_bindgen_test]
    fn form_fields_read_back_and_reset() {
        let dom = web_dom();
        let (form, input) = contact_form(&dom);

        input.set_value("Priya");
        assert_eq!(dom.form_value(&form, "name").as_deref(), Some("Priya"));
        assert_eq!(dom.form_value(&form, "email"), None);

        dom.reset_form(&form);
        assert_eq!(dom.form_value(&form, "name").as_deref(), Some(""));
        form.remove();
    }

    #[wasm_bindgen_test]
    fn non_form_elements_have_no_values() {
        let dom = web_dom();
        let div = dom.create_element("div").unwrap();
        assert_eq!(dom.form_value(&div, "name"), None);
    }

    #[wasm_bindgen_test]
    async fn released_targets_are_not_reported_again() {
        let dom = web_dom();
        let card = dom.create_element("div").unwrap();
        card.set_attribute(
            "style",
            "position: fixed; top: 0; left: 0; width: 20px; height: 20px;",
        )
        .unwrap();
        dom.append_child(&dom.body().unwrap(), &card);

        let entered = Rc::new(Cell::new(0));
        let counter = entered.clone();
        let options = ObserverOptions {
            threshold: 0.0,
            root_margin: "0px".into(),
        };
        dom.observe_intersections(
            std::slice::from_ref(&card),
            &options,
            Box::new(move |_: &Element| {
                counter.set(counter.get() + 1);
                Observation::Release
            }),
        )
        .unwrap();

        TimeoutFuture::new(OBSERVER_SETTLE_MS).await;
        assert_eq!(entered.get(), 1);

        dom.set_style(&card, "display", "none");
        TimeoutFuture::new(OBSERVER_SETTLE_MS).await;
        dom.set_style(&card, "display", "block");
        TimeoutFuture::new(OBSERVER_SETTLE_MS).await;
        assert_eq!(entered.get(), 1);
        card.remove();
    }
}
