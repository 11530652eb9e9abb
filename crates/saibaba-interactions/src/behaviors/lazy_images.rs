use std::rc::Rc;

use crate::dom::{Dom, Observation, ObserverOptions};

const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
const DEFERRED_SOURCE: &str = "data-src";
const LAZY_CLASS: &str = "lazy";

/// Defers loading of `img[data-src]` until each image scrolls into view.
///
/// Returns the number of images handled. Without intersection observation
/// every image is loaded immediately.
pub fn attach<D: Dom + 'static>(dom: Rc<D>) -> usize {
    let images = dom.query_all(LAZY_IMAGE_SELECTOR);
    if images.is_empty() {
        return 0;
    }

    if dom.supports_intersection_observer() {
        let observer_dom = dom.clone();
        let observed = dom.observe_intersections(
            &images,
            &ObserverOptions::default(),
            Box::new(move |image: &D::Node| {
                load(&*observer_dom, image);
                Observation::Release
            }),
        );
        match observed {
            Ok(()) => return images.len(),
            Err(err) => log::warn!("Lazy loading unavailable: {err}"),
        }
    }

    for image in &images {
        load(&*dom, image);
    }
    images.len()
}

/// Swaps the deferred source into `src`.
pub fn load<D: Dom>(dom: &D, image: &D::Node) {
    if let Some(source) = dom.attribute(image, DEFERRED_SOURCE) {
        dom.set_attribute(image, "src", &source);
        dom.remove_class(image, LAZY_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn loads_once_in_view() {
        let dom = Rc::new(MemoryDom::new());
        let image = dom
            .add_to_body("img")
            .class("lazy")
            .attr("data-src", "/img/store.jpg")
            .node();

        assert_eq!(attach(dom.clone()), 1);
        assert_eq!(dom.attribute(&image, "src"), None);

        dom.reveal(image);
        assert_eq!(dom.attribute(&image, "src").as_deref(), Some("/img/store.jpg"));
        assert!(!dom.has_class(&image, "lazy"));
        assert_eq!(dom.observed_count(), 0);
    }

    #[test]
    fn loads_everything_without_observer_support() {
        let dom = Rc::new(MemoryDom::without_intersection_observer());
        let images: Vec<_> = ["/a.jpg", "/b.jpg"]
            .iter()
            .map(|src| dom.add_to_body("img").attr("data-src", src).node())
            .collect();

        assert_eq!(attach(dom.clone()), 2);
        assert_eq!(dom.attribute(&images[0], "src").as_deref(), Some("/a.jpg"));
        assert_eq!(dom.attribute(&images[1], "src").as_deref(), Some("/b.jpg"));
    }

    #[test]
    fn plain_images_are_left_alone() {
        let dom = Rc::new(MemoryDom::new());
        dom.add_to_body("img").attr("src", "/logo.svg");
        assert_eq!(attach(dom.clone()), 0);
        assert_eq!(dom.observed_count(), 0);
    }
}
