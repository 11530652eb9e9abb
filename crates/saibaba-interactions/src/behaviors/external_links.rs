use crate::dom::Dom;

const NEW_CONTEXT_LINK_SELECTOR: &str = r#"a[target="_blank"]"#;
const SAFE_REL: &str = "noopener noreferrer";

/// Adds `rel="noopener noreferrer"` to every link that opens a new browsing
/// context. Runs once; links added afterwards are not touched.
pub fn harden<D: Dom>(dom: &D) -> usize {
    let links = dom.query_all(NEW_CONTEXT_LINK_SELECTOR);
    for link in &links {
        dom.set_attribute(link, "rel", SAFE_REL);
    }
    links.len()
}
