//! Page startup.

use std::rc::Rc;

use crate::{
    app::SiteContext,
    config::load_config,
    dom::{Dom, Scheduler},
};

/// Loads the page's configuration and attaches every behavior.
///
/// A malformed embedded configuration is logged and replaced by the
/// defaults; the page keeps working either way.
pub fn start<D, S>(dom: Rc<D>, scheduler: Rc<S>) -> SiteContext<D, S>
where
    D: Dom + 'static,
    S: Scheduler + 'static,
{
    let config = load_config(&*dom).unwrap_or_else(|err| {
        log::warn!("Ignoring site configuration: {err}");
        Default::default()
    });
    SiteContext::attach(dom, scheduler, config)
}
