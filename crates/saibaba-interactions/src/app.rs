//! Site context and page event routing.
//!
//! The context owns every attached behavior and routes each page event
//! through them in a fixed order, merging their answers into one
//! [`Disposition`].

use std::{rc::Rc, time::Duration};

use saibaba_bridge::{Disposition, PageEvent, config::SiteConfig};

use crate::{
    behaviors::{
        ActiveNav, ContactForm, HeaderShrink, HeroSlider, MobileMenu, SmoothScroll, analytics,
        external_links, lazy_images, scroll_reveal,
    },
    dispatcher::IntentDispatcher,
    dom::{Dom, Scheduler},
    notifications::{MessageTable, Presenter},
};

const LOADED_CLASS: &str = "loaded";

/// Everything attached to one page.
pub struct SiteContext<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    config: SiteConfig,
    presenter: Presenter<D, S>,
    dispatcher: IntentDispatcher<D, S>,
    menu: Option<MobileMenu<D>>,
    smooth_scroll: SmoothScroll<D>,
    header: Option<Rc<HeaderShrink<D, S>>>,
    active_nav: ActiveNav<D>,
    hero: Option<Rc<HeroSlider<D>>>,
    contact_form: ContactForm<D, S>,
}

impl<D: Dom + 'static, S: Scheduler + 'static> SiteContext<D, S> {
    /// Attaches every behavior to the page.
    pub fn attach(dom: Rc<D>, scheduler: Rc<S>, config: SiteConfig) -> Self {
        log::info!("Welcome to {}!", config.site_name);
        log::info!("{}", config.tagline);

        let presenter = Presenter::new(dom.clone(), scheduler.clone(), config.toast.clone());
        let dispatcher =
            IntentDispatcher::attach(dom.clone(), presenter.clone(), MessageTable::new());
        let menu = MobileMenu::attach(dom.clone());
        let smooth_scroll = SmoothScroll::new(dom.clone(), config.scroll.header_offset);
        let header =
            HeaderShrink::attach(dom.clone(), scheduler.clone(), config.scroll.shrink_threshold);
        let active_nav = ActiveNav::new(dom.clone(), config.scroll.active_nav_margin);
        let hero = HeroSlider::attach(
            dom.clone(),
            &*scheduler,
            Duration::from_millis(u64::from(config.hero.interval_ms)),
        );
        let contact_form = ContactForm::new(dom.clone(), presenter.clone());

        let revealed = scroll_reveal::attach(dom.clone(), &config.reveal);
        let lazy = lazy_images::attach(dom.clone());
        let hardened = external_links::harden(&*dom);
        log::debug!(
            "Attached: {revealed} reveal target(s), {lazy} lazy image(s), {hardened} external link(s)"
        );

        Self {
            dom,
            config,
            presenter,
            dispatcher,
            menu,
            smooth_scroll,
            header,
            active_nav,
            hero,
            contact_form,
        }
    }

    /// Routes a page event through the attached behaviors.
    pub fn dispatch(&self, event: PageEvent<D::Node>) -> Disposition {
        match event {
            PageEvent::Click { target } => self.handle_click(&target),
            PageEvent::Scroll => {
                if let Some(header) = &self.header {
                    header.handle_scroll();
                }
                self.active_nav.handle_scroll();
                Disposition::Proceed
            }
            PageEvent::Submit { form } => self.contact_form.handle_submit(&form),
            PageEvent::Load => {
                if let Some(body) = self.dom.body() {
                    self.dom.add_class(&body, LOADED_CLASS);
                }
                Disposition::Proceed
            }
        }
    }

    fn handle_click(&self, target: &D::Node) -> Disposition {
        self.presenter.handle_click(target);
        if let Some(menu) = &self.menu {
            menu.handle_click(target);
        }
        analytics::handle_click(&*self.dom, target);
        self.smooth_scroll
            .handle_click(target, self.menu.as_ref())
            .merge(self.dispatcher.handle_click(target))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn presenter(&self) -> &Presenter<D, S> {
        &self.presenter
    }

    pub fn dispatcher(&self) -> &IntentDispatcher<D, S> {
        &self.dispatcher
    }

    pub fn menu(&self) -> Option<&MobileMenu<D>> {
        self.menu.as_ref()
    }

    pub fn header(&self) -> Option<&HeaderShrink<D, S>> {
        self.header.as_deref()
    }

    pub fn active_nav(&self) -> &ActiveNav<D> {
        &self.active_nav
    }

    pub fn hero(&self) -> Option<&HeroSlider<D>> {
        self.hero.as_deref()
    }
}
