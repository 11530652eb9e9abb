//! Click intent classification and dispatch.
//!
//! Every click is classified once into an [`Intent`]; the dispatcher then
//! looks the intent up in the [`MessageTable`] and presents the matching
//! toast. Placeholder links are only intercepted while the section they
//! point at is missing: the check runs against the live document on every
//! click, so building the real section retires its popup.

use std::rc::Rc;

use saibaba_bridge::{Disposition, intent::Intent, notification::NotificationRequest};

use crate::{
    dom::{Dom, Scheduler, anchor_target},
    formatting::{collapse_whitespace, directions_message},
    notifications::{MessageTable, MessageTemplate, Presenter, READ_MORE_KEY},
};

const FEATURE_CARD_SELECTOR: &str = ".feature-card";
const DIRECTIONS_SELECTOR: &str = ".location-card .btn";
const NEWS_LINK_SELECTOR: &str = r##".read-more, a[href="#all-news"]"##;
const IN_PAGE_LINK_SELECTOR: &str = r##"a[href^="#"]"##;

/// Classifies a click on `target`.
///
/// Checks run in a fixed order and the first match wins: call-to-action
/// buttons, directions buttons, the logo, placeholder links, feature cards.
pub fn classify<D: Dom>(dom: &D, table: &MessageTable, target: &D::Node) -> Option<Intent> {
    let buttons = [
        (r##"a[href="#catering"]"##, Intent::OrderCatering),
        (r##"a[href="#careers"]"##, Intent::JoinTeam),
        (r##"a[href="#apply"]"##, Intent::Apply),
        (r##"a[href="#contribution"]"##, Intent::RequestContribution),
    ];
    for (selector, intent) in buttons {
        if dom.closest(target, selector).is_some() {
            return Some(intent);
        }
    }

    if let Some(button) = dom.closest(target, DIRECTIONS_SELECTOR) {
        return Some(directions(dom, &button));
    }

    if let Some(logo) = dom.closest(target, ".logo")
        && dom.attribute(&logo, "href").as_deref() == Some("#")
    {
        return Some(Intent::BackToTop);
    }

    if let Some(intent) = placeholder(dom, table, target) {
        return Some(intent);
    }

    feature_card(dom, target)
}

fn directions<D: Dom>(dom: &D, button: &D::Node) -> Intent {
    let card = dom.closest(button, ".location-card");
    let text_of = |selector: &str| {
        card.as_ref()
            .and_then(|card| dom.query_in(card, selector))
            .map(|node| collapse_whitespace(&dom.text_content(&node)))
            .unwrap_or_default()
    };
    Intent::GetDirections {
        location: text_of("h3"),
        address: text_of(".location-address"),
    }
}

fn placeholder<D: Dom>(dom: &D, table: &MessageTable, target: &D::Node) -> Option<Intent> {
    if let Some(link) = dom.closest(target, NEWS_LINK_SELECTOR) {
        let href = dom.attribute(&link, "href").unwrap_or_default();
        if anchor_target(dom, &href).is_some() {
            return None;
        }
        let key = if href == "#all-news" {
            "#all-news"
        } else {
            READ_MORE_KEY
        };
        return Some(Intent::Placeholder { key: key.to_owned() });
    }

    let link = dom.closest(target, IN_PAGE_LINK_SELECTOR)?;
    let href = dom.attribute(&link, "href")?;
    if table.contains(&href) && anchor_target(dom, &href).is_none() {
        Some(Intent::Placeholder { key: href })
    } else {
        None
    }
}

fn feature_card<D: Dom>(dom: &D, target: &D::Node) -> Option<Intent> {
    let card = dom.closest(target, FEATURE_CARD_SELECTOR)?;
    if dom.query_in(&card, "a").is_some() {
        return None;
    }
    let heading = dom.query_in(&card, "h3")?;
    Some(Intent::FeatureCard {
        heading: dom.text_content(&heading).trim().to_owned(),
    })
}

/// Routes classified clicks to the presenter.
pub struct IntentDispatcher<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    presenter: Presenter<D, S>,
    table: MessageTable,
}

impl<D: Dom + 'static, S: Scheduler + 'static> IntentDispatcher<D, S> {
    /// Creates the dispatcher and marks feature cards without their own
    /// link as clickable.
    pub fn attach(dom: Rc<D>, presenter: Presenter<D, S>, table: MessageTable) -> Self {
        for card in dom.query_all(FEATURE_CARD_SELECTOR) {
            if dom.query_in(&card, "a").is_none() {
                dom.set_style(&card, "cursor", "pointer");
            }
        }
        Self {
            dom,
            presenter,
            table,
        }
    }

    pub fn table(&self) -> &MessageTable {
        &self.table
    }

    /// Classifies a click and handles the resulting intent, if any.
    pub fn handle_click(&self, target: &D::Node) -> Disposition {
        match classify(&*self.dom, &self.table, target) {
            Some(intent) => {
                log::debug!("Classified click as {intent:?}");
                self.dispatch(&intent)
            }
            None => Disposition::Proceed,
        }
    }

    /// Presents the toast for `intent` and reports whether the click's
    /// default action must be suppressed.
    pub fn dispatch(&self, intent: &Intent) -> Disposition {
        let request = match intent {
            Intent::GetDirections { location, address } => Some(NotificationRequest::info(
                "🗺️ Getting Directions",
                directions_message(location, address),
            )),
            Intent::BackToTop => {
                self.dom.scroll_to(0.0);
                None
            }
            other => {
                let template = other.message_key().and_then(|key| self.table.resolve(key));
                if template.is_none() {
                    log::debug!("No popup registered for {other:?}");
                }
                template.map(MessageTemplate::to_request)
            }
        };

        if let Some(request) = request
            && let Err(err) = self.presenter.present(&request)
        {
            log::warn!("Failed to present {:?}: {err}", request.title);
        }

        if intent.preempts_navigation() {
            Disposition::PreventDefault
        } else {
            Disposition::Proceed
        }
    }
}
