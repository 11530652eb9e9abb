use std::rc::Rc;

use saibaba_bridge::{Disposition, notification::NotificationRequest};

use crate::{
    dom::{Dom, Scheduler},
    formatting::contact_confirmation,
    notifications::Presenter,
};

pub const CONTACT_FORM_ID: &str = "contactForm";

/// The fields captured from a contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Reads the named fields of `form`. Missing fields read as empty.
    pub fn read<D: Dom>(dom: &D, form: &D::Node) -> Self {
        let field = |name: &str| dom.form_value(form, name).unwrap_or_default();
        Self {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            subject: field("subject"),
            message: field("message"),
        }
    }
}

/// Front-end stub for the contact form: nothing is sent anywhere.
pub struct ContactForm<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    presenter: Presenter<D, S>,
}

impl<D: Dom + 'static, S: Scheduler + 'static> ContactForm<D, S> {
    pub fn new(dom: Rc<D>, presenter: Presenter<D, S>) -> Self {
        Self { dom, presenter }
    }

    /// Handles submission of `form`. Forms other than the contact form are
    /// left to submit normally.
    pub fn handle_submit(&self, form: &D::Node) -> Disposition {
        let dom = &*self.dom;
        if dom.attribute(form, "id").as_deref() != Some(CONTACT_FORM_ID) {
            return Disposition::Proceed;
        }

        let submission = ContactSubmission::read(dom, form);
        let request = NotificationRequest::success(
            "✅ Message Sent!",
            contact_confirmation(&submission.name, &submission.email),
        );
        if let Err(err) = self.presenter.present(&request) {
            log::warn!("Failed to confirm contact submission: {err}");
        }
        dom.reset_form(form);
        log::info!("Contact form submission: {submission:?}");
        Disposition::PreventDefault
    }
}
