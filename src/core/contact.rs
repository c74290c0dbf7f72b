// MainStreet - core/contact.rs
//
// Contact-the-owner modal: a two-view state machine (form, submitted) plus
// the lead payload it produces. Delivery is the app layer's job; this
// module only decides when a submission is complete and what it carries.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which face of the modal is showing. "Closed" is not a view here: the
/// app layer represents closed by not holding a form at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactView {
    Form,
    Submitted,
}

/// The captured lead, exactly what a delivery collaborator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub business: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Contact form state for one target business.
#[derive(Debug, Clone)]
pub struct ContactForm {
    /// Display name of the business being contacted.
    pub business: String,

    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,

    pub view: ContactView,

    /// Set when a delivery attempt failed; shown inline on the form.
    pub delivery_error: Option<String>,
}

impl ContactForm {
    /// Fresh form targeting one business. Every field starts empty, so a
    /// reopened modal never shows another listing's draft.
    pub fn open(business: &str) -> Self {
        Self {
            business: business.to_string(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            subject: String::new(),
            message: String::new(),
            view: ContactView::Form,
            delivery_error: None,
        }
    }

    /// Labels of required fields still blank. Name, email, and message
    /// are required; phone and subject are optional. Whitespace-only
    /// input counts as blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Name");
        }
        if self.email.trim().is_empty() {
            missing.push("Email");
        }
        if self.message.trim().is_empty() {
            missing.push("Message");
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Build the lead payload, or None while required fields are blank.
    /// Field values are trimmed; nothing else is validated.
    pub fn build_lead(&self, submitted_at: DateTime<Utc>) -> Option<Lead> {
        if !self.can_submit() {
            return None;
        }
        Some(Lead {
            business: self.business.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            submitted_at,
        })
    }

    /// Delivery succeeded: flip to the confirmation view. The modal stays
    /// open; dismissing it is a separate user action.
    pub fn mark_submitted(&mut self) {
        self.view = ContactView::Submitted;
        self.delivery_error = None;
    }

    /// Delivery failed: stay on the form and surface the reason so the
    /// user can retry without retyping anything.
    pub fn mark_failed(&mut self, reason: String) {
        self.delivery_error = Some(reason);
    }
}
