//! Captured contact form values

use crate::dom::{Document, ElementId};
use serde::{Deserialize, Serialize};

/// The contact form fields for one submission attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub location: String,
    pub project_type: String,
    pub description: String,
    #[serde(default)]
    pub want_site_visit: bool,
}

impl FormInput {
    /// Read the fields of `form`. Missing elements resolve to empty values
    /// (or `false` for the site visit checkbox) instead of failing.
    pub fn from_form(document: &Document, form: ElementId) -> Self {
        let text = |selector: &str| {
            document
                .query_selector_in(form, selector)
                .map(|id| document.value(id).to_string())
                .unwrap_or_default()
        };

        Self {
            name: text("#name"),
            email: text("#email"),
            phone: text("#phone"),
            location: text("#location"),
            project_type: text("#project-type"),
            description: text("#description"),
            want_site_visit: document
                .query_selector_in(form, "#site-visit")
                .is_some_and(|id| document.element(id).checked),
        }
    }

    /// Location for display, with the fallback used in the notification email
    pub fn location_or_fallback(&self) -> &str {
        if self.location.trim().is_empty() {
            "Ikke oppgitt"
        } else {
            &self.location
        }
    }
}
