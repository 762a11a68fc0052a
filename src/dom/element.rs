//! Page elements and their mutable presentation state

use std::collections::BTreeMap;

/// Handle to an element stored in a [`Document`](super::Document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Vertical layout box in CSS pixels, relative to the top of the document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A `<select>` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// A single element of the page
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    /// Text content (label for buttons and links)
    pub text: String,
    /// Current value of form controls
    pub value: String,
    /// Value restored by a form reset
    pub default_value: String,
    /// Checked state of checkboxes
    pub checked: bool,
    pub default_checked: bool,
    pub options: Vec<SelectOption>,
    pub layout: LayoutBox,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        if let Some(first) = options.first() {
            self.value = first.value.clone();
            self.default_value = first.value.clone();
        }
        self.options = options;
        self
    }

    pub fn with_layout(mut self, top: f64, height: f64) -> Self {
        self.layout = LayoutBox::new(top, height);
        self
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    // Classes

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class, returning whether it is present afterwards
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Replace the whole class list
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes.clear();
        for name in class_name.split_whitespace() {
            self.add_class(name);
        }
    }

    // Inline styles

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
    }

    /// Whether inline style hides the element
    pub fn is_display_none(&self) -> bool {
        self.style("display") == Some("none")
    }

    // Attributes

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "class" => None,
            _ => self.attributes.get(name).map(String::as_str),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        match name {
            "id" => self.id.is_some(),
            "class" => !self.classes.is_empty(),
            _ => self.attributes.contains_key(name),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.set_class_name(value),
            _ => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// `href` of links, empty when absent
    pub fn href(&self) -> &str {
        self.attribute("href").unwrap_or_default()
    }

    pub fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.attribute("type") == Some("checkbox")
    }

    /// Controls that take keyboard focus
    pub fn is_focusable(&self) -> bool {
        matches!(
            self.tag.as_str(),
            "a" | "button" | "input" | "select" | "textarea"
        )
    }

    /// Controls that accept typed text
    pub fn accepts_text(&self) -> bool {
        (self.tag == "input" && !self.is_checkbox()) || self.tag == "textarea"
    }

    /// Label of the currently selected option
    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
    }

    /// Move the selection of a `<select>` by `step`, wrapping around
    pub fn cycle_option(&mut self, step: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        let current = self
            .options
            .iter()
            .position(|o| o.value == self.value)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.value = self.options[next].value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classes {
        use super::*;

        #[test]
        fn test_with_class_splits_whitespace() {
            let el = Element::new("div").with_class("form-message  success");
            assert_eq!(el.classes(), &["form-message", "success"]);
        }

        #[test]
        fn test_add_class_is_idempotent() {
            let mut el = Element::new("div");
            el.add_class("active");
            el.add_class("active");
            assert_eq!(el.class_name(), "active");
        }

        #[test]
        fn test_toggle_class_reports_state() {
            let mut el = Element::new("button");
            assert!(el.toggle_class("active"));
            assert!(el.has_class("active"));
            assert!(!el.toggle_class("active"));
            assert!(!el.has_class("active"));
        }

        #[test]
        fn test_set_class_name_replaces_list() {
            let mut el = Element::new("div").with_class("form-message error");
            el.set_class_name("form-message success");
            assert!(el.has_class("success"));
            assert!(!el.has_class("error"));
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn test_id_is_exposed_as_attribute() {
            let el = Element::new("input").with_id("email");
            assert_eq!(el.attribute("id"), Some("email"));
            assert!(el.has_attribute("id"));
        }

        #[test]
        fn test_remove_attribute_returns_old_value() {
            let mut el = Element::new("img").with_attr("data-src", "a.jpg");
            assert_eq!(el.remove_attribute("data-src"), Some("a.jpg".to_string()));
            assert!(!el.has_attribute("data-src"));
        }

        #[test]
        fn test_href_defaults_to_empty() {
            assert_eq!(Element::new("a").href(), "");
        }
    }

    mod controls {
        use super::*;

        #[test]
        fn test_checkbox_does_not_accept_text() {
            let el = Element::new("input").with_attr("type", "checkbox");
            assert!(el.is_checkbox());
            assert!(!el.accepts_text());
        }

        #[test]
        fn test_select_defaults_to_first_option() {
            let el = Element::new("select").with_options(vec![
                SelectOption::new("tak", "Nytt tak"),
                SelectOption::new("annet", "Annet"),
            ]);
            assert_eq!(el.value, "tak");
            assert_eq!(el.selected_label(), Some("Nytt tak"));
        }

        #[test]
        fn test_cycle_option_wraps_both_ways() {
            let mut el = Element::new("select").with_options(vec![
                SelectOption::new("a", "A"),
                SelectOption::new("b", "B"),
            ]);
            el.cycle_option(-1);
            assert_eq!(el.value, "b");
            el.cycle_option(1);
            assert_eq!(el.value, "a");
        }

        #[test]
        fn test_display_none() {
            let el = Element::new("div").with_style("display", "none");
            assert!(el.is_display_none());
        }
    }
}
