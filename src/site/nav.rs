//! Navigation behaviors: mobile menu and active link marking

use crate::dom::{Document, ElementId, EventContext, EventListener, PageEvent};

/// Inline style written to each toggle bar as (property, open, closed)
const BAR_STYLES: [(&str, &str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)", "none"),
    ("opacity", "0", "1"),
    ("transform", "rotate(-45deg) translate(7px, -6px)", "none"),
];

/// Opens and closes the mobile navigation menu
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(
        &mut self,
        document: &mut Document,
        menu: ElementId,
        toggle: ElementId,
        open: bool,
    ) {
        self.open = open;
        for id in [menu, toggle] {
            if open {
                document.add_class(id, "active");
            } else {
                document.remove_class(id, "active");
            }
        }

        let spans = document.query_selector_all_in(toggle, "span");
        for (span, (property, on, off)) in spans.into_iter().zip(BAR_STYLES) {
            document.set_style(span, property, if open { on } else { off });
        }
    }
}

impl EventListener for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile-menu"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        let PageEvent::Click { target } = event else {
            return;
        };
        let doc = &mut *cx.document;
        let (Some(toggle), Some(menu)) = (
            doc.query_selector(".mobile-toggle"),
            doc.query_selector(".nav-menu"),
        ) else {
            return;
        };

        if doc.contains(toggle, *target) {
            let open = !doc.has_class(menu, "active");
            tracing::debug!("Mobile menu {}", if open { "opened" } else { "closed" });
            self.set_open(doc, menu, toggle, open);
        } else if doc.closest(*target, ".nav-link").is_some() || !doc.contains(menu, *target) {
            self.set_open(doc, menu, toggle, false);
        }
    }
}

/// Last path segment, or `index.html` for the site root
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => "index.html",
    }
}

/// Marks the navigation link for the current page
#[derive(Debug, Default)]
pub struct ActiveNavLink;

impl ActiveNavLink {
    pub fn apply(document: &mut Document) {
        let page = current_page(document.location_path()).to_string();
        for link in document.query_selector_all(".nav-link") {
            if document.element(link).href() == page {
                document.add_class(link, "active");
            }
        }
    }
}

impl EventListener for ActiveNavLink {
    fn name(&self) -> &'static str {
        "active-nav-link"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        if matches!(event, PageEvent::DomContentLoaded) {
            Self::apply(cx.document);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{EventBus, EventKind, Viewport};
    use crate::site::page::build_page;

    fn setup() -> (Document, EventBus) {
        let doc = build_page("/index.html", Viewport::new(600.0, 600.0), "+47 900 00 000");
        let mut bus = EventBus::new();
        bus.subscribe(&[EventKind::Click], MobileMenu::new());
        (doc, bus)
    }

    fn click(bus: &mut EventBus, doc: &mut Document, target: ElementId) {
        bus.dispatch(doc, &PageEvent::Click { target });
    }

    fn bar_transforms(doc: &Document) -> Vec<String> {
        let toggle = doc.query_selector(".mobile-toggle").unwrap();
        doc.query_selector_all_in(toggle, "span")
            .into_iter()
            .map(|s| doc.element(s).style("transform").unwrap_or("-").to_string())
            .collect()
    }

    mod mobile_menu {
        use super::*;

        #[test]
        fn test_toggle_opens_and_morphs_bars() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let menu = doc.query_selector(".nav-menu").unwrap();

            click(&mut bus, &mut doc, toggle);

            assert!(doc.has_class(menu, "active"));
            assert!(doc.has_class(toggle, "active"));
            assert_eq!(
                bar_transforms(&doc),
                vec![
                    "rotate(45deg) translate(5px, 5px)",
                    "-",
                    "rotate(-45deg) translate(7px, -6px)",
                ]
            );
            let middle = doc.query_selector_all_in(toggle, "span")[1];
            assert_eq!(doc.element(middle).style("opacity"), Some("0"));
        }

        #[test]
        fn test_second_toggle_closes() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let menu = doc.query_selector(".nav-menu").unwrap();

            click(&mut bus, &mut doc, toggle);
            click(&mut bus, &mut doc, toggle);

            assert!(!doc.has_class(menu, "active"));
            assert_eq!(bar_transforms(&doc), vec!["none", "-", "none"]);
            let middle = doc.query_selector_all_in(toggle, "span")[1];
            assert_eq!(doc.element(middle).style("opacity"), Some("1"));
        }

        #[test]
        fn test_clicking_bar_inside_toggle_counts_as_toggle() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let bar = doc.query_selector_all_in(toggle, "span")[0];

            click(&mut bus, &mut doc, bar);

            assert!(doc.has_class(toggle, "active"));
        }

        #[test]
        fn test_nav_link_click_closes() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let link = doc.query_selector(".nav-link").unwrap();

            click(&mut bus, &mut doc, toggle);
            click(&mut bus, &mut doc, link);

            assert!(!doc.has_class(toggle, "active"));
        }

        #[test]
        fn test_outside_click_closes() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let hero = doc.get_element_by_id("hjem").unwrap();

            click(&mut bus, &mut doc, toggle);
            click(&mut bus, &mut doc, hero);

            assert!(!doc.has_class(toggle, "active"));
        }

        #[test]
        fn test_click_on_menu_background_keeps_open() {
            let (mut doc, mut bus) = setup();
            let toggle = doc.query_selector(".mobile-toggle").unwrap();
            let menu = doc.query_selector(".nav-menu").unwrap();

            click(&mut bus, &mut doc, toggle);
            click(&mut bus, &mut doc, menu);

            assert!(doc.has_class(menu, "active"));
        }

        #[test]
        fn test_missing_toggle_is_noop() {
            let mut doc = Document::new("/", Viewport::new(600.0, 600.0));
            let body = doc.body();
            let mut menu = MobileMenu::new();
            let mut cx = EventContext::new(&mut doc);
            menu.handle(&PageEvent::Click { target: body }, &mut cx);
            assert!(!menu.is_open());
        }
    }

    mod active_link {
        use super::*;

        #[test]
        fn test_current_page() {
            assert_eq!(current_page("/tjenester.html"), "tjenester.html");
            assert_eq!(current_page("/a/b/kontakt.html"), "kontakt.html");
            assert_eq!(current_page("/"), "index.html");
            assert_eq!(current_page(""), "index.html");
        }

        #[test]
        fn test_marks_matching_link_only() {
            let mut doc =
                build_page("/tjenester.html", Viewport::new(1024.0, 600.0), "+47 900 00 000");
            ActiveNavLink::apply(&mut doc);

            let active: Vec<&str> = doc
                .query_selector_all(".nav-link.active")
                .into_iter()
                .map(|id| doc.element(id).href())
                .collect();
            assert_eq!(active, vec!["tjenester.html"]);
        }

        #[test]
        fn test_root_marks_index() {
            let mut doc = build_page("/", Viewport::new(1024.0, 600.0), "+47 900 00 000");
            let mut bus = EventBus::new();
            bus.subscribe(&[EventKind::DomContentLoaded], ActiveNavLink);
            bus.dispatch(&mut doc, &PageEvent::DomContentLoaded);

            let active = doc.query_selector(".nav-link.active").unwrap();
            assert_eq!(doc.element(active).href(), "index.html");
        }
    }
}
