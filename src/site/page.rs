//! Builds the site's page document

use crate::contact::{CONTACT_FORM_ID, FORM_MESSAGE_ID, SUBMIT_LABEL};
use crate::dom::{Document, Element, ElementId, SelectOption, Viewport};

pub const SITE_NAME: &str = "Dan Ivanov Bygg & Tak";
pub const HEADER_HEIGHT: f64 = 60.0;

/// Navigation entries as (href, label)
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("index.html", "Hjem"),
    ("tjenester.html", "Tjenester"),
    ("prosjekter.html", "Prosjekter"),
    ("kontakt.html", "Kontakt"),
];

/// Project types offered in the contact form as (value, label)
pub const PROJECT_TYPES: &[(&str, &str)] = &[
    ("takomlegging", "Takomlegging"),
    ("takreparasjon", "Takreparasjon"),
    ("lekkasje", "Akutt lekkasje"),
    ("takrenner", "Takrenner og beslag"),
    ("tilbygg", "Tilbygg og rehabilitering"),
    ("annet", "Annet"),
];

const SERVICES: &[(&str, &str)] = &[
    ("Takomlegging", "Nytt tak med materialer som tåler norsk vær."),
    ("Takreparasjon", "Utbedring av skader etter storm, snø og alder."),
    ("Lekkasjesøk", "Rask hjelp når vannet først har funnet veien inn."),
    ("Takrenner og beslag", "Montering og utskifting av renner, nedløp og beslag."),
];

const PROJECT_IMAGES: &[(&str, &str)] = &[
    ("images/prosjekt-takomlegging.jpg", "Takomlegging på enebolig"),
    ("images/prosjekt-skifer.jpg", "Skifertak etter rehabilitering"),
    ("images/prosjekt-takrenner.jpg", "Nye takrenner og beslag"),
];

/// Appends elements top to bottom, assigning each a layout box
struct PageBuilder {
    doc: Document,
    cursor: f64,
}

impl PageBuilder {
    fn new(path: &str, viewport: Viewport) -> Self {
        Self {
            doc: Document::new(path, viewport),
            cursor: 0.0,
        }
    }

    /// Append a leaf occupying `height` pixels of the flow
    fn block(&mut self, parent: ElementId, element: Element, height: f64) -> ElementId {
        let id = self
            .doc
            .append(parent, element.with_layout(self.cursor, height));
        self.cursor += height;
        id
    }

    /// Append an element outside the flow
    fn fixed(&mut self, parent: ElementId, element: Element, top: f64, height: f64) -> ElementId {
        self.doc.append(parent, element.with_layout(top, height))
    }

    /// Append a container whose box spans whatever `fill` adds to the flow
    fn section(
        &mut self,
        parent: ElementId,
        element: Element,
        fill: impl FnOnce(&mut Self, ElementId),
    ) -> ElementId {
        let top = self.cursor;
        let id = self.doc.append(parent, element);
        fill(self, id);
        self.doc.element_mut(id).layout = crate::dom::LayoutBox::new(top, self.cursor - top);
        id
    }

    fn gap(&mut self, height: f64) {
        self.cursor += height;
    }
}

fn phone_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

/// Build the page served at `path`
pub fn build_page(path: &str, viewport: Viewport, phone: &str) -> Document {
    let mut b = PageBuilder::new(path, viewport);
    let body = b.doc.body();
    let tel = phone_href(phone);

    // Header (fixed)
    let header = b.fixed(body, Element::new("header").with_class("header"), 0.0, HEADER_HEIGHT);
    b.fixed(
        header,
        Element::new("a")
            .with_class("logo")
            .with_attr("href", "index.html")
            .with_text(SITE_NAME),
        0.0,
        HEADER_HEIGHT,
    );
    let nav = b.fixed(header, Element::new("nav"), 0.0, HEADER_HEIGHT);
    let menu = b.fixed(nav, Element::new("ul").with_class("nav-menu"), 0.0, HEADER_HEIGHT);
    for (href, label) in NAV_LINKS {
        b.fixed(
            menu,
            Element::new("a")
                .with_class("nav-link")
                .with_attr("href", href)
                .with_text(label),
            0.0,
            HEADER_HEIGHT,
        );
    }
    let toggle = b.fixed(
        header,
        Element::new("button")
            .with_class("mobile-toggle")
            .with_attr("aria-label", "Meny"),
        0.0,
        HEADER_HEIGHT,
    );
    for _ in 0..3 {
        b.fixed(toggle, Element::new("span"), 0.0, 0.0);
    }
    b.fixed(
        header,
        Element::new("a")
            .with_class("header-phone")
            .with_attr("href", &tel)
            .with_text(phone),
        0.0,
        HEADER_HEIGHT,
    );
    b.gap(HEADER_HEIGHT);

    // Hero
    b.section(
        body,
        Element::new("section").with_id("hjem").with_class("hero"),
        |b, hero| {
            b.gap(20.0);
            b.block(hero, Element::new("h1").with_text("Tak du kan stole på"), 40.0);
            b.block(
                hero,
                Element::new("p").with_text(
                    "Takomlegging, reparasjon og lekkasjesøk. Gratis befaring og fast pris.",
                ),
                40.0,
            );
            b.block(
                hero,
                Element::new("a")
                    .with_class("btn")
                    .with_attr("href", "#kontakt")
                    .with_text("Få gratis befaring"),
                60.0,
            );
            b.block(
                hero,
                Element::new("a")
                    .with_class("btn btn-outline")
                    .with_attr("href", &tel)
                    .with_text(&format!("Ring {phone}")),
                60.0,
            );
            b.gap(20.0);
        },
    );

    // Services
    b.section(
        body,
        Element::new("section").with_id("tjenester"),
        |b, section| {
            b.block(section, Element::new("h2").with_text("Våre tjenester"), 40.0);
            for (title, summary) in SERVICES {
                b.section(
                    section,
                    Element::new("div").with_class("service-card animate-on-scroll"),
                    |b, card| {
                        b.gap(20.0);
                        b.block(card, Element::new("h3").with_text(title), 20.0);
                        b.block(card, Element::new("p").with_text(summary), 40.0);
                        b.gap(20.0);
                    },
                );
            }
            b.gap(20.0);
        },
    );

    // Project gallery
    b.section(
        body,
        Element::new("section").with_id("prosjekter"),
        |b, section| {
            b.block(section, Element::new("h2").with_text("Utvalgte prosjekter"), 40.0);
            for (src, alt) in PROJECT_IMAGES {
                b.block(
                    section,
                    Element::new("img")
                        .with_attr("data-src", src)
                        .with_attr("alt", alt)
                        .with_class("animate-on-scroll"),
                    120.0,
                );
            }
            b.gap(20.0);
        },
    );

    // Contact
    b.section(
        body,
        Element::new("section").with_id("kontakt"),
        |b, section| {
            b.block(section, Element::new("h2").with_text("Kontakt oss"), 40.0);
            b.block(
                section,
                Element::new("p").with_text("Fyll ut skjemaet, så tar jeg kontakt med deg."),
                20.0,
            );
            b.section(
                section,
                Element::new("form").with_id(CONTACT_FORM_ID),
                |b, form| {
                    let field = |id: &str, kind: &str, label: &str| {
                        Element::new("input")
                            .with_id(id)
                            .with_attr("name", id)
                            .with_attr("type", kind)
                            .with_attr("data-label", label)
                    };
                    b.block(form, field("name", "text", "Navn *"), 60.0);
                    b.block(form, field("email", "email", "E-post *"), 60.0);
                    b.block(form, field("phone", "tel", "Telefon *"), 60.0);
                    b.block(form, field("location", "text", "Sted"), 60.0);
                    b.block(
                        form,
                        Element::new("select")
                            .with_id("project-type")
                            .with_attr("data-label", "Prosjekttype *")
                            .with_options(
                                PROJECT_TYPES
                                    .iter()
                                    .map(|(value, label)| SelectOption::new(value, label))
                                    .collect(),
                            ),
                        60.0,
                    );
                    b.block(
                        form,
                        Element::new("textarea")
                            .with_id("description")
                            .with_attr("data-label", "Beskrivelse *"),
                        100.0,
                    );
                    b.block(
                        form,
                        Element::new("input")
                            .with_id("site-visit")
                            .with_attr("type", "checkbox")
                            .with_attr("data-label", "Jeg ønsker gratis befaring"),
                        20.0,
                    );
                    b.section(form, Element::new("div").with_class("form-submit"), |b, wrap| {
                        b.block(
                            wrap,
                            Element::new("button")
                                .with_class("btn")
                                .with_attr("type", "submit")
                                .with_text(SUBMIT_LABEL),
                            60.0,
                        );
                    });
                },
            );
            b.block(
                section,
                Element::new("div")
                    .with_id(FORM_MESSAGE_ID)
                    .with_class("form-message")
                    .with_style("display", "none"),
                80.0,
            );
            b.gap(20.0);
        },
    );

    // Footer
    b.section(body, Element::new("footer"), |b, footer| {
        b.block(
            footer,
            Element::new("p").with_text(&format!("© {SITE_NAME}")),
            20.0,
        );
        b.block(
            footer,
            Element::new("a")
                .with_attr("href", &tel)
                .with_text(&format!("Telefon: {phone}")),
            20.0,
        );
        b.gap(20.0);
    });

    b.fixed(
        body,
        Element::new("button")
            .with_class("scroll-top")
            .with_attr("aria-label", "Til toppen")
            .with_text("↑"),
        0.0,
        0.0,
    );

    b.doc
}
