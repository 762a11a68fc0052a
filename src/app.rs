//! Application state and core logic

use crate::config::SiteConfig;
use crate::contact::{SubmissionReceipt, SubmissionTransport, TransportError, CONTACT_FORM_ID};
use crate::dom::{
    Document, Effect, ElementId, EventBus, EventResponse, PageEvent, ScrollBehavior,
    CELL_HEIGHT_PX,
};
use crate::platform::{is_send_modifier, Clipboard};
use crate::site::{
    self, build_page, AnalyticsSink, Debounce, SiteOptions, Throttle, TracingSink,
    RESIZE_DEBOUNCE, SCROLL_THROTTLE,
};
use crate::state::{
    element_row, element_rows, hit_test, is_fixed, page_rows, viewport_for, FocusRing,
    HEADER_ROWS,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: f64 = 3.0;

/// A transport result on its way back to the UI loop
#[derive(Debug)]
struct Settlement {
    /// Page load the submission started on
    generation: u64,
    form: ElementId,
    attempt: Uuid,
    outcome: Result<SubmissionReceipt, TransportError>,
}

/// Main application struct
pub struct App {
    /// The page currently shown
    pub document: Document,
    bus: EventBus,
    config: SiteConfig,
    transport: Arc<dyn SubmissionTransport>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    clipboard: Box<dyn Clipboard>,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    settle_rx: mpsc::UnboundedReceiver<Settlement>,
    /// Bumped on every page load so late settlements can be dropped
    generation: u64,
    in_flight: usize,
    /// Keyboard focus
    pub focus: FocusRing,
    /// One-shot feedback for the status bar
    pub status_message: Option<String>,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    scroll_throttle: Throttle,
    resize_debounce: Debounce,
    quit: bool,
}

impl App {
    /// Create the app and load the configured start page
    pub fn new(
        config: SiteConfig,
        transport: Arc<dyn SubmissionTransport>,
        clipboard: Box<dyn Clipboard>,
        terminal_size: (u16, u16),
    ) -> Self {
        let (cols, rows) = terminal_size;
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let analytics = config
            .analytics_enabled()
            .then(|| Arc::new(TracingSink) as Arc<dyn AnalyticsSink>);
        let start_page = config.start_page().to_string();

        let mut app = Self {
            document: Document::new(&start_page, viewport_for(cols, rows)),
            bus: EventBus::new(),
            config,
            transport,
            analytics,
            clipboard,
            settle_tx,
            settle_rx,
            generation: 0,
            in_flight: 0,
            focus: FocusRing::default(),
            status_message: None,
            terminal_size,
            scroll_throttle: Throttle::new(SCROLL_THROTTLE),
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE),
            quit: false,
        };
        app.load_page(&start_page);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// A contact submission is awaiting its transport
    pub fn submission_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Something will change without input (drives the faster poll rate)
    pub fn is_animating(&self) -> bool {
        self.document.is_scrolling()
            || self.submission_pending()
            || self.resize_debounce.is_pending()
    }

    fn site_options(&self) -> SiteOptions {
        SiteOptions {
            analytics: self.analytics.clone(),
            success_hide_after: Some(self.config.success_hide_after()),
        }
    }

    /// Build `path` from scratch with fresh listeners
    pub fn load_page(&mut self, path: &str) {
        let (cols, rows) = self.terminal_size;
        self.generation += 1;
        self.document = build_page(path, viewport_for(cols, rows), self.config.phone());
        let options = self.site_options();
        self.bus = EventBus::new();
        site::install(&mut self.bus, options);
        self.focus = FocusRing::default();
        tracing::info!("Loaded page {}", path);
        self.dispatch(PageEvent::DomContentLoaded);
    }

    /// Deliver `event` to the page and carry out the effects it asks for
    pub fn dispatch(&mut self, event: PageEvent) -> EventResponse {
        let response = self.bus.dispatch(&mut self.document, &event);
        for effect in response.effects.iter().cloned() {
            self.run_effect(effect);
        }
        self.focus.rebuild(&self.document);
        response
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitContact {
                form,
                attempt,
                input,
            } => {
                let transport = Arc::clone(&self.transport);
                let tx = self.settle_tx.clone();
                let generation = self.generation;
                self.in_flight += 1;
                tokio::spawn(async move {
                    let outcome = transport.submit(&input).await;
                    let settlement = Settlement {
                        generation,
                        form,
                        attempt,
                        outcome,
                    };
                    if tx.send(settlement).is_err() {
                        tracing::debug!(%attempt, "App closed before the submission settled");
                    }
                });
            }
        }
    }

    fn settle(&mut self, settlement: Settlement) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if settlement.generation != self.generation {
            tracing::debug!(
                attempt = %settlement.attempt,
                "Dropping settlement from an unloaded page"
            );
            return;
        }
        self.dispatch(PageEvent::SubmissionSettled {
            form: settlement.form,
            attempt: settlement.attempt,
            outcome: settlement.outcome,
        });
    }

    /// Advance the page clock: timers, smooth scroll, rate-limited events
    /// and finished submissions
    pub fn tick(&mut self, now: Instant) {
        self.document.set_now(now);

        if self.document.run_due_timers() > 0 {
            self.focus.rebuild(&self.document);
        }
        if self.document.tick_scroll() {
            self.notify_scroll();
        }
        if self.scroll_throttle.flush(now) {
            self.dispatch(PageEvent::Scroll);
        }
        if self.resize_debounce.poll(now) {
            self.dispatch(PageEvent::Resize);
        }
        while let Ok(settlement) = self.settle_rx.try_recv() {
            self.settle(settlement);
        }
    }

    fn notify_scroll(&mut self) {
        if self.scroll_throttle.try_run(self.document.now()) {
            self.dispatch(PageEvent::Scroll);
        }
    }

    fn scroll_by(&mut self, dy: f64) {
        if self.document.scroll_by(dy) {
            self.notify_scroll();
        }
    }

    fn scroll_to(&mut self, top: f64) {
        if self.document.scroll_to(top, ScrollBehavior::Instant) {
            self.notify_scroll();
        }
    }

    /// Terminal was resized
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.terminal_size = (cols, rows);
        self.document.set_viewport(viewport_for(cols, rows));
        self.focus.rebuild(&self.document);
        self.resize_debounce.call(self.document.now());
    }

    /// Pointer or keyboard activation of `target`
    pub fn click(&mut self, target: ElementId) {
        if self.document.element(target).has_attribute("disabled") {
            tracing::debug!("Ignoring click on disabled control");
            return;
        }
        if !self.focus.focus(target) {
            self.focus.blur();
        }

        let response = self.dispatch(PageEvent::Click { target });
        if !response.default_prevented {
            self.default_click(target);
        }
    }

    fn default_click(&mut self, target: ElementId) {
        if let Some(link) = self.document.closest(target, "a[href]") {
            let href = self.document.element(link).href().to_string();
            self.follow_link(&href);
            return;
        }

        let el = self.document.element(target);
        if el.is_checkbox() {
            let checked = !el.checked;
            self.document.set_checked(target, checked);
        } else if el.tag == "button" && el.attribute("type") == Some("submit") {
            if let Some(form) = self.document.closest(target, "form") {
                self.submit(form);
            }
        }
    }

    fn follow_link(&mut self, href: &str) {
        if href == "#" {
            self.scroll_to(0.0);
        } else if href.starts_with('#') {
            if let Some(section) = self.document.query_selector(href) {
                let top = self.document.element(section).layout.top;
                self.scroll_to(top);
            }
        } else if let Some(number) = href.strip_prefix("tel:") {
            self.dial(number);
        } else {
            let path = resolve_path(self.document.location_path(), href);
            self.load_page(&path);
        }
    }

    /// A terminal cannot place calls; the number goes to the clipboard instead
    fn dial(&mut self, number: &str) {
        match self.clipboard.set_text(number) {
            Ok(()) => {
                tracing::info!("Copied {} to clipboard", number);
                self.status_message = Some(format!("Copied {number} to clipboard"));
            }
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.status_message = Some(format!("Call {number}"));
            }
        }
    }

    /// Submit `form`; without a handler the page reloads
    pub fn submit(&mut self, form: ElementId) {
        let response = self.dispatch(PageEvent::Submit { form });
        if !response.default_prevented {
            let path = self.document.location_path().to_string();
            tracing::info!("Unhandled form submit, reloading {}", path);
            self.load_page(&path);
        }
    }

    pub fn submit_contact_form(&mut self) {
        match self.document.get_element_by_id(CONTACT_FORM_ID) {
            Some(form) => self.submit(form),
            None => self.status_message = Some("No contact form on this page".to_string()),
        }
    }

    /// Scroll `id` to the middle of the page area when it is off screen
    fn ensure_visible(&mut self, id: ElementId) {
        if is_fixed(&self.document, id) {
            return;
        }
        let top = element_row(&self.document, id);
        let bottom = top + i32::from(element_rows(&self.document, id));
        let visible_bottom = i32::from(page_rows(self.terminal_size.1));
        let off_screen = top < i32::from(HEADER_ROWS) || bottom > visible_bottom;
        if off_screen
            && self
                .document
                .scroll_into_view_centered(id, ScrollBehavior::Instant)
        {
            self.notify_scroll();
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let next = if forward {
            self.focus.next()
        } else {
            self.focus.prev()
        };
        if let Some(id) = next {
            self.ensure_visible(id);
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('s') if is_send_modifier(key.modifiers) => self.submit_contact_form(),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Up => self.scroll_by(-CELL_HEIGHT_PX),
            KeyCode::Down => self.scroll_by(CELL_HEIGHT_PX),
            KeyCode::PageUp => self.scroll_by(-self.page_step()),
            KeyCode::PageDown => self.scroll_by(self.page_step()),
            KeyCode::Home => self.scroll_to(0.0),
            KeyCode::End => {
                let bottom = self.document.max_scroll();
                self.scroll_to(bottom);
            }
            _ => self.handle_focused_key(key),
        }
    }

    fn page_step(&self) -> f64 {
        self.document.viewport().height - f64::from(HEADER_ROWS) * CELL_HEIGHT_PX
    }

    fn handle_focused_key(&mut self, key: KeyEvent) {
        let Some(focused) = self.focus.current() else {
            return;
        };
        let el = self.document.element(focused);
        let is_textarea = el.tag == "textarea";
        let accepts_text = el.accepts_text();
        let is_select = el.tag == "select";

        match key.code {
            KeyCode::Enter if is_textarea => self.document.element_mut(focused).value.push('\n'),
            KeyCode::Enter if accepts_text => {
                if let Some(form) = self.document.closest(focused, "form") {
                    self.submit(form);
                }
            }
            KeyCode::Enter => self.click(focused),
            KeyCode::Char(c) if accepts_text && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.document.element_mut(focused).value.push(c);
            }
            KeyCode::Char(' ') if !is_select => self.click(focused),
            KeyCode::Backspace if accepts_text => {
                self.document.element_mut(focused).value.pop();
            }
            KeyCode::Left if is_select => self.document.element_mut(focused).cycle_option(-1),
            KeyCode::Right if is_select => self.document.element_mut(focused).cycle_option(1),
            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS * CELL_HEIGHT_PX),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS * CELL_HEIGHT_PX),
            MouseEventKind::Down(MouseButton::Left) => {
                self.status_message = None;
                let (cols, rows) = self.terminal_size;
                if let Some(target) = hit_test(&self.document, cols, rows, mouse.column, mouse.row)
                {
                    self.click(target);
                }
            }
            _ => {}
        }
    }
}

/// Resolve a relative link against the current page path
fn resolve_path(current: &str, href: &str) -> String {
    if href.starts_with('/') {
        return href.to_string();
    }
    let dir = current.rfind('/').map_or("/", |i| &current[..=i]);
    format!("{dir}{href}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{
        MockSubmissionTransport, FAILURE_MESSAGE, FORM_MESSAGE_ID, LOADING_LABEL, SUBMIT_LABEL,
        SUCCESS_MESSAGE,
    };
    use crate::platform::MockClipboard;
    use crate::site::page::PROJECT_TYPES;
    use crate::site::SHADOW_SCROLLED;
    use std::time::Duration;

    const SIZE: (u16, u16) = (120, 31);

    fn app_with(transport: MockSubmissionTransport, clipboard: MockClipboard) -> App {
        let config = SiteConfig {
            analytics: Some(false),
            ..Default::default()
        };
        App::new(config, Arc::new(transport), Box::new(clipboard), SIZE)
    }

    fn app() -> App {
        let mut transport = MockSubmissionTransport::new();
        transport.expect_submit().never();
        app_with(transport, MockClipboard::new())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn id(app: &App, id: &str) -> ElementId {
        app.document.get_element_by_id(id).unwrap()
    }

    fn fill_valid(app: &mut App) {
        for (field, value) in [
            ("name", "Ola Nordmann"),
            ("email", "ola@example.no"),
            ("phone", "12345678"),
            ("description", "Lekkasje ved takvinduet"),
        ] {
            let el = id(app, field);
            app.document.set_value(el, value);
        }
    }

    fn later(app: &App, by: Duration) -> Instant {
        app.document.now() + by
    }

    /// Wait for the spawned transport and feed its result back
    async fn settle_next(app: &mut App) {
        let settlement = app.settle_rx.recv().await.unwrap();
        app.settle(settlement);
    }

    fn message_text(app: &App) -> String {
        app.document.element(id(app, FORM_MESSAGE_ID)).text.clone()
    }

    fn submit_button(app: &App) -> ElementId {
        app.document.query_selector(".form-submit .btn").unwrap()
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loads_start_page() {
            let app = app();
            assert_eq!(app.document.location_path(), "/index.html");
            let active = app.document.query_selector(".nav-link.active").unwrap();
            assert_eq!(app.document.element(active).href(), "index.html");
            assert!(!app.focus.items().is_empty());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_resolve_path() {
            assert_eq!(resolve_path("/index.html", "kontakt.html"), "/kontakt.html");
            assert_eq!(resolve_path("/a/b.html", "c.html"), "/a/c.html");
            assert_eq!(resolve_path("/a/b.html", "/c.html"), "/c.html");
            assert_eq!(resolve_path("", "c.html"), "/c.html");
        }
    }

    mod keyboard {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_quit_keys() {
            let mut app = app();
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());

            let mut app = super::app();
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn test_typing_edits_focused_field() {
            let mut app = app();
            let name = id(&app, "name");
            assert!(app.focus.focus(name));

            type_text(&mut app, "Kari");
            app.handle_key(key(KeyCode::Backspace));

            assert_eq!(app.document.value(name), "Kar");
        }

        #[test]
        fn test_enter_in_textarea_adds_line() {
            let mut app = app();
            let description = id(&app, "description");
            app.focus.focus(description);

            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "b");

            assert_eq!(app.document.value(description), "a\nb");
        }

        #[test]
        fn test_space_toggles_checkbox() {
            let mut app = app();
            let visit = id(&app, "site-visit");
            app.focus.focus(visit);

            app.handle_key(key(KeyCode::Char(' ')));
            assert!(app.document.element(visit).checked);
            app.handle_key(key(KeyCode::Char(' ')));
            assert!(!app.document.element(visit).checked);
        }

        #[test]
        fn test_arrows_cycle_select() {
            let mut app = app();
            let select = id(&app, "project-type");
            app.focus.focus(select);

            app.handle_key(key(KeyCode::Right));
            assert_eq!(app.document.value(select), PROJECT_TYPES[1].0);
            app.handle_key(key(KeyCode::Left));
            app.handle_key(key(KeyCode::Left));
            assert_eq!(app.document.value(select), PROJECT_TYPES[PROJECT_TYPES.len() - 1].0);
        }

        #[test]
        fn test_tab_scrolls_focused_control_into_view() {
            let mut app = app();
            let email = id(&app, "email");
            let name = id(&app, "name");
            app.focus.focus(name);

            app.handle_key(key(KeyCode::Tab));

            assert_eq!(app.focus.current(), Some(email));
            let row = element_row(&app.document, email);
            assert!(row >= i32::from(HEADER_ROWS));
            assert!(row < i32::from(page_rows(SIZE.1)));
        }

        #[test]
        fn test_scroll_keys() {
            let mut app = app();
            app.handle_key(key(KeyCode::Down));
            assert_eq!(app.document.page_y_offset(), CELL_HEIGHT_PX);

            app.handle_key(key(KeyCode::End));
            assert_eq!(app.document.page_y_offset(), app.document.max_scroll());

            app.handle_key(key(KeyCode::Home));
            assert_eq!(app.document.page_y_offset(), 0.0);
        }
    }

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_scroll_reaches_header_listener() {
            let mut app = app();
            app.handle_key(key(KeyCode::PageDown));

            let header = app.document.query_selector(".header").unwrap();
            assert_eq!(
                app.document.element(header).style("box-shadow"),
                Some(SHADOW_SCROLLED)
            );
        }

        #[test]
        fn test_rapid_scrolls_are_throttled_then_flushed() {
            let mut app = app();
            let button = app.document.query_selector(".scroll-top").unwrap();

            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::End));
            assert!(!app.document.has_class(button, "visible"));

            let now = later(&app, Duration::from_millis(20));
            app.tick(now);
            assert!(app.document.has_class(button, "visible"));
        }

        #[test]
        fn test_wheel_scrolls_three_rows() {
            let mut app = app();
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 10,
                row: 10,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.document.page_y_offset(), 3.0 * CELL_HEIGHT_PX);
        }

        #[test]
        fn test_anchor_click_smooth_scrolls() {
            let mut app = app();
            let anchor = app.document.query_selector(r##"a[href="#kontakt"]"##).unwrap();

            app.click(anchor);
            assert!(app.is_animating());

            let now = later(&app, Duration::from_secs(1));
            app.tick(now);
            let section = id(&app, "kontakt");
            let expected = app.document.element(section).layout.top - 60.0;
            assert_eq!(app.document.page_y_offset(), expected);
        }

        #[test]
        fn test_resize_is_debounced() {
            let mut app = app();
            app.resize(60, 31);
            assert!(app.document.viewport().is_mobile());
            assert!(app.is_animating());

            let now = later(&app, RESIZE_DEBOUNCE);
            app.tick(now);
            assert!(!app.is_animating());
            let toggle = app.document.query_selector(".mobile-toggle").unwrap();
            assert!(app.focus.items().contains(&toggle));
        }
    }

    mod links {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_nav_link_loads_page() {
            let mut app = app();
            let link = app.document.query_selector(r#"a[href="tjenester.html"]"#).unwrap();

            app.click(link);

            assert_eq!(app.document.location_path(), "/tjenester.html");
            let active = app.document.query_selector(".nav-link.active").unwrap();
            assert_eq!(app.document.element(active).href(), "tjenester.html");
        }

        #[test]
        fn test_tel_link_copies_number() {
            let mut clipboard = MockClipboard::new();
            clipboard
                .expect_set_text()
                .withf(|text| text == "+4790000000")
                .times(1)
                .returning(|_| Ok(()));
            let mut transport = MockSubmissionTransport::new();
            transport.expect_submit().never();
            let mut app = app_with(transport, clipboard);

            let phone = app.document.query_selector(".header-phone").unwrap();
            app.click(phone);

            assert_eq!(
                app.status_message.as_deref(),
                Some("Copied +4790000000 to clipboard")
            );
        }

        #[test]
        fn test_clipboard_failure_shows_number() {
            let mut clipboard = MockClipboard::new();
            clipboard
                .expect_set_text()
                .returning(|_| Err(anyhow::anyhow!("no display")));
            let mut transport = MockSubmissionTransport::new();
            transport.expect_submit().never();
            let mut app = app_with(transport, clipboard);

            let phone = app.document.query_selector(".header-phone").unwrap();
            app.click(phone);

            assert_eq!(app.status_message.as_deref(), Some("Call +4790000000"));
        }

        #[test]
        fn test_mouse_click_hits_mobile_toggle() {
            let mut app = app();
            app.resize(60, 31);
            let toggle = app.document.query_selector(".mobile-toggle").unwrap();

            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 58,
                row: 1,
                modifiers: KeyModifiers::NONE,
            });

            assert!(app.document.has_class(toggle, "active"));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_ctrl_s_sends_and_settles() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .withf(|input| input.name == "Ola Nordmann" && input.location.is_empty())
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new(None)));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            app.handle_key(ctrl('s'));

            assert!(app.submission_pending());
            let button = submit_button(&app);
            assert_eq!(app.document.element(button).text, LOADING_LABEL);
            assert!(app.document.element(button).has_attribute("disabled"));

            settle_next(&mut app).await;

            assert!(!app.submission_pending());
            assert_eq!(message_text(&app), SUCCESS_MESSAGE);
            assert_eq!(app.document.element(button).text, SUBMIT_LABEL);
            assert_eq!(app.document.value(id(&app, "name")), "");
        }

        #[tokio::test]
        async fn test_failure_keeps_input() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .times(1)
                .returning(|_| Err(TransportError::Request("timeout".to_string())));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            let button = submit_button(&app);
            app.click(button);
            settle_next(&mut app).await;

            assert_eq!(message_text(&app), FAILURE_MESSAGE);
            assert_eq!(app.document.value(id(&app, "name")), "Ola Nordmann");
        }

        #[test]
        fn test_invalid_form_never_reaches_transport() {
            let mut app = app();
            app.handle_key(ctrl('s'));

            assert!(!app.submission_pending());
            assert_eq!(message_text(&app), "Vennligst fyll ut alle påkrevde felt.");
        }

        #[tokio::test]
        async fn test_disabled_button_and_repeat_submit_are_ignored() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new(None)));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            app.handle_key(ctrl('s'));
            let button = submit_button(&app);
            app.click(button);
            app.handle_key(ctrl('s'));
            settle_next(&mut app).await;

            assert!(!app.submission_pending());
            assert_eq!(message_text(&app), SUCCESS_MESSAGE);
        }

        #[tokio::test]
        async fn test_settlement_after_navigation_is_dropped() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new(None)));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            app.handle_key(ctrl('s'));
            app.load_page("/kontakt.html");
            settle_next(&mut app).await;

            assert!(!app.submission_pending());
            assert_eq!(message_text(&app), "");
            let button = submit_button(&app);
            assert_eq!(app.document.element(button).text, SUBMIT_LABEL);
        }

        #[tokio::test]
        async fn test_success_message_hides_after_ten_seconds() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .returning(|_| Ok(SubmissionReceipt::new(None)));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            app.handle_key(ctrl('s'));
            settle_next(&mut app).await;
            let message = id(&app, FORM_MESSAGE_ID);
            assert!(app.document.is_rendered(message));

            let now = later(&app, Duration::from_secs(9));
            app.tick(now);
            assert!(app.document.is_rendered(message));

            let now = later(&app, Duration::from_secs(1));
            app.tick(now);
            assert!(!app.document.is_rendered(message));
        }

        #[tokio::test]
        async fn test_tick_delivers_settlement() {
            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_submit()
                .returning(|_| Ok(SubmissionReceipt::new(None)));
            let mut app = app_with(transport, MockClipboard::new());
            fill_valid(&mut app);

            app.handle_key(ctrl('s'));
            while app.submission_pending() {
                tokio::task::yield_now().await;
                let now = later(&app, Duration::from_millis(1));
                app.tick(now);
            }

            assert_eq!(message_text(&app), SUCCESS_MESSAGE);
        }
    }
}
