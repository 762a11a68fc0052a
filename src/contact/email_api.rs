//! HTTP transport posting the submission to a transactional email API

use super::input::FormInput;
use super::transport::{SubmissionReceipt, SubmissionTransport, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_FROM: &str = "nettside@danivanov-tak.no";
pub const DEFAULT_TO: &str = "post@danivanov-tak.no";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body accepted by the email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn from_input(input: &FormInput, from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("Ny henvendelse: {}", input.project_type),
            html: render_html(input),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct EmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Notification email body with Norwegian field labels
pub fn render_html(input: &FormInput) -> String {
    let site_visit = if input.want_site_visit { "Ja" } else { "Nei" };
    format!(
        "<h2>Ny henvendelse fra nettsiden</h2>\n\
         <p><strong>Navn:</strong> {}</p>\n\
         <p><strong>E-post:</strong> {}</p>\n\
         <p><strong>Telefon:</strong> {}</p>\n\
         <p><strong>Sted:</strong> {}</p>\n\
         <p><strong>Prosjekttype:</strong> {}</p>\n\
         <p><strong>Ønsker befaring:</strong> {}</p>\n\
         <h3>Beskrivelse:</h3>\n\
         <p>{}</p>\n",
        escape_html(&input.name),
        escape_html(&input.email),
        escape_html(&input.phone),
        escape_html(input.location_or_fallback()),
        escape_html(&input.project_type),
        site_visit,
        escape_html(&input.description),
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Connection settings for [`EmailApiTransport`]
#[derive(Debug, Clone)]
pub struct EmailApiSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub from: String,
    pub to: String,
    pub timeout: Duration,
}

impl EmailApiSettings {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            from: DEFAULT_FROM.to_string(),
            to: DEFAULT_TO.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Sends one POST per submission
#[derive(Debug, Clone)]
pub struct EmailApiTransport {
    client: reqwest::Client,
    endpoint: String,
    from: String,
    to: String,
}

impl EmailApiTransport {
    pub fn new(settings: EmailApiSettings) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = settings.api_key.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| TransportError::Request(format!("invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint,
            from: settings.from,
            to: settings.to,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for EmailApiTransport {
    async fn submit(&self, input: &FormInput) -> Result<SubmissionReceipt, TransportError> {
        let message = EmailMessage::from_input(input, &self.from, &self.to);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        // Providers differ in what they return; an id is logged when present
        let body: EmailResponse = response.json().await.unwrap_or_default();
        tracing::info!(
            "Email accepted by {} (id: {})",
            self.endpoint,
            body.id.as_deref().unwrap_or("none")
        );
        Ok(SubmissionReceipt::new(body.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> FormInput {
        FormInput {
            name: "Ola".to_string(),
            email: "ola@example.com".to_string(),
            phone: "12345678".to_string(),
            location: String::new(),
            project_type: "takreparasjon".to_string(),
            description: "Lekkasje i tak".to_string(),
            want_site_visit: true,
        }
    }

    mod message {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_subject_uses_project_type() {
            let message = EmailMessage::from_input(&input(), DEFAULT_FROM, DEFAULT_TO);
            assert_eq!(message.subject, "Ny henvendelse: takreparasjon");
            assert_eq!(message.from, "nettside@danivanov-tak.no");
            assert_eq!(message.to, "post@danivanov-tak.no");
        }

        #[test]
        fn test_html_contains_labels_and_fallbacks() {
            let html = render_html(&input());
            assert!(html.contains("<h2>Ny henvendelse fra nettsiden</h2>"));
            assert!(html.contains("<p><strong>Navn:</strong> Ola</p>"));
            assert!(html.contains("<p><strong>Sted:</strong> Ikke oppgitt</p>"));
            assert!(html.contains("<p><strong>Ønsker befaring:</strong> Ja</p>"));
            assert!(html.contains("<h3>Beskrivelse:</h3>"));
            assert!(html.contains("<p>Lekkasje i tak</p>"));
        }

        #[test]
        fn test_html_escapes_field_values() {
            let input = FormInput {
                description: "<script>alert('x')</script> & mer".to_string(),
                ..input()
            };
            let html = render_html(&input);
            assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; mer"));
            assert!(!html.contains("<script>"));
        }

        #[test]
        fn test_site_visit_no() {
            let input = FormInput {
                want_site_visit: false,
                ..input()
            };
            assert!(render_html(&input).contains("<strong>Ønsker befaring:</strong> Nei"));
        }
    }

    mod transport {
        use super::*;
        use pretty_assertions::assert_eq;

        fn settings(server: &MockServer) -> EmailApiSettings {
            EmailApiSettings::new(&format!("{}/api/send-email", server.uri()))
        }

        #[tokio::test]
        async fn test_posts_json_and_returns_receipt() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/send-email"))
                .and(header("content-type", "application/json"))
                .and(body_partial_json(json!({
                    "from": "nettside@danivanov-tak.no",
                    "to": "post@danivanov-tak.no",
                    "subject": "Ny henvendelse: takreparasjon",
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
                .expect(1)
                .mount(&server)
                .await;

            let transport = EmailApiTransport::new(settings(&server)).unwrap();
            let receipt = transport.submit(&input()).await.unwrap();

            assert_eq!(receipt.id.as_deref(), Some("msg_123"));
        }

        #[tokio::test]
        async fn test_sends_bearer_key() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(header("authorization", "Bearer re_test"))
                .respond_with(ResponseTemplate::new(202))
                .expect(1)
                .mount(&server)
                .await;

            let mut settings = settings(&server);
            settings.api_key = Some("re_test".to_string());
            let transport = EmailApiTransport::new(settings).unwrap();
            let receipt = transport.submit(&input()).await.unwrap();

            assert!(receipt.id.is_none());
        }

        #[tokio::test]
        async fn test_error_status_is_reported() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
                .mount(&server)
                .await;

            let transport = EmailApiTransport::new(settings(&server)).unwrap();
            let err = transport.submit(&input()).await.unwrap_err();

            assert_eq!(
                err,
                TransportError::Status {
                    status: 500,
                    message: "boom".to_string(),
                }
            );
        }

        #[tokio::test]
        async fn test_unreachable_endpoint_is_request_error() {
            let transport =
                EmailApiTransport::new(EmailApiSettings::new("http://127.0.0.1:9/api/send-email"))
                    .unwrap();
            let err = transport.submit(&input()).await.unwrap_err();
            assert!(matches!(err, TransportError::Request(_)));
        }

        #[test]
        fn test_invalid_api_key_is_rejected() {
            let mut settings = EmailApiSettings::new("http://localhost/api/send-email");
            settings.api_key = Some("bad\nkey".to_string());
            assert!(matches!(
                EmailApiTransport::new(settings),
                Err(TransportError::Request(_))
            ));
        }
    }
}
