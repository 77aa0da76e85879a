//! Outbound notification transport.
//!
//! Posts the rendered report to a WeCom-style webhook as a markdown message.
//! The endpoint is a single configuration value injected at construction;
//! when it is absent the notifier prints the report instead, so a missing
//! configuration degrades the run rather than failing it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::http::{HttpClient, HttpRequest};

#[derive(Debug, Serialize)]
struct MarkdownEnvelope<'a> {
    msgtype: &'static str,
    markdown: MarkdownBody<'a>,
}

#[derive(Debug, Serialize)]
struct MarkdownBody<'a> {
    content: &'a str,
}

/// Application-level acknowledgement; a non-zero `errcode` is a rejection.
#[derive(Debug, Deserialize)]
struct WebhookAck {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// How the report left the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Posted to the configured webhook and acknowledged.
    Posted,
    /// No endpoint configured; printed to stdout instead.
    Printed,
}

pub struct WebhookNotifier {
    http: Arc<dyn HttpClient>,
    endpoint: Option<String>,
}

impl WebhookNotifier {
    pub fn new(http: Arc<dyn HttpClient>, endpoint: Option<String>) -> Self {
        Self { http, endpoint }
    }

    pub async fn deliver(&self, content: &str) -> Result<Delivery, NotifyError> {
        let Some(endpoint) = &self.endpoint else {
            println!("{content}");
            return Ok(Delivery::Printed);
        };

        let envelope = MarkdownEnvelope {
            msgtype: "markdown",
            markdown: MarkdownBody { content },
        };
        let body = serde_json::to_string(&envelope)?;

        let response = self
            .http
            .execute(HttpRequest::post_json(endpoint, body))
            .await
            .map_err(|error| NotifyError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            return Err(NotifyError::UpstreamStatus(response.status));
        }

        let ack: WebhookAck = serde_json::from_str(&response.body)?;
        if ack.errcode != 0 {
            return Err(NotifyError::Rejected {
                errcode: ack.errcode,
                errmsg: ack.errmsg,
            });
        }

        Ok(Delivery::Posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpError, HttpMethod, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn replying(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn posts_the_markdown_envelope() {
        let client = Arc::new(RecordingHttpClient::replying(Ok(HttpResponse::ok(
            "{\"errcode\":0,\"errmsg\":\"ok\"}",
        ))));
        let notifier = WebhookNotifier::new(
            Arc::clone(&client) as Arc<dyn HttpClient>,
            Some(String::from("https://example.test/webhook/send?key=abc")),
        );

        let delivery = notifier.deliver("**report**").await.expect("must deliver");
        assert_eq!(delivery, Delivery::Posted);

        let requests = client.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);

        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().expect("body is set"))
                .expect("body is JSON");
        assert_eq!(body["msgtype"], "markdown");
        assert_eq!(body["markdown"]["content"], "**report**");
    }

    #[tokio::test]
    async fn non_zero_errcode_is_a_delivery_failure() {
        let client = Arc::new(RecordingHttpClient::replying(Ok(HttpResponse::ok(
            "{\"errcode\":93000,\"errmsg\":\"invalid key\"}",
        ))));
        let notifier = WebhookNotifier::new(
            client as Arc<dyn HttpClient>,
            Some(String::from("https://example.test/webhook")),
        );

        let err = notifier.deliver("body").await.expect_err("must fail");
        assert!(matches!(err, NotifyError::Rejected { errcode: 93000, .. }));
    }

    #[tokio::test]
    async fn missing_endpoint_prints_instead_of_posting() {
        let client = Arc::new(RecordingHttpClient::replying(Err(HttpError::new(
            "should never be called",
        ))));
        let notifier = WebhookNotifier::new(Arc::clone(&client) as Arc<dyn HttpClient>, None);

        let delivery = notifier.deliver("body").await.expect("must print");
        assert_eq!(delivery, Delivery::Printed);
        assert!(client.recorded().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced() {
        let client = Arc::new(RecordingHttpClient::replying(Err(HttpError::new(
            "connection refused",
        ))));
        let notifier = WebhookNotifier::new(
            client as Arc<dyn HttpClient>,
            Some(String::from("https://example.test/webhook")),
        );

        let err = notifier.deliver("body").await.expect_err("must fail");
        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
