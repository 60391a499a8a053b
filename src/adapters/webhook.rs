use crate::domain::model::{DeliveryResult, NotificationMessage};
use crate::domain::ports::NotificationSink;
use crate::utils::error::Result;
use reqwest::Client;
use serde::Serialize;

/// Discord 風格的 webhook 請求內容
#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl From<&NotificationMessage> for WebhookPayload {
    fn from(message: &NotificationMessage) -> Self {
        Self {
            embeds: vec![Embed {
                title: message.title.clone(),
                description: message.description.clone(),
                fields: message
                    .fields
                    .iter()
                    .map(|field| EmbedField {
                        name: field.label.clone(),
                        value: field.value.clone(),
                        inline: false,
                    })
                    .collect(),
            }],
        }
    }
}

pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationSink for WebhookSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<DeliveryResult> {
        let payload = WebhookPayload::from(message);

        tracing::debug!("Posting notification to webhook");
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        tracing::debug!("Webhook response status: {}", status);

        if status.is_success() {
            return Ok(DeliveryResult::Delivered);
        }

        // 讀不到錯誤內容不影響結果，只是少了除錯資訊
        let detail = response.text().await.unwrap_or_default();
        Ok(DeliveryResult::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NotificationField;
    use httpmock::prelude::*;

    fn message() -> NotificationMessage {
        NotificationMessage {
            title: "🟡 New Contact Form Submission".to_string(),
            timestamp: "2026-10-16T08:30:00.000Z".to_string(),
            description: "⌛**Timestamp:** 2026-10-16T08:30:00.000Z".to_string(),
            fields: vec![
                NotificationField {
                    label: "📌 name".to_string(),
                    value: "Al".to_string(),
                },
                NotificationField {
                    label: "📌 email".to_string(),
                    value: "Not provided".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = serde_json::to_value(WebhookPayload::from(&message())).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "embeds": [{
                    "title": "🟡 New Contact Form Submission",
                    "description": "⌛**Timestamp:** 2026-10-16T08:30:00.000Z",
                    "fields": [
                        {"name": "📌 name", "value": "Al", "inline": false},
                        {"name": "📌 email", "value": "Not provided", "inline": false}
                    ]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_deliver_posts_json() {
        let server = MockServer::start_async().await;
        let expected = serde_json::to_value(WebhookPayload::from(&message())).unwrap();

        let hook = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/webhook")
                    .header("content-type", "application/json")
                    .json_body(expected);
                then.status(204);
            })
            .await;

        let sink = WebhookSink::new(server.url("/webhook"));
        let result = sink.deliver(&message()).await.unwrap();

        hook.assert_async().await;
        assert!(result.is_delivered());
    }

    #[tokio::test]
    async fn test_deliver_reports_rejection_detail() {
        let server = MockServer::start_async().await;

        let hook = server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook");
                then.status(400).body(r#"{"message": "Invalid Form Body"}"#);
            })
            .await;

        let sink = WebhookSink::new(server.url("/webhook"));
        let result = sink.deliver(&message()).await.unwrap();

        hook.assert_async().await;
        assert_eq!(
            result,
            DeliveryResult::Rejected {
                status: 400,
                detail: r#"{"message": "Invalid Form Body"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_deliver_transport_error() {
        // 先綁定再釋放，拿到一個沒有服務在聽的 port
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let sink = WebhookSink::new(format!("http://127.0.0.1:{}/webhook", port));
        assert!(sink.deliver(&message()).await.is_err());
    }
}
