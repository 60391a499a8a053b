use crate::config::toml_config::RelayConfig;
use crate::domain::model::{DeliveryResult, NotificationMessage};
use crate::domain::ports::NotificationSink;
use crate::utils::error::{RelayError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub enum SinkResponse {
    Deliver,
    Reject(u16, &'static str),
    TransportError,
}

/// 記錄所有送出的訊息，並依設定回傳結果
#[derive(Clone)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<NotificationMessage>>>,
    response: SinkResponse,
}

impl RecordingSink {
    pub fn new(response: SinkResponse) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub async fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<DeliveryResult> {
        self.sent.lock().await.push(message.clone());

        match &self.response {
            SinkResponse::Deliver => Ok(DeliveryResult::Delivered),
            SinkResponse::Reject(status, detail) => Ok(DeliveryResult::Rejected {
                status: *status,
                detail: detail.to_string(),
            }),
            SinkResponse::TransportError => Err(RelayError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

pub fn test_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.sink.webhook_url = Some("http://127.0.0.1:9/webhook".to_string());
    config
}
