use crate::config::toml_config::RelayConfig;
use crate::domain::model::{DeliveryResult, NotificationField, NotificationMessage, Submission};
use crate::domain::ports::NotificationSink;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// 一次請求處理後的結果，由 HTTP 層對應成狀態碼與回應文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Spam,
    Delivered { timestamp: String },
    SinkRejected,
    TransportFailed,
}

pub struct FormRelay<S: NotificationSink> {
    config: Arc<RelayConfig>,
    sink: S,
}

impl<S: NotificationSink> FormRelay<S> {
    pub fn new(config: Arc<RelayConfig>, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn submission<I, K, V>(&self, pairs: I) -> Submission
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Submission::from_pairs(
            &self.config.form.fields,
            &self.config.form.honeypot_field,
            pairs,
        )
    }

    pub async fn handle(&self, submission: Submission) -> RelayOutcome {
        self.handle_at(submission, Utc::now()).await
    }

    /// gate → compose → deliver；`now` 只讀一次，通知與回覆共用
    pub async fn handle_at(&self, submission: Submission, now: DateTime<Utc>) -> RelayOutcome {
        if submission.is_spam() {
            tracing::warn!("🍯 Potential spam detected: honeypot field filled out");
            return RelayOutcome::Spam;
        }

        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let message = self.compose(&submission, &timestamp);

        tracing::debug!(
            "Delivering notification with {} fields",
            message.fields.len()
        );

        match self.sink.deliver(&message).await {
            Ok(DeliveryResult::Delivered) => {
                tracing::info!("✅ Submission relayed (submitted at {})", timestamp);
                RelayOutcome::Delivered { timestamp }
            }
            Ok(DeliveryResult::Rejected { status, detail }) => {
                tracing::error!(
                    status,
                    detail = %detail,
                    "❌ Failed to send message to webhook"
                );
                RelayOutcome::SinkRejected
            }
            Err(e) => {
                tracing::error!(error = %e, "❌ Webhook unreachable");
                RelayOutcome::TransportFailed
            }
        }
    }

    pub fn compose(&self, submission: &Submission, timestamp: &str) -> NotificationMessage {
        let presentation = &self.config.presentation;

        let fields = submission
            .fields()
            .filter(|(name, _)| self.config.form.report_honeypot || !self.config.is_honeypot(name))
            .map(|(name, value)| NotificationField {
                label: format!("{}{}", presentation.label_prefix, name),
                // 空字串與缺值一樣使用 placeholder
                value: match value {
                    Some(v) if !v.is_empty() => format!("{}{}", presentation.value_prefix, v),
                    _ => presentation.placeholder.clone(),
                },
            })
            .collect();

        NotificationMessage {
            title: presentation.title.clone(),
            timestamp: timestamp.to_string(),
            description: format!("{}{}", presentation.timestamp_prefix, timestamp),
            fields,
        }
    }
}
