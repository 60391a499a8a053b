use crate::domain::model::{DeliveryResult, NotificationMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 通知的接收端。`Err` 表示傳輸層失敗，對方回傳的錯誤狀態則是 `Ok(DeliveryResult::Rejected)`
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, message: &NotificationMessage) -> Result<DeliveryResult>;
}
