pub mod relay;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{DeliveryResult, NotificationMessage, Submission};
pub use crate::domain::ports::NotificationSink;
pub use crate::utils::error::Result;
