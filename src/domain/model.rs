use serde::Serialize;
use std::collections::HashMap;

/// 一次表單提交：依宣告順序保存各欄位的值，外加 honeypot 欄位的值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    values: Vec<(String, Option<String>)>,
    honeypot: Option<String>,
}

impl Submission {
    /// 從原始 key/value 建立；同一個 key 出現多次時以最後一個為準，未宣告的 key 直接忽略
    pub fn from_pairs<I, K, V>(declared: &[String], honeypot_field: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let values = declared
            .iter()
            .map(|field| (field.clone(), raw.get(field).cloned()))
            .collect();

        Self {
            values,
            honeypot: raw.get(honeypot_field).cloned(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn honeypot(&self) -> Option<&str> {
        self.honeypot.as_deref()
    }

    /// honeypot 只要有任何非空值就視為機器人
    pub fn is_spam(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub title: String,
    /// 與回覆給使用者的時間戳是同一個值
    pub timestamp: String,
    pub description: String,
    pub fields: Vec<NotificationField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Delivered,
    Rejected { status: u16, detail: String },
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered)
    }
}
