use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_FIELDS: [&str; 6] = [
    "name",
    "email",
    "message",
    "newField1",
    "newField2",
    "honeypot",
];

/// Relay 的完整設定，所有區段皆可省略並回落到預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub sink: SinkConfig,
    pub form: FormConfig,
    pub presentation: PresentationConfig,
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub route: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub fields: Vec<String>,
    pub honeypot_field: String,
    /// 是否在通知中列出 honeypot 欄位（永遠是 placeholder）
    pub report_honeypot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub title: String,
    pub timestamp_prefix: String,
    pub label_prefix: String,
    pub value_prefix: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// `{timestamp}` 會被替換成提交時間
    pub success: String,
    pub spam: String,
    pub failure: String,
    pub invalid_form: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8787".to_string(),
            route: "/contact".to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            honeypot_field: "honeypot".to_string(),
            report_honeypot: true,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: "🟡 New Contact Form Submission".to_string(),
            timestamp_prefix: "⌛**Timestamp:** ".to_string(),
            label_prefix: "📌 ".to_string(),
            value_prefix: String::new(),
            placeholder: "Not provided".to_string(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            success: "Form submitted successfully! (Submitted at {timestamp})".to_string(),
            spam: "Potential spam detected.".to_string(),
            failure: "Error submitting the form.".to_string(),
            invalid_form: "Invalid form submission.".to_string(),
        }
    }
}

impl MessagesConfig {
    pub fn success_for(&self, timestamp: &str) -> String {
        self.success.replace("{timestamp}", timestamp)
    }
}

impl RelayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DISCORD_WEBHOOK_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RelayError::ConfigParseError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn webhook_url(&self) -> Result<&str> {
        validation::validate_required_field("sink.webhook_url", &self.sink.webhook_url)
            .map(String::as_str)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn is_honeypot(&self, field: &str) -> bool {
        field == self.form.honeypot_field
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("sink.webhook_url", self.webhook_url()?)?;
        self.bind_addr()?;
        validation::validate_route("server.route", &self.server.route)?;
        validation::validate_field_names("form.fields", &self.form.fields)?;
        validation::validate_non_empty_string("form.honeypot_field", &self.form.honeypot_field)?;
        validation::validate_non_empty_string("messages.success", &self.messages.success)?;

        tracing::debug!("✅ Relay configuration validation passed");
        Ok(())
    }
}
