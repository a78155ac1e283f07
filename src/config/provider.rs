use serde::{Deserialize, Serialize};

/// 规则集刷新间隔（秒）
pub const PROVIDER_INTERVAL: u32 = 86400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Domain,
    Ipcidr,
    Classical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Mrs,
    Text,
}

/// rule-providers 中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: Behavior,
    pub format: Format,
    pub interval: u32,
    pub url: String,
}

impl RuleProvider {
    pub fn http(behavior: Behavior, format: Format, url: &str) -> Self {
        Self {
            provider_type: "http".to_string(),
            behavior,
            format,
            interval: PROVIDER_INTERVAL,
            url: url.to_string(),
        }
    }
}
