use serde::{Deserialize, Serialize};

/// 健康检查地址
pub const PROBE_URL: &str = "https://cp.cloudflare.com/generate_204";
/// 健康检查间隔（秒）
pub const PROBE_INTERVAL: u32 = 300;

/// 策略组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupType {
    Select,
    Smart,
    UrlTest,
    Fallback,
}

impl GroupType {
    /// 需要 url/interval 做健康检查的类型
    pub fn is_health_checked(&self) -> bool {
        !matches!(self, GroupType::Select)
    }
}

/// 单个策略组，字段名与 mihomo 的 proxy-groups 一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proxies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_filter: Option<String>,
}

impl ProxyGroup {
    pub fn new(name: impl Into<String>, group_type: GroupType, proxies: Vec<String>) -> Self {
        let mut group = Self {
            name: name.into(),
            group_type,
            proxies,
            url: None,
            interval: None,
            include_all_proxies: None,
            filter: None,
            exclude_filter: None,
        };
        if group_type.is_health_checked() {
            group.url = Some(PROBE_URL.to_string());
            group.interval = Some(PROBE_INTERVAL);
        }
        group
    }

    pub fn select(name: impl Into<String>, proxies: Vec<String>) -> Self {
        Self::new(name, GroupType::Select, proxies)
    }
}
