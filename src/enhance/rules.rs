//! 规则集与分流规则

use anyhow::{Context, Result};
use serde_yaml_ng::{Mapping, Value};

use crate::config::{Behavior, Format, RuleProvider};

const META_GEOSITE: &str =
    "https://gh-proxy.com/github.com/metacubex/meta-rules-dat/raw/refs/heads/meta/geo/geosite";
const META_GEOIP: &str =
    "https://gh-proxy.com/github.com/metacubex/meta-rules-dat/raw/refs/heads/meta/geo/geoip";
const LIANDU_LIST: &str =
    "https://gh-proxy.com/raw.githubusercontent.com/liandu2024/clash/refs/heads/main/list";
const BLACKMATRIX_CLASH: &str = "https://gh-proxy.com/raw.githubusercontent.com/blackmatrix7/ios_rule_script/refs/heads/master/rule/Clash";

/// 规则集名称与描述，保持插入顺序
pub fn rule_providers() -> Vec<(&'static str, RuleProvider)> {
    use Behavior::*;
    use Format::*;

    vec![
        (
            "ChatGPT",
            RuleProvider::http(Domain, Mrs, &format!("{META_GEOSITE}/openai.mrs")),
        ),
        (
            "Claude",
            RuleProvider::http(
                Classical,
                Text,
                &format!("{BLACKMATRIX_CLASH}/Claude/Claude.list"),
            ),
        ),
        (
            "MetaAi",
            RuleProvider::http(Classical, Text, &format!("{LIANDU_LIST}/MetaAi.list")),
        ),
        (
            "Perplexity",
            RuleProvider::http(Domain, Mrs, &format!("{META_GEOSITE}/perplexity.mrs")),
        ),
        (
            "Copilot",
            RuleProvider::http(Classical, Text, &format!("{LIANDU_LIST}/Copilot.list")),
        ),
        (
            "Gemini",
            RuleProvider::http(Classical, Text, &format!("{LIANDU_LIST}/Gemini.list")),
        ),
        (
            "Telegram_Domain",
            RuleProvider::http(Domain, Mrs, &format!("{META_GEOSITE}/telegram.mrs")),
        ),
        (
            "Telegram_IP",
            RuleProvider::http(Ipcidr, Mrs, &format!("{META_GEOIP}/telegram.mrs")),
        ),
        (
            "Netflix_Domain",
            RuleProvider::http(Domain, Mrs, &format!("{META_GEOSITE}/netflix.mrs")),
        ),
        (
            "China_Domain",
            RuleProvider::http(Domain, Mrs, &format!("{META_GEOSITE}/cn.mrs")),
        ),
        (
            "China_IP",
            RuleProvider::http(Ipcidr, Mrs, &format!("{META_GEOIP}/cn.mrs")),
        ),
    ]
}

/// 转成 rule-providers 字段
pub fn rule_providers_mapping() -> Result<Mapping> {
    let mut map = Mapping::new();
    for (name, provider) in rule_providers() {
        let value = serde_yaml_ng::to_value(&provider)
            .with_context(|| format!("failed to serialize rule provider {name}"))?;
        map.insert(Value::from(name), value);
    }
    Ok(map)
}

/// 自上而下匹配，MATCH 兜底必须在最后
pub fn build_rules() -> Vec<String> {
    [
        "RULE-SET,ChatGPT,ChatGPT",
        "RULE-SET,Claude,Claude",
        "RULE-SET,MetaAi,Meta AI",
        "RULE-SET,Perplexity,Perplexity",
        "RULE-SET,Copilot,Copilot",
        "RULE-SET,Gemini,Gemini",
        "RULE-SET,Telegram_Domain,Telegram",
        "RULE-SET,Telegram_IP,Telegram",
        "RULE-SET,Netflix_Domain,Netflix",
        "RULE-SET,China_Domain,国内",
        "RULE-SET,China_IP,国内,no-resolve",
        "GEOIP,CN,国内,no-resolve",
        "MATCH,其他",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// 规则的目标策略组，`MATCH,target` 与 `TYPE,payload,target[,option]`
pub fn rule_target(rule: &str) -> Option<&str> {
    let parts: Vec<&str> = rule.split(',').map(str::trim).collect();
    match parts.as_slice() {
        ["MATCH", target] => Some(*target),
        [_, _, target, ..] => Some(*target),
        _ => None,
    }
}

/// `RULE-SET,provider,...` 引用的规则集名称
pub fn rule_provider_ref(rule: &str) -> Option<&str> {
    let mut parts = rule.split(',').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some("RULE-SET"), Some(provider)) => Some(provider),
        _ => None,
    }
}
