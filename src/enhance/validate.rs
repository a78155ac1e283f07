//! 检查生成结果的引用完整性

use std::collections::HashSet;

use anyhow::{Result, bail};
use serde_yaml_ng::{Mapping, Value};

use super::classify::node_names;
use super::rules::{rule_provider_ref, rule_target};
use crate::config::BUILTIN_OUTBOUNDS;
use crate::{logging, utils::logging::Type};

fn str_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// 策略组与规则中引用的名称都必须指向策略组、节点或内核内置出站，且最后一条规则为 MATCH
pub fn check_references(config: &Mapping) -> Result<()> {
    let nodes = node_names(config);
    let groups = config
        .get("proxy-groups")
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();

    let mut known: HashSet<&str> = BUILTIN_OUTBOUNDS.into_iter().collect();
    known.extend(nodes.iter().map(String::as_str));
    known.extend(
        groups
            .iter()
            .filter_map(|group| group.get("name").and_then(Value::as_str)),
    );

    for group in &groups {
        let name = group.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
        for proxy in str_list(group.get("proxies")) {
            if !known.contains(proxy) {
                bail!("proxy group {name} references unknown proxy {proxy}");
            }
        }
    }

    let providers: HashSet<&str> = config
        .get("rule-providers")
        .and_then(Value::as_mapping)
        .map(|map| map.keys().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let rules = str_list(config.get("rules"));
    for rule in &rules {
        if let Some(provider) = rule_provider_ref(rule)
            && !providers.contains(provider)
        {
            bail!("rule {rule} references unknown rule provider {provider}");
        }
        match rule_target(rule) {
            Some(target) if known.contains(target) => {}
            Some(target) => bail!("rule {rule} targets unknown proxy {target}"),
            None => bail!("malformed rule {rule}"),
        }
    }

    match rules.last() {
        Some(last) if last.starts_with("MATCH,") => {}
        _ => bail!("rules must end with a MATCH rule"),
    }

    logging!(
        debug,
        Type::Validate,
        "引用检查通过: {} 个策略组, {} 条规则",
        groups.len(),
        rules.len()
    );
    Ok(())
}
