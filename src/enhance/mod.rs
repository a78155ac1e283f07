pub mod classify;
pub mod groups;
mod merge;
pub mod rules;
pub mod validate;

use anyhow::{Context, Result};
use serde_yaml_ng::{Mapping, Value};

use self::classify::node_names;
use self::groups::build_proxy_groups;
use self::rules::{build_rules, rule_providers_mapping};
use crate::config::{FlagDefaults, Params};
use crate::{logging, utils::logging::Type};

pub use self::merge::{dns_config, global_runtime, profile_config, use_merge};

/// 订阅增强入口：生成策略组、规则集、规则、DNS，按需合并全局配置。
///
/// 订阅中没有任何节点时原样返回
pub fn enhance(config: Mapping, params: &Params) -> Result<Mapping> {
    let nodes = node_names(&config);
    if nodes.is_empty() {
        logging!(info, Type::Enhance, "订阅中没有节点，跳过增强");
        return Ok(config);
    }

    logging!(
        info,
        Type::Enhance,
        "开始增强: {} 个节点, smart={}, full={}, ipv6={}, strategy={:?}",
        nodes.len(),
        params.flags.smart_enabled,
        params.flags.full_config,
        params.flags.ipv6_enabled,
        params.strategy
    );

    let proxy_groups = build_proxy_groups(&nodes, params);
    let group_count = proxy_groups.len();
    let proxy_groups =
        serde_yaml_ng::to_value(proxy_groups).context("failed to serialize proxy groups")?;

    let mut generated = Mapping::new();
    generated.insert("proxy-groups".into(), proxy_groups);
    generated.insert(
        "rule-providers".into(),
        Value::Mapping(rule_providers_mapping()?),
    );
    generated.insert(
        "rules".into(),
        Value::Sequence(build_rules().into_iter().map(Value::from).collect()),
    );
    generated.insert(
        "dns".into(),
        Value::Mapping(dns_config(params.flags.ipv6_enabled)?),
    );
    generated.insert("profile".into(), Value::Mapping(profile_config()?));

    let config = use_merge(merge::runtime_patch(&params.flags)?, config);
    let config = use_merge(generated, config);

    logging!(debug, Type::Enhance, "生成 {} 个策略组", group_count);
    Ok(config)
}

/// 从参数表解析开关后增强
pub fn enhance_with_args(config: Mapping, args: &Mapping, defaults: FlagDefaults) -> Result<Mapping> {
    let params = Params::from_args(args, defaults);
    enhance(config, &params)
}
