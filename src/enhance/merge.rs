use anyhow::{Context, Result};
use serde_yaml_ng::{Mapping, Value};

use crate::config::FeatureFlags;
use crate::utils::tmpl;

fn parse_template(name: &str, template: &str) -> Result<Mapping> {
    serde_yaml_ng::from_str(template).with_context(|| format!("invalid {name} template"))
}

/// 浅合并，按顶层键后写覆盖
pub fn use_merge(patch: Mapping, mut config: Mapping) -> Mapping {
    for (key, value) in patch {
        config.insert(key, value);
    }
    config
}

pub fn dns_config(ipv6: bool) -> Result<Mapping> {
    let mut dns = parse_template("dns", tmpl::DNS)?;
    dns.insert("ipv6".into(), Value::Bool(ipv6));
    Ok(dns)
}

pub fn profile_config() -> Result<Mapping> {
    parse_template("profile", tmpl::PROFILE)
}

/// 端口、模式、日志级别、TUN 等全局配置
pub fn global_runtime(ipv6: bool) -> Result<Mapping> {
    let mut runtime = parse_template("global runtime", tmpl::GLOBAL_RUNTIME)?;
    runtime.insert("ipv6".into(), Value::Bool(ipv6));
    Ok(runtime)
}

/// 生成部分之外的覆盖层，`full` 关闭时为空
pub fn runtime_patch(flags: &FeatureFlags) -> Result<Mapping> {
    if flags.full_config {
        global_runtime(flags.ipv6_enabled)
    } else {
        Ok(Mapping::new())
    }
}
