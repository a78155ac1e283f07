use serde_yaml_ng::{Mapping, Value};

use crate::{logging, utils::logging::Type};

/// 布尔参数解析：bool 原样返回，字符串仅 "true"(忽略大小写) 或 "1" 为真，其余情况取默认值
pub fn parse_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => default,
    }
}

/// 各参数缺省时的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDefaults {
    pub smart: bool,
    pub full: bool,
    pub ipv6: bool,
}

impl FlagDefaults {
    /// Smart 内核版本，默认启用 smart 策略组
    pub const fn smart() -> Self {
        Self {
            smart: true,
            full: false,
            ipv6: false,
        }
    }

    /// 通用内核版本，默认回退到 url-test
    pub const fn classic() -> Self {
        Self {
            smart: false,
            full: false,
            ipv6: false,
        }
    }
}

impl Default for FlagDefaults {
    fn default() -> Self {
        Self::smart()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub smart_enabled: bool,
    pub full_config: bool,
    pub ipv6_enabled: bool,
}

impl FeatureFlags {
    pub fn from_args(args: &Mapping, defaults: FlagDefaults) -> Self {
        Self {
            smart_enabled: parse_bool(args.get("smart"), defaults.smart),
            full_config: parse_bool(args.get("full"), defaults.full),
            ipv6_enabled: parse_bool(args.get("ipv6"), defaults.ipv6),
        }
    }

    /// 自动选择组类型
    pub fn auto_group_type(&self) -> super::GroupType {
        if self.smart_enabled {
            super::GroupType::Smart
        } else {
            super::GroupType::UrlTest
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::from_args(&Mapping::new(), FlagDefaults::default())
    }
}

/// 地区分组的节点解析方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyStrategy {
    /// 生成时按正则筛选，写入具体节点列表
    #[default]
    Eager,
    /// 写入 filter 表达式，由内核在加载时筛选
    Deferred,
}

impl ClassifyStrategy {
    pub fn from_args(args: &Mapping) -> Self {
        match args.get("strategy") {
            Some(Value::String(s))
                if s.eq_ignore_ascii_case("deferred") || s.eq_ignore_ascii_case("filter") =>
            {
                Self::Deferred
            }
            _ => Self::Eager,
        }
    }
}

/// 贯穿各构建函数的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Params {
    pub flags: FeatureFlags,
    pub strategy: ClassifyStrategy,
}

impl Params {
    pub fn from_args(args: &Mapping, defaults: FlagDefaults) -> Self {
        let params = Self {
            flags: FeatureFlags::from_args(args, defaults),
            strategy: ClassifyStrategy::from_args(args),
        };
        logging!(
            debug,
            Type::Config,
            "解析参数: {:?} (缺省 {:?})",
            params,
            defaults
        );
        params
    }
}
