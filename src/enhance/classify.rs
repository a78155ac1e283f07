//! 按节点名称归类地区

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_yaml_ng::{Mapping, Value};

use crate::config::DIRECT;

const JP_PATTERN: &str = "广日|日本|JP|川日|东京|大阪|泉日|jp|沪日|深日|🇯🇵|Japan";
const SG_PATTERN: &str = "广新|新加坡|SG|sg|狮城|🇸🇬|Singapore";
const KR_PATTERN: &str = "广韩|韩国|韓國|KR|首尔|春川|🇰🇷|Korea";
const US_PATTERN: &str =
    "广美|US|美国|纽约|波特兰|达拉斯|俄勒|凤凰城|费利蒙|洛杉|圣何塞|圣克拉|西雅|芝加|🇺🇸|United States";
/// 其他组排除掉上述已有的地区，以及港台
const OTHER_EXCLUDE_PATTERN: &str =
    "直连|拒绝|广港|香港|HK|广台|台湾|日本|JP|新加坡|SG|韩国|KR|美国|US";

/// 交给 mihomo 的 filter 表达式
pub fn case_insensitive(pattern: &str) -> String {
    format!("(?i){pattern}")
}

/// 仅对 ASCII 字母忽略大小写，避免 `ſ`、开尔文符号等被折叠成 s/K
fn ascii_case_insensitive(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .ok()
}

// 均为常量表达式，编译失败时该组视为无命中
static JP: Lazy<Option<Regex>> = Lazy::new(|| ascii_case_insensitive(JP_PATTERN));
static SG: Lazy<Option<Regex>> = Lazy::new(|| ascii_case_insensitive(SG_PATTERN));
static KR: Lazy<Option<Regex>> = Lazy::new(|| ascii_case_insensitive(KR_PATTERN));
static US: Lazy<Option<Regex>> = Lazy::new(|| ascii_case_insensitive(US_PATTERN));
static OTHER_EXCLUDE: Lazy<Option<Regex>> =
    Lazy::new(|| ascii_case_insensitive(OTHER_EXCLUDE_PATTERN));

fn hit(re: &Lazy<Option<Regex>>, name: &str) -> bool {
    Lazy::force(re)
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// 节点筛选条件
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// 名称命中表达式
    Include(&'static str, &'static Lazy<Option<Regex>>),
    /// 名称不命中表达式
    Exclude(&'static str, &'static Lazy<Option<Regex>>),
}

impl Matcher {
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::Include(_, re) => hit(re, name),
            Matcher::Exclude(_, re) => !hit(re, name),
        }
    }

    /// 供内核筛选的表达式
    pub fn filter(&self) -> String {
        match self {
            Matcher::Include(pattern, _) | Matcher::Exclude(pattern, _) => {
                case_insensitive(pattern)
            }
        }
    }
}

/// 地区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Japan,
    Singapore,
    Korea,
    UnitedStates,
    Other,
}

impl Region {
    /// 地区组的生成顺序
    pub const ALL: [Region; 5] = [
        Region::Japan,
        Region::Singapore,
        Region::Korea,
        Region::UnitedStates,
        Region::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Japan => "日本",
            Region::Singapore => "新加坡",
            Region::Korea => "韩国",
            Region::UnitedStates => "美国",
            Region::Other => "其他",
        }
    }

    pub fn matcher(&self) -> Matcher {
        match self {
            Region::Japan => Matcher::Include(JP_PATTERN, &JP),
            Region::Singapore => Matcher::Include(SG_PATTERN, &SG),
            Region::Korea => Matcher::Include(KR_PATTERN, &KR),
            Region::UnitedStates => Matcher::Include(US_PATTERN, &US),
            Region::Other => Matcher::Exclude(OTHER_EXCLUDE_PATTERN, &OTHER_EXCLUDE),
        }
    }

    pub fn fallback_group(&self) -> String {
        format!("{}-故转", self.name())
    }

    pub fn manual_group(&self) -> String {
        format!("{}-手选", self.name())
    }

    pub fn auto_group(&self) -> String {
        format!("{}-智选", self.name())
    }
}

/// 按原顺序筛出命中的节点，为空时回退到直连
pub fn classify(names: &[String], matcher: Matcher) -> Vec<String> {
    let list: Vec<String> = names
        .iter()
        .filter(|name| matcher.is_match(name))
        .cloned()
        .collect();

    if list.is_empty() {
        vec![DIRECT.to_string()]
    } else {
        list
    }
}

/// 取出 proxies 中所有节点名称，缺失或非字符串名称的条目跳过
pub fn node_names(config: &Mapping) -> Vec<String> {
    config
        .get("proxies")
        .and_then(Value::as_sequence)
        .map(|proxies| {
            proxies
                .iter()
                .filter_map(|proxy| proxy.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
