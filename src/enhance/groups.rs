//! 策略组生成：业务分流组、全部节点组、地区组

use super::classify::{Region, classify};
use crate::config::{
    ABROAD, ALL_MANUAL, ALL_SMART, ClassifyStrategy, DIRECT, DOMESTIC, GroupType, OTHER, Params,
    ProxyGroup, REJECT,
};

/// 业务分流组，顺序即面板中的展示顺序
pub const SERVICE_GROUPS: [&str; 31] = [
    "ChatGPT",
    "Gemini",
    "Copilot",
    "Perplexity",
    "Claude",
    "Meta AI",
    "GitHub",
    "Reddit",
    "Telegram",
    "WhatsApp",
    "Facebook",
    "YouTube",
    "TikTok",
    "Netflix",
    "HBO",
    "Disney",
    "Amazon",
    "Crunchyroll",
    "Spotify",
    "Nvidia",
    "Steam",
    "Games",
    "Crypto",
    "Apple",
    "Google",
    "Microsoft",
    "Test",
    "Block",
    ABROAD,
    DOMESTIC,
    OTHER,
];

/// 地区三件套：故转、手选、智选
pub fn region_groups(region: Region, nodes: &[String], params: &Params) -> Vec<ProxyGroup> {
    let matcher = region.matcher();

    let proxies = match params.strategy {
        ClassifyStrategy::Eager => classify(nodes, matcher),
        ClassifyStrategy::Deferred => Vec::new(),
    };
    let mut manual = ProxyGroup::select(region.manual_group(), proxies.clone());
    let mut auto = ProxyGroup::new(region.auto_group(), params.flags.auto_group_type(), proxies);

    if params.strategy == ClassifyStrategy::Deferred {
        for group in [&mut manual, &mut auto] {
            group.include_all_proxies = Some(true);
            match region {
                Region::Other => group.exclude_filter = Some(matcher.filter()),
                _ => group.filter = Some(matcher.filter()),
            }
        }
    }

    let fallback = ProxyGroup::new(
        region.fallback_group(),
        GroupType::Fallback,
        vec![region.manual_group(), region.auto_group()],
    );

    vec![fallback, manual, auto]
}

/// 业务分流组共用的候选池
pub fn base_selector_proxies() -> Vec<String> {
    let mut proxies = vec![
        DIRECT.to_string(),
        ALL_SMART.to_string(),
        ALL_MANUAL.to_string(),
    ];
    proxies.extend(Region::ALL.iter().map(Region::fallback_group));
    proxies.push(REJECT.to_string());
    proxies
}

pub fn service_groups() -> Vec<ProxyGroup> {
    let pool = base_selector_proxies();
    SERVICE_GROUPS
        .iter()
        .map(|name| ProxyGroup::select(*name, pool.clone()))
        .collect()
}

/// 直连/拒绝 伪节点映射到内核内置出站，订阅中已有同名节点时不再生成
fn pseudo_groups(nodes: &[String]) -> Vec<ProxyGroup> {
    [(DIRECT, "DIRECT"), (REJECT, "REJECT")]
        .into_iter()
        .filter(|(name, _)| !nodes.iter().any(|node| node == name))
        .map(|(name, builtin)| ProxyGroup::select(name, vec![builtin.to_string()]))
        .collect()
}

/// 生成全部策略组
pub fn build_proxy_groups(nodes: &[String], params: &Params) -> Vec<ProxyGroup> {
    let mut groups = service_groups();

    groups.push(ProxyGroup::select(ALL_MANUAL, nodes.to_vec()));
    groups.push(ProxyGroup::new(
        ALL_SMART,
        params.flags.auto_group_type(),
        nodes.to_vec(),
    ));

    for region in Region::ALL {
        groups.extend(region_groups(region, nodes, params));
    }

    groups.extend(pseudo_groups(nodes));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureFlags, PROBE_INTERVAL, PROBE_URL};

    fn nodes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn find<'a>(groups: &'a [ProxyGroup], name: &str) -> &'a ProxyGroup {
        groups
            .iter()
            .find(|g| g.name == name)
            .unwrap_or_else(|| unreachable!("missing group {name}"))
    }

    fn classic() -> Params {
        Params {
            flags: FeatureFlags {
                smart_enabled: false,
                full_config: false,
                ipv6_enabled: false,
            },
            strategy: ClassifyStrategy::Eager,
        }
    }

    #[test]
    fn region_groups_eager() {
        let all = nodes(&["JP-1", "US-1", "JP-2"]);
        let groups = region_groups(Region::Japan, &all, &Params::default());

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, "日本-故转");
        assert_eq!(groups[0].group_type, GroupType::Fallback);
        assert_eq!(groups[0].proxies, nodes(&["日本-手选", "日本-智选"]));
        assert_eq!(groups[0].url.as_deref(), Some(PROBE_URL));
        assert_eq!(groups[0].interval, Some(PROBE_INTERVAL));

        assert_eq!(groups[1].name, "日本-手选");
        assert_eq!(groups[1].group_type, GroupType::Select);
        assert_eq!(groups[1].proxies, nodes(&["JP-1", "JP-2"]));

        assert_eq!(groups[2].name, "日本-智选");
        assert_eq!(groups[2].group_type, GroupType::Smart);
        assert_eq!(groups[2].proxies, nodes(&["JP-1", "JP-2"]));
    }

    #[test]
    fn auto_group_falls_back_to_url_test() {
        let groups = build_proxy_groups(&nodes(&["SG-1"]), &classic());
        assert_eq!(find(&groups, ALL_SMART).group_type, GroupType::UrlTest);
        assert_eq!(find(&groups, "新加坡-智选").group_type, GroupType::UrlTest);
    }

    #[test]
    fn empty_region_references_direct() {
        let groups = build_proxy_groups(&nodes(&["HK-01"]), &Params::default());
        for region in Region::ALL {
            assert_eq!(find(&groups, &region.manual_group()).proxies, nodes(&[DIRECT]));
            assert_eq!(find(&groups, &region.auto_group()).proxies, nodes(&[DIRECT]));
        }
        assert_eq!(find(&groups, DIRECT).proxies, nodes(&["DIRECT"]));
    }

    #[test]
    fn deferred_strategy_embeds_filters() {
        let params = Params {
            strategy: ClassifyStrategy::Deferred,
            ..Params::default()
        };
        let groups = build_proxy_groups(&nodes(&["JP-1"]), &params);

        let manual = find(&groups, "日本-手选");
        assert!(manual.proxies.is_empty());
        assert_eq!(manual.include_all_proxies, Some(true));
        assert!(manual.filter.as_deref().is_some_and(|f| f.starts_with("(?i)")));
        assert_eq!(manual.exclude_filter, None);

        let other = find(&groups, "其他-智选");
        assert_eq!(other.filter, None);
        assert!(other.exclude_filter.as_deref().is_some_and(|f| f.contains("HK")));

        // 全部节点组仍然是具体节点
        assert_eq!(find(&groups, ALL_MANUAL).proxies, nodes(&["JP-1"]));
    }

    #[test]
    fn service_groups_share_pool() {
        let groups = service_groups();
        assert_eq!(groups.len(), SERVICE_GROUPS.len());
        let pool = base_selector_proxies();
        assert_eq!(pool.first().map(String::as_str), Some(DIRECT));
        assert_eq!(pool.last().map(String::as_str), Some(REJECT));
        assert_eq!(pool.len(), 9);
        assert!(groups.iter().all(|g| g.group_type == GroupType::Select && g.proxies == pool));
    }

    #[test]
    fn group_order() {
        let groups = build_proxy_groups(&nodes(&["a"]), &Params::default());
        assert_eq!(groups[0].name, "ChatGPT");
        assert_eq!(groups[31].name, ALL_MANUAL);
        assert_eq!(groups[32].name, ALL_SMART);
        assert_eq!(groups[33].name, "日本-故转");
        assert_eq!(groups.len(), 31 + 2 + 15 + 2);
    }

    #[test]
    fn pseudo_group_skipped_when_node_exists() {
        let groups = build_proxy_groups(&nodes(&[DIRECT, "JP-1"]), &Params::default());
        assert!(!groups.iter().any(|g| g.name == DIRECT));
        assert!(groups.iter().any(|g| g.name == REJECT));
    }
}
