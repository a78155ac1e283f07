use serde_yaml_ng::{Mapping, Value};
use smart_override::enhance::validate::check_references;
use smart_override::{FlagDefaults, enhance_with_args};

const SUBSCRIPTION: &str = "
mixed-port: 7897
proxies:
  - {name: 🇭🇰 香港 01, type: ss, server: hk.example.com, port: 443}
  - {name: 🇯🇵 日本 东京 01, type: vmess, server: jp.example.com, port: 443}
  - {name: 🇺🇸 美国 洛杉矶 01, type: trojan, server: us.example.com, port: 443}
  - {name: 🇸🇬 新加坡 狮城 01, type: ss, server: sg.example.com, port: 443}
  - {name: 🇩🇪 法兰克福 01, type: ss, server: de.example.com, port: 443}
  - {name: 剩余流量：100 GB, type: ss, server: info.example.com, port: 443}
";

fn load(s: &str) -> Mapping {
    serde_yaml_ng::from_str(s).unwrap()
}

fn group_proxies<'a>(config: &'a Mapping, name: &str) -> Vec<&'a str> {
    config["proxy-groups"]
        .as_sequence()
        .into_iter()
        .flatten()
        .find(|g| g["name"].as_str() == Some(name))
        .and_then(|g| g["proxies"].as_sequence())
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn subscription_is_fully_routed() {
    let args = load("smart: 'TRUE'\nfull: '0'\n");
    let output = enhance_with_args(load(SUBSCRIPTION), &args, FlagDefaults::classic()).unwrap();

    assert_eq!(group_proxies(&output, "日本-手选"), ["🇯🇵 日本 东京 01"]);
    assert_eq!(group_proxies(&output, "美国-手选"), ["🇺🇸 美国 洛杉矶 01"]);
    assert_eq!(group_proxies(&output, "新加坡-智选"), ["🇸🇬 新加坡 狮城 01"]);
    assert_eq!(group_proxies(&output, "韩国-手选"), ["直连"]);
    // 港台和已归类地区不进入其他组，信息节点会进入
    assert_eq!(
        group_proxies(&output, "其他-手选"),
        ["🇩🇪 法兰克福 01", "剩余流量：100 GB"]
    );
    assert_eq!(group_proxies(&output, "所有-手选").len(), 6);

    assert_eq!(output["mixed-port"].as_u64(), Some(7897));
    assert!(!output.contains_key("tun"));
    assert!(!output.contains_key("socks-port"));

    check_references(&output).unwrap();
}

#[test]
fn output_round_trips_through_yaml() {
    let output = enhance_with_args(load(SUBSCRIPTION), &Mapping::new(), FlagDefaults::smart())
        .unwrap();
    let text = serde_yaml_ng::to_string(&output).unwrap();
    let reparsed: Mapping = serde_yaml_ng::from_str(&text).unwrap();
    assert_eq!(reparsed, output);
    assert!(text.contains("type: smart"));
}

#[test]
fn no_nodes_is_a_no_op() {
    let input = load("proxies: []\nrules: ['MATCH,DIRECT']\n");
    let output = enhance_with_args(input.clone(), &load("full: true"), FlagDefaults::smart())
        .unwrap();
    assert_eq!(output, input);
}
