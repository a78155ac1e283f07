//! Some config file template

/// global runtime settings merged when `full` is set
pub const GLOBAL_RUNTIME: &str = "# Global Runtime Template for Smart Override

port: 7890
socks-port: 7891
mixed-port: 7893
allow-lan: true
mode: rule
log-level: info
ipv6: false
tun:
  enable: true
  stack: gvisor
  auto-route: true
  auto-detect-interface: true
";

/// fake-ip dns, `ipv6` is patched from flags
pub const DNS: &str = "# DNS Template for Smart Override

enable: true
ipv6: false
enhanced-mode: fake-ip
fake-ip-range: 198.20.0.1/16
nameserver:
  - 223.5.5.5
fake-ip-filter:
  - +.lan
  - +.local
  - geosite:cn
";

pub const PROFILE: &str = "# Profile Template for Smart Override

store-selected: true
store-fake-ip: true
";
