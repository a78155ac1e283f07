mod flags;
mod group;
mod provider;

pub use self::{flags::*, group::*, provider::*};

/// 直连伪节点
pub const DIRECT: &str = "直连";
/// 拒绝伪节点
pub const REJECT: &str = "拒绝";
pub const ALL_SMART: &str = "所有-智选";
pub const ALL_MANUAL: &str = "所有-手选";
pub const ABROAD: &str = "国外";
pub const DOMESTIC: &str = "国内";
pub const OTHER: &str = "其他";

/// 内核内置出站
pub const BUILTIN_OUTBOUNDS: [&str; 4] = ["DIRECT", "REJECT", "REJECT-DROP", "PASS"];
