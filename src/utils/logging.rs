use std::fmt;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

/// 日志来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Config,
    Enhance,
    Validate,
    Cli,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Config => write!(f, "[Config]"),
            Type::Enhance => write!(f, "[Enhance]"),
            Type::Validate => write!(f, "[Validate]"),
            Type::Cli => write!(f, "[Cli]"),
        }
    }
}

/// `logging!(level, Type, [print,] fmt, args...)`
///
/// 带 `true` 时同时输出到 stderr，便于在未初始化日志时诊断
#[macro_export]
macro_rules! logging {
    ($level:ident, $type:expr, true, $($arg:tt)*) => {
        eprintln!("{} {}", $type, format_args!($($arg)*));
        log::$level!(target: "app", "{} {}", $type, format_args!($($arg)*));
    };
    ($level:ident, $type:expr, false, $($arg:tt)*) => {
        log::$level!(target: "app", "{} {}", $type, format_args!($($arg)*));
    };
    ($level:ident, $type:expr, $($arg:tt)*) => {
        log::$level!(target: "app", "{} {}", $type, format_args!($($arg)*));
    };
}

/// 初始化 log4rs，仅输出到 stderr，stdout 留给生成的配置
pub fn init_logger(level: LevelFilter) -> Result<()> {
    let encoder = PatternEncoder::new("{d(%H:%M:%S)} {l} - {m}{n}");
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(encoder))
        .build();

    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .context("failed to build log4rs config")?;

    log4rs::init_config(config).context("failed to init logger")?;
    Ok(())
}
