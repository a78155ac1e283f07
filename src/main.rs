//! # smart-override
//!
//! 将订阅配置转换为带地区组、业务分流组和规则集的 mihomo 配置。
//!
//! ```bash
//! # 读取文件，输出到 stdout
//! smart-override sub.yaml
//!
//! # 关闭 smart 组并输出完整内核配置
//! smart-override sub.yaml --smart false --full true -o config.yaml
//!
//! # 地区组交给内核按 filter 筛选
//! cat sub.yaml | smart-override --strategy deferred --check
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::LevelFilter;
use serde_yaml_ng::{Mapping, Value};

use smart_override::enhance::validate::check_references;
use smart_override::utils::logging::{Type, init_logger};
use smart_override::{FlagDefaults, enhance_with_args, logging};

/// Mihomo 订阅增强
#[derive(Parser, Debug)]
#[command(name = "smart-override")]
#[command(version)]
#[command(about = "Generate proxy groups, rule providers and rules for a mihomo subscription")]
struct Cli {
    /// 订阅配置 (YAML)，省略或为 `-` 时读取 stdin
    input: Option<PathBuf>,

    /// 输出文件，默认 stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 启用 smart 策略组 (true/1 为真)
    #[arg(long)]
    smart: Option<String>,

    /// 输出完整内核全局配置
    #[arg(long)]
    full: Option<String>,

    /// 开启 IPv6
    #[arg(long)]
    ipv6: Option<String>,

    /// 地区组节点解析方式: eager | deferred
    #[arg(long)]
    strategy: Option<String>,

    /// 额外参数 key=value，可重复
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,

    /// 参数文件 (YAML mapping)，命令行参数优先
    #[arg(long)]
    args_file: Option<PathBuf>,

    /// smart 默认关闭（通用内核）
    #[arg(long)]
    classic: bool,

    /// 输出前检查引用完整性
    #[arg(long)]
    check: bool,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logger(cli.log_level) {
        eprintln!("failed to init logger: {err:#}");
    }

    if let Err(err) = run(cli) {
        logging!(error, Type::Cli, "{:#}", err);
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = read_config(cli.input.as_deref())?;
    let args = build_args(&cli)?;
    let defaults = if cli.classic {
        FlagDefaults::classic()
    } else {
        FlagDefaults::smart()
    };

    let config = enhance_with_args(config, &args, defaults)?;

    if cli.check {
        check_references(&config).context("generated config failed reference check")?;
        logging!(info, Type::Cli, "引用检查通过");
    }

    let content = if cli.json {
        serde_json::to_string_pretty(&config).context("failed to serialize config as json")?
    } else {
        serde_yaml_ng::to_string(&config).context("failed to serialize config as yaml")?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            logging!(info, Type::Cli, "已写入 {}", path.display());
        }
        None => {
            io::stdout()
                .write_all(content.as_bytes())
                .context("failed to write stdout")?;
        }
    }
    Ok(())
}

fn read_config(input: Option<&std::path::Path>) -> Result<Mapping> {
    let content = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    parse_config(&content)
}

/// 订阅内容必须是 mapping，空文档视为空配置
fn parse_config(content: &str) -> Result<Mapping> {
    match serde_yaml_ng::from_str::<Value>(content).context("invalid subscription yaml")? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => bail!("subscription must be a mapping, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// 参数表：参数文件 < --arg < 具名开关
fn build_args(cli: &Cli) -> Result<Mapping> {
    let mut args = match &cli.args_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml_ng::from_str::<Mapping>(&content)
                .with_context(|| format!("{} is not a yaml mapping", path.display()))?
        }
        None => Mapping::new(),
    };

    for pair in &cli.args {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid --arg {pair}, expected KEY=VALUE"))?;
        args.insert(key.trim().into(), value.trim().into());
    }

    let named = [
        ("smart", &cli.smart),
        ("full", &cli.full),
        ("ipv6", &cli.ipv6),
        ("strategy", &cli.strategy),
    ];
    for (key, value) in named {
        if let Some(value) = value {
            args.insert(key.into(), value.as_str().into());
        }
    }

    Ok(args)
}
