use clap::{Parser, Subcommand};
use std::path::PathBuf;

use beanbox::logging::LogFormat;

/// beanbox - 检查依赖注入容器配置
#[derive(Parser, Debug)]
#[command(name = "beanbox", version)]
#[command(about = "Load a container configuration, list its registrations and resolve identifiers")]
pub struct Args {
    /// 子命令
    #[command(subcommand)]
    pub command: Command,

    /// 日志级别 (error|warn|info|debug|trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    /// 日志格式 (pretty|compact)
    #[arg(long, global = true, default_value = "compact")]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 列出配置加载后的定义与 Bean
    Inspect {
        /// 配置文件 (.toml 或 .json)
        config: PathBuf,
    },
    /// 加载配置并解析标识符
    Get {
        /// 配置文件 (.toml 或 .json)
        config: PathBuf,
        /// 待解析的标识符
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

impl Args {
    /// 解析命令行参数
    pub fn parse() -> Self {
        <Self as clap::Parser>::parse()
    }
}
