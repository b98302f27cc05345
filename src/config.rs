use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::orchestrator::session::{SessionSettings, TimerPolicy};
use crate::workflow::QuestionOrder;

/// 结果输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 正确率报告（可带结果表）
    #[default]
    Text,
    /// JSON 汇总
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("未知的输出格式: {}", other)),
        }
    }
}

/// 程序配置
///
/// 优先级从低到高：默认值 → TOML 配置文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库文件（.csv 或 .toml）
    pub problems_file: String,
    /// 时间限制（秒）
    pub time_limit_secs: u64,
    /// 计时策略
    pub timer_policy: TimerPolicy,
    /// 是否随机出题
    pub shuffle: bool,
    /// 随机出题的种子
    pub shuffle_seed: Option<u64>,
    /// 是否输出结果表
    pub show_results_table: bool,
    /// 结果输出格式
    pub output_format: OutputFormat,
    /// 开始前是否等待回车
    pub wait_for_start: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            problems_file: "problems.csv".to_string(),
            time_limit_secs: 30,
            timer_policy: TimerPolicy::Global,
            shuffle: false,
            shuffle_seed: None,
            show_results_table: false,
            output_format: OutputFormat::Text,
            wait_for_start: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从 TOML 配置文件加载，缺省的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 用环境变量覆盖当前配置
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars<F>(self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            problems_file: var("QUIZ_FILE").unwrap_or(self.problems_file),
            time_limit_secs: var("QUIZ_TIME_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(self.time_limit_secs),
            timer_policy: var("QUIZ_TIMER_POLICY").and_then(|v| v.parse().ok()).unwrap_or(self.timer_policy),
            shuffle: var("QUIZ_SHUFFLE").and_then(|v| v.parse().ok()).unwrap_or(self.shuffle),
            shuffle_seed: var("QUIZ_SEED").and_then(|v| v.parse().ok()).or(self.shuffle_seed),
            show_results_table: var("QUIZ_SHOW_TABLE").and_then(|v| v.parse().ok()).unwrap_or(self.show_results_table),
            output_format: var("QUIZ_OUTPUT_FORMAT").and_then(|v| v.parse().ok()).unwrap_or(self.output_format),
            wait_for_start: var("QUIZ_WAIT_FOR_START").and_then(|v| v.parse().ok()).unwrap_or(self.wait_for_start),
            verbose_logging: var("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.problems_file.trim().is_empty() {
            anyhow::bail!("题库文件路径不能为空");
        }
        if self.time_limit_secs == 0 {
            anyhow::bail!("时间限制必须大于 0 秒");
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn question_order(&self) -> QuestionOrder {
        if self.shuffle {
            QuestionOrder::Randomized
        } else {
            QuestionOrder::Sequential
        }
    }

    /// 生成会话参数
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::new(self.question_order(), self.time_limit(), self.timer_policy)
            .with_seed(self.shuffle_seed)
    }
}
