/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::SessionOutcome;
use crate::orchestrator::session::{SessionSettings, TimerPolicy};
use crate::services::report;

/// 初始化日志
///
/// 日志统一写到 stderr，stdout 只留给答题界面。
/// 设置了 `RUST_LOG` 时以它为准，否则按 `verbose` 选择 info / debug。
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "timed_quiz=debug"
    } else {
        "timed_quiz=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // 测试里可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 限时答题 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 题库文件: {}", config.problems_file);
    info!(
        "⏱️ 时间限制: {} 秒 ({:?})",
        config.time_limit_secs, config.timer_policy
    );
    info!("🔀 随机出题: {}", config.shuffle);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `source`: 题库来源
pub fn log_questions_loaded(total: usize, source: &str) {
    info!("✓ 从 {} 加载了 {} 道题", source, total);
}

/// 记录会话开始信息
pub fn log_session_start(settings: &SessionSettings) {
    let policy = match settings.timer_policy {
        TimerPolicy::Global => "整场计时",
        TimerPolicy::PerQuestion => "单题计时",
    };
    info!(
        "📝 会话开始: {:?} 顺序, {}, 限时 {:?}",
        settings.order, policy, settings.time_limit
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `outcome`: 会话结果
pub fn print_final_stats(outcome: &SessionOutcome) {
    let set = outcome.question_set();

    info!("\n{}", "=".repeat(60));
    info!("📊 测验结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    if outcome.is_timed_out() {
        warn!("⏰ 超时结束: 已作答 {}/{}", set.answered_count(), set.total_count());
    } else {
        info!("✅ 全部作答: {}/{}", set.answered_count(), set.total_count());
    }
    info!("🎯 {}", report(set));
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("一二三四五六", 3), "一二三...");
    }
}
