//! 计分服务
//!
//! 纯函数：把最终计数换算成正确率报告

use crate::models::{Question, QuestionSet, SessionOutcome};
use serde::Serialize;

/// 正确率（百分比），总数为 0 时定义为 0
pub fn percent_correct(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

/// 按计数生成报告文本
pub fn format_report(correct: usize, total: usize) -> String {
    format!(
        "{:.2}% ({}/{}) of the answers were correct.",
        percent_correct(correct, total),
        correct,
        total
    )
}

/// 生成题目集的正确率报告
pub fn report(set: &QuestionSet) -> String {
    format_report(set.correct_count(), set.total_count())
}

/// 会话结果类型（用于 JSON 输出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Completed,
    TimedOut,
}

/// 会话汇总，供 JSON 输出使用
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub outcome: OutcomeKind,
    pub correct: usize,
    pub total: usize,
    pub answered: usize,
    pub percent: f64,
    pub questions: &'a [Question],
}

impl<'a> Summary<'a> {
    pub fn from_outcome(outcome: &'a SessionOutcome) -> Self {
        let set = outcome.question_set();
        let kind = if outcome.is_timed_out() {
            OutcomeKind::TimedOut
        } else {
            OutcomeKind::Completed
        };

        Self {
            outcome: kind,
            correct: set.correct_count(),
            total: set.total_count(),
            answered: set.answered_count(),
            percent: (percent_correct(set.correct_count(), set.total_count()) * 100.0).round()
                / 100.0,
            questions: set.questions(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
