use serde::{Deserialize, Serialize};
use std::fmt;

/// 判分状态
///
/// 只能从 `Ungraded` 迁移到 `Correct` / `Incorrect` 一次，之后不再变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// 尚未作答
    #[default]
    Ungraded,
    /// 回答正确
    Correct,
    /// 回答错误（包括单题超时）
    Incorrect,
}

impl Grade {
    pub fn is_graded(self) -> bool {
        self != Grade::Ungraded
    }

    /// 结果表中使用的勾选框
    pub fn result_box(self) -> &'static str {
        match self {
            Grade::Ungraded => "[   ]",
            Grade::Correct => "[ √ ]",
            Grade::Incorrect => "[ X ]",
        }
    }
}

/// 单道题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 题干
    pub text: String,
    /// 标准答案
    pub answer: String,
    /// 用户答案（单题超时时保持为空）
    user_answer: Option<String>,
    grade: Grade,
}

impl Question {
    /// 创建新的题目，初始状态为未作答
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
            user_answer: None,
            grade: Grade::Ungraded,
        }
    }

    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.as_deref()
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// 记录用户答案并判分
    ///
    /// `None` 表示本题超时未作答，直接判为错误。
    /// 已经判过分的题目不会被改写，返回原来的结果。
    pub fn record(&mut self, user_answer: Option<String>) -> Grade {
        if self.grade.is_graded() {
            tracing::warn!("题目 \"{}\" 已判分，忽略重复作答", self.text);
            return self.grade;
        }

        self.grade = match user_answer.as_deref() {
            Some(given) => grade_answer(&self.answer, given),
            None => Grade::Incorrect,
        };
        self.user_answer = user_answer;
        self.grade
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.text,
            self.answer,
            self.user_answer.as_deref().unwrap_or("<empty>"),
            self.grade.result_box()
        )
    }
}

/// 答案归一化：先去掉首尾空白，再转小写
///
/// 只做文本层面的处理，"four" 和 "4" 仍然不相等
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 比较标准答案和用户答案（纯函数，两边使用同一套归一化）
pub fn grade_answer(expected: &str, given: &str) -> Grade {
    if normalize_answer(expected) == normalize_answer(given) {
        Grade::Correct
    } else {
        Grade::Incorrect
    }
}
