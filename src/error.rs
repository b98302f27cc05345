use std::io;

use thiserror::Error;

/// 答题核心的错误类型
///
/// 超时不是错误，而是 `SessionOutcome::TimedOut`；计分时的除零也不会出现在这里
#[derive(Debug, Error)]
pub enum QuizError {
    /// 终端输入输出出错（致命，不重试）
    #[error("终端读写失败: {0}")]
    Io(#[from] io::Error),

    /// 输入流在读到完整一行之前就关闭了
    #[error("输入流已关闭，无法继续读取答案")]
    InputClosed,

    /// 题库里一道题都没有
    #[error("题库为空: {source_name}")]
    EmptySource { source_name: String },
}

impl QuizError {
    /// 创建空题库错误
    pub fn empty_source(source_name: impl Into<String>) -> Self {
        QuizError::EmptySource {
            source_name: source_name.into(),
        }
    }

    /// 是否属于输入流故障（会话必须立即中止）
    pub fn is_input_failure(&self) -> bool {
        matches!(self, QuizError::Io(_) | QuizError::InputClosed)
    }
}

/// 答题核心结果类型
pub type QuizResult<T> = Result<T, QuizError>;
