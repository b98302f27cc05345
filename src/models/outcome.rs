use crate::models::question_set::QuestionSet;

/// 会话的最终结果
///
/// 两种情况都带着判定那一刻的题目集；超时时可能只判了一部分
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// 所有题目都已作答
    Completed(QuestionSet),
    /// 全局计时先到，Proctor 被就地放弃
    TimedOut(QuestionSet),
}

impl SessionOutcome {
    pub fn is_timed_out(&self) -> bool {
        matches!(self, SessionOutcome::TimedOut(_))
    }

    pub fn question_set(&self) -> &QuestionSet {
        match self {
            SessionOutcome::Completed(set) | SessionOutcome::TimedOut(set) => set,
        }
    }

    pub fn into_question_set(self) -> QuestionSet {
        match self {
            SessionOutcome::Completed(set) | SessionOutcome::TimedOut(set) => set,
        }
    }
}
