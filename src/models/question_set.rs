use crate::error::{QuizError, QuizResult};
use crate::models::question::{Grade, Question};
use serde::Serialize;

/// 一套题目及其计分
///
/// 题目顺序即文件中的顺序，加载后不再增删；
/// 会话期间只有 Proctor 通过可变借用修改单题状态和正确数
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
    total_count: usize,
    correct_count: usize,
}

impl QuestionSet {
    /// 从有序的 (题干, 答案) 记录构建题目集
    ///
    /// 空题库直接拒绝，不允许开始一场零题的测验
    pub fn load<I, T, A>(source_name: &str, records: I) -> QuizResult<Self>
    where
        I: IntoIterator<Item = (T, A)>,
        T: Into<String>,
        A: Into<String>,
    {
        let questions: Vec<Question> = records
            .into_iter()
            .map(|(text, answer)| Question::new(text, answer))
            .collect();

        if questions.is_empty() {
            return Err(QuizError::empty_source(source_name));
        }

        Ok(Self {
            total_count: questions.len(),
            questions,
            correct_count: 0,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// 已判分的题目数量
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.grade().is_graded())
            .count()
    }

    /// 为第 `index` 题记录答案并计分
    ///
    /// 只有从未判分迁移到正确时才累加正确数，重复记录不会重复计分
    pub fn record_answer(&mut self, index: usize, user_answer: Option<String>) -> Grade {
        let Some(question) = self.questions.get_mut(index) else {
            tracing::error!("题目索引 {} 超出范围 [0, {})", index, self.total_count);
            return Grade::Ungraded;
        };

        let was_graded = question.grade().is_graded();
        let grade = question.record(user_answer);
        if !was_graded && grade == Grade::Correct {
            self.correct_count += 1;
        }
        grade
    }
}
