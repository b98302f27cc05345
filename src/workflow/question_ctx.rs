//! 题目处理上下文
//!
//! 封装"现在出的是第几道题、对应题库里哪一题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCtx {
    /// 题目在题目集中的索引（从0开始）
    pub index: usize,

    /// 出题顺序中的位置（从1开始，用于显示）
    pub position: usize,

    /// 题目总数
    pub total: usize,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(index: usize, position: usize, total: usize) -> Self {
        Self {
            index,
            position,
            total,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 {}/{} 索引#{}]", self.position, self.total, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = QuestionCtx::new(4, 3, 3);
        assert_eq!(ctx.to_string(), "[题目 3/3 索引#4]");
    }
}
