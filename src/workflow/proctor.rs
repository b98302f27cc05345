//! 监考流程 - 流程层
//!
//! 核心职责：按出题顺序逐题提问、读取答案、判分并更新计分
//!
//! 每道题的流程：
//! 1. 打印题目
//! 2. 读取一行答案（挂起点，计时器可以在这里打断）
//! 3. 判分，写入用户答案，正确则累加
//! 4. 打印反馈

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::QuizResult;
use crate::infrastructure::Timer;
use crate::models::{Grade, QuestionSet};
use crate::services::{AnswerReader, AnswerWindow, LineRead};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 出题顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionOrder {
    /// 按文件顺序
    #[default]
    Sequential,
    /// 随机不放回抽取
    Randomized,
}

/// 全部题目出完的信号，整个流程只产生一次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProctorDone {
    /// 实际出题数量
    pub presented: usize,
}

/// 监考流程
///
/// - 决定出题顺序
/// - 逐题提问、读答案、判分
/// - 单题计时模式下，每道题各自和自己的倒计时赛跑
/// - 读取失败直接向上抛出，不判分也不重试
pub struct Proctor {
    order: QuestionOrder,
    rng: StdRng,
    question_limit: Option<Duration>,
    session_deadline: Option<Instant>,
}

impl Proctor {
    pub fn new(order: QuestionOrder) -> Self {
        Self {
            order,
            rng: StdRng::from_os_rng(),
            question_limit: None,
            session_deadline: None,
        }
    }

    /// 固定随机种子，使随机顺序可复现
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self
    }

    /// 单题计时：每道题都有自己的倒计时
    pub fn with_question_limit(mut self, limit: Duration) -> Self {
        self.question_limit = Some(limit);
        self
    }

    /// 全局计时的截止时刻，此后才输完的答案不再采用
    pub fn with_session_deadline(mut self, deadline: Instant) -> Self {
        self.session_deadline = Some(deadline);
        self
    }

    /// 计算出题顺序
    ///
    /// 随机模式每一步从剩余题目中等概率抽一道并移出候选池，
    /// 候选池每步恰好缩小一个，不会重复也不会遗漏
    pub fn presentation_order(&mut self, len: usize) -> Vec<usize> {
        match self.order {
            QuestionOrder::Sequential => (0..len).collect(),
            QuestionOrder::Randomized => {
                let mut pool: Vec<usize> = (0..len).collect();
                let mut order = Vec::with_capacity(len);
                while !pool.is_empty() {
                    let pick = self.rng.random_range(0..pool.len());
                    order.push(pool.swap_remove(pick));
                }
                order
            }
        }
    }

    /// 执行整套题目
    pub async fn run<W>(
        &mut self,
        set: &mut QuestionSet,
        reader: &mut AnswerReader,
        out: &mut W,
    ) -> QuizResult<ProctorDone>
    where
        W: AsyncWrite + Unpin,
    {
        let order = self.presentation_order(set.total_count());
        let total = order.len();

        for (step, &index) in order.iter().enumerate() {
            let ctx = QuestionCtx::new(index, step + 1, total);
            let Some(question) = set.get(index) else {
                continue;
            };

            debug!("{} 出题: {}", ctx, truncate_text(&question.text, 40));
            let prompt = format!("\n\tQuestion {}:\t\t{} = ", ctx.position, question.text);
            write_out(out, &prompt).await?;

            let answer = self.collect_answer(reader, &ctx).await?;
            let timed_out = answer.is_none();
            let grade = set.record_answer(index, answer);

            let feedback = match (timed_out, grade) {
                (true, _) => "\n\tTime's up! Incorrect.\n",
                (false, Grade::Correct) => "\tCorrect!\n",
                (false, _) => "\tIncorrect.\n",
            };
            write_out(out, feedback).await?;
            debug!("{} 判分: {:?}", ctx, grade);
        }

        Ok(ProctorDone { presented: total })
    }

    /// 读取一道题的答案；`None` 表示本题超时
    async fn collect_answer(
        &self,
        reader: &mut AnswerReader,
        ctx: &QuestionCtx,
    ) -> QuizResult<Option<String>> {
        let Some(limit) = self.question_limit else {
            let window = self
                .session_deadline
                .map(AnswerWindow::until)
                .unwrap_or_default();

            return match reader.read_line_within(window).await? {
                LineRead::Answer(answer) => Ok(Some(answer)),
                // 全局截止已过：停在这里等协调者放弃本流程
                LineRead::Late => {
                    debug!("{} 答案晚于全局截止时刻，等待计时器", ctx);
                    std::future::pending().await
                }
            };
        };

        let opened_at = Instant::now();
        let (timer, mut expired) = Timer::countdown(limit);
        let window = AnswerWindow::between(opened_at, timer.deadline());

        let answer = tokio::select! {
            biased;
            read = reader.read_line_within(window) => match read? {
                LineRead::Answer(answer) => Some(answer),
                LineRead::Late => None,
            },
            _ = &mut expired => None,
        };
        timer.cancel();

        if answer.is_none() {
            info!("{} ⏰ 本题超时，判为错误", ctx);
        }
        Ok(answer)
    }
}

async fn write_out<W>(out: &mut W, text: &str) -> QuizResult<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
