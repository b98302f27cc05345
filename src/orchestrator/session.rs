//! 会话协调者 - 编排层
//!
//! ## 职责
//!
//! 让 Proctor 和倒计时赛跑，决定会话的最终结果，并交回题目集。
//!
//! ## 全局计时
//!
//! - 计时器和 Proctor 同时启动，`select!` 等待先到的信号
//! - 到期先到：`TimedOut`，Proctor 在挂起点被就地丢弃，已判分的题目保留
//! - 完成先到：`Completed`，取消计时器（已到期时取消无效果，不会改写结果）
//! - 两者同时就绪时先检查 Proctor（`biased`），即完成优先
//!
//! 题目集只在 Proctor 的 future 结束或被丢弃之后才被读取，
//! 可变借用随之结束，不需要任何锁。
//!
//! ## 单题计时
//!
//! 不做整场赛跑，每道题各自和自己的倒计时赛跑，超时只判该题错误，
//! 所有题目处理完后会话总是以 `Completed` 结束。

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::error::QuizResult;
use crate::infrastructure::Timer;
use crate::models::{QuestionSet, SessionOutcome};
use crate::services::AnswerReader;
use crate::workflow::{Proctor, QuestionOrder};

/// 计时策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerPolicy {
    /// 整场一个倒计时
    #[default]
    Global,
    /// 每道题重新倒计时
    PerQuestion,
}

impl FromStr for TimerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(TimerPolicy::Global),
            "per-question" | "per_question" => Ok(TimerPolicy::PerQuestion),
            other => Err(format!("未知的计时策略: {}", other)),
        }
    }
}

/// 会话参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// 出题顺序
    pub order: QuestionOrder,
    /// 时间限制（全局为整场，单题为每题）
    pub time_limit: Duration,
    /// 计时策略
    pub timer_policy: TimerPolicy,
    /// 随机出题的种子
    pub seed: Option<u64>,
}

impl SessionSettings {
    pub fn new(order: QuestionOrder, time_limit: Duration, timer_policy: TimerPolicy) -> Self {
        Self {
            order,
            time_limit,
            timer_policy,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// 会话协调者
pub struct SessionCoordinator {
    settings: SessionSettings,
}

impl SessionCoordinator {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }

    /// 运行一场会话
    ///
    /// 输入流故障会中止会话并原样返回错误；超时不是错误
    pub async fn run<W>(
        &self,
        set: QuestionSet,
        reader: &mut AnswerReader,
        out: &mut W,
    ) -> QuizResult<SessionOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        match self.settings.timer_policy {
            TimerPolicy::Global => self.run_global(set, reader, out).await,
            TimerPolicy::PerQuestion => self.run_per_question(set, reader, out).await,
        }
    }

    async fn run_global<W>(
        &self,
        mut set: QuestionSet,
        reader: &mut AnswerReader,
        out: &mut W,
    ) -> QuizResult<SessionOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        let (timer, mut expired) = Timer::countdown(self.settings.time_limit);
        let mut proctor = Proctor::new(self.settings.order)
            .with_seed(self.settings.seed)
            .with_session_deadline(timer.deadline());

        info!("⏱️ 全局计时开始: {:?}", self.settings.time_limit);

        let timed_out = tokio::select! {
            biased;
            done = proctor.run(&mut set, reader, out) => {
                let done = done?;
                info!("✓ 全部 {} 道题已作答", done.presented);
                false
            }
            _ = &mut expired => true,
        };
        timer.cancel();

        if timed_out {
            warn!(
                "⏰ 全局计时到期，已作答 {}/{}",
                set.answered_count(),
                set.total_count()
            );
            Ok(SessionOutcome::TimedOut(set))
        } else {
            Ok(SessionOutcome::Completed(set))
        }
    }

    async fn run_per_question<W>(
        &self,
        mut set: QuestionSet,
        reader: &mut AnswerReader,
        out: &mut W,
    ) -> QuizResult<SessionOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        let mut proctor = Proctor::new(self.settings.order)
            .with_seed(self.settings.seed)
            .with_question_limit(self.settings.time_limit);

        info!("⏱️ 单题计时: 每题 {:?}", self.settings.time_limit);

        let done = proctor.run(&mut set, reader, out).await?;
        info!("✓ 全部 {} 道题已处理", done.presented);

        Ok(SessionOutcome::Completed(set))
    }
}

/// 运行一场会话（便捷入口）
pub async fn run_session<W>(
    set: QuestionSet,
    settings: SessionSettings,
    reader: &mut AnswerReader,
    out: &mut W,
) -> QuizResult<SessionOutcome>
where
    W: AsyncWrite + Unpin,
{
    SessionCoordinator::new(settings).run(set, reader, out).await
}
