//! 倒计时器 - 基础设施层
//!
//! 独立调度的后台任务，到点后通过 oneshot 通道发出唯一一次"到期"信号

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// 时长过大无法表示时，截止时刻取约 30 年之后
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// 到期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired {
    /// 计划的到期时刻
    pub deadline: Instant,
}

/// 倒计时器
///
/// 职责：
/// - 持有唯一的后台计时任务
/// - 到期后恰好发出一次 `Expired`
/// - 可取消；取消是幂等的，到期之后再取消没有任何效果
/// - 被丢弃时自动取消
pub struct Timer {
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl Timer {
    /// 启动倒计时，到期后向 `expiry` 发送事件
    pub fn start(duration: Duration, expiry: oneshot::Sender<Expired>) -> Self {
        let now = Instant::now();
        let deadline = now.checked_add(duration).unwrap_or_else(|| {
            warn!("⚠️ 倒计时时长过大 ({:?})，改为远期截止", duration);
            now + FAR_FUTURE
        });

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            debug!("⏰ 倒计时到期 ({:?})", duration);
            // 接收端已放弃时发送失败，无需处理
            let _ = expiry.send(Expired { deadline });
        });

        Self { deadline, handle }
    }

    /// 启动倒计时并返回接收端
    pub fn countdown(duration: Duration) -> (Self, oneshot::Receiver<Expired>) {
        let (tx, rx) = oneshot::channel();
        (Self::start(duration, tx), rx)
    }

    /// 计划的到期时刻
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// 取消倒计时
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_duration() {
        let start = Instant::now();
        let (timer, rx) = Timer::countdown(Duration::from_secs(5));

        let expired = rx.await.expect("timer should fire");
        assert_eq!(expired.deadline, start + Duration::from_secs(5));
        assert_eq!(timer.deadline(), expired.deadline);
        assert!(Instant::now() >= start + Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_expiry_emits_nothing() {
        let (timer, rx) = Timer::countdown(Duration::from_secs(5));
        timer.cancel();
        timer.cancel();

        // 任务被取消后发送端随之丢弃，接收端得到的是关闭而不是到期
        assert!(rx.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_expiry_is_noop() {
        let (timer, rx) = Timer::countdown(Duration::from_millis(10));
        let expired = rx.await;
        timer.cancel();

        assert!(expired.is_ok());
        assert_eq!(expired.unwrap().deadline, timer.deadline());
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_duration_does_not_overflow() {
        let start = Instant::now();
        let (timer, rx) = Timer::countdown(Duration::from_secs(u64::MAX));

        assert_eq!(timer.deadline(), start + FAR_FUTURE);
        drop(timer);
        assert!(rx.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (timer, rx) = Timer::countdown(Duration::from_secs(1));
        drop(timer);
        assert!(rx.await.is_err());
    }
}
