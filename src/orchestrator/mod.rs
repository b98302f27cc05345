//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一场测验的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载题库（QuestionSet）
//! - 开场提示与结果输出
//!
//! ### `session` - 会话协调者
//! - 让 Proctor 和倒计时赛跑
//! - 决定 Completed / TimedOut
//! - 交回题目集
//!
//! ## 层次关系
//!
//! ```text
//! app (处理一场测验)
//!     ↓
//! session::SessionCoordinator (计时赛跑)
//!     ↓
//! workflow::Proctor (逐题出题、判分)
//!     ↓
//! services (能力层：读答案 / 计分 / 结果表)
//!     ↓
//! infrastructure (基础设施：Timer)
//! ```

pub mod app;
pub mod session;

// 重新导出主要类型
pub use app::App;
pub use session::{run_session, SessionCoordinator, SessionSettings, TimerPolicy};
