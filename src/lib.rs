//! # Timed Quiz
//!
//! 一个在终端里限时答题的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有后台任务，只暴露能力
//! - `Timer` - 独立调度的倒计时，到期发出一次信号，可取消
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `AnswerReader` - 读取一行答案（去首尾空白），附带时间戳判断过期/迟到
//! - `scorer` - 计算正确率报告
//! - `results_table` - 渲染结果表
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一套题"怎么出
//! - `QuestionCtx` - 上下文封装（出题位置 + 题目索引）
//! - `Proctor` - 逐题出题、读答案、判分（顺序 / 随机不放回）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 会话协调者，让 Proctor 和计时器赛跑
//! - `orchestrator/app` - 应用入口，加载题库、开场提示、输出结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{QuizError, QuizResult};
pub use infrastructure::{Expired, Timer};
pub use models::{Grade, Question, QuestionSet, SessionOutcome};
pub use orchestrator::{run_session, App, SessionCoordinator, SessionSettings, TimerPolicy};
pub use services::{report, AnswerReader};
pub use workflow::{Proctor, ProctorDone, QuestionOrder};
