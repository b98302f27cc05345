//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一场测验从加载到出结果的全过程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、输出启动信息
//! 2. **加载题库**：按配置读取 CSV / TOML 题库（`QuestionSet`）
//! 3. **开场提示**：告知时间限制，等待回车开始
//! 4. **运行会话**：委托 `SessionCoordinator` 完成计时答题
//! 5. **输出结果**：结果表、正确率报告或 JSON 汇总
//!
//! ## 设计特点
//!
//! - **IO 可替换**：`run_with` 接收任意输入流和输出端，`run` 只负责接上 stdin/stdout
//! - **向下委托**：计时和判分都不在这里做

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::models::{self, QuestionSet, SessionOutcome};
use crate::orchestrator::session::{SessionCoordinator, TimerPolicy};
use crate::services::{report, results_table, AnswerReader, Summary};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        logging::log_startup(&config);

        Ok(Self { config })
    }

    /// 使用标准输入输出运行
    pub async fn run(&self) -> Result<SessionOutcome> {
        let reader = AnswerReader::spawn(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(reader, &mut stdout).await
    }

    /// 运行应用主逻辑
    pub async fn run_with<W>(&self, mut reader: AnswerReader, out: &mut W) -> Result<SessionOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        let set = self.load_questions().await?;
        logging::log_questions_loaded(set.total_count(), &self.config.problems_file);

        self.introduce(&set, &mut reader, out).await?;

        let settings = self.config.session_settings();
        logging::log_session_start(&settings);

        let coordinator = SessionCoordinator::new(settings);
        let outcome = coordinator
            .run(set, &mut reader, out)
            .await
            .context("测验会话异常中止")?;

        self.present(&outcome, out).await?;
        logging::print_final_stats(&outcome);

        Ok(outcome)
    }

    /// 加载题库
    async fn load_questions(&self) -> Result<QuestionSet> {
        info!("\n📁 正在加载题库...");
        models::load_question_set(Path::new(&self.config.problems_file))
            .await
            .with_context(|| format!("无法加载题库: {}", self.config.problems_file))
    }

    /// 开场提示，并等待回车开始
    async fn introduce<W>(&self, set: &QuestionSet, reader: &mut AnswerReader, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let secs = self.config.time_limit_secs;
        let intro = match self.config.timer_policy {
            TimerPolicy::Global => format!(
                "\nYou will have {} seconds to answer {} questions.\n",
                secs,
                set.total_count()
            ),
            TimerPolicy::PerQuestion => format!(
                "\nYou will have {} seconds per question to answer {} questions.\n",
                secs,
                set.total_count()
            ),
        };
        write_text(out, &intro).await?;

        if self.config.wait_for_start {
            write_text(out, "Press [Enter] to start the quiz.\n").await?;
            reader
                .read_line()
                .await
                .context("等待开始时读取输入失败")?;
        }

        Ok(())
    }

    /// 输出结果
    async fn present<W>(&self, outcome: &SessionOutcome, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        if outcome.is_timed_out() {
            write_text(out, "\n\nTimer has run out!\n").await?;
        }

        match self.config.output_format {
            OutputFormat::Text => {
                if self.config.show_results_table {
                    let table = results_table::render(outcome.question_set());
                    write_text(out, &format!("\n{}", table)).await?;
                }
                write_text(out, &format!("\n{}\n", report(outcome.question_set()))).await?;
            }
            OutputFormat::Json => {
                let json = Summary::from_outcome(outcome)
                    .to_json()
                    .context("无法序列化测验结果")?;
                write_text(out, &format!("\n{}\n", json)).await?;
            }
        }

        Ok(())
    }
}

async fn write_text<W>(out: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
