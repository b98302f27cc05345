//! 答案读取服务 - 业务能力层
//!
//! 后台输入泵独占原始输入流，把每一行连同时间戳送进通道；
//! `AnswerReader` 从通道里按"答题窗口"取行，过期的丢弃，迟到的留给下一次判断。

use crate::error::{QuizError, QuizResult};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

const READ_CHUNK_SIZE: usize = 1024;

/// 带时间戳的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLine {
    /// 去掉换行符后的原始文本
    pub text: String,
    /// 本行第一个字节到达的时刻
    pub started_at: Instant,
    /// 本行换行符到达的时刻
    pub completed_at: Instant,
}

/// 输入泵发出的事件
#[derive(Debug)]
enum InputEvent {
    Line(TimedLine),
    Failed(io::Error),
}

/// 答题窗口
///
/// - 起始时刻之前开始输入的行视为上一题的残留，直接丢弃
/// - 截止时刻及之后才输完的行算迟到，本窗口不采用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerWindow {
    pub opened_at: Option<Instant>,
    pub closes_at: Option<Instant>,
}

impl AnswerWindow {
    /// 不设限的窗口
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 只有截止时刻（全局计时）
    pub fn until(closes_at: Instant) -> Self {
        Self {
            opened_at: None,
            closes_at: Some(closes_at),
        }
    }

    /// 起止时刻都有（单题计时）
    pub fn between(opened_at: Instant, closes_at: Instant) -> Self {
        Self {
            opened_at: Some(opened_at),
            closes_at: Some(closes_at),
        }
    }

    fn is_stale(&self, line: &TimedLine) -> bool {
        self.opened_at.is_some_and(|opened| line.started_at < opened)
    }

    fn is_late(&self, line: &TimedLine) -> bool {
        self.closes_at.is_some_and(|closes| line.completed_at >= closes)
    }
}

/// 按窗口读取一行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// 窗口内的答案（已去首尾空白，保留原始大小写）
    Answer(String),
    /// 下一行在窗口截止之后才输完
    Late,
}

/// 答案读取器
///
/// 职责：
/// - 每次消费恰好一行
/// - 返回去掉首尾空白的答案，大小写留给判分时归一化
/// - 输入流断开时报告致命错误，不重试
pub struct AnswerReader {
    lines: mpsc::UnboundedReceiver<InputEvent>,
    held: Option<TimedLine>,
    pump: JoinHandle<()>,
}

impl AnswerReader {
    /// 启动后台输入泵并返回读取器
    pub fn spawn<R>(input: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let pump = tokio::spawn(pump_lines(input, tx));

        Self {
            lines: rx,
            held: None,
            pump,
        }
    }

    /// 读取一行（不设窗口）
    pub async fn read_line(&mut self) -> QuizResult<String> {
        match self.read_line_within(AnswerWindow::unbounded()).await? {
            LineRead::Answer(answer) => Ok(answer),
            // 不设截止时刻时不会迟到
            LineRead::Late => Err(QuizError::InputClosed),
        }
    }

    /// 在答题窗口内读取一行
    ///
    /// 只在等待通道时挂起；通道接收是取消安全的，被中途丢弃不会丢行
    pub async fn read_line_within(&mut self, window: AnswerWindow) -> QuizResult<LineRead> {
        loop {
            let line = match self.held.take() {
                Some(line) => line,
                None => match self.lines.recv().await {
                    Some(InputEvent::Line(line)) => line,
                    Some(InputEvent::Failed(err)) => return Err(QuizError::Io(err)),
                    None => return Err(QuizError::InputClosed),
                },
            };

            if window.is_stale(&line) {
                debug!("丢弃上一题残留的输入: {:?}", line.text);
                continue;
            }

            if window.is_late(&line) {
                debug!("输入在截止时刻之后才完成，本题不采用: {:?}", line.text);
                self.held = Some(line);
                return Ok(LineRead::Late);
            }

            return Ok(LineRead::Answer(line.text.trim().to_string()));
        }
    }
}

impl Drop for AnswerReader {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// 输入泵：按块读取原始字节，切分成行并打上时间戳
async fn pump_lines<R>(mut input: R, tx: mpsc::UnboundedSender<InputEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_CHUNK_SIZE];
    let mut partial: Vec<u8> = Vec::new();
    let mut started_at: Option<Instant> = None;

    loop {
        let n = match input.read(&mut buf).await {
            Ok(n) => n,
            Err(err) => {
                warn!("读取输入流失败: {}", err);
                let _ = tx.send(InputEvent::Failed(err));
                return;
            }
        };
        let arrived_at = Instant::now();

        if n == 0 {
            // 流结束前最后一行没有换行符，也照样交付
            if let Some(started) = started_at.take() {
                let event = finish_line(std::mem::take(&mut partial), started, arrived_at);
                let _ = tx.send(event);
            }
            debug!("输入流已结束");
            return;
        }

        for &byte in &buf[..n] {
            if byte == b'\n' {
                let started = started_at.take().unwrap_or(arrived_at);
                let event = finish_line(std::mem::take(&mut partial), started, arrived_at);
                let failed = matches!(event, InputEvent::Failed(_));
                if tx.send(event).is_err() || failed {
                    return;
                }
            } else {
                started_at.get_or_insert(arrived_at);
                partial.push(byte);
            }
        }
    }
}

fn finish_line(mut bytes: Vec<u8>, started_at: Instant, completed_at: Instant) -> InputEvent {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }

    match String::from_utf8(bytes) {
        Ok(text) => InputEvent::Line(TimedLine {
            text,
            started_at,
            completed_at,
        }),
        Err(err) => InputEvent::Failed(io::Error::new(io::ErrorKind::InvalidData, err)),
    }
}
