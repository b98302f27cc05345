use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use timed_quiz::config::{Config, OutputFormat};
use timed_quiz::utils::logging;
use timed_quiz::{App, TimerPolicy};

/// 终端限时答题
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 题库文件（CSV: 题干,答案；或 TOML）
    #[arg(short, long)]
    file: Option<String>,

    /// 时间限制（秒）
    #[arg(short, long)]
    time: Option<u64>,

    /// 随机顺序出题
    #[arg(short, long)]
    random: bool,

    /// 随机出题的种子
    #[arg(long)]
    seed: Option<u64>,

    /// 每道题单独计时（需要交互输入：提前输入或管道传入的答案会被当作上一题的残留丢弃）
    #[arg(long)]
    per_question: bool,

    /// 结束后输出结果表
    #[arg(long)]
    table: bool,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 不等待回车直接开始
    #[arg(long)]
    no_wait: bool,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// 命令行参数覆盖配置
    fn apply(self, mut config: Config) -> Config {
        if let Some(file) = self.file {
            config.problems_file = file;
        }
        if let Some(time) = self.time {
            config.time_limit_secs = time;
        }
        if self.random {
            config.shuffle = true;
        }
        if self.seed.is_some() {
            config.shuffle_seed = self.seed;
        }
        if self.per_question {
            config.timer_policy = TimerPolicy::PerQuestion;
        }
        if self.table {
            config.show_results_table = true;
        }
        if self.json {
            config.output_format = OutputFormat::Json;
        }
        if self.no_wait {
            config.wait_for_start = false;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    // 标准输入可能还阻塞在读取线程上，运行时无法正常收尾，这里直接退出
    match run(Args::parse()).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("An error was encountered: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // 加载配置
    let base = match &args.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    let config = args.apply(base.with_env());

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let _outcome = App::initialize(config)?.run().await?;

    Ok(())
}
