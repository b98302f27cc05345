use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 题库文件结构
///
/// ```toml
/// [[questions]]
/// text = "2+2"
/// answer = "4"
/// ```
#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    text: String,
    answer: String,
}

/// 解析 TOML 文本为 (题干, 答案) 记录
pub fn parse_toml_records(content: &str) -> Result<Vec<(String, String)>> {
    let file: QuestionFile = toml::from_str(content).context("无法解析TOML题库")?;

    Ok(file
        .questions
        .into_iter()
        .map(|record| (record.text, record.answer))
        .collect())
}

/// 从 TOML 文件加载题目记录
pub async fn load_toml_records(toml_file_path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    parse_toml_records(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))
}
