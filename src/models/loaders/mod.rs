//! 题库加载器
//!
//! 按扩展名分发：`.toml` 走 TOML 解析，其余一律按无表头 CSV 处理

pub mod csv_loader;
pub mod toml_loader;

pub use csv_loader::{load_csv_records, parse_csv_records};
pub use toml_loader::{load_toml_records, parse_toml_records};

use crate::models::question_set::QuestionSet;
use anyhow::Result;
use std::path::Path;

/// 从文件加载题目集
pub async fn load_question_set(path: &Path) -> Result<QuestionSet> {
    let is_toml = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let records = if is_toml {
        load_toml_records(path).await?
    } else {
        load_csv_records(path).await?
    };

    tracing::debug!("从 {} 读取到 {} 条记录", path.display(), records.len());

    let set = QuestionSet::load(&path.to_string_lossy(), records)?;
    Ok(set)
}
