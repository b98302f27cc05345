use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 解析 CSV 文本为 (题干, 答案) 记录
///
/// 无表头，每行 `题干,答案`，字段首尾空白会被去掉，多余的列忽略
pub fn parse_csv_records(content: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("第 {} 条记录格式错误", index + 1))?;

        match (record.get(0), record.get(1)) {
            (Some(text), Some(answer)) => records.push((text.to_string(), answer.to_string())),
            _ => anyhow::bail!(
                "第 {} 条记录缺少答案列 (共 {} 列)",
                index + 1,
                record.len()
            ),
        }
    }

    Ok(records)
}

/// 从 CSV 文件加载题目记录
pub async fn load_csv_records(csv_file_path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(csv_file_path)
        .await
        .with_context(|| format!("无法读取CSV文件: {}", csv_file_path.display()))?;

    parse_csv_records(&content)
        .with_context(|| format!("无法解析CSV文件: {}", csv_file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_records() {
        let content = "5+5,10\n\"what 2+2, sir?\",4\n 7+3 , 10 \n";
        let records = parse_csv_records(content).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], ("5+5".to_string(), "10".to_string()));
        assert_eq!(records[1], ("what 2+2, sir?".to_string(), "4".to_string()));
        assert_eq!(records[2], ("7+3".to_string(), "10".to_string()));
    }

    #[test]
    fn test_parse_csv_ignores_extra_columns() {
        let records = parse_csv_records("1+1,2,easy\n").unwrap();
        assert_eq!(records, vec![("1+1".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_parse_csv_missing_answer() {
        let err = parse_csv_records("1+1,2\nlonely\n").unwrap_err();
        assert!(err.to_string().contains("第 2 条记录"));
    }

    #[test]
    fn test_parse_empty_csv() {
        assert!(parse_csv_records("").unwrap().is_empty());
    }
}
