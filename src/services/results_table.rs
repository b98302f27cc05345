//! 结果表输出
//!
//! 每道题一行：题干、标准答案、用户答案、勾选框，各列右对齐

use crate::models::QuestionSet;

const HEADERS: [&str; 4] = ["Question", "Answer", "User Answer", "Correct"];
const COLUMN_GAP: usize = 2;

/// 渲染结果表
pub fn render(set: &QuestionSet) -> String {
    let rows: Vec<[String; 4]> = set
        .questions()
        .iter()
        .map(|q| {
            [
                q.text.clone(),
                q.answer.clone(),
                q.user_answer().unwrap_or("<empty>").to_string(),
                q.grade().result_box().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count()) + COLUMN_GAP;
            format!("{}{}", " ".repeat(pad), cell)
        })
        .collect::<String>();
    out.push_str(&line);
    out.push('\n');
}
