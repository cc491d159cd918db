// ==========================================
// KS Clothing 订单管理 - 表格文件加载
// ==========================================
// 用途: 读取远程工作表下载副本，用于初始化本地工作表
// 支持: Excel (.xlsx) / CSV (.csv)
// 输出: 按行序排列的行，第一行为表头
// ==========================================

use crate::store::error::{LoadError, LoadResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 按扩展名选择解析器读取表格文件
pub fn load_sheet_rows<P: AsRef<Path>>(file_path: P) -> LoadResult<Vec<Vec<String>>> {
    let path = file_path.as_ref();

    // 检查文件存在
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" => load_xlsx(path)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };

    if rows.is_empty() {
        return Err(LoadError::EmptySheet);
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "表格文件加载完成");
    Ok(rows)
}

// ==========================================
// CSV
// ==========================================
fn load_csv(path: &Path) -> LoadResult<Vec<Vec<String>>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false) // 表头作为普通行返回
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        // 跳过完全空白的行
        if row.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

// ==========================================
// Excel（读取第一个工作表）
// ==========================================
fn load_xlsx(path: &Path) -> LoadResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| LoadError::ExcelParseError("Excel 文件无工作表".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = Vec::new();
    for data_row in range.rows() {
        let row: Vec<String> = data_row.iter().map(cell_to_string).collect();
        if row.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        // 日期单元格以 Excel 序列号保存，还原为 YYYY-MM-DD
        Data::DateTime(dt) => excel_serial_to_iso(dt.as_f64())
            .unwrap_or_else(|| cell.to_string().trim().to_string()),
        _ => cell.to_string().trim().to_string(),
    }
}

fn excel_serial_to_iso(serial: f64) -> Option<String> {
    // 2958465 = 9999-12-31
    if !serial.is_finite() || !(0.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::days(serial.floor() as i64))?;
    Some(date.format("%Y-%m-%d").to_string())
}
