// ==========================================
// KS Clothing 订单管理 - 订单导出
// ==========================================
// 输出: Excel (.xlsx) 或 CSV (.csv) 表格文件，首行为表头，其余行原样按列序写出
// 约束:
// - 空集合在打开任何文件之前拒绝
// - 所有单元格按字符串写出，不做类型转换
// - 先写同目录临时文件，成功后 rename 到目标路径（全有或全无）
// ==========================================

use crate::domain::OrderRecord;
use crate::engine::error::ExportError;
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 导出工作表名称
pub const EXPORT_SHEET_NAME: &str = "Orders";

/// 导出文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// 按目标扩展名选择格式：.csv 写 CSV，其余一律写 Excel
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub rows_written: usize,
}

pub struct OrderExporter;

impl OrderExporter {
    /// 导出订单行
    ///
    /// # 参数
    /// - rows: 过滤后的订单行
    /// - headers: 表头（原样写入首行）
    /// - destination: 目标文件路径，扩展名决定格式
    ///
    /// # 返回
    /// - Ok(ExportSummary): 写出的路径、格式与数据行数
    /// - Err(NothingToExport): rows 为空，未创建任何文件
    /// - Err(Io / Csv / Xlsx): 目标不可写等
    pub fn export(
        &self,
        rows: &[OrderRecord],
        headers: &[String],
        destination: &Path,
    ) -> Result<ExportSummary, ExportError> {
        if rows.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let io_error = |e: std::io::Error| ExportError::Io {
            path: destination.display().to_string(),
            message: e.to_string(),
        };

        let format = ExportFormat::from_path(destination);
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp_file = NamedTempFile::new_in(&dir).map_err(io_error)?;

        match format {
            ExportFormat::Csv => write_csv(temp_file.as_file_mut(), rows, headers)?,
            ExportFormat::Xlsx => {
                let buffer = build_workbook(rows, headers)?;
                temp_file.as_file_mut().write_all(&buffer).map_err(io_error)?;
            }
        }
        temp_file.as_file_mut().sync_all().map_err(io_error)?;

        temp_file
            .persist(destination)
            .map_err(|e| io_error(e.error))?;

        tracing::info!(
            path = %destination.display(),
            format = ?format,
            rows = rows.len(),
            "订单导出完成"
        );

        Ok(ExportSummary {
            path: destination.to_path_buf(),
            format,
            rows_written: rows.len(),
        })
    }
}

fn write_csv<W: Write>(
    out: W,
    rows: &[OrderRecord],
    headers: &[String],
) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .flexible(true) // 表头列数以工作表为准
        .from_writer(out);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.to_row())?;
    }
    writer.flush().map_err(|e| ExportError::Csv(e.to_string()))?;
    Ok(())
}

/// 在内存中生成工作簿，全部单元格以字符串写入
fn build_workbook(rows: &[OrderRecord], headers: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let lines = std::iter::once(headers.to_vec()).chain(rows.iter().map(OrderRecord::to_row));
    for (row_idx, cells) in lines.enumerate() {
        let row_num = u32::try_from(row_idx)
            .map_err(|_| ExportError::Xlsx(format!("行号超出范围: {}", row_idx)))?;
        for (col_idx, value) in cells.iter().enumerate() {
            let col_num = u16::try_from(col_idx)
                .map_err(|_| ExportError::Xlsx(format!("列号超出范围: {}", col_idx)))?;
            worksheet.write_string(row_num, col_num, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canonical_headers;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::tempdir;

    fn record(order_id: &str) -> OrderRecord {
        OrderRecord {
            date: "2024-01-05".to_string(),
            order_id: order_id.to_string(),
            tracking_id: format!("TRK-{}", order_id),
            phone: "0771234567".to_string(),
            cod_payment: "TRUE".to_string(),
            ..OrderRecord::default()
        }
    }

    #[test]
    fn test_export_writes_headers_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        let rows = vec![record("KS01"), record("KS02")];

        let summary = OrderExporter
            .export(&rows, &canonical_headers(), &path)
            .unwrap();
        assert_eq!(summary.format, ExportFormat::Csv);
        assert_eq!(summary.rows_written, 2);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let written: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(written.len(), 3);
        assert_eq!(written[0], canonical_headers());
        assert_eq!(written[2], rows[1].to_row());
        // 不做类型转换，前导零原样保留
        assert_eq!(written[1][4], "0771234567");
    }

    #[test]
    fn test_export_xlsx_keeps_cells_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        let rows = vec![record("KS01"), record("KS02")];

        let summary = OrderExporter
            .export(&rows, &canonical_headers(), &path)
            .unwrap();
        assert_eq!(summary.format, ExportFormat::Xlsx);
        assert_eq!(summary.rows_written, 2);

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
        let written: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();

        assert_eq!(written.len(), 3);
        assert_eq!(written[0][1], Data::String("Order ID".to_string()));
        assert_eq!(written[2][1], Data::String("KS02".to_string()));
        // 电话以字符串写出，前导零保留
        assert_eq!(written[1][4], Data::String("0771234567".to_string()));
        assert_eq!(written[1][9], Data::String("TRUE".to_string()));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("a.xlsx")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_path(Path::new("orders")), ExportFormat::Xlsx);
    }

    #[test]
    fn test_empty_export_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let result = OrderExporter.export(&[], &canonical_headers(), &path);
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        for name in ["orders.csv", "orders.xlsx"] {
            let path = dir.path().join("missing-dir").join(name);
            let result = OrderExporter.export(&[record("KS01")], &canonical_headers(), &path);
            assert!(matches!(result, Err(ExportError::Io { .. })));
            assert!(!path.exists());
        }
    }
}
