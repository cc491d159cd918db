// ==========================================
// KS Clothing 订单管理 - SQLite 表格存储
// ==========================================
// 职责: 以 SQLite 持久化一个命名工作表的全部行
// 红线: 不含业务逻辑，只负责行读写
// ==========================================

use crate::db::{configure_sqlite_connection, ensure_sheet_schema, open_sqlite_connection};
use crate::store::error::{TableError, TableResult};
use crate::store::{column_of, RemoteTable};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SqliteTable - 本地工作表
// ==========================================
pub struct SqliteTable {
    conn: Arc<Mutex<Connection>>,
    sheet: String,
}

impl SqliteTable {
    /// 打开数据库文件中的指定工作表
    pub fn open(db_path: &str, sheet: &str) -> TableResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_sheet_schema(&conn)?;
        tracing::debug!(db_path, sheet, "打开本地工作表");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            sheet: sheet.to_string(),
        })
    }

    /// 从已有连接创建（会再次应用统一 PRAGMA 并建表，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>, sheet: &str) -> TableResult<Self> {
        {
            let guard = conn.lock().map_err(|e| TableError::Lock(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_sheet_schema(&guard)?;
        }
        Ok(Self {
            conn,
            sheet: sheet.to_string(),
        })
    }

    /// 工作表名称
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    fn get_conn(&self) -> TableResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| TableError::Lock(e.to_string()))
    }

    /// 当前行数（含表头）
    pub fn row_count(&self) -> TableResult<usize> {
        let conn = self.get_conn()?;
        count_rows(&conn, &self.sheet)
    }

    /// 空表时写入表头
    ///
    /// # 返回
    /// - Ok(true): 已写入表头
    /// - Ok(false): 工作表已有数据，未改动
    pub fn ensure_header(&self, headers: &[String]) -> TableResult<bool> {
        let conn = self.get_conn()?;
        if count_rows(&conn, &self.sheet)? > 0 {
            return Ok(false);
        }
        conn.execute(
            "INSERT INTO sheet_row (sheet, row_no, cells) VALUES (?1, 1, ?2)",
            params![self.sheet, serde_json::to_string(headers)?],
        )?;
        tracing::info!(sheet = %self.sheet, "已写入表头");
        Ok(true)
    }

    /// 用外部表格文件的行初始化工作表（第一行为表头）
    ///
    /// 工作表已有数据行时拒绝执行。
    ///
    /// # 返回
    /// - Ok(usize): 写入的数据行数（不含表头）
    pub fn seed_rows(&self, rows: &[Vec<String>]) -> TableResult<usize> {
        let mut conn = self.get_conn()?;
        let existing = count_rows(&conn, &self.sheet)?;
        if existing > 1 {
            return Err(TableError::Write(format!(
                "工作表 {} 已有 {} 条数据行，拒绝覆盖",
                self.sheet,
                existing - 1
            )));
        }

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM sheet_row WHERE sheet = ?1", params![self.sheet])?;
        for (idx, row) in rows.iter().enumerate() {
            tx.execute(
                "INSERT INTO sheet_row (sheet, row_no, cells) VALUES (?1, ?2, ?3)",
                params![self.sheet, to_row_no(idx + 1)?, serde_json::to_string(row)?],
            )?;
        }
        tx.commit()?;

        let data_rows = rows.len().saturating_sub(1);
        tracing::info!(sheet = %self.sheet, data_rows, "工作表初始化完成");
        Ok(data_rows)
    }
}

impl RemoteTable for SqliteTable {
    fn read_column(&self, index: usize) -> TableResult<Vec<String>> {
        let rows = self.read_all_rows()?;
        Ok(column_of(&rows, index))
    }

    fn read_all_rows(&self) -> TableResult<Vec<Vec<String>>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT cells FROM sheet_row WHERE sheet = ?1 ORDER BY row_no ASC")?;
        let encoded = stmt
            .query_map(params![self.sheet], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;

        encoded
            .iter()
            .map(|cells| serde_json::from_str::<Vec<String>>(cells).map_err(TableError::from))
            .collect()
    }

    fn append_row(&self, values: &[String]) -> TableResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let last: i64 = tx.query_row(
            "SELECT COALESCE(MAX(row_no), 0) FROM sheet_row WHERE sheet = ?1",
            params![self.sheet],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO sheet_row (sheet, row_no, cells) VALUES (?1, ?2, ?3)",
            params![self.sheet, last + 1, serde_json::to_string(values)?],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn write_range(&self, row_index: usize, values: &[String]) -> TableResult<()> {
        let conn = self.get_conn()?;
        if row_index < 2 {
            return Err(TableError::RowOutOfRange {
                row: row_index,
                row_count: count_rows(&conn, &self.sheet)?,
            });
        }

        let changed = conn.execute(
            r#"
            UPDATE sheet_row
            SET cells = ?3, updated_at = datetime('now')
            WHERE sheet = ?1 AND row_no = ?2
            "#,
            params![self.sheet, to_row_no(row_index)?, serde_json::to_string(values)?],
        )?;

        if changed == 0 {
            return Err(TableError::RowOutOfRange {
                row: row_index,
                row_count: count_rows(&conn, &self.sheet)?,
            });
        }
        Ok(())
    }
}

fn count_rows(conn: &Connection, sheet: &str) -> TableResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sheet_row WHERE sheet = ?1",
        params![sheet],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or(0))
}

fn to_row_no(row_index: usize) -> TableResult<i64> {
    i64::try_from(row_index).map_err(|e| TableError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canonical_headers;

    fn memory_table(sheet: &str) -> SqliteTable {
        let conn = Connection::open_in_memory().unwrap();
        SqliteTable::from_connection(Arc::new(Mutex::new(conn)), sheet).unwrap()
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_ensure_header_only_once() {
        let table = memory_table("KSClothing");
        assert!(table.ensure_header(&canonical_headers()).unwrap());
        assert!(!table.ensure_header(&canonical_headers()).unwrap());
        assert_eq!(table.row_count().unwrap(), 1);
    }

    #[test]
    fn test_append_keeps_row_order() {
        let table = memory_table("KSClothing");
        table.ensure_header(&canonical_headers()).unwrap();
        table.append_row(&cells(&["2024-01-01", "KS01"])).unwrap();
        table.append_row(&cells(&["2024-01-02", "KS02"])).unwrap();

        let column = table.read_column(1).unwrap();
        assert_eq!(column, cells(&["Order ID", "KS01", "KS02"]));
    }

    #[test]
    fn test_sheets_are_isolated() {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let a = SqliteTable::from_connection(conn.clone(), "A").unwrap();
        let b = SqliteTable::from_connection(conn, "B").unwrap();
        a.append_row(&cells(&["only-in-a"])).unwrap();

        assert_eq!(a.row_count().unwrap(), 1);
        assert_eq!(b.row_count().unwrap(), 0);
    }

    #[test]
    fn test_write_range_missing_row() {
        let table = memory_table("KSClothing");
        table.ensure_header(&canonical_headers()).unwrap();
        let result = table.write_range(5, &cells(&["x"]));
        assert!(matches!(
            result,
            Err(TableError::RowOutOfRange { row: 5, row_count: 1 })
        ));
    }

    #[test]
    fn test_seed_rows_refuses_populated_sheet() {
        let table = memory_table("KSClothing");
        let rows = vec![canonical_headers(), cells(&["2024-01-01", "KS01"])];
        assert_eq!(table.seed_rows(&rows).unwrap(), 1);
        assert!(table.seed_rows(&rows).is_err());
    }
}
