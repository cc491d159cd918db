// ==========================================
// OrderApi 集成测试
// ==========================================
// 测试目标: 查询、浏览过滤、导出的端到端行为
// ==========================================


use ks_order_manager::api::OrderApi;
use ks_order_manager::domain::canonical_headers;
use ks_order_manager::repository::{OrderError, OrderRepository};
use ks_order_manager::engine::ExportFormat;
use ks_order_manager::store::{load_sheet_rows, MemoryTable};
use tempfile::tempdir;
use test_helpers::{row, seeded_table, two_order_table, FailingTable};

fn api(table: MemoryTable) -> OrderApi<MemoryTable> {
    OrderApi::new(OrderRepository::new(table))
}

fn read_csv(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

// ==========================================
// 查询
// ==========================================

#[test]
fn test_search_rejects_blank_query() {
    let api = api(two_order_table());
    assert!(matches!(api.search("   "), Err(OrderError::EmptyField { .. })));
}

#[test]
fn test_search_trims_query() {
    let api = api(two_order_table());
    let located = api.search("  TRK2 ").unwrap();
    assert_eq!(located.record.order_id, "KS02");

    let lines = api.describe(&located.record).unwrap();
    assert_eq!(lines[1], "Order ID: KS02");
    assert_eq!(lines[9], "COD Payment: FALSE");
}

#[test]
fn test_search_not_found() {
    let api = api(two_order_table());
    assert!(matches!(api.search("TRK404"), Err(OrderError::NotFound(_))));
}

#[test]
fn test_describe_all_reads_headers_once() {
    let api = OrderApi::new(OrderRepository::new(FailingTable::new(two_order_table())));

    let orders = api.view_orders("All", "", "").unwrap();
    let reads_after_view = api.repository().table().read_count();

    let described = api.describe_all(&orders).unwrap();
    assert_eq!(described.len(), 2);
    assert_eq!(described[0][1], "Order ID: KS01");
    assert_eq!(described[1][3], "Customer Name: Kamala");
    assert_eq!(api.repository().table().read_count(), reads_after_view + 1);
}

#[test]
fn test_fetch_for_update_then_save() {
    let api = api(two_order_table());
    let located = api.fetch_for_update(" KS01 ").unwrap();
    let mut edited = located.record.clone();
    edited.quantity = " 3 ".to_string();

    let saved = api.save_changes(located.row_position, &edited).unwrap();
    assert_eq!(saved.quantity, "3");
    assert_eq!(api.fetch_for_update("KS01").unwrap().record, saved);
}

// ==========================================
// 浏览过滤
// ==========================================

#[test]
fn test_view_orders_cod_and_date_range() {
    let api = api(two_order_table());
    let orders = api.view_orders("Yes", "2024-01-01", "2024-01-31").unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, "KS01");
}

#[test]
fn test_view_orders_all_by_default() {
    let api = api(two_order_table());
    assert_eq!(api.view_orders("All", "", "").unwrap().len(), 2);
    assert_eq!(api.view_orders("no", "", "").unwrap()[0].order_id, "KS02");
}

#[test]
fn test_view_orders_skips_unparseable_dates() {
    let api = api(seeded_table(&[
        &["not-a-date", "KS01", "TRK1", "", "1", "", "1", "1", "1", "TRUE"],
        &["2024-01-05", "KS02", "TRK2", "", "1", "", "1", "1", "1", "TRUE"],
        &["", "KS03", "TRK3", "", "1", "", "1", "1", "1", "TRUE"],
    ]));

    let orders = api.view_orders("All", "", "").unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, "KS02");
}

#[test]
fn test_view_orders_rejects_bad_date_input() {
    let api = api(two_order_table());
    assert!(matches!(
        api.view_orders("All", "", "31/01/2024"),
        Err(OrderError::InvalidDate { field: "To Date", .. })
    ));
}

// ==========================================
// 导出
// ==========================================

#[test]
fn test_export_filtered_orders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("january.csv");
    let api = api(two_order_table());

    let orders = api.view_orders("All", "2024-01-01", "2024-01-31").unwrap();
    let summary = api.export_orders(&orders, &path).unwrap();
    assert_eq!(summary.rows_written, 1);

    let written = read_csv(&path);
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], canonical_headers());
    assert_eq!(written[1], orders[0].to_row());
}

#[test]
fn test_export_excel_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orders.xlsx");
    let api = api(two_order_table());

    let orders = api.view_orders("All", "", "").unwrap();
    let summary = api.export_orders(&orders, &path).unwrap();
    assert_eq!(summary.format, ExportFormat::Xlsx);
    assert_eq!(summary.rows_written, 2);

    let written = load_sheet_rows(&path).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0], canonical_headers());
    assert_eq!(written[1], orders[0].to_row());
    assert_eq!(written[2], orders[1].to_row());
}

#[test]
fn test_export_uses_sheet_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orders.csv");
    let headers = row(&[
        "Date", "Order No", "Tracking", "Customer", "Phone", "Product", "Qty", "Delivery (LKR)",
        "Total (LKR)", "COD",
    ]);
    let table = MemoryTable::from_rows(vec![
        headers.clone(),
        row(&["2024-01-05", "KS01", "TRK1", "", "1", "", "1", "1", "1", "TRUE"]),
    ]);
    let api = api(table);

    let orders = api.view_orders("All", "", "").unwrap();
    api.export_orders(&orders, &path).unwrap();
    assert_eq!(read_csv(&path)[0], headers);
}

#[test]
fn test_export_empty_selection_creates_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nothing.csv");
    let api = api(two_order_table());

    let orders = api.view_orders("Yes", "2025-01-01", "").unwrap();
    assert!(orders.is_empty());
    assert!(matches!(
        api.export_orders(&orders, &path),
        Err(OrderError::NothingToExport)
    ));
    assert!(!path.exists());
}

#[test]
fn test_export_unwritable_destination() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("orders.csv");
    let api = api(two_order_table());

    let orders = api.view_orders("All", "", "").unwrap();
    assert!(matches!(
        api.export_orders(&orders, &path),
        Err(OrderError::ExportIOError(_))
    ));
}
