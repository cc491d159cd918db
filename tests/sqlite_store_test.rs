// ==========================================
// SqliteTable 集成测试
// ==========================================
// 测试目标: 本地工作表上的新建 / 查询 / 更新 / 初始化导入，以及重开后数据保留
// ==========================================


use chrono::NaiveDate;
use ks_order_manager::domain::{canonical_headers, OrderRecord};
use ks_order_manager::repository::OrderRepository;
use ks_order_manager::store::{load_sheet_rows, RemoteTable, SqliteTable};
use std::io::Write;
use tempfile::Builder;
use test_helpers::{create_test_db, raw_order};

fn open(db_path: &str) -> SqliteTable {
    let table = SqliteTable::open(db_path, "KSClothing").expect("Failed to open sheet");
    table
        .ensure_header(&canonical_headers())
        .expect("Failed to write header");
    table
}

#[test]
fn test_orders_survive_reopen() {
    let (_temp_file, db_path) = create_test_db();
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

    let created = {
        let repo = OrderRepository::new(open(&db_path));
        repo.create_order_on(&raw_order("TRK1"), day).unwrap();
        repo.create_order_on(&raw_order("TRK2"), day).unwrap()
    };
    assert_eq!(created.order_id, "KS02");

    let repo = OrderRepository::new(open(&db_path));
    let located = repo.find_by_order_id("KS02").unwrap();
    assert_eq!(located.record, created);
    assert_eq!(located.row_position, 3);
    assert_eq!(repo.preview_next_order_id().unwrap(), "KS03");
}

#[test]
fn test_update_in_place_on_sqlite() {
    let (_temp_file, db_path) = create_test_db();
    let repo = OrderRepository::new(open(&db_path));
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    repo.create_order_on(&raw_order("TRK1"), day).unwrap();

    let located = repo.find_by_order_id("KS01").unwrap();
    let edited = OrderRecord {
        order_id: "KS50".to_string(),
        product_details: "Denim jeans (34)".to_string(),
        ..located.record.clone()
    };
    repo.update_order(located.row_position, &edited).unwrap();

    let rows = repo.table().read_all_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "KS01");
    assert_eq!(rows[1][5], "Denim jeans (34)");
}

#[test]
fn test_seed_from_sheet_copy_then_continue_ids() {
    let (_temp_file, db_path) = create_test_db();

    let mut sheet_copy = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        sheet_copy,
        "Date,Order ID,Tracking ID,Customer Name,Phone,Product Details,Quantity,Delivery Cost,Total Price,COD Payment"
    )
    .unwrap();
    writeln!(sheet_copy, "2024-01-05,KS01,TRK1,Nimal,771234567,Shirt,1,350,2500,TRUE").unwrap();
    writeln!(sheet_copy, "2024-01-06,KS02,TRK2,Kamala,712345678,Saree,2,400,9800,FALSE").unwrap();

    let table = SqliteTable::open(&db_path, "KSClothing").unwrap();
    let rows = load_sheet_rows(sheet_copy.path()).unwrap();
    assert_eq!(table.seed_rows(&rows).unwrap(), 2);

    let repo = OrderRepository::new(table);
    let created = repo
        .create_order_on(&raw_order("TRK3"), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
        .unwrap();
    assert_eq!(created.order_id, "KS03");
    assert!(repo
        .create_order_on(&raw_order("TRK1"), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
        .is_err());
}
