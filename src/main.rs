// ==========================================
// KS Clothing 订单管理 - 控制台入口
// ==========================================
// 职责: 展示层（薄壳），解析命令后调用 OrderApi
// 用法: ks-order-manager <命令> key=value ...
// ==========================================

use anyhow::{bail, Context, Result};
use ks_order_manager::api::OrderApi;
use ks_order_manager::config::AppConfig;
use ks_order_manager::domain::{canonical_headers, OrderRecord, RawOrderInput};
use ks_order_manager::repository::OrderRepository;
use ks_order_manager::store::{load_sheet_rows, SqliteTable};
use ks_order_manager::{logging, APP_NAME, VERSION};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const USAGE: &str = r#"用法: ks-order-manager <命令> [key=value ...]

命令:
  add     tracking= name= phone= product= qty= delivery= total= cod=Yes|No
  update  id=<Order ID> [tracking= name= phone= product= qty= delivery= total= cod=]
  search  q=<Order ID 或 Tracking ID>
  view    [cod=All|Yes|No] [from=YYYY-MM-DD] [to=YYYY-MM-DD]
  export  out=<文件.xlsx 或 .csv> [cod=] [from=] [to=]
  import  file=<工作表副本 .xlsx/.csv>（仅限空工作表）
"#;

fn main() -> Result<()> {
    let config = AppConfig::load().context("加载配置失败")?;
    logging::init_with_format(config.log_format);

    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!(db_path = %config.db_path, sheet = %config.sheet_name, "使用本地工作表");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };
    let opts = parse_options(rest)?;

    // 表格句柄只在启动时获取一次
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
        }
    }
    let table = SqliteTable::open(&config.db_path, &config.sheet_name)?;

    if command == "import" {
        let file = required(&opts, "file")?;
        let rows = load_sheet_rows(file)?;
        let count = table.seed_rows(&rows)?;
        println!("已导入 {} 条订单", count);
        return Ok(());
    }

    table.ensure_header(&canonical_headers())?;
    let api = OrderApi::new(OrderRepository::with_allocator(table, config.allocator()));

    match command.as_str() {
        "add" => {
            let raw = RawOrderInput {
                tracking_id: value(&opts, "tracking"),
                customer_name: value(&opts, "name"),
                phone: value(&opts, "phone"),
                product_details: value(&opts, "product"),
                quantity: value(&opts, "qty"),
                delivery_cost: value(&opts, "delivery"),
                total_price: value(&opts, "total"),
                cod_payment: opts.get("cod").cloned().unwrap_or_else(|| "No".to_string()),
            };
            let record = api.add_order(&raw)?;
            println!("订单 {} 已新建", record.order_id);
        }
        "update" => {
            let located = api.fetch_for_update(required(&opts, "id")?)?;
            let edited = apply_edits(located.record, &opts);
            let record = api.save_changes(located.row_position, &edited)?;
            println!("订单 {} 已更新", record.order_id);
        }
        "search" => {
            let located = api.search(&value(&opts, "q"))?;
            for line in api.describe(&located.record)? {
                println!("{}", line);
            }
        }
        "view" => {
            let orders = view(&api, &opts)?;
            if orders.is_empty() {
                println!("没有满足条件的订单");
            }
            for lines in api.describe_all(&orders)? {
                println!("{}", lines.join(", "));
                println!("{}", "-".repeat(100));
            }
        }
        "export" => {
            let out = PathBuf::from(required(&opts, "out")?);
            let orders = view(&api, &opts)?;
            let summary = api.export_orders(&orders, &out)?;
            println!(
                "已导出 {} 条订单到 {}",
                summary.rows_written,
                summary.path.display()
            );
        }
        other => {
            println!("{}", USAGE);
            bail!("未知命令: {}", other);
        }
    }

    Ok(())
}

fn view(api: &OrderApi<SqliteTable>, opts: &HashMap<String, String>) -> Result<Vec<OrderRecord>> {
    let cod = opts.get("cod").map(String::as_str).unwrap_or("All");
    Ok(api.view_orders(cod, &value(opts, "from"), &value(opts, "to"))?)
}

fn parse_options(args: &[String]) -> Result<HashMap<String, String>> {
    let mut opts = HashMap::new();
    for arg in args {
        let Some((key, val)) = arg.split_once('=') else {
            bail!("参数格式错误: '{}'（期望 key=value）", arg);
        };
        opts.insert(key.trim().to_string(), val.to_string());
    }
    Ok(opts)
}

fn value(opts: &HashMap<String, String>, key: &str) -> String {
    opts.get(key).cloned().unwrap_or_default()
}

fn required<'a>(opts: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    match opts.get(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.as_str()),
        _ => bail!("缺少参数: {}=", key),
    }
}

/// 未给出的字段保留原值
fn apply_edits(mut record: OrderRecord, opts: &HashMap<String, String>) -> OrderRecord {
    let fields: [(&str, &mut String); 8] = [
        ("tracking", &mut record.tracking_id),
        ("name", &mut record.customer_name),
        ("phone", &mut record.phone),
        ("product", &mut record.product_details),
        ("qty", &mut record.quantity),
        ("delivery", &mut record.delivery_cost),
        ("total", &mut record.total_price),
        ("cod", &mut record.cod_payment),
    ];
    for (key, slot) in fields {
        if let Some(v) = opts.get(key) {
            *slot = v.clone();
        }
    }
    record
}
