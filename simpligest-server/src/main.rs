use std::env;
use std::process;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use simpligest_pipeline::candidate_pipeline::{CandidatePipeline, PipelineResult};
use simpligest_pipeline::catalog_loader::{load_products_file, load_sales_file};
use simpligest_pipeline::pipelines::daily_report::DailyReportPipeline;
use simpligest_pipeline::types::{InsightCandidate, ReportQuery};
use simpligest_pipeline::UserRole;
use simpligest_scan::{validate_scan, InvoiceScanner, ScannedInvoice, Severity, ValidationResult};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    as_of: String,
    role: String,
    category_filter: Vec<String>,
    pipeline_ms: u128,
    items: Vec<ItemJson>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct ItemJson {
    product_id: String,
    name: String,
    category: String,
    current_stock: f64,
    stock_min: f64,
    weekly_demand: f64,
    daily_demand: f64,
    demand_level: String,
    trend: String,
    trend_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stockout_in_days: Option<u32>,
    suggested_purchase: u32,
    restock_cost: f64,
    attention_score: f64,
    urgency_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<PriceJson>,
}

#[derive(Serialize)]
struct PriceJson {
    recommended_price: f64,
    variation_pct: f64,
    rationale: String,
}

#[derive(Serialize)]
struct SummaryJson {
    products_loaded: usize,
    sales_loaded: usize,
    candidates_detected: usize,
    filtered_out: usize,
    selected: usize,
    total_suggested_units: u32,
    total_restock_cost: f64,
}

#[derive(Serialize)]
struct ScanJson {
    invoice: ScannedInvoice,
    valid: bool,
    violations: Vec<ViolationJson>,
}

#[derive(Serialize)]
struct ViolationJson {
    rule: &'static str,
    severity: String,
    detail: String,
}

fn role_str(role: &UserRole) -> String {
    match role {
        UserRole::Owner => "owner".into(),
        UserRole::Cashier => "cashier".into(),
        UserRole::DepartmentManager { category } => format!("manager:{}", category),
    }
}

fn build_report_json(
    result: &PipelineResult<ReportQuery, InsightCandidate>,
    products_loaded: usize,
    sales_loaded: usize,
    pipeline_ms: u128,
) -> ReportJson {
    let total_units: u32 = result
        .selected_candidates
        .iter()
        .map(|c| c.suggested_purchase)
        .sum();
    let total_cost: f64 = result
        .selected_candidates
        .iter()
        .map(|c| c.suggested_purchase as f64 * c.purchase_price)
        .sum();

    ReportJson {
        generated_at: Utc::now().to_rfc3339(),
        as_of: result
            .query
            .as_of
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        role: role_str(&result.query.role),
        category_filter: result.query.categories.clone(),
        pipeline_ms,
        items: result
            .selected_candidates
            .iter()
            .map(|c| ItemJson {
                product_id: c.product_id.clone(),
                name: c.product_name.clone(),
                category: c.category.clone(),
                current_stock: c.current_stock,
                stock_min: c.stock_min,
                weekly_demand: c.weekly_demand,
                daily_demand: c.daily_demand,
                demand_level: c.demand_level.to_string(),
                trend: c.trend.to_string(),
                trend_ratio: c.trend_ratio,
                stockout_in_days: c.stockout_in_days,
                suggested_purchase: c.suggested_purchase,
                restock_cost: c.suggested_purchase as f64 * c.purchase_price,
                attention_score: c.attention_score.unwrap_or(0.0),
                urgency_score: c.urgency_score.unwrap_or(0.0),
                price: c.price.as_ref().map(|p| PriceJson {
                    recommended_price: p.recommended_price,
                    variation_pct: p.variation_pct,
                    rationale: p.rationale.clone(),
                }),
            })
            .collect(),
        summary: SummaryJson {
            products_loaded,
            sales_loaded,
            candidates_detected: result.retrieved_candidates.len(),
            filtered_out: result.filtered_candidates.len(),
            selected: result.selected_candidates.len(),
            total_suggested_units: total_units,
            total_restock_cost: total_cost,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a CLP amount with thousands dots, the way local paperwork
/// writes it.
fn format_clp(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    let s = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped.chars().rev().collect::<String>())
}

fn print_report_human(
    result: &PipelineResult<ReportQuery, InsightCandidate>,
    products_loaded: usize,
    sales_loaded: usize,
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", "SIMPLIGEST \u{2014} Daily Inventory Report");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    let as_of = result
        .query
        .as_of
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".into());
    println!(
        "  as of {}  \u{00b7}  role {}  \u{00b7}  {} products \u{00b7} {} sales",
        as_of,
        role_str(&result.query.role),
        products_loaded,
        sales_loaded
    );
    println!(
        "  {} candidates \u{00b7} {} healthy (removed) \u{00b7} top {} selected",
        result.retrieved_candidates.len(),
        result.filtered_candidates.len(),
        result.selected_candidates.len()
    );
    println!();

    if result.selected_candidates.is_empty() {
        println!("  Nothing needs attention. All clear!");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, c) in result.selected_candidates.iter().enumerate() {
            let urgency_icon = match c.stockout_in_days {
                Some(d) if d <= 7 => "!!",
                Some(d) if d <= 14 => "! ",
                _ => "  ",
            };
            println!(
                "  {} {}. {:24} [{}]  {} demand  {}",
                urgency_icon,
                i + 1,
                c.product_name,
                c.category,
                c.demand_level,
                c.trend,
            );
            let stockout = match c.stockout_in_days {
                Some(d) => format!("stockout in ~{}d", d),
                None => "no stockout risk".into(),
            };
            println!(
                "       stock {:.1} (min {:.0})  \u{00b7}  {:.1}/week  \u{00b7}  {}  \u{00b7}  score {:.1}",
                c.current_stock,
                c.stock_min,
                c.weekly_demand,
                stockout,
                c.attention_score.unwrap_or(0.0),
            );
            if c.suggested_purchase > 0 {
                println!(
                    "       reorder {} units  (\u{2248} ${} CLP)",
                    c.suggested_purchase,
                    format_clp(c.suggested_purchase as f64 * c.purchase_price)
                );
            }
            if let Some(ref price) = c.price {
                println!(
                    "       price ${} \u{2192} ${}  ({:+.1}%)  {}",
                    format_clp(c.sale_price),
                    format_clp(price.recommended_price),
                    price.variation_pct,
                    price.rationale
                );
            }
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

fn print_scan_human(scan: &ScannedInvoice, validation: &ValidationResult) {
    println!();
    println!("  Scanned invoice (confidence {:.0}%)", scan.confidence * 100.0);
    println!("  {:\u{2500}<64}", "");
    let fmt_opt = |label: &str, value: Option<String>| {
        println!(
            "  {:12} {}",
            label,
            value.unwrap_or_else(|| "\u{2014} not recognized".into())
        );
    };
    fmt_opt("supplier", scan.supplier_rut.as_ref().map(|r| r.to_string()));
    fmt_opt("document", scan.kind.map(|k| k.to_string()));
    fmt_opt("folio", scan.folio.map(|f| f.to_string()));
    fmt_opt("issued", scan.issue_date.map(|d| d.to_string()));
    fmt_opt("net", scan.net.map(|n| format!("${}", format_clp(n as f64))));
    fmt_opt("iva", scan.iva.map(|n| format!("${}", format_clp(n as f64))));
    fmt_opt(
        "total",
        scan.total.map(|n| format!("${}", format_clp(n as f64))),
    );
    println!();

    if validation.violations.is_empty() {
        println!("  \u{2713} Document passes validation");
    } else {
        for v in &validation.violations {
            let marker = match v.severity {
                Severity::Reject => "\u{2717}",
                Severity::Warn => "\u{26a0}",
            };
            println!("  {} {:28} {}", marker, v.rule, v.detail);
        }
        println!();
        if validation.valid {
            println!("  \u{2713} Document passes validation (with warnings)");
        } else {
            println!("  \u{2717} Document must be corrected before recording");
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  simpligest-server report <products.csv> <sales.csv> [options]");
    eprintln!("  simpligest-server scan <invoice.txt> [options]");
    eprintln!();
    eprintln!("Report options:");
    eprintln!("  --top N          Number of report entries to keep (default: 5)");
    eprintln!("  --as-of RFC3339  Snapshot instant (default: now)");
    eprintln!("  --role R         owner | cashier | manager:CATEGORY (default: owner)");
    eprintln!("  --categories a,b Restrict the report to these categories");
    eprintln!("  --json           Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Scan options:");
    eprintln!("  --today YYYY-MM-DD  Reference date for validation (default: today)");
    eprintln!("  --json              Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  simpligest-server report fixtures/products.csv fixtures/sales.csv");
    eprintln!("  simpligest-server report products.csv sales.csv --role manager:almacen --json");
    eprintln!("  simpligest-server scan invoice.txt --json");
    process::exit(1);
}

fn parse_role(raw: &str) -> UserRole {
    match raw {
        "owner" => UserRole::Owner,
        "cashier" => UserRole::Cashier,
        other => match other.strip_prefix("manager:") {
            Some(category) if !category.is_empty() => UserRole::DepartmentManager {
                category: category.to_string(),
            },
            _ => {
                eprintln!("Error: unknown role '{}'", raw);
                usage();
            }
        },
    }
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    if *i + 1 >= args.len() {
        eprintln!("Error: {} requires a value", flag);
        usage();
    }
    *i += 2;
    &args[*i - 1]
}

async fn run_report(args: &[String]) {
    if args.len() < 2 {
        usage();
    }
    let products_path = &args[0];
    let sales_path = &args[1];

    let mut top_k: usize = 5;
    let mut json_output = false;
    let mut as_of: Option<DateTime<Utc>> = None;
    let mut role = UserRole::Owner;
    let mut categories: Vec<String> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--top" => {
                let raw = flag_value(args, &mut i, "--top");
                top_k = raw.parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top requires a positive integer");
                    process::exit(1);
                });
            }
            "--as-of" => {
                let raw = flag_value(args, &mut i, "--as-of");
                as_of = Some(
                    DateTime::parse_from_rfc3339(raw)
                        .map(|t| t.with_timezone(&Utc))
                        .unwrap_or_else(|e| {
                            eprintln!("Error: invalid --as-of '{}': {}", raw, e);
                            process::exit(1);
                        }),
                );
            }
            "--role" => {
                let raw = flag_value(args, &mut i, "--role");
                role = parse_role(raw);
            }
            "--categories" => {
                let raw = flag_value(args, &mut i, "--categories");
                categories = raw.split(',').map(|s| s.trim().to_string()).collect();
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let load_start = Instant::now();
    let products = load_products_file(products_path).unwrap_or_else(|e| {
        eprintln!("Error loading products: {}", e);
        process::exit(1);
    });
    let sales = load_sales_file(sales_path).unwrap_or_else(|e| {
        eprintln!("Error loading sales: {}", e);
        process::exit(1);
    });
    let load_ms = load_start.elapsed().as_millis();

    let products_loaded = products.len();
    let sales_loaded = sales.len();
    log::info!(
        "loaded {} products and {} sales from {} / {}",
        products_loaded,
        sales_loaded,
        products_path,
        sales_path
    );

    let clock = as_of.unwrap_or_else(Utc::now);
    let pipeline_start = Instant::now();
    let pipeline = DailyReportPipeline::with_snapshot_and_size(products, sales, clock, top_k);
    let query = ReportQuery {
        request_id: "report-cli".into(),
        user_id: "cli".into(),
        role,
        as_of,
        categories,
    };
    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if json_output {
        let report = build_report_json(&result, products_loaded, sales_loaded, pipeline_ms);
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        print_report_human(&result, products_loaded, sales_loaded, load_ms, pipeline_ms);
    }
}

fn run_scan(args: &[String]) {
    if args.is_empty() {
        usage();
    }
    let text_path = &args[0];

    let mut json_output = false;
    let mut today: Option<NaiveDate> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--today" => {
                let raw = flag_value(args, &mut i, "--today");
                today = Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|e| {
                    eprintln!("Error: invalid --today '{}': {}", raw, e);
                    process::exit(1);
                }));
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let text = std::fs::read_to_string(text_path).unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {}", text_path, e);
        process::exit(1);
    });

    let scanner = InvoiceScanner::new().unwrap_or_else(|e| {
        eprintln!("Error building scanner: {}", e);
        process::exit(1);
    });
    let scan = scanner.scan(&text).unwrap_or_else(|e| {
        eprintln!("Error scanning '{}': {}", text_path, e);
        process::exit(1);
    });

    let reference = today.unwrap_or_else(|| Utc::now().date_naive());
    let validation = validate_scan(&scan, reference);
    log::info!(
        "scanned '{}': confidence {:.0}%, {} violations",
        text_path,
        scan.confidence * 100.0,
        validation.violations.len()
    );

    if json_output {
        let out = ScanJson {
            valid: validation.valid,
            violations: validation
                .violations
                .iter()
                .map(|v| ViolationJson {
                    rule: v.rule,
                    severity: match v.severity {
                        Severity::Reject => "reject".into(),
                        Severity::Warn => "warn".into(),
                    },
                    detail: v.detail.clone(),
                })
                .collect(),
            invoice: scan,
        };
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
    } else {
        print_scan_human(&scan, &validation);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    match args[1].as_str() {
        "report" => run_report(&args[2..]).await,
        "scan" => run_scan(&args[2..]),
        _ => usage(),
    }
}
