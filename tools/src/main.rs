//! order-gen: headless synthetic order generator.
//!
//! Usage:
//!   order-gen
//!   order-gen --count 5000 --seed 12345 --output orders.csv
//!   order-gen --config gen.json --summary --from 2025-06-01 --to 2025-12-31
//!   order-gen --seed 7 --json

use anyhow::{Context, Result};
use order_gen_core::{
    clock::GenClock,
    config::GenConfig,
    export::{export_batch, ExportReport},
    generator::OrderGenerator,
    summary::{default_target_platforms, DateWindow, SalesSummary},
};
use std::env;
use std::path::{Path, PathBuf};

#[derive(serde::Serialize)]
struct RunReport {
    seed: u64,
    anchor: String,
    catalog_size: usize,
    export: ExportReport,
    summary: Option<SummaryFiles>,
}

#[derive(serde::Serialize)]
struct SummaryFiles {
    regions_csv: PathBuf,
    platforms_csv: PathBuf,
    summary: SalesSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::default(),
    };
    if let Some(count) = parse_opt(&args, "--count") {
        config.generate_num = count;
    }
    if let Some(size) = parse_opt(&args, "--catalog-size") {
        config.catalog_size = size;
    }
    if let Some(seed) = parse_opt(&args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(output) = flag_value(&args, "--output") {
        config.output_csv = output.to_string();
    }
    let want_summary = args.iter().any(|a| a == "--summary");
    let json = args.iter().any(|a| a == "--json");

    let seed = config.seed.unwrap_or_else(chrono_tick);
    let clock = GenClock::system();
    let count = config.generate_num;
    let output = PathBuf::from(&config.output_csv);

    if !json {
        println!("order-gen");
        println!("  seed:      {seed}");
        println!("  anchor:    {}", clock.anchor);
        println!("  count:     {count}");
        println!("  catalog:   {}", config.catalog_size);
        println!("  output:    {}", output.display());
        println!();
    }

    let generator = OrderGenerator::new(config, seed, clock)?;
    let export = export_batch(&generator, count, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    let summary = if want_summary {
        let window = summary_window(&args, &clock)?;
        Some(write_summaries(&export, window)?)
    } else {
        None
    };

    let report = RunReport {
        seed,
        anchor: clock.anchor.to_string(),
        catalog_size: generator.catalog().len(),
        export,
        summary,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// `--from`/`--to`, defaulting to the order-time lookback ending today.
fn summary_window(args: &[String], clock: &GenClock) -> Result<DateWindow> {
    let today = clock.today();
    let start = match flag_value(args, "--from") {
        Some(raw) => raw.to_string(),
        None => (today - chrono::Duration::days(180)).to_string(),
    };
    let end = flag_value(args, "--to")
        .map(str::to_string)
        .unwrap_or_else(|| today.to_string());
    Ok(DateWindow::parse(&start, &end)?)
}

fn write_summaries(export: &ExportReport, window: DateWindow) -> Result<SummaryFiles> {
    let records = order_gen_core::export::read_orders_csv(&export.path)?;
    let summary = SalesSummary::compute(&records, window, &default_target_platforms());

    let dir = export.path.parent().unwrap_or_else(|| Path::new("."));
    let regions_csv = dir.join("region_quantity_summary.csv");
    let platforms_csv = dir.join("platform_orders_summary.csv");
    summary.write_regions(&regions_csv)?;
    summary.write_platforms(&platforms_csv)?;
    log::info!(
        "summaries written to {} and {}",
        regions_csv.display(),
        platforms_csv.display()
    );

    Ok(SummaryFiles {
        regions_csv,
        platforms_csv,
        summary,
    })
}

fn print_summary(report: &RunReport) {
    println!(
        "成功生成 {} 条虚拟订单，已保存至 {}",
        report.export.rows,
        report.export.path.display()
    );

    let Some(files) = &report.summary else {
        return;
    };
    let s = &files.summary;
    println!();
    println!("=== REGION QUANTITY ({} .. {}) ===", s.window.start, s.window.end);
    for r in &s.regions {
        println!("  {:<6} {:>8}", r.region, r.quantity);
    }
    if let Some(first) = s.regions.first() {
        println!("  average: {:.0}", first.average);
    }
    if let Some(top) = s.top_region() {
        println!("  top:     {}", top.region);
    }

    println!();
    println!("=== PLATFORM ORDERS ===");
    for p in &s.platforms {
        println!("  {:<6} {:>8}", p.platform, p.orders);
    }
    if let Some(first) = s.platforms.first() {
        println!("  average: {:.0}", first.average);
    }

    println!();
    println!("  regions csv:   {}", files.regions_csv.display());
    println!("  platforms csv: {}", files.platforms_csv.display());
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    flag_value(args, flag).and_then(|v| v.parse().ok())
}

fn chrono_tick() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
