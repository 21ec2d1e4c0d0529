use chrono::Local;
use price_match_rust::ingest::{load_observed_file, load_references_file, IngestOptions};
use price_match_rust::{compare, AppConfig, MatchSet, Matcher};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

/// 输出报告
#[derive(Serialize)]
struct Report {
    generated_at: String,
    threshold: f64,
    total_edges: usize,
    comparisons: Vec<price_match_rust::models::ReferenceComparison>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式, 输出到 stderr (stdout 留给 JSON 报告)
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // 加载配置, 命令行参数覆盖文件路径
    let mut config = AppConfig::load()?;
    let mut args = std::env::args().skip(1);
    if let Some(path) = args.next() {
        config.input.reference_path = Some(path);
    }
    if let Some(path) = args.next() {
        config.input.observed_path = Some(path);
    }
    info!("Starting with config: {:?}", config);

    let (Some(reference_path), Some(observed_path)) =
        (config.input.reference_path.clone(), config.input.observed_path.clone())
    else {
        return Err("usage: price-match-rust <reference.csv> <observed.csv>".into());
    };

    let options = IngestOptions {
        include_attributes: config.matching.include_attributes,
    };
    let references = load_references_file(&reference_path, &options)?;
    let observed = load_observed_file(&observed_path)?;

    // 交叉匹配是纯 CPU 计算, 放到 blocking 线程执行
    let parallel = config.matching.parallel;
    let (references, observed, edges) = tokio::task::spawn_blocking(move || {
        let matcher = Matcher::new();
        let edges = if parallel {
            matcher.run_parallel(&references, &observed)
        } else {
            matcher.run(&references, &observed)
        };
        (references, observed, edges)
    })
    .await?;

    let matches = MatchSet::new(edges);
    let comparisons = compare(
        &references,
        &observed,
        &matches,
        config.matching.threshold,
        config.matching.price_basis,
    )?;

    let with_data = comparisons.iter().filter(|c| c.stats.has_data()).count();
    info!(
        "比较完成: 参考商品 {}, 有可比数据 {}, 边 {} (阈值 {})",
        comparisons.len(),
        with_data,
        matches.len(),
        config.matching.threshold
    );

    let report = Report {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        threshold: config.matching.threshold,
        total_edges: matches.len(),
        comparisons,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
