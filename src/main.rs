use anyhow::{Context, Result};
use examscraper::{
    config::Config,
    fetch::ensure_document,
    process,
    source::{open_source, TableSource},
    store::ExamStore,
};
use reqwest::Client;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "\
usage: examscraper [--db FILE] [--regular-pdf FILE] [--out-of-course-pdf FILE]
                   [--regular-url URL] [--out-of-course-url URL]
                   [--no-download] [--no-reset]";

#[tokio::main]
async fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let mut cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = cfg.apply_args(env::args().skip(1)) {
        error!("{}", e);
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    if let Err(e) = run(cfg).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    info!(db = %cfg.db_path.display(), download = cfg.allow_download, "startup");

    // ─── 3) make sure both documents are on disk ─────────────────────
    let client = Client::builder()
        .timeout(cfg.http_timeout)
        .build()
        .context("building HTTP client")?;
    let regular = ensure_document(&client, &cfg.regular_url, &cfg.regular_pdf, cfg.allow_download)
        .await?;
    let out_of_course = ensure_document(
        &client,
        &cfg.out_of_course_url,
        &cfg.out_of_course_pdf,
        cfg.allow_download,
    )
    .await?;

    // ─── 4) extract on the blocking pool ─────────────────────────────
    let records = tokio::task::spawn_blocking(move || {
        let regular = open_source(&regular);
        let out_of_course = open_source(&out_of_course);
        let sources: [&dyn TableSource; 2] = [&*regular, &*out_of_course];
        process::run_pipeline(&sources)
    })
    .await??;

    // ─── 5) persist ──────────────────────────────────────────────────
    let mut store = ExamStore::open(&cfg.db_path)?;
    store.init_schema(cfg.reset_db)?;
    let report = store.save(records)?;

    println!(
        "Saved {} unique exams ({} new) in '{}'.",
        report.unique,
        report.inserted,
        cfg.db_path.display()
    );
    Ok(())
}
