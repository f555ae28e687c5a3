use std::fs;

use anyhow::Result;

use mirrorscan_core::config::AppConfig;
use mirrorscan_report::ReportStore;

pub fn run(config: AppConfig) -> Result<()> {
    let store = ReportStore::new(&config.report);

    let report = match store.load_report() {
        Ok(r) => r,
        Err(e) => {
            println!("No report found: {}", e);
            println!("Run `mirrorscan update` first.");
            return Ok(());
        }
    };

    let updated = chrono::DateTime::parse_from_rfc3339(&report.update_time)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| report.update_time.clone());

    println!("\n╔══════════════════════════════════════════════╗");
    println!("║           MirrorScan Status                  ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║ Last update:    {:>25}    ║", updated);
    println!("║ GitHub mirrors:      {:>20}    ║", report.github_mirrors.count);
    println!("║ Docker mirrors:      {:>20}    ║", report.docker_mirrors.count);
    println!("╚══════════════════════════════════════════════╝\n");

    if !report.github_mirrors.urls.is_empty() {
        println!("GitHub mirrors:");
        for url in &report.github_mirrors.urls {
            println!("  - {}", url);
        }
        println!();
    }

    if !report.docker_mirrors.urls.is_empty() {
        println!("Docker mirrors:");
        for url in report.docker_mirrors.urls.iter().take(5) {
            println!("  - {}", url);
        }
        let rest = report.docker_mirrors.urls.len().saturating_sub(5);
        if rest > 0 {
            println!("  ... and {} more", rest);
        }
        println!();
    }

    for path in [&config.report.json_path, &config.report.readme_path] {
        match fs::metadata(path) {
            Ok(meta) => println!("{}: {} bytes", path, meta.len()),
            Err(_) => println!("{}: missing", path),
        }
    }

    Ok(())
}
