use std::fs;
use std::process::ExitCode;

use chrono::{Datelike, Local};

use reitti_collage::capture::{capture_url, screenshot_path, BrowserSession, CaptureResult};
use reitti_collage::collage::build_collage;
use reitti_collage::config::CollageConfig;
use reitti_collage::dates::enumerate_target_dates;
use reitti_collage::report::{report_filename, RunReport};

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration problems are the only thing allowed to kill the run
    let config = match CollageConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let today = Local::now().date_naive();
    let dates = enumerate_target_dates(config.start_year, today);
    let month = today.month();
    let day = today.day();
    let month_day = format!("{:02}-{:02}", month, day);

    println!("=== Reitti 'This Day That Year' Collage Generator ===");
    println!("Date: {}", month_day);
    println!("Years: {} to {}", dates[0].year, dates[dates.len() - 1].year);
    println!("Base URL: {}", config.base_url);
    println!();

    let screenshot_dir = config.screenshot_dir();
    if let Err(e) = fs::create_dir_all(&screenshot_dir) {
        eprintln!("❌ Failed to create {}: {}", screenshot_dir.display(), e);
        return ExitCode::FAILURE;
    }

    println!("🌐 Initializing headless browser...");
    let session = match BrowserSession::launch(config.width, config.height).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ Failed to launch browser: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some((username, password)) = config.credentials() {
        println!("🔐 Logging in as {}...", username);
        match session
            .login(&config.base_url, username, password, config.login_wait_time)
            .await
        {
            Ok(()) => println!("  ✅ Logged in successfully"),
            Err(e) => {
                eprintln!("  ❌ {}", e);
                let _ = session.close().await;
                return ExitCode::FAILURE;
            }
        }
    }

    // One date at a time; a failure costs that year, never the run
    let mut results: Vec<CaptureResult> = Vec::new();
    for date in &dates {
        let url = capture_url(&config.base_url, date);
        let output = screenshot_path(&screenshot_dir, date);

        println!("📸 Capturing: {}", url);
        match session.capture_to(&url, config.wait_time, &output).await {
            Ok(()) => {
                println!("  ✅ Saved to {}", output.display());
                results.push(CaptureResult::saved(*date, output));
            }
            Err(e) => {
                eprintln!("  ⚠️  {} failed: {}", date, e);
                results.push(CaptureResult::failed(*date, e.to_string()));
            }
        }
    }

    if let Err(e) = session.close().await {
        eprintln!("⚠️  Browser did not shut down cleanly: {}", e);
    }

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    println!();
    println!("✅ Captured {} of {} screenshots", succeeded, results.len());

    println!();
    println!("🖼️  Creating collage...");
    let collage = match build_collage(
        &screenshot_dir,
        &config.collage_dir(),
        month,
        day,
        config.columns,
    ) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("⚠️  Collage composition failed: {}", e);
            None
        }
    };

    let report = RunReport::from_results(month_day.clone(), &results, collage.as_deref());
    let report_path = config.output_dir.join(report_filename(&month_day));
    match report.to_json() {
        Ok(json) => {
            if let Err(e) = fs::write(&report_path, json) {
                eprintln!("⚠️  Could not write run report: {}", e);
            }
        }
        Err(e) => eprintln!("⚠️  Could not serialize run report: {}", e),
    }

    println!();
    println!(
        "📊 Done: {}/{} dates captured, collage {}",
        succeeded,
        results.len(),
        match &collage {
            Some(path) => format!("written to {}", path.display()),
            None => "not written".to_string(),
        }
    );

    ExitCode::SUCCESS
}
