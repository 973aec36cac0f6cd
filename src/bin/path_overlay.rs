use std::fs;
use std::process::ExitCode;

use chrono::Datelike;

use reitti_collage::config::OverlayConfig;
use reitti_collage::dates::TargetDate;
use reitti_collage::overlay::{
    overlay_filename, parse_gpx_points, render_overlay_map, ReittiApi, YearTrack,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match OverlayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let month = config.target_date.month();
    let day = config.target_date.day();
    let month_day = format!("{:02}-{:02}", month, day);

    println!("🗺️  Reitti Multi-Year Path Overlay Generator");
    println!("Reitti URL: {}", config.base_url);
    println!(
        "Target Date: {} (across years {}-{})",
        month_day, config.start_year, config.end_year
    );
    println!();

    let api = match ReittiApi::new(&config.base_url, &config.api_token) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("❌ Failed to build API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // One year at a time; a year without data is skipped, not an error
    let mut tracks: Vec<YearTrack> = Vec::new();
    for year in config.start_year..=config.end_year {
        let date = TargetDate::new(year, month, day);
        println!("  🔍 Fetching {}...", date);

        match api.fetch_day_gpx(&date).await {
            Ok(Some(gpx)) => match parse_gpx_points(gpx.as_bytes()) {
                Ok(points) if !points.is_empty() => {
                    println!("    ✅ {} points", points.len());
                    tracks.push(YearTrack { year, points });
                }
                Ok(_) => println!("    ⚠️  No coordinates parsed"),
                Err(e) => println!("    ⚠️  {}", e),
            },
            Ok(None) => println!("    ⚠️  No data"),
            Err(e) => println!("    ⚠️  {}", e),
        }
    }

    if tracks.is_empty() {
        println!();
        println!(
            "❌ No path data found for {} in any year from {}-{}",
            month_day, config.start_year, config.end_year
        );
        println!("   Location tracking may simply not have been on for that day.");
        return ExitCode::SUCCESS;
    }

    let html = render_overlay_map(&tracks, &month_day);

    let output_path = config
        .output_dir
        .join(overlay_filename(&month_day, config.start_year, config.end_year));
    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("❌ Failed to create {}: {}", config.output_dir.display(), e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = fs::write(&output_path, html) {
        eprintln!("❌ Failed to write {}: {}", output_path.display(), e);
        return ExitCode::FAILURE;
    }

    println!();
    println!(
        "🎉 Generated overlay for {} with {} years of data",
        month_day,
        tracks.len()
    );
    println!("📁 Output: {}", output_path.display());

    ExitCode::SUCCESS
}
