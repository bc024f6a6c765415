//! Plain-text and JSON rendering of estimation results

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use vtc_core::{BatchStatistics, BatchSummary, TokenReport};

const SEPARATOR_WIDTH: usize = 50;

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

fn print_header(title: &str) {
    println!();
    println!("{}", separator());
    println!(" {} ", title);
    println!("{}", separator());
}

pub fn print_single(report: &TokenReport) {
    print_header("VISION TOKEN ANALYSIS RESULTS");
    println!("Model                       : {}", report.model);
    if let Some(source) = &report.source {
        println!("Image Source                : {}", source);
    }
    println!("Original Image Size (W x H) : {}", report.original);
    println!("Resized Image Size (W x H)  : {}", report.aligned);
    println!("Number of Image Patches     : {}", report.patches);
    if let Some(tiles) = report.tiles {
        println!("Number of Image Tiles       : {}", tiles);
    }
    println!("Number of Image Tokens      : {}", report.image_tokens);
    println!();

    let info = &report.token_info;
    println!("[TOKEN INFO]");
    if let Some(start) = &info.image_start_token {
        println!("{}: 1", start);
    }
    println!("{}: {}", info.image_token, report.image_tokens);
    if let Some(end) = &info.image_end_token {
        println!("{}: 1", end);
    }
    println!("Total Tokens: {}", report.total_tokens);
    println!("{}", separator());
}

pub fn print_directory_info(dir: &Path, count: usize) {
    println!("Processing directory: {}", dir.display());
    println!("Found {} images to process...", count);
    println!();
}

pub fn print_batch(summary: &BatchSummary, statistics: Option<&BatchStatistics>) {
    print_header("BATCH ANALYSIS RESULTS");
    println!("Model                     : {}", summary.model);
    println!("Total Images Processed    : {}", summary.processed.len());
    if !summary.failed.is_empty() {
        println!("Total Images Failed       : {}", summary.failed.len());
    }

    if let Some(stats) = statistics {
        println!("Average Vision Tokens     : {:.1}", stats.mean);
        println!("Minimum Vision Tokens     : {}", stats.min);
        println!("Maximum Vision Tokens     : {}", stats.max);
        if stats.std_dev > 0.0 {
            println!("Standard Deviation        : {:.1}", stats.std_dev);
        }
    }
    println!("{}", separator());

    if !summary.failed.is_empty() {
        println!();
        println!("Failed Files:");
        for failed in &summary.failed {
            println!("  - {}: {}", failed.filename, failed.error);
        }
    }
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    #[serde(flatten)]
    summary: &'a BatchSummary,
    statistics: Option<&'a BatchStatistics>,
}

pub fn print_batch_json(
    summary: &BatchSummary,
    statistics: Option<&BatchStatistics>,
) -> Result<()> {
    let output = BatchOutput {
        summary,
        statistics,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
