//! Report command implementation.

use crate::report::{render, ReportInput};
use chrono::Local;
use recdb_core::{Store, StoreConfig};
use std::fs;
use std::path::Path;
use tracing::info;

/// Runs the report command.
pub fn run(config: StoreConfig, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;
    let output = output.map_or_else(|| store.config().report_path(), Path::to_path_buf);

    let input = ReportInput {
        students: live(store.students().scan()?.into_live()),
        courses: live(store.courses().scan()?.into_live()),
        enrollments: live(store.enrollments().scan()?.into_live()),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S (%:z)").to_string(),
    };

    fs::write(&output, render(&input))?;
    info!(path = %output.display(), "report written");
    println!("Report generated -> {}", output.display());
    Ok(())
}

fn live<R>(rows: Vec<(u64, R)>) -> Vec<R> {
    rows.into_iter().map(|(_, r)| r).collect()
}
