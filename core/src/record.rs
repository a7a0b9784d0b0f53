use std::{
    fmt::Write as _,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::debug;

use crate::{
    layout::{fixed, HEADER_LAYOUT, ROW_LAYOUT, ROW_PRECISION, TITLE_LAYOUT},
    results::ResultsStats,
};

pub const RESULTS_TITLE: &str = "Use a Pre-trained Image Classifier to Identify Dog Breeds";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Name of the results file that accumulates runs over `folder`.
///
/// Underscores become hyphens and path separators are dropped, so every run
/// over the same image folder lands in the same file.
pub fn results_file_name(folder: &str) -> String {
    let sanitized: String = folder
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .map(|c| if c == '_' { '-' } else { c })
        .collect();
    format!("final_{sanitized}.txt")
}

pub fn results_file_path(dir: &Path, folder: &str) -> PathBuf {
    dir.join(results_file_name(folder))
}

/// Header block written once, when a results file is first created.
pub fn render_results_header(folder: &str, stats: &ResultsStats) -> String {
    let mut output = String::new();
    let _ = writeln!(&mut output, "{RESULTS_TITLE}\n");
    let _ = writeln!(&mut output, "Final Results Table");
    let _ = writeln!(&mut output, "\n");

    let totals = [
        ("Folder", folder.to_string()),
        ("Total images", stats.n_images.to_string()),
        ("Dog images", stats.n_dogs_img.to_string()),
        ("Not-dog images", stats.n_notdogs_img.to_string()),
    ];
    for (label, value) in &totals {
        let _ = writeln!(&mut output, "{}", TITLE_LAYOUT.render(&[*label, value.as_str()]));
    }

    let _ = writeln!(&mut output, "\n");
    let _ = writeln!(
        &mut output,
        "{}",
        HEADER_LAYOUT.render(&["", "% not-dog", "% dogs", "% breeds", "% match", "time"])
    );
    let _ = writeln!(
        &mut output,
        "{}",
        HEADER_LAYOUT.render(&[
            "CNN Model Architecture",
            "correct",
            "correct",
            "correct",
            "labels",
            "elapsed",
        ])
    );
    let _ = writeln!(&mut output);
    output
}

/// Create the results file with its header if it does not exist yet.
///
/// Returns `true` when the file was created by this call.
pub fn ensure_results_file(path: &Path, folder: &str, stats: &ResultsStats) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to write results header to {}", path.display()))
        }
    };

    file.write_all(render_results_header(folder, stats).as_bytes())
        .with_context(|| format!("failed to write results header to {}", path.display()))?;
    debug!("created results file {}", path.display());
    Ok(true)
}

/// One run row: timestamp, model, the four percentages and the elapsed time.
pub fn render_run_row(
    timestamp: NaiveDateTime,
    model: &str,
    stats: &ResultsStats,
    elapsed_seconds: f64,
) -> String {
    let timestamp = timestamp.format(TIMESTAMP_FORMAT).to_string();
    let model = title_case(model);
    let notdogs = fixed(stats.pct_correct_notdogs, ROW_PRECISION);
    let dogs = fixed(stats.pct_correct_dogs, ROW_PRECISION);
    let breed = fixed(stats.pct_correct_breed, ROW_PRECISION);
    let matched = fixed(stats.pct_match, ROW_PRECISION);
    let elapsed = format_elapsed(elapsed_seconds);

    let cells = [timestamp, model, notdogs, dogs, breed, matched, elapsed];
    let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
    let mut row = ROW_LAYOUT.render(&cells);
    row.push('\n');
    row
}

/// Append `row` and close the file again before returning.
pub fn append_run_row(path: &Path, row: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open results file {}", path.display()))?;
    file.write_all(row.as_bytes())
        .with_context(|| format!("failed to append run to {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync results file {}", path.display()))?;
    debug!("appended run to {}", path.display());
    Ok(())
}

/// Record a finished run in `dir`, creating the results file on first use.
pub fn save_to_final_results(
    dir: &Path,
    stats: &ResultsStats,
    elapsed_seconds: f64,
    model: &str,
    folder: &str,
) -> Result<PathBuf> {
    let path = results_file_path(dir, folder);
    ensure_results_file(&path, folder, stats)?;
    let row = render_run_row(Local::now().naive_local(), model, stats, elapsed_seconds);
    append_run_row(&path, &row)?;
    Ok(path)
}

/// `H:M:S` with no zero padding, e.g. 3725 seconds is `1:2:5`.
pub fn format_elapsed(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let remainder = seconds % 3600.0;
    let minutes = (remainder / 60.0) as u64;
    let secs = (remainder % 60.0) as u64;
    format!("{hours}:{minutes}:{secs}")
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(c);
            in_word = false;
        }
    }
    output
}
