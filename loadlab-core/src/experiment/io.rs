use std::path::{Path, PathBuf};

use workload::{Submission, Time};

use crate::experiment::manager::{ExperimentDraft, WorkloadSlot};

#[derive(Debug, Clone)]
pub struct DraftEntry {
    pub name: String,
    pub workloads: usize,
    pub path: PathBuf,
}

pub fn scan_draft_entries(draft_dir: &Path) -> Vec<DraftEntry> {
    let mut entries = Vec::new();
    let _ = std::fs::create_dir_all(draft_dir);
    if let Ok(dir_entries) = std::fs::read_dir(draft_dir) {
        for entry in dir_entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Ok(data) = std::fs::read(&path) {
                if let Ok(draft) = serde_json::from_slice::<ExperimentDraft>(&data) {
                    entries.push(DraftEntry {
                        name: draft.name,
                        workloads: draft.workloads.len(),
                        path,
                    });
                }
            }
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

pub fn draft_file_path_for(draft_dir: &Path, name: &str) -> PathBuf {
    let safe = name.trim().replace(' ', "_");
    draft_dir.join(format!("{safe}.json"))
}

pub fn load_draft_file(path: &Path) -> Result<ExperimentDraft, String> {
    let data = std::fs::read(path).map_err(|e| format!("Failed to read draft: {e}"))?;
    serde_json::from_slice(&data).map_err(|e| format!("Failed to parse draft: {e}"))
}

pub fn save_draft_file(draft: &ExperimentDraft, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = serde_json::to_vec_pretty(draft).map_err(|e| format!("Failed to serialize draft: {e}"))?;
    std::fs::write(path, data).map_err(|e| format!("Failed to save draft: {e}"))
}

/// Builds the shareable submission document for a draft, with control
/// points renormalized from screen pixels into the 0..100 logical
/// square so the file is independent of the canvas it was drawn on.
pub fn export_submission(submission: &Submission) -> Result<Submission, String> {
    let mut exported = submission.clone();
    let duration_seconds = Time::parse_seconds(&exported.configuration.duration)
        .map_err(|e| e.to_string())?
        .to_seconds();

    for workload in &mut exported.configuration.workloads {
        let max_rps = match workload.max_rps {
            Some(v) => v,
            None => continue,
        };
        let curve = match workload.curve.as_mut() {
            Some(c) => c,
            None => continue,
        };
        if curve.points.is_empty() {
            continue;
        }
        let width = curve.points[curve.points.len() - 1].x;
        let height = curve.points[0].y;
        for point in &mut curve.points {
            // Screen x to experiment seconds, then to a percentage of
            // the duration; screen y through the value axis (inverted)
            // to a percentage of maxRps.
            let x = map_range(
                map_range(point.x, 0.0, width, 0.0, duration_seconds),
                0.0,
                duration_seconds,
                0.0,
                100.0,
            );
            let y = map_range(
                map_range(point.y, 0.0, height, max_rps, 0.0),
                max_rps,
                0.0,
                100.0,
                0.0,
            );
            point.x = finite_or_zero(round_to(x, 5));
            point.y = finite_or_zero(round_to(y, 5));
        }
    }
    Ok(exported)
}

/// Rebuilds an editable draft from a submission document. Ticks are
/// cleared so the next recompute derives them from the imported curve
/// and timing, not from whatever the file carried.
pub fn import_submission(submission: &Submission) -> Result<ExperimentDraft, String> {
    let duration =
        Time::parse_seconds(&submission.configuration.duration).map_err(|e| e.to_string())?;
    let interval =
        Time::parse_seconds(&submission.configuration.interval).map_err(|e| e.to_string())?;

    let meta = submission.experiment.clone().unwrap_or_default();
    let workloads = submission
        .configuration
        .workloads
        .iter()
        .enumerate()
        .map(|(index, workload)| {
            let mut workload = workload.clone();
            workload.ticks.clear();
            if let Some(curve) = workload.curve.as_mut() {
                curve.ticks.clear();
            }
            WorkloadSlot {
                id: index as u64 + 1,
                workload,
            }
        })
        .collect();

    Ok(ExperimentDraft {
        name: meta.name.unwrap_or_default(),
        creator: meta.creator.unwrap_or_default(),
        duration,
        interval,
        workloads,
        policy: submission.configuration.policy.clone(),
    })
}

fn map_range(value: f64, from_start: f64, from_end: f64, to_start: f64, to_end: f64) -> f64 {
    (value - from_start) * ((to_end - to_start) / (from_end - from_start)) + to_start
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
