use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use curve::render_path;
use workload::{
    sample_ticks, CurveForm, ExperimentConfiguration, ExperimentMeta, LoadBalancingPolicy, Point,
    Submission, Time, WorkloadConfiguration,
};

use crate::experiment::io::{draft_file_path_for, save_draft_file, scan_draft_entries, DraftEntry};
use crate::validation::Validator;

/// Screen width of a freshly created workload curve.
pub const DEFAULT_CURVE_WIDTH: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSlot {
    pub id: u64,
    pub workload: WorkloadConfiguration,
}

/// The editable state of an experiment before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creator: String,
    pub duration: Time,
    pub interval: Time,
    pub workloads: Vec<WorkloadSlot>,
    #[serde(default)]
    pub policy: Option<LoadBalancingPolicy>,
}

impl Default for ExperimentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            creator: String::new(),
            duration: Time::seconds(100.0),
            interval: Time::seconds(10.0),
            workloads: Vec::new(),
            policy: None,
        }
    }
}

/// Owns the current draft, tracks which workloads need their ticks
/// recomputed, and builds the outbound submission. Recomputation is
/// synchronous; callers coalesce bursts of edits before invoking it.
pub struct ExperimentManager {
    pub draft: ExperimentDraft,
    pub draft_path: PathBuf,
    pub draft_entries: Vec<DraftEntry>,
    draft_dir: PathBuf,
    dirty: BTreeSet<u64>,
    next_workload_id: u64,
}

impl ExperimentManager {
    pub fn new(draft_dir: PathBuf) -> Self {
        let mut manager = Self {
            draft: ExperimentDraft::default(),
            draft_path: PathBuf::new(),
            draft_entries: Vec::new(),
            draft_dir,
            dirty: BTreeSet::new(),
            next_workload_id: 0,
        };
        manager.add_workload();
        manager
    }

    pub fn from_draft(draft_dir: PathBuf, draft: ExperimentDraft) -> Self {
        let next_workload_id = draft.workloads.iter().map(|slot| slot.id).max().unwrap_or(0);
        let dirty = draft.workloads.iter().map(|slot| slot.id).collect();
        Self {
            draft,
            draft_path: PathBuf::new(),
            draft_entries: Vec::new(),
            draft_dir,
            dirty,
            next_workload_id,
        }
    }

    pub fn draft_dir(&self) -> &Path {
        &self.draft_dir
    }

    fn default_workload() -> WorkloadConfiguration {
        WorkloadConfiguration {
            service: String::new(),
            client: String::new(),
            ticks: Vec::new(),
            clients_per_host: 3,
            arrival_pattern: "Constant".to_string(),
            max_rps: Some(1000.0),
            curve: Some(CurveForm::flat(DEFAULT_CURVE_WIDTH)),
        }
    }

    pub fn add_workload(&mut self) -> u64 {
        self.next_workload_id += 1;
        let id = self.next_workload_id;
        self.draft.workloads.push(WorkloadSlot {
            id,
            workload: Self::default_workload(),
        });
        self.dirty.insert(id);
        id
    }

    pub fn remove_workload(&mut self, id: u64) -> bool {
        let before = self.draft.workloads.len();
        self.draft.workloads.retain(|slot| slot.id != id);
        self.dirty.remove(&id);
        self.draft.workloads.len() != before
    }

    fn workload_mut(&mut self, id: u64) -> Result<&mut WorkloadConfiguration, String> {
        self.draft
            .workloads
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.workload)
            .ok_or_else(|| format!("No workload with id {id}"))
    }

    /// Duration edits only take effect for positive values that differ
    /// from the current one; every workload is invalidated when they do.
    pub fn set_duration(&mut self, time: Time) {
        if time.value > 0.0 && self.draft.duration != time {
            self.draft.duration = time;
            self.mark_all_dirty();
        }
    }

    pub fn set_interval(&mut self, time: Time) {
        if time.value > 0.0 && self.draft.interval != time {
            self.draft.interval = time;
            self.mark_all_dirty();
        }
    }

    pub fn set_max_rps(&mut self, id: u64, max_rps: f64) -> Result<(), String> {
        if max_rps <= 0.0 {
            return Ok(());
        }
        let workload = self.workload_mut(id)?;
        if workload.max_rps != Some(max_rps) {
            workload.max_rps = Some(max_rps);
            self.dirty.insert(id);
        }
        Ok(())
    }

    pub fn update_points(&mut self, id: u64, points: Vec<Point>) -> Result<(), String> {
        let workload = self.workload_mut(id)?;
        let curve = workload
            .curve
            .as_mut()
            .ok_or_else(|| format!("Workload {id} has no curve"))?;
        curve.points = points;
        curve.ticks.clear();
        self.dirty.insert(id);
        Ok(())
    }

    pub fn set_interpolation(&mut self, id: u64, interpolation: workload::Interpolation) -> Result<(), String> {
        let workload = self.workload_mut(id)?;
        let curve = workload
            .curve
            .as_mut()
            .ok_or_else(|| format!("Workload {id} has no curve"))?;
        if curve.interpolation != interpolation {
            curve.interpolation = interpolation;
            self.dirty.insert(id);
        }
        Ok(())
    }

    pub fn mark_dirty(&mut self, id: u64) {
        self.dirty.insert(id);
    }

    fn mark_all_dirty(&mut self) {
        for slot in &self.draft.workloads {
            self.dirty.insert(slot.id);
        }
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Recomputes the ticks of every invalidated workload: render the
    /// curve through its kernel, sample it, cache the result. Clean
    /// workloads keep their previous ticks.
    pub fn recalculate(&mut self) -> Result<(), String> {
        let pending = self.dirty.len();
        let duration = self.draft.duration;
        let interval = self.draft.interval;
        for slot in &mut self.draft.workloads {
            if !self.dirty.contains(&slot.id) {
                continue;
            }
            let id = slot.id;
            let curve = slot
                .workload
                .curve
                .as_ref()
                .ok_or_else(|| format!("Workload {id} has no curve"))?;
            let max_rps = slot
                .workload
                .max_rps
                .ok_or_else(|| format!("Workload {id} has no maxRps"))?;
            let path = render_path(&curve.points, curve.interpolation)
                .map_err(|e| format!("Workload {id}: {e}"))?;
            let ticks = sample_ticks(&duration, &interval, max_rps, &curve.points, &path)
                .map_err(|e| format!("Workload {id}: {e}"))?;
            slot.workload.ticks = ticks.clone();
            if let Some(curve) = slot.workload.curve.as_mut() {
                curve.ticks = ticks;
            }
            self.dirty.remove(&id);
        }
        if pending > 0 {
            log::debug!("recalculated ticks for {pending} workloads");
        }
        Ok(())
    }

    /// Validates the draft and assembles the submission document.
    /// Editor-only fields (`maxRps`, `curve`) stay on the workloads
    /// only when `include_curve_metadata` is set.
    pub fn build_submission(&mut self, include_curve_metadata: bool) -> Result<Submission, String> {
        self.recalculate()?;
        Validator::validate_draft(&self.draft)?;

        let workloads = self
            .draft
            .workloads
            .iter()
            .map(|slot| {
                let mut workload = slot.workload.clone();
                if !include_curve_metadata {
                    workload.max_rps = None;
                    workload.curve = None;
                }
                workload
            })
            .collect();

        let experiment = self.optional_meta();
        Ok(Submission {
            experiment,
            configuration: ExperimentConfiguration {
                duration: self.draft.duration.to_seconds_string(),
                interval: self.draft.interval.to_seconds_string(),
                workloads,
                policy: self.draft.policy.clone(),
            },
        })
    }

    fn optional_meta(&self) -> Option<ExperimentMeta> {
        let name = (!self.draft.name.is_empty()).then(|| self.draft.name.clone());
        let creator = (!self.draft.creator.is_empty()).then(|| self.draft.creator.clone());
        if name.is_none() && creator.is_none() {
            None
        } else {
            Some(ExperimentMeta { name, creator })
        }
    }

    pub fn draft_file_path(&self, name: &str) -> PathBuf {
        draft_file_path_for(&self.draft_dir, name)
    }

    pub fn save_draft_as(&mut self, name: &str) -> Result<PathBuf, String> {
        self.draft.name = name.to_string();
        let path = self.draft_file_path(name);
        save_draft_file(&self.draft, &path)?;
        self.draft_path = path.clone();
        Ok(path)
    }

    pub fn scan_drafts(&mut self) {
        self.draft_entries = scan_draft_entries(&self.draft_dir);
    }
}
