use workload::WorkloadConfiguration;

use crate::experiment::ExperimentDraft;

pub struct Validator;

impl Validator {
    pub fn validate_workload(workload: &WorkloadConfiguration) -> Result<(), String> {
        if workload.clients_per_host == 0 {
            return Err("Number of clients is empty/0.".to_string());
        }
        if workload.service.is_empty() {
            return Err("No service chosen.".to_string());
        }
        if workload.client.is_empty() {
            return Err("No clientApp chosen.".to_string());
        }
        if !workload.ticks.is_empty() && workload.ticks.iter().all(|&tick| tick == 0) {
            return Err("Workload is empty.".to_string());
        }
        Ok(())
    }

    pub fn validate_draft(draft: &ExperimentDraft) -> Result<(), String> {
        if draft.workloads.is_empty() {
            return Err("No workloads defined".to_string());
        }
        if draft.duration.to_seconds() <= 0.0 {
            return Err("Duration must be positive".to_string());
        }
        if draft.interval.to_seconds() <= 0.0 {
            return Err("Interval must be positive".to_string());
        }
        for slot in &draft.workloads {
            Self::validate_workload(&slot.workload)?;
        }
        Ok(())
    }
}
