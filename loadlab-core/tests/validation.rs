use loadlab_core::experiment::{ExperimentDraft, ExperimentManager, WorkloadSlot};
use loadlab_core::validation::Validator;
use workload::{CurveForm, Time, WorkloadConfiguration};

fn valid_workload() -> WorkloadConfiguration {
    WorkloadConfiguration {
        service: "squeezenet".to_string(),
        client: "mock-mms-client".to_string(),
        ticks: vec![5, 10, 5],
        clients_per_host: 3,
        arrival_pattern: "Constant".to_string(),
        max_rps: Some(1000.0),
        curve: Some(CurveForm::flat(100.0)),
    }
}

fn draft_with(workload: WorkloadConfiguration) -> ExperimentDraft {
    ExperimentDraft {
        workloads: vec![WorkloadSlot { id: 1, workload }],
        ..ExperimentDraft::default()
    }
}

#[test]
fn valid_workload_passes() {
    assert_eq!(Validator::validate_workload(&valid_workload()), Ok(()));
}

#[test]
fn zero_clients_rejected() {
    let mut workload = valid_workload();
    workload.clients_per_host = 0;
    assert_eq!(
        Validator::validate_workload(&workload),
        Err("Number of clients is empty/0.".to_string())
    );
}

#[test]
fn missing_service_rejected() {
    let mut workload = valid_workload();
    workload.service.clear();
    assert_eq!(
        Validator::validate_workload(&workload),
        Err("No service chosen.".to_string())
    );
}

#[test]
fn missing_client_app_rejected() {
    let mut workload = valid_workload();
    workload.client.clear();
    assert_eq!(
        Validator::validate_workload(&workload),
        Err("No clientApp chosen.".to_string())
    );
}

#[test]
fn all_zero_ticks_rejected() {
    let mut workload = valid_workload();
    workload.ticks = vec![0, 0, 0];
    assert_eq!(
        Validator::validate_workload(&workload),
        Err("Workload is empty.".to_string())
    );
}

#[test]
fn empty_ticks_are_not_an_error() {
    // Ticks are only checked once something was computed.
    let mut workload = valid_workload();
    workload.ticks.clear();
    assert_eq!(Validator::validate_workload(&workload), Ok(()));
}

#[test]
fn draft_needs_at_least_one_workload() {
    let draft = ExperimentDraft::default();
    assert_eq!(
        Validator::validate_draft(&draft),
        Err("No workloads defined".to_string())
    );
}

#[test]
fn draft_rejects_non_positive_timing() {
    let mut draft = draft_with(valid_workload());
    draft.duration = Time::seconds(0.0);
    assert_eq!(
        Validator::validate_draft(&draft),
        Err("Duration must be positive".to_string())
    );

    let mut draft = draft_with(valid_workload());
    draft.interval = Time::seconds(0.0);
    assert_eq!(
        Validator::validate_draft(&draft),
        Err("Interval must be positive".to_string())
    );
}

#[test]
fn draft_with_valid_workload_passes() {
    assert_eq!(Validator::validate_draft(&draft_with(valid_workload())), Ok(()));
}

#[test]
fn manager_surfaces_first_validation_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut manager = ExperimentManager::new(dir.path().to_path_buf());
    manager.draft.workloads[0].workload.clients_per_host = 0;
    let err = manager.build_submission(true).expect_err("must fail");
    assert_eq!(err, "Number of clients is empty/0.");
}
