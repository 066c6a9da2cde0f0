use workload::{
    CurveForm, Experiment, ExperimentConfiguration, ExperimentMeta, Interpolation, Submission,
    WorkloadConfiguration,
};

fn sample_workload() -> WorkloadConfiguration {
    WorkloadConfiguration {
        service: "alexnet".to_string(),
        client: "mock-mms-client".to_string(),
        ticks: vec![10, 20, 30],
        clients_per_host: 3,
        arrival_pattern: "Constant".to_string(),
        max_rps: Some(1000.0),
        curve: Some(CurveForm::flat(100.0)),
    }
}

fn sample_submission() -> Submission {
    Submission {
        experiment: Some(ExperimentMeta {
            name: Some("ramp-up".to_string()),
            creator: None,
        }),
        configuration: ExperimentConfiguration {
            duration: "100s".to_string(),
            interval: "10s".to_string(),
            workloads: vec![sample_workload()],
            policy: None,
        },
    }
}

#[test]
fn submission_serializes_backend_shape() {
    let value = serde_json::to_value(sample_submission()).expect("json");
    assert_eq!(value["configuration"]["duration"], "100s");
    assert_eq!(value["configuration"]["interval"], "10s");
    let workload = &value["configuration"]["workloads"][0];
    assert_eq!(workload["service"], "alexnet");
    assert_eq!(workload["clients_per_host"], 3);
    assert_eq!(workload["arrival_pattern"], "Constant");
    assert_eq!(workload["maxRps"], 1000.0);
    assert_eq!(workload["ticks"], serde_json::json!([10, 20, 30]));
    // Optional experiment.creator was None and must not appear.
    assert!(value["experiment"].get("creator").is_none());
    assert!(value["configuration"].get("policy").is_none());
}

#[test]
fn stripped_workload_omits_editor_fields() {
    let mut workload = sample_workload();
    workload.max_rps = None;
    workload.curve = None;
    let value = serde_json::to_value(&workload).expect("json");
    assert!(value.get("maxRps").is_none());
    assert!(value.get("curve").is_none());
}

#[test]
fn interpolation_keeps_editor_wire_names() {
    let value = serde_json::to_value(Interpolation::CatmullRom).expect("json");
    assert_eq!(value, "CatMullRom");
    let parsed: Interpolation = serde_json::from_str("\"Basis\"").expect("parse");
    assert_eq!(parsed, Interpolation::Basis);
}

#[test]
fn curve_form_ticks_default_to_empty() {
    let form: CurveForm = serde_json::from_str(
        r#"{"points":[{"x":0.0,"y":0.0},{"x":100.0,"y":0.0}],"interpolation":"Linear"}"#,
    )
    .expect("parse");
    assert!(form.ticks.is_empty());
    assert_eq!(form.points.len(), 2);
}

#[test]
fn experiment_listing_tolerates_missing_optionals() {
    let experiment: Experiment =
        serde_json::from_str(r#"{"id":"exp-1","status":"FINISHED"}"#).expect("parse");
    assert_eq!(experiment.id, "exp-1");
    assert_eq!(experiment.status, "FINISHED");
    assert!(experiment.start.is_none());
}

#[test]
fn submission_round_trips_through_json() {
    let submission = sample_submission();
    let text = serde_json::to_string(&submission).expect("json");
    let parsed: Submission = serde_json::from_str(&text).expect("parse");
    assert_eq!(parsed.configuration.duration, "100s");
    assert_eq!(parsed.configuration.workloads.len(), 1);
    let workload = &parsed.configuration.workloads[0];
    assert_eq!(workload.max_rps, Some(1000.0));
    assert_eq!(
        workload.curve.as_ref().map(|c| c.interpolation),
        Some(Interpolation::CatmullRom)
    );
}
