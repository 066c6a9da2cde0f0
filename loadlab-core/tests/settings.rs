use loadlab_core::settings::{
    load_or_create_settings, load_settings_file, save_settings_file, DashboardSettings,
};

#[test]
fn first_run_writes_the_default_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("loadlab.toml");
    assert!(!path.exists());

    let settings = load_or_create_settings(&path);
    assert_eq!(settings, DashboardSettings::default());
    assert!(path.exists());

    let reloaded = load_settings_file(&path).expect("load");
    assert_eq!(reloaded, settings);
}

#[test]
fn settings_round_trip_through_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("loadlab.toml");

    let mut settings = DashboardSettings::default();
    settings.api_url = "http://galileo.example:5001/api".to_string();
    settings.grafana_url = Some("http://grafana.example:3000".to_string());
    settings.include_curve_metadata = false;
    settings.request_timeout_secs = 5;

    save_settings_file(&path, &settings).expect("save");
    let reloaded = load_settings_file(&path).expect("load");
    assert_eq!(reloaded, settings);
}

#[test]
fn partial_files_fall_back_to_field_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("loadlab.toml");
    std::fs::write(&path, "api_url = \"http://other:5001/api\"\n").expect("write");

    let settings = load_settings_file(&path).expect("load");
    assert_eq!(settings.api_url, "http://other:5001/api");
    assert_eq!(settings.request_timeout_secs, 30);
    assert!(settings.include_curve_metadata);
}
