use std::path::Path;

use crate::commands::{Cli, Commands};
use crate::output::*;
use loadlab_cli::client::{Backend, HttpBackend, MockBackend};
use loadlab_core::experiment::{
    export_submission, load_draft_file, save_draft_file, ExperimentManager,
};
use loadlab_core::settings::{load_or_create_settings, DashboardSettings};

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_or_create_settings(&cli.config);
    let backend: Box<dyn Backend> = if cli.mock {
        Box::new(MockBackend::new())
    } else {
        Box::new(HttpBackend::new(&settings))
    };

    match cli.command {
        Commands::New { name } => handle_new(&settings, &name),
        Commands::Compute { file } => handle_compute(&settings, &file),
        Commands::Export {
            file,
            output,
            strip_curve,
        } => handle_export(&settings, &file, output.as_deref(), strip_curve),
        Commands::Submit { file } => handle_submit(&settings, &file, backend.as_ref()),
        Commands::List => handle_list(backend.as_ref()),
        Commands::Cancel { id } => handle_cancel(&id, backend.as_ref()),
        Commands::Policies => handle_policies(backend.as_ref()),
    }
    Ok(())
}

fn manager_for_draft(settings: &DashboardSettings, file: &Path) -> Result<ExperimentManager, String> {
    let draft = load_draft_file(file)?;
    Ok(ExperimentManager::from_draft(
        settings.draft_dir.clone(),
        draft,
    ))
}

fn handle_new(settings: &DashboardSettings, name: &str) {
    let mut manager = ExperimentManager::new(settings.draft_dir.clone());
    match manager.save_draft_as(name) {
        Ok(path) => print_info(&format!("Draft '{}' created at {}", name, path.display())),
        Err(err) => print_error(&err),
    }
}

fn handle_compute(settings: &DashboardSettings, file: &Path) {
    let result = manager_for_draft(settings, file).and_then(|mut manager| {
        manager.recalculate()?;
        save_draft_file(&manager.draft, file)?;
        Ok(manager)
    });
    match result {
        Ok(manager) => {
            print_info(&format!(
                "Computed ticks for {} workloads",
                manager.draft.workloads.len()
            ));
            for slot in &manager.draft.workloads {
                println!("workload {} ticks: {:?}", slot.id, slot.workload.ticks);
            }
        }
        Err(err) => print_error(&err),
    }
}

fn handle_export(
    settings: &DashboardSettings,
    file: &Path,
    output: Option<&Path>,
    strip_curve: bool,
) {
    let include_metadata = settings.include_curve_metadata && !strip_curve;
    let result = manager_for_draft(settings, file)
        .and_then(|mut manager| manager.build_submission(include_metadata))
        .and_then(|submission| export_submission(&submission))
        .and_then(|exported| {
            serde_json::to_string_pretty(&exported)
                .map_err(|e| format!("Failed to serialize submission: {e}"))
        });
    match result {
        Ok(json) => match output {
            Some(path) => {
                if let Err(err) = std::fs::write(path, &json) {
                    print_error(&format!("Failed to write {}: {err}", path.display()));
                } else {
                    print_info(&format!("Submission written to {}", path.display()));
                }
            }
            None => println!("{json}"),
        },
        Err(err) => print_error(&err),
    }
}

fn handle_submit(settings: &DashboardSettings, file: &Path, backend: &dyn Backend) {
    log::debug!("submitting draft {}", file.display());
    let submission = manager_for_draft(settings, file)
        .and_then(|mut manager| manager.build_submission(settings.include_curve_metadata));
    match submission {
        Ok(submission) => match backend.submit(&submission) {
            Ok(id) => print_info(&format!("Experiment submitted with id {id}")),
            Err(err) => print_error(&err.to_string()),
        },
        Err(err) => print_error(&err),
    }
}

fn handle_list(backend: &dyn Backend) {
    match backend.find_all() {
        Ok(experiments) => print_experiment_list(&experiments),
        Err(err) => print_error(&err.to_string()),
    }
}

fn handle_cancel(id: &str, backend: &dyn Backend) {
    match backend.delete(id) {
        Ok(id) => print_info(&format!("Experiment {id} cancelled")),
        Err(err) => print_error(&err.to_string()),
    }
}

fn handle_policies(backend: &dyn Backend) {
    match backend.policies() {
        Ok(policies) => print_policy_list(&policies),
        Err(err) => print_error(&err.to_string()),
    }
}
