use workload::{Experiment, LoadBalancingPolicySchema};

pub fn print_info(message: &str) {
    println!("[loadlab][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[loadlab][ERROR]: {message}");
}

/// Runtime display used in the experiment list, e.g. 02':15''.
pub fn format_minute_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let minutes = total / 60;
    let rest = total % 60;
    format!("{minutes:02}':{rest:02}''")
}

pub fn print_experiment_list(experiments: &[Experiment]) {
    if experiments.is_empty() {
        print_info("No experiments");
        return;
    }
    print_info("Experiments:");
    for experiment in experiments {
        let name = experiment.name.as_deref().unwrap_or("(unnamed)");
        match (experiment.start, experiment.end) {
            (Some(start), Some(end)) => println!(
                "{} [{}] {} ran {}",
                experiment.id,
                experiment.status,
                name,
                format_minute_seconds(end - start)
            ),
            _ => println!("{} [{}] {}", experiment.id, experiment.status, name),
        }
    }
}

pub fn print_policy_list(policies: &[LoadBalancingPolicySchema]) {
    if policies.is_empty() {
        print_info("No balancing policies available");
        return;
    }
    print_info("Balancing policies:");
    for policy in policies {
        if policy.schema.is_some() {
            println!("{} (configurable)", policy.policy);
        } else {
            println!("{}", policy.policy);
        }
    }
}
