use std::cell::{Cell, RefCell};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use loadlab_core::settings::DashboardSettings;
use workload::{ClientApp, Experiment, LoadBalancingPolicySchema, Service, Submission};

use crate::protocol::{
    ApiError, BALANCING_POLICIES_ROUTE, CLIENT_APPS_ROUTE, EXPERIMENTS_ROUTE, SERVICES_ROUTE,
};

/// Everything the dashboard asks of its backends: experiment
/// submission and lifecycle on the experiment API, catalog lookups on
/// the experiment and policy APIs.
pub trait Backend {
    fn submit(&self, submission: &Submission) -> Result<String, ApiError>;
    fn delete(&self, id: &str) -> Result<String, ApiError>;
    fn find_all(&self) -> Result<Vec<Experiment>, ApiError>;
    fn services(&self) -> Result<Vec<Service>, ApiError>;
    fn client_apps(&self) -> Result<Vec<ClientApp>, ApiError>;
    fn policies(&self) -> Result<Vec<LoadBalancingPolicySchema>, ApiError>;
}

pub struct HttpBackend {
    api_url: String,
    policy_api_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(settings: &DashboardSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build();
        Self {
            api_url: settings.api_url.clone(),
            policy_api_url: settings.policy_api_url.clone(),
            agent,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.agent.get(url).call().map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

fn map_ureq_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, response) => ApiError::Http {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        other => ApiError::Transport(other.to_string()),
    }
}

impl Backend for HttpBackend {
    fn submit(&self, submission: &Submission) -> Result<String, ApiError> {
        let url = format!("{}{}", self.api_url, EXPERIMENTS_ROUTE);
        let body = serde_json::to_value(submission)?;
        log::info!("submitting experiment to {url}");
        let response = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    fn delete(&self, id: &str) -> Result<String, ApiError> {
        let url = format!("{}{}/{id}", self.api_url, EXPERIMENTS_ROUTE);
        let response = self.agent.delete(&url).call().map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    fn find_all(&self) -> Result<Vec<Experiment>, ApiError> {
        self.get_json(&format!("{}{}", self.api_url, EXPERIMENTS_ROUTE))
    }

    fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.get_json(&format!("{}{}", self.api_url, SERVICES_ROUTE))
    }

    fn client_apps(&self) -> Result<Vec<ClientApp>, ApiError> {
        self.get_json(&format!("{}{}", self.api_url, CLIENT_APPS_ROUTE))
    }

    fn policies(&self) -> Result<Vec<LoadBalancingPolicySchema>, ApiError> {
        self.get_json(&format!("{}{}", self.policy_api_url, BALANCING_POLICIES_ROUTE))
    }
}

/// In-memory backend for tests and offline runs. Submissions are kept
/// so listings and deletions behave like the real API within one
/// process.
pub struct MockBackend {
    submissions: RefCell<Vec<(String, Submission)>>,
    next_id: Cell<u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            submissions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.borrow().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MockBackend {
    fn submit(&self, submission: &Submission) -> Result<String, ApiError> {
        let number = self.next_id.get() + 1;
        self.next_id.set(number);
        let id = format!("exp-{number}");
        log::info!("mock backend accepted experiment {id}");
        self.submissions
            .borrow_mut()
            .push((id.clone(), submission.clone()));
        Ok(id)
    }

    fn delete(&self, id: &str) -> Result<String, ApiError> {
        let mut submissions = self.submissions.borrow_mut();
        let before = submissions.len();
        submissions.retain(|(known, _)| known != id);
        if submissions.len() == before {
            return Err(ApiError::Http {
                status: 404,
                message: format!("no experiment with id {id}"),
            });
        }
        Ok(id.to_string())
    }

    fn find_all(&self) -> Result<Vec<Experiment>, ApiError> {
        let experiments = self
            .submissions
            .borrow()
            .iter()
            .map(|(id, submission)| {
                let meta = submission.experiment.clone().unwrap_or_default();
                Experiment {
                    id: id.clone(),
                    name: meta.name,
                    creator: meta.creator,
                    start: None,
                    end: None,
                    created: None,
                    status: "QUEUED".to_string(),
                }
            })
            .collect();
        Ok(experiments)
    }

    fn services(&self) -> Result<Vec<Service>, ApiError> {
        Ok(vec![
            Service {
                name: "squeezenet".to_string(),
            },
            Service {
                name: "alexnet".to_string(),
            },
        ])
    }

    fn client_apps(&self) -> Result<Vec<ClientApp>, ApiError> {
        Ok(vec![ClientApp {
            name: "mock-mms-client".to_string(),
            manifest: json!({}),
        }])
    }

    fn policies(&self) -> Result<Vec<LoadBalancingPolicySchema>, ApiError> {
        Ok(vec![
            LoadBalancingPolicySchema {
                policy: "Weighted".to_string(),
                schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "round_robin": { "type": "boolean" },
                        "weights": {
                            "type": "object",
                            "additionalProperties": { "type": "number" }
                        }
                    }
                })),
            },
            LoadBalancingPolicySchema {
                policy: "Round Robin".to_string(),
                schema: None,
            },
            LoadBalancingPolicySchema {
                policy: "Random".to_string(),
                schema: None,
            },
            LoadBalancingPolicySchema {
                policy: "Pseudo".to_string(),
                schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "nodes": {
                            "type": "object",
                            "additionalProperties": { "type": "boolean" }
                        }
                    }
                })),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workload::{ExperimentConfiguration, ExperimentMeta};

    fn submission(name: &str) -> Submission {
        Submission {
            experiment: Some(ExperimentMeta {
                name: Some(name.to_string()),
                creator: None,
            }),
            configuration: ExperimentConfiguration {
                duration: "100s".to_string(),
                interval: "10s".to_string(),
                workloads: Vec::new(),
                policy: None,
            },
        }
    }

    #[test]
    fn mock_submit_assigns_sequential_ids() {
        let backend = MockBackend::new();
        assert_eq!(backend.submit(&submission("a")).unwrap(), "exp-1");
        assert_eq!(backend.submit(&submission("b")).unwrap(), "exp-2");
        assert_eq!(backend.submission_count(), 2);
    }

    #[test]
    fn mock_listing_reflects_submissions() {
        let backend = MockBackend::new();
        let id = backend.submit(&submission("ramp")).unwrap();
        let experiments = backend.find_all().unwrap();
        assert_eq!(experiments.len(), 1);
        assert_eq!(experiments[0].id, id);
        assert_eq!(experiments[0].name.as_deref(), Some("ramp"));
        assert_eq!(experiments[0].status, "QUEUED");
    }

    #[test]
    fn mock_delete_removes_known_ids_only() {
        let backend = MockBackend::new();
        let id = backend.submit(&submission("a")).unwrap();
        assert_eq!(backend.delete(&id).unwrap(), id);
        assert!(matches!(
            backend.delete(&id),
            Err(ApiError::Http { status: 404, .. })
        ));
    }

    #[test]
    fn mock_catalog_is_populated() {
        let backend = MockBackend::new();
        assert!(!backend.services().unwrap().is_empty());
        assert!(!backend.client_apps().unwrap().is_empty());
        let policies = backend.policies().unwrap();
        assert!(policies.iter().any(|p| p.policy == "Weighted"));
        assert!(policies.iter().any(|p| p.schema.is_none()));
    }
}
