use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub mod sampler;
pub use sampler::{sample_ticks, tick_count, SampleError};

pub use curve::{Interpolation, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "s")]
    Second,
    #[serde(rename = "min")]
    Minute,
}

pub const TIME_UNITS: [TimeUnit; 2] = [TimeUnit::Second, TimeUnit::Minute];

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("unknown time unit '{0}'")]
    UnknownUnit(String),
    #[error("invalid time value '{0}'")]
    InvalidNumber(String),
}

impl TimeUnit {
    pub fn multiplier(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
        }
    }

    pub fn parse(unit: &str) -> Result<TimeUnit, TimeError> {
        match unit {
            "s" => Ok(TimeUnit::Second),
            "min" => Ok(TimeUnit::Minute),
            other => Err(TimeError::UnknownUnit(other.to_string())),
        }
    }
}

/// A duration or interval as entered in the form: a value and a unit.
/// A new instance replaces the old one on every edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Time {
    pub value: f64,
    pub unit: TimeUnit,
}

impl Time {
    pub fn new(value: f64, unit: TimeUnit) -> Time {
        Time { value, unit }
    }

    pub fn seconds(value: f64) -> Time {
        Time::new(value, TimeUnit::Second)
    }

    pub fn minutes(value: f64) -> Time {
        Time::new(value, TimeUnit::Minute)
    }

    pub fn to_seconds(&self) -> f64 {
        self.value * self.unit.multiplier()
    }

    /// The `"<seconds>s"` form the backend expects for durations and
    /// intervals.
    pub fn to_seconds_string(&self) -> String {
        format!("{}s", self.to_seconds())
    }

    /// Parses the backend's `"<seconds>s"` form back into a Time.
    pub fn parse_seconds(text: &str) -> Result<Time, TimeError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_suffix('s')
            .ok_or_else(|| TimeError::UnknownUnit(trimmed.to_string()))?;
        let value = digits
            .parse::<f64>()
            .map_err(|_| TimeError::InvalidNumber(trimmed.to_string()))?;
        Ok(Time::seconds(value))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.label())
    }
}

/// The editable curve of one workload: pinned endpoint anchors plus
/// freely draggable points in between, the interpolation kernel, and
/// the most recently computed ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveForm {
    pub points: Vec<Point>,
    pub interpolation: Interpolation,
    #[serde(default)]
    pub ticks: Vec<i64>,
}

impl CurveForm {
    /// Starter curve: a flat line across the given screen width.
    pub fn flat(width: f64) -> CurveForm {
        CurveForm {
            points: vec![Point::new(0.0, 0.0), Point::new(width, 0.0)],
            interpolation: Interpolation::CatmullRom,
            ticks: Vec::new(),
        }
    }
}

/// One workload of an experiment. `maxRps` and `curve` only exist for
/// the editor; whether they stay on the outbound payload is decided by
/// the dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfiguration {
    pub service: String,
    pub client: String,
    #[serde(default)]
    pub ticks: Vec<i64>,
    pub clients_per_host: u32,
    pub arrival_pattern: String,
    #[serde(rename = "maxRps", default, skip_serializing_if = "Option::is_none")]
    pub max_rps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<CurveForm>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfiguration {
    pub duration: String,
    pub interval: String,
    pub workloads: Vec<WorkloadConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<LoadBalancingPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// The document POSTed to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment: Option<ExperimentMeta>,
    pub configuration: ExperimentConfiguration,
}

#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Submission {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PayloadError> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PayloadError> {
        let data = fs::read(path)?;
        let submission = serde_json::from_slice(&data)?;
        Ok(submission)
    }
}

/// An experiment as reported back by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientApp {
    pub name: String,
    #[serde(default)]
    pub manifest: serde_json::Value,
}

/// A balancing policy chosen for an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancingPolicy {
    pub policy: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub parameters: serde_json::Value,
}

/// A policy as advertised by the policy backend, with an optional JSON
/// schema describing its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancingPolicySchema {
    pub policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}
