//! Read-only schedule data shapes.
//!
//! The schedule is authored out of band as a JSON file; these types mirror
//! its nesting: quarter -> months -> services with per-role assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Who covers a role on a given service date: one name or several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Assignment {
    One(String),
    Many(Vec<String>),
}

/// A single service date with its role assignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDay {
    pub date: String,
    #[serde(default)]
    pub assignments: BTreeMap<String, Assignment>,
}

/// One quarter of the schedule: a display label, its months in calendar
/// order, and the services keyed by month name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuarterSchedule {
    pub quarter: String,
    pub months: Vec<String>,
    #[serde(default)]
    pub schedule: BTreeMap<String, Vec<ServiceDay>>,
}

/// The slice of the schedule the viewer renders for one quarter/month pick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub quarter: String,
    pub months: Vec<String>,
    pub month: String,
    pub services: Vec<ServiceDay>,
}
