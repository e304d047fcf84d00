use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A member cluster as presented by the scheduling framework.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Cluster {
    pub name: String,
    /// Capability attributes as raw label strings.
    pub labels: HashMap<String, String>,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Cluster {
            name: name.into(),
            labels: HashMap::new(),
        }
    }
}

/// Typed capability metrics parsed from a cluster's labels.
///
/// The map is sparse: labels that are missing or unparseable are omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClusterMetrics {
    pub name: String,
    pub metrics: HashMap<String, f64>,
}
