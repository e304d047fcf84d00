use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One candidate assignment of replica counts to clusters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Distribution {
    /// Replica counts in the fixed cluster ordering, e.g. "(1,2,0)".
    pub id: String,
    /// Cluster name to replica count.
    pub allocation: HashMap<String, u32>,
    /// Metrics estimated during feasibility evaluation.
    pub metrics: HashMap<String, f64>,
}

impl Distribution {
    /// Build a distribution from replica counts aligned with `cluster_names`.
    pub fn new(cluster_names: &[String], counts: &[u32]) -> Self {
        let id = format!(
            "({})",
            counts
                .iter()
                .map(|count| count.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );
        let allocation = cluster_names
            .iter()
            .cloned()
            .zip(counts.iter().copied())
            .collect();
        Distribution {
            id,
            allocation,
            metrics: HashMap::new(),
        }
    }

    pub fn total_replicas(&self) -> u32 {
        self.allocation.values().sum()
    }
}

/// Favored direction and weight of one ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CriteriaConfig {
    pub higher_is_better: bool,
    pub weight: f64,
}
