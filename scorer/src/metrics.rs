use std::collections::HashMap;

use shared::models::{Cluster, ClusterMetrics};

/// Label keys recognized as cluster capability metrics.
pub const METRIC_KEYS: [&str; 8] = [
    "worker_cpu_capacity",
    "worker_memory_capacity",
    "max_worker_nodes",
    "control_plane_power",
    "control_plane_cost",
    "worker_power",
    "worker_cost",
    "latency",
];

/// Parse a cluster's capability labels into typed metrics.
///
/// Labels that are missing or fail to parse are left out of the map; the
/// feasibility checks downstream deal with the gaps.
pub fn collect_metrics(cluster: &Cluster) -> ClusterMetrics {
    let mut metrics = HashMap::new();

    for key in METRIC_KEYS {
        let Some(raw) = cluster.labels.get(key) else {
            continue;
        };
        match raw.parse::<f64>() {
            Ok(value) => {
                metrics.insert(key.to_string(), value);
            }
            Err(_) => {
                tracing::warn!(cluster=%cluster.name, label=%key, value=%raw, "Unparseable metric label");
            }
        }
    }

    ClusterMetrics {
        name: cluster.name.clone(),
        metrics,
    }
}
