use std::collections::HashMap;

use shared::models::{ClusterMetrics, Distribution, WorkloadDemand};

use crate::binpack::nodes_required;

/// Check a candidate distribution for feasibility and fill in its metric
/// bag. Returns false when the distribution must be dropped: a referenced
/// cluster has no collected metrics, a replica does not fit a worker node,
/// or a cluster would need more worker nodes than it may run.
///
/// Clusters are visited in `cluster_order` so repeated evaluation produces
/// identical metric bags.
pub fn evaluate_distribution(
    dist: &mut Distribution,
    cluster_order: &[String],
    cluster_metrics: &HashMap<String, ClusterMetrics>,
    demand: &WorkloadDemand,
) -> bool {
    let mut total_power = 0.0;
    let mut total_cost = 0.0;
    let mut nodes_by_cluster: HashMap<String, u64> = HashMap::new();

    for name in cluster_order {
        let replica_count = dist.allocation.get(name).copied().unwrap_or(0);

        let Some(collected) = cluster_metrics.get(name) else {
            tracing::warn!(cluster=%name, "No metrics collected for cluster");
            return false;
        };
        let metrics = &collected.metrics;

        // The control plane draws power and money as long as the cluster
        // participates, replicas or not.
        total_power += metric(metrics, "control_plane_power");
        total_cost += metric(metrics, "control_plane_cost");

        if replica_count == 0 {
            continue;
        }

        let worker_cpu = metric(metrics, "worker_cpu_capacity");
        let worker_memory = metric(metrics, "worker_memory_capacity");
        let max_worker_nodes = metric(metrics, "max_worker_nodes");

        if demand.cpu_per_replica as f64 > worker_cpu
            || demand.memory_per_replica as f64 > worker_memory
        {
            return false;
        }

        let Some(nodes) = nodes_required(
            replica_count,
            demand.cpu_per_replica as f64,
            demand.memory_per_replica as f64,
            worker_cpu,
            worker_memory,
        ) else {
            return false;
        };
        if nodes as f64 > max_worker_nodes {
            return false;
        }
        nodes_by_cluster.insert(name.clone(), nodes);

        total_power += metric(metrics, "worker_power") * nodes as f64;
        total_cost += metric(metrics, "worker_cost") * nodes as f64;
    }

    dist.metrics.insert("power".to_string(), total_power);
    dist.metrics.insert("cost".to_string(), total_cost);
    dist.metrics.insert(
        "utilization".to_string(),
        truncate3(utilization(dist, cluster_order, cluster_metrics, demand, &nodes_by_cluster)),
    );
    dist.metrics.insert(
        "proportionality".to_string(),
        truncate3(proportionality(dist, cluster_order, cluster_metrics)),
    );
    dist.metrics.insert(
        "weighted_latency".to_string(),
        weighted_latency(dist, cluster_order, cluster_metrics),
    );
    for (cluster, nodes) in &nodes_by_cluster {
        dist.metrics
            .insert(format!("worker_nodes_{}", cluster), *nodes as f64);
    }

    true
}

fn metric(metrics: &HashMap<String, f64>, key: &str) -> f64 {
    metrics.get(key).copied().unwrap_or(0.0)
}

/// Replica-weighted average of per-cluster packing utilization, where
/// packing utilization is the mean of CPU and memory occupancy across the
/// worker nodes a cluster opens.
fn utilization(
    dist: &Distribution,
    cluster_order: &[String],
    cluster_metrics: &HashMap<String, ClusterMetrics>,
    demand: &WorkloadDemand,
    nodes_by_cluster: &HashMap<String, u64>,
) -> f64 {
    let mut weighted = 0.0;
    let mut total_replicas = 0u32;

    for name in cluster_order {
        let replica_count = dist.allocation.get(name).copied().unwrap_or(0);
        if replica_count == 0 {
            continue;
        }
        let Some(collected) = cluster_metrics.get(name) else {
            continue;
        };
        let Some(&nodes) = nodes_by_cluster.get(name) else {
            continue;
        };

        let worker_cpu = metric(&collected.metrics, "worker_cpu_capacity");
        let worker_memory = metric(&collected.metrics, "worker_memory_capacity");

        let replicas = replica_count as f64;
        let cpu_util = replicas * demand.cpu_per_replica as f64 / (nodes as f64 * worker_cpu);
        let memory_util =
            replicas * demand.memory_per_replica as f64 / (nodes as f64 * worker_memory);
        let packing_util = (cpu_util + memory_util) / 2.0;

        weighted += packing_util * replicas;
        total_replicas += replica_count;
    }

    if total_replicas == 0 {
        return 0.0;
    }
    weighted / total_replicas as f64
}

/// Population standard deviation of per-cluster load ratios, where the load
/// ratio is the cluster's replica share over its CPU capacity share. Zero
/// means every cluster holds exactly its proportional share. Memory shares
/// track CPU shares here, so CPU capacity stands in for both.
fn proportionality(
    dist: &Distribution,
    cluster_order: &[String],
    cluster_metrics: &HashMap<String, ClusterMetrics>,
) -> f64 {
    let total_replicas = dist.total_replicas();
    if total_replicas == 0 {
        return 0.0;
    }

    let cpu_capacity = |name: &String| -> f64 {
        cluster_metrics
            .get(name)
            .map(|collected| {
                metric(&collected.metrics, "max_worker_nodes")
                    * metric(&collected.metrics, "worker_cpu_capacity")
            })
            .unwrap_or(0.0)
    };
    let total_capacity: f64 = cluster_order.iter().map(cpu_capacity).sum();
    if total_capacity <= 0.0 {
        return 0.0;
    }

    let load_ratios: Vec<f64> = cluster_order
        .iter()
        .map(|name| {
            let capacity_share = cpu_capacity(name) / total_capacity;
            let replica_share =
                dist.allocation.get(name).copied().unwrap_or(0) as f64 / total_replicas as f64;
            replica_share / capacity_share
        })
        .collect();

    std_deviation(&load_ratios)
}

fn std_deviation(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Replica-count-weighted mean of the static per-cluster latencies.
fn weighted_latency(
    dist: &Distribution,
    cluster_order: &[String],
    cluster_metrics: &HashMap<String, ClusterMetrics>,
) -> f64 {
    let total_replicas = dist.total_replicas();
    if total_replicas == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for name in cluster_order {
        let replica_count = dist.allocation.get(name).copied().unwrap_or(0);
        if replica_count == 0 {
            continue;
        }
        if let Some(collected) = cluster_metrics.get(name) {
            total += replica_count as f64 * metric(&collected.metrics, "latency");
        }
    }
    total / total_replicas as f64
}

fn truncate3(value: f64) -> f64 {
    (value * 1000.0).floor() / 1000.0
}
