use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Workload binding spec handed to score plugins by the framework.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkloadSpec {
    pub replicas: i32,
    pub replica_requirements: Option<ReplicaRequirements>,
}

/// Per-replica resource requests.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplicaRequirements {
    /// Resource name to requested amount: "cpu" in millicores, "memory" in bytes.
    pub resource_request: HashMap<String, i64>,
}

/// Demand captured for a single scheduling decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkloadDemand {
    pub replicas: i32,
    pub cpu_per_replica: i64,
    pub memory_per_replica: i64,
}

impl WorkloadDemand {
    /// Extract the demand fields from a workload spec.
    /// Absent resource requests default to zero.
    pub fn from_spec(spec: &WorkloadSpec) -> Self {
        let mut demand = WorkloadDemand {
            replicas: spec.replicas,
            ..Default::default()
        };
        if let Some(requirements) = &spec.replica_requirements {
            if let Some(cpu) = requirements.resource_request.get("cpu") {
                demand.cpu_per_replica = *cpu;
            }
            if let Some(memory) = requirements.resource_request.get("memory") {
                demand.memory_per_replica = *memory;
            }
        }
        demand
    }
}
