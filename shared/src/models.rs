pub mod cluster;
pub mod distribution;
pub mod workload;

pub use cluster::{Cluster, ClusterMetrics};
pub use distribution::{CriteriaConfig, Distribution};
pub use workload::{ReplicaRequirements, WorkloadDemand, WorkloadSpec};
