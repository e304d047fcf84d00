use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::{Cluster, CriteriaConfig, Distribution, WorkloadSpec};

/// Score returned from `ScorePlugin::score` when the plugin defers the real
/// ranking to `normalize_score`.
pub const MIN_CLUSTER_SCORE: i64 = 0;

/// Per-cluster score entry handed to `normalize_score`, in the order the
/// framework presents clusters. That order is authoritative for the decision.
#[derive(Debug, Clone)]
pub struct ClusterScore {
    pub cluster: Cluster,
    pub score: i64,
}

/// Contract between the scheduling framework and score plugins.
///
/// The framework calls `score` concurrently across the clusters of one
/// decision, then calls `normalize_score` exactly once after the last
/// `score` returns. Dropping the returned future cancels the call.
#[async_trait]
pub trait ScorePlugin: Send + Sync {
    type Error: fmt::Debug + fmt::Display + Send;

    fn name(&self) -> &'static str;

    /// Called once per cluster per decision.
    async fn score(&self, spec: &WorkloadSpec, cluster: &Cluster) -> Result<i64, Self::Error>;

    /// Called once per decision with every cluster's score entry.
    async fn normalize_score(&self, scores: &[ClusterScore]) -> Result<(), Self::Error>;
}

// ============================= AHP EVALUATOR

/// Request body for the external AHP evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AhpRequest {
    pub distributions: Vec<Distribution>,
    pub criteria: HashMap<String, CriteriaConfig>,
}

/// Response body from the AHP evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AhpResponse {
    pub scores: Vec<DistributionScore>,
}

/// Ranking score the evaluator assigned to one distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionScore {
    pub id: String,
    pub score: i64,
}

// ============================= WEIGHT UPDATER

/// Weight for one cluster, posted to the updater sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightUpdate {
    pub cluster: String,
    pub weight: i64,
}
