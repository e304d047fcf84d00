//! Distribution scorer plugin.
//!
//! `score` only collects per-cluster metrics; the whole-set decision runs in
//! `normalize_score` once the framework has presented every cluster.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use shared::api::{AhpRequest, ClusterScore, ScorePlugin, MIN_CLUSTER_SCORE};
use shared::models::{Cluster, ClusterMetrics, WorkloadDemand, WorkloadSpec};

use crate::ahp::{select_best, weights_for, AhpClient};
use crate::config::Config;
use crate::criteria::criteria_for_profile;
use crate::enumerate::{count_compositions, generate_distributions};
use crate::errors::ScorerError;
use crate::evaluate::evaluate_distribution;
use crate::metrics::collect_metrics;
use crate::updater::publish_weights;

pub const PLUGIN_NAME: &str = "DistributionScorer";

/// Score plugin that picks the replica distribution best satisfying the
/// configured criteria profile.
pub struct DistributionScorer {
    config: Config,
    ahp: AhpClient,
    /// Per-decision metric cache, written concurrently by `score` calls.
    metrics_store: DashMap<String, ClusterMetrics>,
    /// Demand captured from the spec. Every `score` call of a decision
    /// writes the same values, so the write is idempotent.
    demand: RwLock<Option<WorkloadDemand>>,
}

impl DistributionScorer {
    pub fn new(config: Config) -> Self {
        let ahp = AhpClient::new(config.ahp_url.clone());
        DistributionScorer {
            config,
            ahp,
            metrics_store: DashMap::new(),
            demand: RwLock::new(None),
        }
    }
}

#[async_trait]
impl ScorePlugin for DistributionScorer {
    type Error = ScorerError;

    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Collects metrics for one cluster and defers the ranking to
    /// `normalize_score`.
    async fn score(&self, spec: &WorkloadSpec, cluster: &Cluster) -> Result<i64, ScorerError> {
        let demand = WorkloadDemand::from_spec(spec);
        {
            let mut slot = self.demand.write().await;
            if slot.replace(demand) != Some(demand) {
                tracing::info!(
                    replicas = demand.replicas,
                    cpu = demand.cpu_per_replica,
                    memory = demand.memory_per_replica,
                    "Captured workload demand"
                );
            }
        }

        let metrics = collect_metrics(cluster);
        tracing::debug!(cluster=%cluster.name, metrics=?metrics.metrics, "Collected cluster metrics");
        self.metrics_store.insert(cluster.name.clone(), metrics);

        Ok(MIN_CLUSTER_SCORE)
    }

    /// Enumerates the candidate distributions over the presented cluster
    /// order, keeps the feasible ones, has the AHP evaluator rank them, and
    /// publishes the winner's weights.
    async fn normalize_score(&self, scores: &[ClusterScore]) -> Result<(), ScorerError> {
        let demand = match *self.demand.read().await {
            Some(demand) if demand.replicas > 0 => demand,
            _ => {
                tracing::warn!("No replica demand in spec, skipping distribution scoring");
                return Ok(());
            }
        };

        // The presented order fixes distribution identifiers and metric
        // iteration for the whole decision.
        let cluster_order: Vec<String> = scores
            .iter()
            .map(|entry| entry.cluster.name.clone())
            .collect();
        let cluster_metrics: HashMap<String, ClusterMetrics> = cluster_order
            .iter()
            .filter_map(|name| {
                self.metrics_store
                    .get(name)
                    .map(|entry| (name.clone(), entry.value().clone()))
            })
            .collect();

        let candidates = count_compositions(cluster_order.len(), demand.replicas);
        if candidates > self.config.max_distributions {
            return Err(ScorerError::TooManyDistributions(candidates));
        }
        tracing::debug!(
            clusters = cluster_order.len(),
            replicas = demand.replicas,
            candidates,
            "Enumerating distributions"
        );

        let mut feasible = Vec::new();
        for mut dist in generate_distributions(&cluster_order, demand.replicas) {
            if evaluate_distribution(&mut dist, &cluster_order, &cluster_metrics, &demand) {
                feasible.push(dist);
            }
        }
        if feasible.is_empty() {
            return Err(ScorerError::Infeasible);
        }
        tracing::debug!(feasible = feasible.len(), "Evaluated candidate distributions");

        let request = AhpRequest {
            distributions: feasible,
            criteria: criteria_for_profile(&self.config.profile),
        };
        let response = self.ahp.evaluate(&request).await?;

        let best = select_best(&request.distributions, &response).ok_or(ScorerError::NoWinner)?;
        let weights = weights_for(best, self.config.weight_multiplier);
        tracing::info!(distribution=%best.id, "Selected best distribution");

        // Publishing is advisory and outlives the decision.
        let updater_url = self.config.updater_url.clone();
        tokio::spawn(async move {
            publish_weights(&updater_url, &weights).await;
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(replicas: i32) -> WorkloadSpec {
        WorkloadSpec {
            replicas,
            replica_requirements: None,
        }
    }

    #[tokio::test]
    async fn test_score_caches_metrics_and_defers() {
        let plugin = DistributionScorer::new(Config::default());
        let mut cluster = Cluster::new("edge");
        cluster
            .labels
            .insert("latency".to_string(), "10".to_string());

        let score = plugin.score(&spec(3), &cluster).await.unwrap();

        assert_eq!(score, MIN_CLUSTER_SCORE);
        let cached = plugin.metrics_store.get("edge").unwrap();
        assert_eq!(cached.metrics["latency"], 10.0);
        assert_eq!(
            *plugin.demand.read().await,
            Some(WorkloadDemand {
                replicas: 3,
                ..Default::default()
            })
        );
    }

    #[tokio::test]
    async fn test_normalize_without_demand_is_a_noop() {
        let plugin = DistributionScorer::new(Config::default());
        assert!(plugin.normalize_score(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_normalize_without_replicas_is_a_noop() {
        let plugin = DistributionScorer::new(Config::default());
        let cluster = Cluster::new("edge");
        plugin.score(&spec(0), &cluster).await.unwrap();

        let scores = [ClusterScore {
            cluster,
            score: MIN_CLUSTER_SCORE,
        }];
        assert!(plugin.normalize_score(&scores).await.is_ok());
    }

    #[tokio::test]
    async fn test_pathological_enumeration_is_refused() {
        let config = Config {
            max_distributions: 10,
            ..Config::default()
        };
        let plugin = DistributionScorer::new(config);

        let clusters: Vec<Cluster> = (0..4).map(|i| Cluster::new(format!("c{}", i))).collect();
        for cluster in &clusters {
            plugin.score(&spec(100), cluster).await.unwrap();
        }
        let scores: Vec<ClusterScore> = clusters
            .into_iter()
            .map(|cluster| ClusterScore {
                cluster,
                score: MIN_CLUSTER_SCORE,
            })
            .collect();

        assert!(matches!(
            plugin.normalize_score(&scores).await,
            Err(ScorerError::TooManyDistributions(_))
        ));
    }
}
