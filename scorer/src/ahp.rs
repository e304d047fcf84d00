use std::collections::HashMap;

use reqwest::Client;
use shared::api::{AhpRequest, AhpResponse};
use shared::models::Distribution;

use crate::errors::ScorerError;

/// Client for the external AHP evaluator service.
#[derive(Debug, Clone)]
pub struct AhpClient {
    http: Client,
    url: String,
}

impl AhpClient {
    pub fn new(url: String) -> Self {
        AhpClient {
            http: Client::new(),
            url,
        }
    }

    /// Submit the feasible set for ranking. Transport failures, non-success
    /// statuses and undecodable bodies all abort the decision.
    pub async fn evaluate(&self, request: &AhpRequest) -> Result<AhpResponse, ScorerError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| ScorerError::RemoteEvaluator(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ScorerError::RemoteEvaluator(format!(
                "evaluator returned status {}",
                response.status()
            )));
        }

        response
            .json::<AhpResponse>()
            .await
            .map_err(|err| ScorerError::RemoteEvaluator(err.to_string()))
    }
}

/// Pick the highest-scored distribution. Walking the feasible set in
/// enumeration order makes ties land on the earliest candidate.
pub fn select_best<'a>(
    distributions: &'a [Distribution],
    response: &AhpResponse,
) -> Option<&'a Distribution> {
    let scores: HashMap<&str, i64> = response
        .scores
        .iter()
        .map(|entry| (entry.id.as_str(), entry.score))
        .collect();

    let mut best: Option<(&Distribution, i64)> = None;
    for dist in distributions {
        let Some(&score) = scores.get(dist.id.as_str()) else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((dist, score)),
        }
    }
    best.map(|(dist, _)| dist)
}

/// Scheduler-facing weights for the winning allocation.
///
/// The surrounding system drops clusters whose weight is 0, so when any
/// cluster ends up with zero replicas the non-zero counts are scaled by
/// `multiplier` and the zero-replica clusters are kept at weight 1. With no
/// zeros the weights are the replica counts themselves.
pub fn weights_for(dist: &Distribution, multiplier: i64) -> HashMap<String, i64> {
    let has_zero = dist.allocation.values().any(|&count| count == 0);

    dist.allocation
        .iter()
        .map(|(name, &count)| {
            let weight = if !has_zero {
                count as i64
            } else if count > 0 {
                count as i64 * multiplier
            } else {
                1
            };
            (name.clone(), weight)
        })
        .collect()
}
