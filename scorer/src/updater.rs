use std::collections::HashMap;

use futures::future::join_all;
use reqwest::Client;
use shared::api::WeightUpdate;

/// Post the chosen per-cluster weights to the updater sink.
///
/// Publishing is advisory: failures are logged and never reach the
/// scheduling decision.
pub async fn publish_weights(url: &str, weights: &HashMap<String, i64>) {
    let client = Client::new();

    let posts = weights.iter().map(|(cluster, &weight)| {
        let client = client.clone();
        let update = WeightUpdate {
            cluster: cluster.clone(),
            weight,
        };
        async move {
            match client.post(url).json(&update).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(cluster=%update.cluster, weight=update.weight, "Published weight");
                }
                Ok(resp) => {
                    tracing::error!(
                        cluster=%update.cluster,
                        status=%resp.status(),
                        "Weight updater rejected the update"
                    );
                }
                Err(err) => {
                    tracing::error!(cluster=%update.cluster, error=%err, "Failed to reach weight updater");
                }
            }
        }
    });

    join_all(posts).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_publishes_one_update_per_cluster() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/weights"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let weights = HashMap::from([
            ("edge".to_string(), 1i64),
            ("fog".to_string(), 3000),
            ("cloud".to_string(), 2000),
        ]);

        publish_weights(&format!("{}/weights", mock_server.uri()), &weights).await;

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);

        let mut seen: Vec<WeightUpdate> = requests
            .iter()
            .map(|req| serde_json::from_slice(&req.body).unwrap())
            .collect();
        seen.sort_by(|a, b| a.cluster.cmp(&b.cluster));
        assert_eq!(seen[0].cluster, "cloud");
        assert_eq!(seen[0].weight, 2000);
        assert_eq!(seen[1].cluster, "edge");
        assert_eq!(seen[1].weight, 1);
        assert_eq!(seen[2].cluster, "fog");
        assert_eq!(seen[2].weight, 3000);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let weights = HashMap::from([("edge".to_string(), 2i64)]);

        // completes without panicking even though every post is rejected
        publish_weights(&mock_server.uri(), &weights).await;
    }
}
