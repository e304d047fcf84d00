use std::env;

/// Runtime configuration of the distribution scorer.
#[derive(Debug, Clone)]
pub struct Config {
    pub ahp_url: String,
    pub updater_url: String,
    /// Criteria profile name, e.g. "balance" or "power50".
    pub profile: String,
    /// Weight scale applied to non-zero clusters when the winning
    /// distribution leaves some cluster without replicas.
    pub weight_multiplier: i64,
    /// Upper bound on the candidate set before enumeration is refused.
    pub max_distributions: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ahp_url: "http://172.18.0.1:6000/distribution_score".to_string(),
            updater_url: "http://172.18.0.1:6001/weights".to_string(),
            profile: "balance".to_string(),
            weight_multiplier: 1000,
            max_distributions: 1_000_000,
        }
    }
}

pub fn load_config() -> Config {
    let defaults = Config::default();

    let ahp_url = env::var("M8S_AHP_URL").unwrap_or(defaults.ahp_url);

    let updater_url = env::var("M8S_UPDATER_URL").unwrap_or(defaults.updater_url);

    let profile = env::var("M8S_SCORING_PROFILE").unwrap_or(defaults.profile);

    let weight_multiplier = env::var("M8S_WEIGHT_MULTIPLIER")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(defaults.weight_multiplier);

    let max_distributions = env::var("M8S_MAX_DISTRIBUTIONS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(defaults.max_distributions);

    Config {
        ahp_url,
        updater_url,
        profile,
        weight_multiplier,
        max_distributions,
    }
}
