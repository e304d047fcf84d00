use std::collections::HashMap;

use shared::models::CriteriaConfig;

/// The five ranking criteria in canonical payload naming, with their
/// favored direction.
pub const CRITERIA: [(&str, bool); 5] = [
    ("power", false),
    ("cost", false),
    ("utilization", true),
    ("proportionality", false),
    ("weighted_latency", false),
];

/// Criteria weights for a named profile.
///
/// `balance` weighs all five criteria at 0.20. `<criterion>30` puts 0.30 on
/// the named criterion and 0.175 on the rest; `<criterion>50` puts 0.50 on
/// it and 0.125 on the rest. Unknown names fall back to `balance`.
pub fn criteria_for_profile(profile: &str) -> HashMap<String, CriteriaConfig> {
    let emphasis = parse_profile(profile);
    if emphasis.is_none() && profile != "balance" {
        tracing::warn!(%profile, "Unknown criteria profile, using balance");
    }

    CRITERIA
        .iter()
        .map(|&(name, higher_is_better)| {
            let weight = match emphasis {
                Some((target, target_weight, other_weight)) => {
                    if name == target {
                        target_weight
                    } else {
                        other_weight
                    }
                }
                None => 0.20,
            };
            (
                name.to_string(),
                CriteriaConfig {
                    higher_is_better,
                    weight,
                },
            )
        })
        .collect()
}

/// Split a `<criterion><emphasis>` profile name into the target criterion
/// and its weight pair; anything else means `balance`.
fn parse_profile(profile: &str) -> Option<(&'static str, f64, f64)> {
    for &(name, _) in CRITERIA.iter() {
        if let Some(suffix) = profile.strip_prefix(name) {
            match suffix {
                "30" => return Some((name, 0.300, 0.175)),
                "50" => return Some((name, 0.500, 0.125)),
                _ => {}
            }
        }
    }
    None
}
