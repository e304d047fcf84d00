use std::fmt;

/// Failure modes of a distribution scoring decision.
#[derive(Debug)]
pub enum ScorerError {
    /// No allocation passed the feasibility checks.
    Infeasible,
    /// AHP evaluator unreachable, non-200, or undecodable.
    RemoteEvaluator(String),
    /// The evaluator returned no usable score.
    NoWinner,
    /// The candidate set exceeds the configured enumeration guard.
    TooManyDistributions(u64),
}

impl fmt::Display for ScorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerError::Infeasible => write!(f, "No feasible distribution for the workload"),
            ScorerError::RemoteEvaluator(msg) => write!(f, "AHP evaluator error: {}", msg),
            ScorerError::NoWinner => write!(f, "Evaluator returned no scored distribution"),
            ScorerError::TooManyDistributions(count) => {
                write!(f, "Refusing to enumerate {} candidate distributions", count)
            }
        }
    }
}
