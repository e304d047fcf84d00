use shared::models::Distribution;

/// Streaming generator of every weak composition of `total` into `parts`
/// non-negative integers, in ascending lexicographic order.
///
/// A negative total or zero parts yields nothing; a total of zero yields the
/// single all-zeros vector.
pub struct Compositions {
    current: Option<Vec<u32>>,
}

impl Compositions {
    pub fn new(parts: usize, total: i32) -> Self {
        if parts == 0 || total < 0 {
            return Compositions { current: None };
        }
        let mut first = vec![0u32; parts];
        first[parts - 1] = total as u32;
        Compositions {
            current: Some(first),
        }
    }
}

impl Iterator for Compositions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        let current = self.current.take()?;
        self.current = next_composition(&current);
        Some(current)
    }
}

/// Lexicographic successor, if any: bump the rightmost position with a
/// non-empty suffix and move the remainder to the last slot.
fn next_composition(v: &[u32]) -> Option<Vec<u32>> {
    let parts = v.len();
    if parts <= 1 {
        return None;
    }
    let mut suffix = 0u32;
    for j in (0..parts - 1).rev() {
        suffix += v[j + 1];
        if suffix > 0 {
            let mut next = vec![0u32; parts];
            next[..j].copy_from_slice(&v[..j]);
            next[j] = v[j] + 1;
            next[parts - 1] = suffix - 1;
            return Some(next);
        }
    }
    None
}

/// Size of the candidate set, C(total + parts - 1, parts - 1), saturating
/// at `u64::MAX`. Lets the caller refuse pathological enumerations before
/// producing a single candidate.
pub fn count_compositions(parts: usize, total: i32) -> u64 {
    if parts == 0 || total < 0 {
        return 0;
    }
    let n = total as u64 + parts as u64 - 1;
    let mut k = parts as u64 - 1;
    k = k.min(n - k);

    let mut count = 1u64;
    for i in 1..=k {
        // count * (n - k + i) stays divisible by i at every step
        count = match count.checked_mul(n - k + i) {
            Some(product) => product / i,
            None => return u64::MAX,
        };
    }
    count
}

/// Every possible way to spread `total` replicas across the given clusters,
/// carrying an identifier and an empty metric bag.
pub fn generate_distributions(
    cluster_names: &[String],
    total: i32,
) -> impl Iterator<Item = Distribution> + '_ {
    Compositions::new(cluster_names.len(), total)
        .map(move |counts| Distribution::new(cluster_names, &counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_replicas_three_clusters() {
        let clusters = names(&["edge", "fog", "cloud"]);
        let distributions: Vec<Distribution> = generate_distributions(&clusters, 2).collect();

        assert_eq!(distributions.len(), 6);
        let ids: Vec<&str> = distributions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["(0,0,2)", "(0,1,1)", "(0,2,0)", "(1,0,1)", "(1,1,0)", "(2,0,0)"]
        );
        for dist in &distributions {
            assert_eq!(dist.total_replicas(), 2);
            assert!(dist.metrics.is_empty());
        }
    }

    #[test]
    fn test_identifier_matches_allocation() {
        let clusters = names(&["edge", "fog", "cloud"]);
        let dist = generate_distributions(&clusters, 3)
            .find(|d| d.id == "(1,0,2)")
            .unwrap();

        assert_eq!(dist.allocation["edge"], 1);
        assert_eq!(dist.allocation["fog"], 0);
        assert_eq!(dist.allocation["cloud"], 2);
    }

    #[test]
    fn test_zero_replicas_yields_all_zeros() {
        let clusters = names(&["edge", "fog", "cloud"]);
        let distributions: Vec<Distribution> = generate_distributions(&clusters, 0).collect();

        assert_eq!(distributions.len(), 1);
        assert_eq!(distributions[0].id, "(0,0,0)");
    }

    #[test]
    fn test_negative_replicas_yields_nothing() {
        let clusters = names(&["edge", "fog"]);
        assert_eq!(generate_distributions(&clusters, -1).count(), 0);
    }

    #[test]
    fn test_single_cluster() {
        let clusters = names(&["edge"]);
        let distributions: Vec<Distribution> = generate_distributions(&clusters, 5).collect();

        assert_eq!(distributions.len(), 1);
        assert_eq!(distributions[0].id, "(5)");
        assert_eq!(distributions[0].allocation["edge"], 5);
    }

    #[test]
    fn test_count_matches_enumeration() {
        for (parts, total) in [(1, 7), (2, 5), (3, 2), (3, 10), (4, 6)] {
            let clusters: Vec<String> = (0..parts).map(|i| format!("c{}", i)).collect();
            let enumerated = generate_distributions(&clusters, total).count() as u64;
            assert_eq!(count_compositions(parts, total), enumerated);
        }
    }

    #[test]
    fn test_count_saturates() {
        assert_eq!(count_compositions(40, i32::MAX), u64::MAX);
        assert_eq!(count_compositions(0, 3), 0);
        assert_eq!(count_compositions(3, -1), 0);
    }
}
