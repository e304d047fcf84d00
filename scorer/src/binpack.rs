/// Worker nodes needed to host `replicas` identical replicas without
/// splitting one across nodes. Fills one node at a time until both the CPU
/// and memory ceilings are hit; for identical items this is exactly what
/// first-fit-decreasing degenerates to.
///
/// Returns `None` when a single replica does not fit on an empty node, so
/// callers that skip the pre-validation cannot spin forever.
pub fn nodes_required(
    replicas: u32,
    cpu_per_replica: f64,
    memory_per_replica: f64,
    node_cpu: f64,
    node_memory: f64,
) -> Option<u64> {
    if replicas == 0 {
        return Some(0);
    }
    if cpu_per_replica > node_cpu || memory_per_replica > node_memory {
        return None;
    }

    let mut nodes = 0u64;
    let mut remaining = replicas;
    while remaining > 0 {
        let mut used_cpu = 0.0;
        let mut used_memory = 0.0;
        let mut fit = 0u32;
        while fit < remaining {
            if used_cpu + cpu_per_replica > node_cpu || used_memory + memory_per_replica > node_memory
            {
                break;
            }
            used_cpu += cpu_per_replica;
            used_memory += memory_per_replica;
            fit += 1;
        }
        nodes += 1;
        remaining -= fit;
    }
    Some(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

    #[test]
    fn test_cpu_bound_packing() {
        // One 3000mc replica per 4000mc node, memory has plenty of room
        assert_eq!(nodes_required(4, 3000.0, 2.0 * GIB, 4000.0, 8.0 * GIB), Some(4));
    }

    #[test]
    fn test_memory_bound_packing() {
        // CPU would fit 8 per node, memory caps it at 2
        assert_eq!(nodes_required(5, 500.0, 4.0 * GIB, 4000.0, 8.0 * GIB), Some(3));
    }

    #[test]
    fn test_exact_fit_is_allowed() {
        assert_eq!(nodes_required(2, 2000.0, 4.0 * GIB, 4000.0, 8.0 * GIB), Some(1));
    }

    #[test]
    fn test_zero_replicas_need_no_nodes() {
        assert_eq!(nodes_required(0, 3000.0, 2.0 * GIB, 4000.0, 8.0 * GIB), Some(0));
    }

    #[test]
    fn test_oversized_replica_is_rejected() {
        assert_eq!(nodes_required(1, 5000.0, 2.0 * GIB, 4000.0, 8.0 * GIB), None);
        assert_eq!(nodes_required(1, 1000.0, 9.0 * GIB, 4000.0, 8.0 * GIB), None);
    }

    #[test]
    fn test_monotone_in_replica_count() {
        let mut previous = 0;
        for replicas in 0..=20 {
            let nodes = nodes_required(replicas, 1500.0, 1.0 * GIB, 4000.0, 8.0 * GIB).unwrap();
            assert!(nodes >= previous);
            assert!(nodes <= replicas as u64);
            previous = nodes;
        }
    }
}
