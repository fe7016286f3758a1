#[cfg(test)]
mod tests {
    use crate::routing::ring::HashRing;

    /// Reads the input as a decimal number so ring positions are easy to
    /// reason about in tests.
    fn decimal_hash(data: &[u8]) -> u32 {
        std::str::from_utf8(data)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    // ============================================================
    // RING CONSTRUCTION TESTS
    // ============================================================

    #[test]
    fn test_ring_holds_replicas_per_member() {
        let mut ring = HashRing::new(50);
        ring.add(&["10.0.0.1:9000", "10.0.0.2:9000", "10.0.0.3:9000"]);
        assert_eq!(ring.len(), 150);
        assert!(!ring.is_empty());
    }

    #[test]
    fn test_empty_ring_returns_sentinel() {
        let ring = HashRing::new(50);
        assert_eq!(ring.get("anything"), "");
        assert!(ring.is_empty());
    }

    // ============================================================
    // LOOKUP TESTS
    // ============================================================

    #[test]
    fn test_lookup_with_decimal_hash() {
        let mut ring = HashRing::with_hash(3, decimal_hash);
        // Virtual nodes land on 20/21/22, 40/41/42 and 60/61/62.
        ring.add(&["6", "4", "2"]);
        assert_eq!(ring.len(), 9);

        assert_eq!(ring.get("2"), "2");
        assert_eq!(ring.get("11"), "2");
        assert_eq!(ring.get("23"), "4");
        assert_eq!(ring.get("41"), "4");
        assert_eq!(ring.get("45"), "6");
        // Past the highest position the ring wraps to the lowest.
        assert_eq!(ring.get("63"), "2");
    }

    #[test]
    fn test_lookup_after_adding_member() {
        let mut ring = HashRing::with_hash(3, decimal_hash);
        ring.add(&["6", "4", "2"]);
        // 80/81/82 join the ring; 63 now belongs to "8" instead of wrapping.
        ring.add(&["8"]);

        assert_eq!(ring.get("63"), "8");
        assert_eq!(ring.get("90"), "2");
        assert_eq!(ring.get("2"), "2");
        assert_eq!(ring.get("23"), "4");
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let mut ring = HashRing::new(50);
        let members = ["a:1", "b:2", "c:3"];
        ring.add(&members);

        for i in 0..200 {
            let key = format!("key-{}", i);
            let first = ring.get(&key).to_owned();
            assert!(members.contains(&first.as_str()));
            assert_eq!(ring.get(&key), first, "repeated lookups must agree");
        }
    }

    #[test]
    fn test_lookup_spreads_keys() {
        let mut ring = HashRing::new(50);
        ring.add(&["a:1", "b:2", "c:3"]);

        let mut counts = std::collections::HashMap::new();
        for i in 0..3000 {
            let owner = ring.get(&format!("key-{}", i)).to_owned();
            *counts.entry(owner).or_insert(0usize) += 1;
        }

        // Every member should own a meaningful share of the keyspace.
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n > 300), "skewed spread: {:?}", counts);
    }
}
