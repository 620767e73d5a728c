//! Edge case tests for versioned Snowflake ID generation

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{assert_ids_monotonic, assert_unique_ids, v0_instant, ManualClock};
    use crate::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    /// Verify ID bit structure: version | timestamp | node | sequence
    #[test]
    fn test_id_bit_structure() {
        let clock = ManualClock::at(v0_instant(0b1011));
        let g = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 0b1010_1010), clock).unwrap();

        let id = g.next_id().unwrap();
        let seq_mask = 0xFF; // 8 bits
        let node_mask = 0xFF << 8; // 8 bits shifted by 8
        let ts_mask = ((1u64 << 45) - 1) << 16; // 45 bits shifted by 16

        assert_eq!(id & seq_mask, 0);
        assert_eq!((id & node_mask) >> 8, 0b1010_1010);
        assert_eq!((id & ts_mask) >> 16, 0b1011);
        assert_eq!(id >> 61, 0);
    }

    /// Test that IDs from different nodes never collide
    #[test]
    fn test_cross_node_uniqueness() {
        let mut all_ids = HashSet::new();

        for node in 0..10 {
            let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, node)).unwrap();
            let ids: Vec<u64> = (0..100).map(|_| g.next_id().unwrap()).collect();
            assert_ids_monotonic(&ids);
            for id in ids {
                assert!(all_ids.insert(id), "Collision from node {}", node);
            }
        }
        assert_eq!(all_ids.len(), 1000);
    }

    /// Two nodes sharing one frozen clock still never collide
    #[test]
    fn test_cross_node_same_tick() {
        let clock = ManualClock::at(v0_instant(500));
        let a = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 1), clock.clone()).unwrap();
        let b = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 2), clock).unwrap();

        let mut ids = Vec::new();
        for _ in 0..256 {
            ids.push(a.next_id().unwrap());
            ids.push(b.next_id().unwrap());
        }
        assert_unique_ids(&ids, 512);
    }

    /// Test IDs are numerically sorted in generation order
    #[test]
    fn test_numeric_sorting() {
        let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, 1)).unwrap();
        let ids: Vec<u64> = (0..100).map(|_| g.next_id().unwrap()).collect();

        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids, sorted, "IDs should already be numerically sorted");
    }

    /// Test high contention: multiple threads on same millisecond
    #[test]
    fn test_high_contention() {
        let g = Arc::new(Snowflake::new(SnowflakeConfig::new(VERSION_0, 1)).unwrap());
        let barrier = Arc::new(Barrier::new(4));
        let mut handles = vec![];

        for _ in 0..4 {
            let g = Arc::clone(&g);
            let b = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                b.wait(); // Sync start
                (0..250).map(|_| g.next_id().unwrap()).collect::<Vec<_>>()
            }));
        }

        let mut all_ids = vec![];
        for h in handles {
            all_ids.extend(h.join().unwrap());
        }

        assert_unique_ids(&all_ids, 1000);
    }

    /// Clock landing exactly on the epoch: the first ID takes sequence 1
    #[test]
    fn test_clock_at_epoch() {
        let clock = ManualClock::at(v0_instant(0));
        let g = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 3), clock).unwrap();

        let first = g.next_id().unwrap();
        let second = g.next_id().unwrap();
        assert_eq!(g.layout().decompose(first), (0, 3, 1));
        assert_eq!(g.layout().decompose(second), (0, 3, 2));
    }

    /// A clock jumping forward by many ticks just restarts the sequence
    #[test]
    fn test_clock_jumps_forward() {
        let clock = ManualClock::at(v0_instant(10));
        let g = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 3), clock.clone()).unwrap();

        g.next_id().unwrap();
        g.next_id().unwrap();
        clock.advance_millis(3_600_000);
        let id = g.next_id().unwrap();
        assert_eq!(g.layout().decompose(id), (3_600_010, 3, 0));
    }
}
