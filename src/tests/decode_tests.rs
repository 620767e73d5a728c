//! Round trips through the generator and `decode`

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{v0_instant, ManualClock};
    use crate::*;
    use chrono::Utc;
    use rand::{rng, Rng};

    #[test]
    fn test_decode_generated_id() {
        let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, 42)).unwrap();
        let id = g.next_id().unwrap();

        let decoded = decode(id).unwrap();
        assert_eq!(decoded.version, VERSION_0);
        assert_eq!(decoded.node_id, 42);

        let diff = Utc::now() - decoded.time;
        assert!(
            diff >= chrono::TimeDelta::zero() && diff <= chrono::TimeDelta::seconds(1),
            "Decoded time seems incorrect: {} (diff: {diff})",
            decoded.time
        );
    }

    #[test]
    fn test_round_trip_random_nodes() {
        let mut rng = rng();
        for _ in 0..50 {
            let node_id = rng.random_range(0..=255u64);
            let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, node_id)).unwrap();
            for _ in 0..20 {
                let decoded = decode(g.next_id().unwrap()).unwrap();
                assert_eq!(decoded.node_id, node_id);
                assert_eq!(decoded.version, VERSION_0);
            }
        }
    }

    #[test]
    fn test_round_trip_recomposes_id() {
        let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, 100)).unwrap();
        let layout = g.layout();

        for _ in 0..100 {
            let id = g.next_id().unwrap();
            let d = decode(id).unwrap();
            assert_eq!(layout.compose(d.timestamp, d.node_id, d.sequence), id);
        }
    }

    #[test]
    fn test_decoded_time_matches_clock() {
        let clock = ManualClock::at(v0_instant(86_400_000));
        let g = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 8), clock).unwrap();

        let decoded = decode(g.next_id().unwrap()).unwrap();
        assert_eq!(decoded.timestamp, 86_400_000);
        assert_eq!(decoded.time, v0_instant(86_400_000));
        assert_eq!(decoded.time.to_rfc3339(), "2026-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_decode_sub_tick_clock_floors() {
        let clock = ManualClock::at(v0_instant(10) + chrono::TimeDelta::microseconds(999));
        let g = Snowflake::with_clock(SnowflakeConfig::new(VERSION_0, 8), clock).unwrap();
        assert_eq!(decode(g.next_id().unwrap()).unwrap().time, v0_instant(10));
    }

    #[test]
    fn test_decode_does_not_need_generator() {
        let layout = lookup(VERSION_0).unwrap();
        let handles: Vec<_> = (0..4u64)
            .map(|n| {
                std::thread::spawn(move || {
                    let id = layout.compose(1_000 + n, n, n);
                    decode(id).unwrap()
                })
            })
            .collect();
        for (n, h) in handles.into_iter().enumerate() {
            let d = h.join().unwrap();
            assert_eq!(d.node_id, n as u64);
            assert_eq!(d.timestamp, 1_000 + n as u64);
        }
    }

    #[test]
    fn test_decode_rejects_foreign_version() {
        let g = Snowflake::new(SnowflakeConfig::new(VERSION_0, 1)).unwrap();
        let forged = g.next_id().unwrap() | (1 << 61);
        assert_eq!(
            decode(forged),
            Err(SnowflakeError::UnsupportedVersion { version: 1 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decoded_serde_round_trip() {
        let layout = lookup(VERSION_0).unwrap();
        let decoded = decode(layout.compose(5, 6, 7)).unwrap();
        let json = serde_json::to_string(&decoded).unwrap();
        let back: DecodedId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decoded);
    }
}
