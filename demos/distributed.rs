use rand::{rng, Rng};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use vflake::{decode, Snowflake, SnowflakeConfig, VERSION_0};

fn main() {
    // One generator per simulated node, each shared by several worker threads
    let nodes: Vec<Arc<Snowflake>> = [10, 20, 30]
        .into_iter()
        .map(|node_id| Arc::new(Snowflake::new(SnowflakeConfig::new(VERSION_0, node_id)).unwrap()))
        .collect();

    let mut handles = vec![];
    for (worker, node) in nodes.iter().cycle().take(6).enumerate() {
        let node = Arc::clone(node);
        handles.push(thread::spawn(move || {
            let mut rng = rng();
            let mut ids = Vec::new();

            for _ in 0..5 {
                let id = node.next_id().unwrap();
                let decoded = decode(id).unwrap();
                println!(
                    "Worker {} generated ID {} (ts={}, node={}, seq={})",
                    worker, id, decoded.timestamp, decoded.node_id, decoded.sequence
                );
                ids.push(id);

                // Random delay to simulate work
                let delay = rng.random_range(0..=9);
                thread::sleep(Duration::from_millis(delay));
            }
            ids
        }));
    }

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all_ids.insert(id), "Duplicate ID generated!");
        }
    }

    println!("\nTotal unique IDs generated: {}", all_ids.len());
}
