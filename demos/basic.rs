use vflake::{decode, Snowflake, SnowflakeConfig, SnowflakeError, VERSION_0};

fn main() -> Result<(), SnowflakeError> {
    // Create a generator for node 1 under layout version 0
    let generator = Snowflake::new(SnowflakeConfig::new(VERSION_0, 1))?;

    println!("Generated IDs (guaranteed to be monotonic):");
    for _ in 0..3 {
        let id = generator.next_id()?;
        let decoded = decode(id)?;
        println!("  ID: {id}, {decoded}");
    }

    // Decoding needs nothing but the ID itself
    let id = generator.next_id()?;
    let decoded = decode(id)?;
    println!("\nComponents of {id}:");
    println!("  Version: {}", decoded.version);
    println!("  Timestamp: {} ticks since epoch", decoded.timestamp);
    println!("  Time: {}", decoded.time);
    println!("  Node ID: {}", decoded.node_id);
    println!("  Sequence: {}", decoded.sequence);

    // Configuration errors
    if let Err(err) = Snowflake::new(SnowflakeConfig::new(VERSION_0, 2000)) {
        println!("\nExpected error for invalid node ID: {err}");
    }
    if let Err(err) = Snowflake::new(SnowflakeConfig::new(99, 1)) {
        println!("Expected error for invalid version: {err}");
    }

    Ok(())
}
