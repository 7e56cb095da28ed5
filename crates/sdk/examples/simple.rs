//! Simple SDK Example
//!
//! Walks a small queue through a morning at the counter.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package totem-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package totem-sdk --example simple
//!    ```

use totem_sdk::TotemClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Totem SDK - Simple Example");
    println!("==========================\n");

    println!("1. Connecting to daemon...");
    let client = TotemClient::connect("http://127.0.0.1:9627").await?;
    println!("   ✓ Connected\n");

    println!("2. Filling the queue...");
    client.enqueue("Ana", "N").await?;
    client.enqueue("Bruno", "N").await?;
    let maria = client.enqueue("Maria", "P").await?;
    println!("   ✓ Maria is priority and waits at position {}\n", maria.position);

    println!("3. Current queue:");
    for entry in client.list().await? {
        println!("   {}. {} ({})", entry.position, entry.name, entry.class);
    }
    println!();

    println!("4. Serving the front of the queue...");
    let served = client.serve_next().await?;
    println!("   ✓ Served {}\n", served.name);

    println!("5. Cancelling position 2...");
    let removed = client.cancel(2).await?;
    println!("   ✓ Removed {}\n", removed.name);

    println!("6. Status:");
    let status = client.status().await?;
    println!("   waiting = {}", status.active);
    println!("   next    = {:?}\n", status.next_name);

    println!("7. Clearing the queue...");
    client.reset().await?;
    println!("   ✓ Done");

    Ok(())
}
