//! Stand-in upstream service for trying the gateway locally.
//!
//! ```text
//! cargo run --example stub_upstream -- --name auth --port 8000
//! cargo run --example stub_upstream -- --name users --port 8001
//! cargo run --example stub_upstream -- --name products --port 8002
//! ```

use std::net::SocketAddr;

use axum::{extract::Request, Json, Router};
use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser)]
struct Args {
    /// Service name echoed in every response.
    #[arg(long)]
    name: String,

    #[arg(long)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let name = args.name.clone();

    let app = Router::new().fallback(move |request: Request| {
        let name = name.clone();
        async move {
            println!("{} {} {}", name, request.method(), request.uri());
            Json::<Value>(json!({ "service": name }))
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    println!("{} upstream listening on http://{}", args.name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
