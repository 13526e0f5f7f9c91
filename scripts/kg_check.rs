// Quick diagnostic: query the Knowledge Graph directly, bypassing Slack
// Run: cargo run --bin kg_check -- lion [more terms...]

use kgsearch_slash::handler::NO_RESULTS;
use kgsearch_slash::resolve::{KnowledgeGraphClient, Resolver};
use std::time::Duration;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let api_key = match std::env::var("KG_API_KEY") {
        Ok(k) if !k.is_empty() => k,
        _ => {
            eprintln!("\n❌ KG_API_KEY is not set in your .env file");
            eprintln!("   Create an API key with the Knowledge Graph Search API enabled:");
            eprintln!("   https://console.cloud.google.com/apis/credentials\n");
            std::process::exit(1);
        }
    };
    let client = match KnowledgeGraphClient::new(api_key, Duration::from_secs(10)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("\n❌ Failed to build HTTP client: {}\n", e);
            std::process::exit(1);
        }
    };

    let mut terms: Vec<String> = std::env::args().skip(1).collect();
    if terms.is_empty() {
        terms = vec!["lion".to_string(), "asdfjkl13579".to_string()];
    }

    for term in &terms {
        println!("Looking up {:?}...", term);
        match client.resolve(term).await {
            Ok(Some(answer)) => println!("   OK. {}", answer),
            Ok(None) => println!("   OK. {}", NO_RESULTS),
            Err(e) => println!("   FAIL: {}", e),
        }
    }
}
