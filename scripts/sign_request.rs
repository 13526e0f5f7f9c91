// Sign a slash-command body the way Slack does and print a ready-to-run curl line
// Run: cargo run --bin sign_request -- 'text=lion' [timestamp]

use kgsearch_slash::slack::{SigningSecret, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    dotenvy::dotenv().ok();

    let secret = match std::env::var("SLACK_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => {
            eprintln!("\n❌ SLACK_SECRET is not set in your .env file");
            eprintln!("   Copy it from your Slack app's Basic Information page (Signing Secret).\n");
            std::process::exit(1);
        }
    };
    let secret = SigningSecret::new(&secret).expect("SLACK_SECRET");

    let mut args = std::env::args().skip(1);
    let body = args.next().unwrap_or_else(|| "text=lion".to_string());
    let timestamp = args.next().unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs()
            .to_string()
    });
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    let signature = secret.sign(&timestamp, body.as_bytes());

    println!("{}: {}", TIMESTAMP_HEADER, timestamp);
    println!("{}: {}", SIGNATURE_HEADER, signature);
    println!();
    println!(
        "curl -i -X POST http://127.0.0.1:{}/slack/command \\\n  -H '{}: {}' \\\n  -H '{}: {}' \\\n  -H 'Content-Type: application/x-www-form-urlencoded' \\\n  --data-raw '{}'",
        port, TIMESTAMP_HEADER, timestamp, SIGNATURE_HEADER, signature, body
    );
}
