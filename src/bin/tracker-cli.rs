use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "tracker-cli")]
#[command(about = "Operations CLI for the visit tracker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe tracker health (exits nonzero when degraded)
    Health,
    /// Record a visit and report the new total
    Visit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            let status = res.status();
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            if !status.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Visit => {
            let res = client.get(format!("{}/count", cli.url)).send().await?;
            let status = res.status();
            let body = res.text().await?;
            if status.is_success() {
                match extract_count(&body) {
                    Some(count) => println!("Visit recorded, total is now {count}"),
                    None => println!("Visit recorded (HTTP {})", status.as_u16()),
                }
            } else {
                eprintln!("Error: tracker returned status {}", status);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Pull the total out of the count page without a full HTML parser.
/// Anchors on the last occurrence of the stat phrase, so a display name
/// that happens to contain it cannot shadow the real total.
fn extract_count(body: &str) -> Option<u64> {
    let (_, rest) = body.rsplit_once("has been visited ")?;
    let digits = rest.split(' ').next()?;
    digits.parse().ok()
}
