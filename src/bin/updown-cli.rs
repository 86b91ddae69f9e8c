use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use updown_monitor::health::{parse_datapoints, Assessment, Classifier, HttpFetcher, Threshold};

#[derive(Parser)]
#[command(name = "updown-cli")]
#[command(about = "Classify monitoring datapoints as UP or DOWN", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch datapoints from an API and classify them
    Check {
        /// API returning {"datapoints": [[0, ts], ...]}
        #[arg(short, long)]
        url: String,

        /// Minimum up percentage for UP
        #[arg(short, long, default_value_t = 70.0)]
        threshold: f64,
    },
    /// Classify datapoints from a JSON file ("-" for stdin)
    Classify {
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Minimum up percentage for UP
        #[arg(short, long, default_value_t = 70.0)]
        threshold: f64,
    },
    /// Ask a running monitor server for its status
    Status {
        #[arg(short, long, default_value = "http://localhost:8080")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Fetch failures are reported through tracing; keep them on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "updown_monitor=warn".into()),
        )
        .init();

    match cli.command {
        Commands::Check { url, threshold } => {
            let classifier = Classifier::new(Threshold::new(threshold)?);
            let samples = HttpFetcher::new().fetch_or_empty(&url).await;
            print_json(&serde_json::to_value(classifier.assess(&samples))?)?;
        }
        Commands::Classify { file, threshold } => {
            let body = read_input(&file)?;
            let assessment = classify_body(&body, threshold)?;
            print_json(&serde_json::to_value(assessment)?)?;
        }
        Commands::Status { server } => {
            let res = reqwest::Client::new()
                .get(format!("{}/api/status", server.trim_end_matches('/')))
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: server returned status {}", status);
                if let Ok(text) = res.text().await {
                    eprintln!("Response: {}", text);
                }
                return Ok(());
            }

            let json: Value = res.json().await?;
            print_json(&json)?;
        }
    }

    Ok(())
}

/// Classify a `{"datapoints": [...]}` body. Malformed input is an error.
fn classify_body(body: &[u8], threshold: f64) -> Result<Assessment, Box<dyn std::error::Error>> {
    let classifier = Classifier::new(Threshold::new(threshold)?);
    let samples = parse_datapoints(body)?;
    Ok(classifier.assess(&samples))
}

fn read_input(file: &Path) -> std::io::Result<Vec<u8>> {
    if file.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(file)
    }
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use updown_monitor::Status;

    #[test]
    fn test_classify_body() {
        let assessment =
            classify_body(br#"{"datapoints": [[0, 1], [0, 2], [1, 3]]}"#, 60.0).unwrap();
        assert_eq!(assessment.status, Status::Up);
        assert_eq!(assessment.up_count, 2);
        assert_eq!(assessment.total_count, 3);
    }

    #[test]
    fn test_classify_body_rejects_malformed_input() {
        assert!(classify_body(b"not json", 70.0).is_err());
        assert!(classify_body(br#"{"datapoints": [[0], []]}"#, 70.0).is_err());
        assert!(classify_body(br#"[[0, 1]]"#, 70.0).is_err());
    }

    #[test]
    fn test_classify_body_rejects_bad_threshold() {
        let err = classify_body(br#"{"datapoints": [[0]]}"#, 150.0).unwrap_err();
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_read_input_from_file() {
        let path = std::env::temp_dir().join(format!("updown-cli-{}.json", std::process::id()));
        std::fs::write(&path, br#"{"datapoints": [[1]]}"#).unwrap();

        let body = read_input(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let assessment = classify_body(&body, 70.0).unwrap();
        assert_eq!(assessment.status, Status::Down);
    }
}
