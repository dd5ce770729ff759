use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "configinfo-cli")]
#[command(about = "Query a server's read-only configuration endpoint", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/configinfo")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every exposed section
    Show,
    /// Show one section
    Section { name: String },
    /// Show one option of a section
    Value { section: String, option: String },
}

/// Build the request URL; each segment is percent-encoded on its own.
fn target(cli: &Cli) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(&cli.url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", cli.url))?;
        segments.pop_if_empty();
        segments.extend(cli.endpoint.split('/').filter(|s| !s.is_empty()));
        match &cli.command {
            Commands::Show => {}
            Commands::Section { name } => {
                segments.push(name);
            }
            Commands::Value { section, option } => {
                segments.push(section).push(option);
            }
        }
    }
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client.get(target(&cli)?).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: endpoint returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Commands) -> Cli {
        Cli {
            url: "http://localhost:8080/".into(),
            endpoint: "/configinfo".into(),
            command,
        }
    }

    fn target_of(command: Commands) -> String {
        target(&cli(command)).unwrap().to_string()
    }

    #[test]
    fn test_targets() {
        assert_eq!(target_of(Commands::Show), "http://localhost:8080/configinfo");
        assert_eq!(
            target_of(Commands::Section { name: "filter:tempurl".into() }),
            "http://localhost:8080/configinfo/filter:tempurl"
        );
        assert_eq!(
            target_of(Commands::Value {
                section: "my section".into(),
                option: "a/b".into(),
            }),
            "http://localhost:8080/configinfo/my%20section/a%2Fb"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut bad = cli(Commands::Show);
        bad.url = "not a url".into();
        assert!(target(&bad).is_err());
    }
}
