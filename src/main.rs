use datavault::{config, gatekeeper, vault};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} --cmd <gatekeeper|vault> --ref <config file>", args[0]);
        eprintln!("Example: {} --cmd gatekeeper --ref configs/gatekeeper.json", args[0]);
        eprintln!("Example: {} --cmd vault --ref configs/vault.json", args[0]);

        std::process::exit(1);
    }

    let mut command: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cmd" => {
                command = Some(args[i + 1].clone());
                i += 2;
            }
            "--ref" => {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let command = command.expect("--cmd is required");
    let config_path = config_path.expect("--ref is required");

    match command.as_str() {
        "gatekeeper" => {
            let config = config::load_gatekeeper(&config_path)?;
            tracing::info!("Starting gatekeeper");
            gatekeeper::server::serve(config).await?;
        }
        "vault" => {
            let config = config::load_vault(&config_path)?;
            tracing::info!("Starting vault {}", config.id);
            vault::server::serve(config).await?;
        }
        other => {
            eprintln!("Command not recognized: {}", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
