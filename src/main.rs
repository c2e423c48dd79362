use anyhow::Context;
use clap::Parser;
use unifinder::utils::error::ClientError;
use unifinder::utils::logger;
use unifinder::{ApiClient, App, CliConfig, LocalStorage, Rendered};

async fn execute(config: &CliConfig) -> Result<Rendered, ClientError> {
    let settings = config.settings()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let api = ApiClient::from_config(&settings)?;
    let storage = LocalStorage::new(settings.session_dir.clone());
    let app = App::new(api, storage);
    app.run(&config.command).await
}

fn print(rendered: &Rendered, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&rendered.json).context("encoding JSON output")?;
        println!("{}", out);
    } else {
        print!("{}", rendered.text);
        if !rendered.text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match execute(&config).await {
        Ok(rendered) => {
            print(&rendered, config.json)?;
            if !rendered.ok {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            if config.json {
                let body = serde_json::json!({
                    "error": e.user_friendly_message(),
                    "suggestion": e.recovery_suggestion(),
                });
                println!("{}", body);
            } else {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
            }

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
