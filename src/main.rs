use std::sync::Arc;

use clap::Parser;

use brume::api::HttpMessageClient;
use brume::core::config::Config;
use brume::ui::chat_loop;
use brume::utils::logging;

#[derive(Parser)]
#[command(name = "brume")]
#[command(about = "A terminal chat client for Zulip-style stream and topic conversations")]
#[command(long_about = "Brume is a full-screen terminal client for Zulip-style chat servers, \
with streams, topics, and private messages.\n\n\
Configuration:\n\
  config.toml       server_url, email, api_key in the platform config directory\n\
  BRUME_SERVER      Server URL (overrides config.toml)\n\
  BRUME_EMAIL       Account email (overrides config.toml)\n\
  BRUME_API_KEY     API key (overrides config.toml)\n\n\
Controls:\n\
  Up/Down/Wheel     Select a message\n\
  Enter             Reply to the selected message\n\
  c                 Compose to the same target, new topic\n\
  S / s             Narrow to stream / topic (or sender for private)\n\
  Esc               Clear the narrow, or leave the compose panel\n\
  Tab               Focus the compose panel\n\
  Ctrl+C            Quit")]
struct Args {
    #[arg(long, help = "Server URL, e.g. https://chat.example.com")]
    server: Option<String>,

    #[arg(long, help = "Account email used for authentication")]
    email: Option<String>,

    #[arg(long, help = "Append diagnostics to this file (filtered by BRUME_LOG)")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Resolve everything fallible before touching the terminal, so errors
    // print normally instead of into the alternate screen.
    let result = async {
        let config = Config::load()?;
        let credentials = config.resolve(args.server, args.email)?;
        logging::init(args.log_file.as_deref())?;

        let client = Arc::new(HttpMessageClient::new(
            credentials.server_url.clone(),
            credentials.email.clone(),
            credentials.api_key.clone(),
        ));

        chat_loop::run(credentials, client).await
    }
    .await;

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
