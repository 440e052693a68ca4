use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use soundtrip::{config, error, server, spotify};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP relay
    Serve(ServeOptions),

    /// Print the Spotify authorization URL
    AuthUrl,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_HOST
    #[clap(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides PORT
    #[clap(long)]
    pub port: Option<u16>,

    /// Open the login page in the default browser once the relay is up
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn load_config() -> config::Config {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            let mut config = load_config().await;
            if let Some(host) = opt.host {
                config.host = host;
            }
            if let Some(port) = opt.port {
                config.port = port;
            }

            if let Err(e) = server::start_api_server(config, opt.open).await {
                error!("Relay stopped: {}", e);
            }
        }
        Command::AuthUrl => {
            let config = load_config().await;
            match spotify::auth::authorize_url(&config) {
                Ok(url) => println!("{}", url),
                Err(e) => error!("Cannot build authorization URL: {}", e),
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
