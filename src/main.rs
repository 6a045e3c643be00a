use clap::{Parser, Subcommand};
use german_accent::config::load_config;
use german_accent::daemon::Daemon;
use german_accent::ipc::{run_server, send_command, socket_path};
use german_accent::oneshot::run_once;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "german-accent", about = "German accent filter for chat messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon
    Serve,
    /// Accentuate a message via the running daemon
    Say {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Get daemon status
    Status,
    /// One-shot: accentuate stdin line by line to stdout
    Once,
    /// Print the effective replacement table
    Table,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = load_config();
    let path = socket_path(config.socket_path.as_deref());

    match cli.command {
        Commands::Serve => {
            let daemon = Arc::new(Mutex::new(Daemon::new(&config)));

            let socket = path.clone();
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                let _ = tokio::fs::remove_file(&socket).await;
                std::process::exit(0);
            });

            if let Err(e) = run_server(&path, daemon).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Say { text } => {
            match send_command(&path, &format!("say {}", text.join(" "))).await {
                Ok(response) => println!("{response}"),
                Err(e) => {
                    eprintln!("Failed to connect: {e} (is daemon running?)");
                    std::process::exit(1);
                }
            }
        }
        Commands::Status => match send_command(&path, "status").await {
            Ok(response) => println!("{response}"),
            Err(e) => {
                eprintln!("Failed to connect: {e}");
                std::process::exit(1);
            }
        },
        Commands::Once => {
            if let Err(e) = run_once(&config.replacement_table()).await {
                eprintln!("Failed: {e}");
                std::process::exit(1);
            }
        }
        Commands::Table => {
            for (from, to) in config.replacement_table().iter() {
                println!("{from} -> {to}");
            }
        }
    }
}
