use crate::daemon::Daemon;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;

pub fn socket_path(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }
    std::env::var("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("german-accent.sock")
}

pub async fn run_server(
    path: &Path,
    daemon: Arc<Mutex<Daemon>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let _ = tokio::fs::remove_file(path).await;

    let listener = UnixListener::bind(path)?;
    println!("Listening on {path:?}");

    loop {
        let (stream, _) = listener.accept().await?;
        let daemon = daemon.clone();
        tokio::spawn(handle_client(stream, daemon));
    }
}

async fn handle_client(stream: UnixStream, daemon: Arc<Mutex<Daemon>>) {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    if reader.read_line(&mut line).await.is_ok() {
        let response = dispatch(&daemon, line.trim_end_matches(['\r', '\n'])).await;
        let _ = writer.write_all(response.as_bytes()).await;
        let _ = writer.write_all(b"\n").await;
    }
}

async fn dispatch(daemon: &Mutex<Daemon>, line: &str) -> String {
    let (cmd, text) = line.split_once(' ').unwrap_or((line, ""));
    match cmd {
        "say" => daemon.lock().await.say(text),
        "echo" => daemon.lock().await.echo(text),
        "status" => daemon.lock().await.status(),
        _ => "unknown".to_string(),
    }
}

pub async fn send_command(path: &Path, cmd: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut stream = UnixStream::connect(path).await?;

    // One line per request; embedded newlines would split it.
    let cmd = cmd.replace(['\r', '\n'], " ");
    stream.write_all(cmd.as_bytes()).await?;
    stream.write_all(b"\n").await?;

    let mut reader = BufReader::new(stream);
    let mut response = String::new();
    reader.read_line(&mut response).await?;

    Ok(response.trim_end_matches(['\r', '\n']).to_string())
}
