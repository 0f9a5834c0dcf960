use super::MediaOutput;
use crate::app::events::{Event, PlayerEvent};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    process::{Child, Command},
    sync::mpsc,
};

/// An mpv child process driven over its JSON IPC socket.
#[derive(Debug)]
pub struct MpvHandle {
    child: Child,
    socket_path: PathBuf,
    writer: tokio::sync::Mutex<tokio::io::WriteHalf<UnixStream>>,
    request_id: AtomicU64,
}

impl MpvHandle {
    pub async fn spawn(
        event_tx: mpsc::Sender<Event>,
        audio_device: Option<&str>,
        volume: u8,
        log_file: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("cadence-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut cmd = Command::new("mpv");
        cmd.args([
            "--no-video",
            "--idle=yes",
            "--input-terminal=no",
            "--really-quiet",
        ]);
        cmd.arg(format!("--volume={}", volume.min(100)));
        if let Some(dev) = audio_device {
            cmd.arg(format!("--audio-device={dev}"));
        }
        if let Some(p) = log_file {
            cmd.arg(format!("--log-file={}", p.display()));
        }
        let child = cmd
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("spawn mpv (is it installed and on PATH?)")?;

        // mpv creates the socket shortly after starting.
        let stream = connect_with_retry(&socket_path).await?;
        let (reader, writer) = tokio::io::split(stream);

        tokio::spawn(read_events_loop(reader, event_tx));

        let this = Self {
            child,
            socket_path,
            writer: tokio::sync::Mutex::new(writer),
            request_id: AtomicU64::new(1),
        };

        this.command(json!({"command":["request_log_messages", "warn"]}))
            .await?;
        this.command(json!({"command":["observe_property", 1, "time-pos"]}))
            .await?;
        this.command(json!({"command":["observe_property", 2, "duration"]}))
            .await?;
        this.command(json!({"command":["observe_property", 3, "pause"]}))
            .await?;

        Ok(this)
    }

    async fn command(&self, mut v: serde_json::Value) -> anyhow::Result<()> {
        // Tagged requests get their errors echoed back on the event stream.
        if v.get("request_id").is_none() {
            let id = self.request_id.fetch_add(1, Ordering::Relaxed);
            if let serde_json::Value::Object(ref mut o) = v {
                o.insert("request_id".to_string(), serde_json::Value::from(id));
            }
        }
        let mut w = self.writer.lock().await;
        let mut line = serde_json::to_vec(&v).context("encode mpv json")?;
        line.push(b'\n');
        w.write_all(&line).await.context("write mpv ipc")?;
        w.flush().await.context("flush mpv ipc")?;
        Ok(())
    }
}

#[async_trait]
impl MediaOutput for MpvHandle {
    async fn load(&self, url: &str) -> anyhow::Result<()> {
        self.command(json!({"command":["loadfile", url, "replace"]}))
            .await?;
        self.set_paused(false).await
    }

    async fn set_paused(&self, paused: bool) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "pause", paused]}))
            .await
    }

    async fn seek_to(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(json!({"command":["seek", seconds.max(0.0), "absolute"]}))
            .await
    }

    async fn seek_relative(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(json!({"command":["seek", seconds, "relative"]}))
            .await
    }

    async fn set_volume(&self, volume: u8) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "volume", volume.min(100)]}))
            .await
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.command(json!({"command":["stop"]})).await
    }
}

impl Drop for MpvHandle {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn connect_with_retry(path: &Path) -> anyhow::Result<UnixStream> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match UnixStream::connect(path).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                if tokio::time::Instant::now() > deadline {
                    return Err(e)
                        .with_context(|| format!("connect to mpv ipc {}", path.display()));
                }
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

async fn read_events_loop(reader: tokio::io::ReadHalf<UnixStream>, event_tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        if let Some(pe) = map_mpv_message(&v)
            && event_tx.send(Event::Player(pe)).await.is_err()
        {
            break;
        }
    }
    tracing::debug!("mpv ipc stream closed");
}

/// Map one IPC message (event or command reply) to a player event.
fn map_mpv_message(v: &serde_json::Value) -> Option<PlayerEvent> {
    // Command replies: {"request_id":..., "error":"..."}
    if v.get("request_id").is_some() {
        let err = v.get("error")?.as_str()?;
        return (err != "success").then(|| PlayerEvent::Error(format!("mpv ipc error: {err}")));
    }

    match v.get("event")?.as_str()? {
        "property-change" => {
            let data = v.get("data")?;
            match v.get("name")?.as_str()? {
                "time-pos" => data.as_f64().map(|seconds| PlayerEvent::Position { seconds }),
                "duration" => data.as_f64().map(|seconds| PlayerEvent::Duration { seconds }),
                "pause" => Some(if data.as_bool()? {
                    PlayerEvent::Paused
                } else {
                    PlayerEvent::Resumed
                }),
                _ => None,
            }
        }
        // "stop" and "redirect" come from loadfile replacing the old file.
        "end-file" => match v.get("reason").and_then(|x| x.as_str()).unwrap_or("") {
            "eof" => Some(PlayerEvent::Ended),
            "error" => {
                let err = v.get("file_error").or_else(|| v.get("error"));
                let err = err.and_then(|x| x.as_str()).unwrap_or("unknown");
                Some(PlayerEvent::Failed(err.to_string()))
            }
            _ => None,
        },
        "log-message" => {
            let level = v.get("level")?.as_str().unwrap_or("info");
            let text = v.get("text")?.as_str().unwrap_or("").trim();
            if level == "error" && !text.is_empty() {
                Some(PlayerEvent::Error(format!("mpv: {text}")))
            } else {
                if !text.is_empty() {
                    tracing::debug!(level, "mpv: {text}");
                }
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_changes() {
        let pos = map_mpv_message(&json!({"event":"property-change","name":"time-pos","data":12.5}));
        assert!(matches!(pos, Some(PlayerEvent::Position { seconds }) if seconds == 12.5));

        // time-pos is null while idle.
        let idle = map_mpv_message(&json!({"event":"property-change","name":"time-pos","data":null}));
        assert!(idle.is_none());

        let paused = map_mpv_message(&json!({"event":"property-change","name":"pause","data":true}));
        assert!(matches!(paused, Some(PlayerEvent::Paused)));
        let resumed = map_mpv_message(&json!({"event":"property-change","name":"pause","data":false}));
        assert!(matches!(resumed, Some(PlayerEvent::Resumed)));
    }

    #[test]
    fn only_natural_end_counts_as_ended() {
        let eof = map_mpv_message(&json!({"event":"end-file","reason":"eof"}));
        assert!(matches!(eof, Some(PlayerEvent::Ended)));
        let replaced = map_mpv_message(&json!({"event":"end-file","reason":"stop"}));
        assert!(replaced.is_none());
        let failed = map_mpv_message(
            &json!({"event":"end-file","reason":"error","file_error":"loading failed"}),
        );
        assert_eq!(failed, Some(PlayerEvent::Failed("loading failed".into())));
    }

    #[test]
    fn stream_error_without_detail() {
        let failed = map_mpv_message(&json!({"event":"end-file","reason":"error"}));
        assert_eq!(failed, Some(PlayerEvent::Failed("unknown".into())));
    }

    #[test]
    fn command_replies() {
        assert!(map_mpv_message(&json!({"request_id":3,"error":"success"})).is_none());
        let err = map_mpv_message(&json!({"request_id":4,"error":"property unavailable"}));
        assert!(matches!(err, Some(PlayerEvent::Error(_))));
    }
}
