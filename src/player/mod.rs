pub mod mpv;

use async_trait::async_trait;

pub use mpv::MpvHandle;

/// The media primitive playback is handed to. Position and end-of-track
/// reports flow back separately as [`crate::app::events::PlayerEvent`]s.
#[async_trait]
pub trait MediaOutput: Send + Sync {
    /// Replace whatever is playing with `url` and start it.
    async fn load(&self, url: &str) -> anyhow::Result<()>;
    async fn set_paused(&self, paused: bool) -> anyhow::Result<()>;
    async fn seek_to(&self, seconds: f64) -> anyhow::Result<()>;
    async fn seek_relative(&self, seconds: f64) -> anyhow::Result<()>;
    /// 0-100
    async fn set_volume(&self, volume: u8) -> anyhow::Result<()>;
    async fn stop(&self) -> anyhow::Result<()>;
}
