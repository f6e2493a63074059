//! Chorus Player Backend Client
//!
//! HTTP client library for the Chorus Player backend music API.
//!
//! # Features
//!
//! - **Search**: free-text track search (also backs auto-continuation)
//! - **Stream resolution**: direct CDN URL when available, deterministic
//!   backend proxy URL otherwise
//! - **Fallback stream**: secondary proxy URL pattern used after a
//!   primary-source playback error
//!
//! # Example
//!
//! ```ignore
//! use chorus_api_client::{ApiConfig, MusicApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MusicApiClient::new(ApiConfig::new("https://music.example.com"))?;
//!
//!     let tracks = client.search("daft punk").await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     if let Some(track) = tracks.first() {
//!         let url = client.stream_url(&track.id).await?;
//!         println!("Stream from {url}");
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::MusicApiClient;
pub use error::{ApiClientError, Result};
pub use types::{ApiConfig, SearchResponse, SearchResult, StreamInfo};
