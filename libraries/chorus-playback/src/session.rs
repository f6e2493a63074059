//! Playback session - core orchestration
//!
//! Coordinates session state, the media transport, stream resolution,
//! the prefetch cache, and the queue advancement policy.

use crate::{
    advance::{self, Advance},
    cache::PrefetchCache,
    error::{PlaybackError, Result},
    events::{MediaEvent, PlayerEvent},
    resolver::StreamResolver,
    state::{PlaybackPhase, SessionState},
    transport::MediaTransport,
};
use chorus_core::Track;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Transitional message while the fallback source is being tried.
const MSG_TRYING_BACKUP: &str = "Trying backup server...";

/// Which stream-resolution strategy the current track is playing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceTier {
    /// Direct CDN / primary proxy URL
    #[default]
    Primary,

    /// Secondary proxy URL, reached after a primary-source error
    Fallback,
}

/// Remembers which track is attempting playback and on which source
/// tier, so an error event knows whether a fallback is still available.
/// Overwritten every time a new track begins loading.
#[derive(Debug, Default)]
struct RetryState {
    track_id: String,
    tier: SourceTier,
}

/// Central playback orchestration
///
/// Owns the one media transport and the authoritative [`SessionState`]
/// for a listening session. User commands and primitive events both
/// funnel through here; every track start goes through
/// [`PlaybackSession::play_from_queue`] so retry state, prefetch and the
/// state transition stay consistent.
///
/// Dependencies are injected, so tests drive the session with fake
/// transports and resolvers.
pub struct PlaybackSession {
    // State
    state: SessionState,

    // Collaborators
    transport: Box<dyn MediaTransport>,
    resolver: Arc<dyn StreamResolver>,
    cache: Arc<Mutex<PrefetchCache>>,

    // Source fallback bookkeeping
    retry: RetryState,

    // Monotonic token tagging each play_from_queue; async completions
    // carrying an older token are discarded
    generation: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackSession {
    /// Create a session around an injected resolver and transport.
    pub fn new(resolver: Arc<dyn StreamResolver>, transport: Box<dyn MediaTransport>) -> Self {
        Self {
            state: SessionState::default(),
            transport,
            resolver,
            cache: Arc::new(Mutex::new(PrefetchCache::new())),
            retry: RetryState::default(),
            generation: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== State Queries =====

    /// Read-only snapshot of the session state.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Source tier of the track currently attempting playback.
    pub fn source_tier(&self) -> SourceTier {
        self.retry.tier
    }

    /// Drain queued UI events.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Playback Control =====

    /// Start playing a track, optionally replacing the queue.
    ///
    /// Re-selecting the already-active, non-erroring track resumes it
    /// instead of reloading.
    pub async fn play(
        &mut self,
        track: Track,
        queue: Option<Vec<Track>>,
        index: Option<usize>,
    ) -> Result<()> {
        let same_track = self
            .state
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);

        if same_track && self.state.error.is_none() {
            if !self.state.is_playing() {
                self.resume();
            }
            return Ok(());
        }

        let queue = queue.unwrap_or_else(|| vec![track.clone()]);
        let index = index.unwrap_or(0);
        self.play_from_queue(queue, index).await
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        if self.state.is_playing() {
            self.transport.pause();
            self.state.phase = PlaybackPhase::Paused;
            self.emit_state_changed();
        }
    }

    /// Resume playback of the current track.
    pub fn resume(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }
        self.transport.resume();
        self.state.phase = PlaybackPhase::Playing;
        self.emit_state_changed();
    }

    /// Toggle between playing and paused.
    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else if self.state.current_track.is_some() {
            self.resume();
        }
    }

    /// Skip to the next track. Always loops past the end of the queue,
    /// regardless of repeat mode.
    pub async fn next(&mut self) -> Result<()> {
        let target = {
            let mut rng = rand::thread_rng();
            advance::on_next(
                self.state.queue.len(),
                self.state.queue_index,
                self.state.is_shuffled,
                &mut rng,
            )
        };

        match target {
            Some(index) => {
                let queue = self.state.queue.clone();
                self.play_from_queue(queue, index).await
            }
            None => Ok(()),
        }
    }

    /// Go to the previous track.
    ///
    /// More than three seconds into the current track, this restarts it
    /// instead of changing tracks.
    pub async fn prev(&mut self) -> Result<()> {
        if self.state.current_time > 3.0 {
            self.transport.seek_to(0.0);
            self.state.current_time = 0.0;
            return Ok(());
        }

        let target = {
            let mut rng = rand::thread_rng();
            advance::on_prev(
                self.state.queue.len(),
                self.state.queue_index,
                self.state.is_shuffled,
                &mut rng,
            )
        };

        match target {
            Some(index) => {
                let queue = self.state.queue.clone();
                self.play_from_queue(queue, index).await
            }
            None => Ok(()),
        }
    }

    /// Seek to a fraction of the track in [0, 1]. No-op while the
    /// duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        if self.state.duration > 0.0 {
            let position = fraction * self.state.duration;
            self.transport.seek_to(position);
            self.state.current_time = position;
        }
    }

    /// Set the volume, clamped to [0, 1]. Applied to the primitive
    /// immediately and mirrored into session state.
    pub fn set_volume(&mut self, volume: f32) {
        let clamped = volume.clamp(0.0, 1.0);
        self.transport.set_volume(clamped);
        self.state.volume = clamped;
        self.emit(PlayerEvent::VolumeChanged { volume: clamped });
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle.
    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffled = !self.state.is_shuffled;
    }

    /// Set shuffle explicitly.
    pub fn set_shuffle(&mut self, shuffled: bool) {
        self.state.is_shuffled = shuffled;
    }

    /// Cycle the repeat mode: off -> all -> one -> off.
    pub fn toggle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycle();
    }

    // ===== Teardown =====

    /// Stop playback and tear the session down to an idle state.
    ///
    /// Clears the prefetch cache; user preferences (volume, shuffle,
    /// repeat) survive.
    pub fn stop(&mut self) {
        self.transport.pause();
        self.transport.assign_source("");
        self.cache.lock().expect("cache lock").clear();
        self.retry = RetryState::default();

        self.state = SessionState {
            volume: self.state.volume,
            is_shuffled: self.state.is_shuffled,
            repeat: self.state.repeat,
            ..SessionState::default()
        };
        self.emit_state_changed();
    }

    // ===== Event Handling =====

    /// Reconcile a lifecycle event from the media primitive with session
    /// state.
    pub async fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Progress { position_secs } => {
                self.state.current_time = position_secs;
            }
            MediaEvent::DurationKnown { duration_secs } => {
                self.state.duration = duration_secs;
            }
            MediaEvent::ReadyToPlay => {
                // Loaded, but audible playback is not confirmed yet
                if self.state.phase == PlaybackPhase::Loading {
                    self.state.phase = PlaybackPhase::Paused;
                    self.emit_state_changed();
                }
            }
            MediaEvent::PlayingConfirmed => {
                self.state.phase = PlaybackPhase::Playing;
                self.state.error = None;
                self.emit_state_changed();
            }
            MediaEvent::Completed => {
                self.handle_completed().await;
            }
            MediaEvent::Error { message } => {
                self.handle_source_error(message).await;
            }
        }
    }

    /// Natural completion: run the advancement policy.
    async fn handle_completed(&mut self) {
        if let Some(track) = &self.state.current_track {
            let track_id = track.id.clone();
            self.emit(PlayerEvent::TrackFinished { track_id });
        }

        let decision = {
            let mut rng = rand::thread_rng();
            advance::on_completion(
                self.state.queue.len(),
                self.state.queue_index,
                self.state.is_shuffled,
                self.state.repeat,
                &mut rng,
            )
        };

        match decision {
            Advance::Restart => self.restart_current().await,
            Advance::Play(index) => {
                let queue = self.state.queue.clone();
                if let Err(e) = self.play_from_queue(queue, index).await {
                    warn!(error = %e, "Queue advance failed");
                }
            }
            Advance::Exhausted => self.auto_continue().await,
            Advance::None => {}
        }
    }

    /// Repeat-one: replay the loaded source from the start, no
    /// re-resolution.
    async fn restart_current(&mut self) {
        self.transport.seek_to(0.0);
        self.state.current_time = 0.0;

        match self.transport.begin_playback().await {
            Ok(()) => {
                self.state.phase = PlaybackPhase::Playing;
                self.emit_state_changed();
            }
            Err(e) => {
                warn!(error = %e, "Restart rejected");
                self.fail_with(&PlaybackError::Transport(e.to_string()));
            }
        }
    }

    /// Queue exhausted with no repeat: end-of-queue transitional state,
    /// then try to replenish the queue with related tracks. A failed or
    /// empty lookup ends playback silently.
    async fn auto_continue(&mut self) {
        self.state.phase = PlaybackPhase::Paused;
        if self.state.duration <= 0.0 {
            // Duration never arrived; pin it to the last observed position
            // so progress reads finished rather than zero
            self.state.duration = self.state.current_time;
        }
        self.state.current_time = self.state.duration;
        self.emit_state_changed();

        let Some(current) = self.state.current_track.clone() else {
            return;
        };

        let generation = self.generation;
        let query = current.related_query().to_string();
        debug!(query = %query, "Queue exhausted, fetching related tracks");

        let results = match self.resolver.related_tracks(&query).await {
            Ok(results) => results,
            Err(e) => {
                debug!(error = %e, "Related lookup failed; playback ends");
                return;
            }
        };

        if self.generation != generation {
            debug!("Discarding stale auto-continuation");
            return;
        }

        // Avoid replaying the track that just finished, unless it is the
        // only thing the backend found
        let filtered: Vec<Track> = results
            .iter()
            .filter(|t| t.id != current.id)
            .cloned()
            .collect();

        let replacement = if !filtered.is_empty() {
            filtered
        } else if !results.is_empty() {
            results
        } else {
            return;
        };

        if let Err(e) = self.play_from_queue(replacement, 0).await {
            warn!(error = %e, "Auto-continuation failed to start");
        }
    }

    /// Two-tier source fallback on a primitive error event.
    async fn handle_source_error(&mut self, message: String) {
        warn!(tier = ?self.retry.tier, error = %message, "Media source failed");

        // The terminal message is keyed to the tier that was failing when
        // the event arrived; the fallback attempt below advances the tier
        // but must not change which message this failure gets
        let failing_tier = self.retry.tier;

        if self.retry.tier == SourceTier::Primary && !self.retry.track_id.is_empty() {
            let track_id = self.retry.track_id.clone();
            self.state.phase = PlaybackPhase::Loading;
            self.state.error = Some(MSG_TRYING_BACKUP.to_string());
            self.emit_state_changed();

            match self.resolver.fallback_stream_url(&track_id).await {
                Ok(url) => {
                    self.retry.tier = SourceTier::Fallback;
                    self.transport.assign_source(&url);
                    self.transport.load();
                    match self.transport.begin_playback().await {
                        Ok(()) => return,
                        Err(e) => {
                            warn!(track_id = %track_id, error = %e, "Fallback start rejected");
                        }
                    }
                }
                Err(e) => {
                    warn!(track_id = %track_id, error = %e, "Fallback resolution failed");
                    // The fallback attempt is consumed even without a URL
                    self.retry.tier = SourceTier::Fallback;
                }
            }
        }

        // Terminal: no automatic retries remain
        let error = match failing_tier {
            SourceTier::Primary => PlaybackError::PrimaryPlayback(message),
            SourceTier::Fallback => PlaybackError::FallbackPlayback(message),
        };
        self.fail_with(&error);
    }

    // ===== Track Start =====

    /// The single entry point that starts a track.
    ///
    /// Replaces the queue wholesale, resolves the stream URL (cache
    /// first), resets retry state to the primary tier, issues
    /// assign/load/begin on the transport, and warms the cache for the
    /// following entry. Resolution and playback-begin failures are folded
    /// into session state.
    pub async fn play_from_queue(&mut self, queue: Vec<Track>, index: usize) -> Result<()> {
        let track = queue
            .get(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        let generation = self.bump_generation();
        debug!(track_id = %track.id, index, "Starting track");

        let previous_id = self.state.current_track.as_ref().map(|t| t.id.clone());
        self.state.begin_loading(track.clone(), queue.clone(), index);
        self.emit(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id: previous_id,
        });
        self.emit_state_changed();

        let cached = self.cache.lock().expect("cache lock").get(&track.id);
        let url = match cached {
            Some(url) => {
                debug!(track_id = %track.id, "Prefetch cache hit");
                url
            }
            None => match self.resolver.stream_url(&track.id).await {
                Ok(url) => url,
                Err(e) => {
                    if self.generation == generation {
                        debug!(track_id = %track.id, error = %e, "Resolution failed");
                        self.fail_with(&e);
                    }
                    return Ok(());
                }
            },
        };

        if self.generation != generation {
            debug!(track_id = %track.id, "Discarding stale resolution");
            return Ok(());
        }

        self.retry = RetryState {
            track_id: track.id.clone(),
            tier: SourceTier::Primary,
        };
        self.transport.assign_source(&url);
        self.transport.load();
        let began = self.transport.begin_playback().await;

        // Warm the cache for the following entry regardless of whether
        // the primitive accepted the start
        self.prefetch_next(&queue, index);

        if let Err(e) = began {
            if self.generation == generation {
                warn!(track_id = %track.id, error = %e, "Playback start rejected");
                self.fail_with(&PlaybackError::Transport(e.to_string()));
            }
        }

        Ok(())
    }

    /// Best-effort background resolution of the next queue entry.
    /// Failures are swallowed; they must never reach the listener.
    fn prefetch_next(&self, queue: &[Track], index: usize) {
        let Some(next) = queue.get(index + 1) else {
            return;
        };
        let track_id = next.id.clone();
        if self.cache.lock().expect("cache lock").contains(&track_id) {
            return;
        }

        let resolver = Arc::clone(&self.resolver);
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            match resolver.stream_url(&track_id).await {
                Ok(url) => {
                    debug!(track_id = %track_id, "Prefetched next track");
                    cache.lock().expect("cache lock").insert(track_id, url);
                }
                Err(e) => {
                    debug!(track_id = %track_id, error = %e, "Prefetch failed (ignored)");
                }
            }
        });
    }

    // ===== Internal Helpers =====

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn fail_with(&mut self, error: &PlaybackError) {
        let Some(message) = error.user_message() else {
            return;
        };
        self.state.fail(message);
        self.emit(PlayerEvent::Error {
            message: message.to_string(),
        });
        self.emit_state_changed();
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        let phase = self.state.phase;
        self.emit(PlayerEvent::StateChanged { phase });
    }
}
