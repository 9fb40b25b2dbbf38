//! Background music
//!
//! Browsers refuse to start playback until the page has seen a user gesture,
//! so music is gated behind a one-shot [`AudioUnlock`]. The game side only
//! talks to [`Soundtrack`], which turns game events into [`MusicCommand`]s;
//! on the web a [`MusicPlayer`] applies them to a looping `<audio>` element.

use crate::sim::GameEvent;

/// Default music file, relative to the page
pub const MUSIC_URL: &str = "assets/river.mp3";

/// One-way Locked -> Unlocked switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioUnlock {
    unlocked: bool,
}

impl AudioUnlock {
    /// Unlock on a user gesture. Returns `true` only the first time.
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }

    #[inline]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

/// What the playback backend should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Rewind and play from the start
    Play,
    /// Pause and rewind
    Stop,
}

/// Music state driven by the game lifecycle
#[derive(Debug, Clone, Default)]
pub struct Soundtrack {
    unlock: AudioUnlock,
    pending: Vec<MusicCommand>,
}

impl Soundtrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A user gesture happened. The first one starts the music.
    pub fn on_user_gesture(&mut self) {
        if self.unlock.unlock() {
            log::info!("Audio unlocked");
            self.start();
        }
    }

    /// Start from the beginning (ignored until unlocked)
    pub fn start(&mut self) {
        if !self.unlock.is_unlocked() {
            return;
        }
        self.pending.push(MusicCommand::Play);
    }

    /// Stop and rewind
    pub fn stop(&mut self) {
        self.pending.push(MusicCommand::Stop);
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { .. } => self.stop(),
            GameEvent::Restarted => self.start(),
            _ => {}
        }
    }

    #[inline]
    pub fn is_unlocked(&self) -> bool {
        self.unlock.is_unlocked()
    }

    /// Take the commands queued since the last call
    pub fn drain_commands(&mut self) -> Vec<MusicCommand> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::HtmlAudioElement;

    use super::MusicCommand;

    /// Looping `<audio>` element
    pub struct MusicPlayer {
        element: Option<HtmlAudioElement>,
    }

    impl MusicPlayer {
        pub fn new(url: &str) -> Self {
            let element = HtmlAudioElement::new_with_src(url).ok();
            match &element {
                Some(el) => el.set_loop(true),
                None => log::warn!("Failed to create audio element - music disabled"),
            }
            Self { element }
        }

        /// The underlying element, for attaching load listeners
        pub fn element(&self) -> Option<&HtmlAudioElement> {
            self.element.as_ref()
        }

        /// Volume 0.0 - 1.0
        pub fn set_volume(&self, volume: f32) {
            if let Some(el) = &self.element {
                el.set_volume(volume.clamp(0.0, 1.0) as f64);
            }
        }

        pub fn apply(&self, command: MusicCommand) {
            let Some(el) = &self.element else { return };
            match command {
                MusicCommand::Play => {
                    el.set_current_time(0.0);
                    match el.play() {
                        Ok(promise) => spawn_local(async move {
                            if let Err(err) = JsFuture::from(promise).await {
                                log::warn!("Music blocked: {:?}", err);
                            }
                        }),
                        Err(err) => log::warn!("Music blocked: {:?}", err),
                    }
                }
                MusicCommand::Stop => {
                    let _ = el.pause();
                    el.set_current_time(0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_one_shot() {
        let mut unlock = AudioUnlock::default();
        assert!(!unlock.is_unlocked());
        assert!(unlock.unlock());
        assert!(!unlock.unlock());
        assert!(unlock.is_unlocked());
    }

    #[test]
    fn test_start_ignored_until_unlocked() {
        let mut music = Soundtrack::new();
        music.start();
        assert!(music.drain_commands().is_empty());

        music.on_user_gesture();
        assert!(music.is_unlocked());
        assert_eq!(music.drain_commands(), vec![MusicCommand::Play]);

        // Later gestures do not restart the track
        music.on_user_gesture();
        assert!(music.drain_commands().is_empty());
    }

    #[test]
    fn test_follows_game_lifecycle() {
        let mut music = Soundtrack::new();
        music.on_user_gesture();
        music.drain_commands();

        music.on_event(&GameEvent::GameOver { score: 3 });
        music.on_event(&GameEvent::RockSpawned { x: 10.0 });
        music.on_event(&GameEvent::Restarted);
        assert_eq!(
            music.drain_commands(),
            vec![MusicCommand::Stop, MusicCommand::Play]
        );
    }

    #[test]
    fn test_stop_always_issued() {
        let mut music = Soundtrack::new();
        music.on_event(&GameEvent::GameOver { score: 0 });
        assert_eq!(music.drain_commands(), vec![MusicCommand::Stop]);
    }
}
