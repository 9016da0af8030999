//! UI sound effects.
//!
//! Sounds are short sine-wave patterns played through rodio on a background
//! thread so the UI frame is never blocked by audio output.

use super::PluginError;
use rodio::source::SineWave;
use rodio::{OutputStream, Sink, Source};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Named sound effects the settings panel triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Modal dismissed
    Close,
    /// Generic button press
    ButtonClick,
}

impl Sound {
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Close => "CLOSE",
            Sound::ButtonClick => "BUTTON_CLICK",
        }
    }

    /// Tone sequence as (frequency Hz, duration ms); zero frequency is a pause.
    fn pattern(&self) -> &'static [(f32, u64)] {
        match self {
            Sound::Close => &[(523.25, 60), (0.0, 30), (392.00, 90)],
            Sound::ButtonClick => &[(1046.50, 25)],
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plays [`Sound`]s through the default output device.
#[derive(Debug)]
pub struct SoundPlayer {
    muted: AtomicBool,
    volume: f32,
}

impl Default for SoundPlayer {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl SoundPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            muted: AtomicBool::new(false),
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// A player that never touches the audio device.
    pub fn muted() -> Self {
        let player = Self::default();
        player.set_muted(true);
        player
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Play `sound` without blocking. Failures are logged.
    pub fn play(&self, sound: Sound) {
        if self.is_muted() {
            tracing::trace!("Sound {} suppressed (muted)", sound);
            return;
        }

        let volume = self.volume;
        let spawned = std::thread::Builder::new()
            .name("bggeo-sound".to_string())
            .spawn(move || {
                if let Err(e) = play_pattern(sound.pattern(), volume) {
                    tracing::warn!("Failed to play sound {}: {}", sound, e);
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn sound thread: {}", e);
        }
    }
}

fn play_pattern(pattern: &[(f32, u64)], volume: f32) -> Result<(), PluginError> {
    // Output stream must live on the thread doing the playback
    let (_stream, stream_handle) =
        OutputStream::try_default().map_err(|e| PluginError::Audio(e.to_string()))?;
    let sink = Sink::try_new(&stream_handle).map_err(|e| PluginError::Audio(e.to_string()))?;

    for &(frequency_hz, duration_ms) in pattern {
        let duration = Duration::from_millis(duration_ms);
        if frequency_hz <= 0.0 {
            sink.append(rodio::source::Zero::<f32>::new(1, 48_000).take_duration(duration));
        } else {
            sink.append(
                SineWave::new(frequency_hz)
                    .take_duration(duration)
                    .amplify(volume),
            );
        }
    }

    sink.sleep_until_end();
    Ok(())
}
