//! Sound.
//!
//! Background music loops while a game runs; line clears and game over get one-shot
//! effects. [`RodioAudio`] plays through the default output device. [`Silent`] plays
//! nothing and records what it was asked to do, and stands in when there is no device.

use std::f32::consts::PI;
use std::time::Duration;

use anyhow::{anyhow, Result};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Background music volume (0.0..=1.0)
pub const MUSIC_VOLUME: f32 = 0.12;
/// One-shot effect volume (0.0..=1.0)
pub const SFX_VOLUME: f32 = 0.35;

/// One-shot effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    LineClear,
    GameOver,
}

impl Sfx {
    /// Notes as (frequency in Hz, length in ms)
    fn notes(self) -> &'static [(f32, u64)] {
        match self {
            Sfx::LineClear => &[(659.25, 60), (880.0, 90)],
            Sfx::GameOver => &[(392.0, 180), (311.13, 180), (261.63, 360)],
        }
    }
}

pub trait AudioService {
    /// Start the background music. Does nothing while it is already running.
    fn initialize(&mut self) {}
    fn play(&mut self, sfx: Sfx);
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    /// Stop the music; the next `initialize` starts it over.
    fn stop(&mut self) {}
}

impl<A: AudioService + ?Sized> AudioService for Box<A> {
    fn initialize(&mut self) {
        (**self).initialize()
    }
    fn play(&mut self, sfx: Sfx) {
        (**self).play(sfx)
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn resume(&mut self) {
        (**self).resume()
    }
    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Endless procedural loop: an arpeggio with a short envelope on every note.
#[derive(Debug, Clone)]
struct Theme {
    sample_rate: u32,
    frame: u64,
}

impl Theme {
    const NOTES_HZ: [f32; 8] = [329.63, 246.94, 261.63, 293.66, 261.63, 246.94, 220.0, 261.63];

    fn new() -> Self {
        Self {
            sample_rate: 44_100,
            frame: 0,
        }
    }
}

impl Iterator for Theme {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let rate = self.sample_rate as u64;
        let note_len = rate / 4;
        let idx = ((self.frame / note_len) % Self::NOTES_HZ.len() as u64) as usize;
        let pos = self.frame % note_len;

        let attack = rate / 100;
        let release = rate / 40;
        let env = if pos < attack {
            pos as f32 / attack as f32
        } else if pos >= note_len - release {
            (note_len - pos) as f32 / release as f32
        } else {
            1.0
        };

        let t = pos as f32 / self.sample_rate as f32;
        self.frame = self.frame.wrapping_add(1);
        Some((2.0 * PI * Self::NOTES_HZ[idx] * t).sin() * 0.25 * env)
    }
}

impl Source for Theme {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Audio on the default output device.
///
/// The output stream lives as long as this value; dropping it silences everything.
pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioAudio {
    pub fn try_default() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|err| anyhow!("no audio output device: {}", err))?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }
}

impl AudioService for RodioAudio {
    fn initialize(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(MUSIC_VOLUME);
        sink.append(Theme::new());
        self.music = Some(sink);
    }

    fn play(&mut self, sfx: Sfx) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(SFX_VOLUME);
        for &(freq, ms) in sfx.notes() {
            sink.append(SineWave::new(freq).take_duration(Duration::from_millis(ms)));
        }
        sink.detach();
    }

    fn pause(&mut self) {
        if let Some(music) = &self.music {
            music.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(music) = &self.music {
            music.play();
        }
    }

    fn stop(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
    }
}

/// Music calls seen by [`Silent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCall {
    Start,
    Pause,
    Resume,
    Stop,
}

/// Plays nothing; remembers what it was asked to play.
#[derive(Debug, Default)]
pub struct Silent {
    pub played: Vec<Sfx>,
    pub music: Vec<MusicCall>,
}

impl AudioService for Silent {
    fn initialize(&mut self) {
        self.music.push(MusicCall::Start);
    }

    fn play(&mut self, sfx: Sfx) {
        self.played.push(sfx);
    }

    fn pause(&mut self) {
        self.music.push(MusicCall::Pause);
    }

    fn resume(&mut self) {
        self.music.push(MusicCall::Resume);
    }

    fn stop(&mut self) {
        self.music.push(MusicCall::Stop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_stays_in_range_and_loops() {
        let mut theme = Theme::new();
        let loop_len = 44_100 / 4 * Theme::NOTES_HZ.len();
        let first: Vec<f32> = theme.by_ref().take(loop_len).collect();
        assert!(first.iter().all(|s| s.abs() <= 0.25));
        let second: Vec<f32> = theme.take(64).collect();
        assert_eq!(&first[..64], &second[..]);
    }

    #[test]
    fn theme_notes_start_silent() {
        let mut theme = Theme::new();
        assert_eq!(theme.next(), Some(0.0));
        assert_eq!(theme.channels(), 1);
        assert_eq!(theme.total_duration(), None);
    }

    #[test]
    fn boxed_service_forwards_music_calls() {
        let mut audio: Box<Silent> = Box::new(Silent::default());
        AudioService::initialize(&mut audio);
        AudioService::pause(&mut audio);
        AudioService::resume(&mut audio);
        AudioService::stop(&mut audio);
        AudioService::play(&mut audio, Sfx::GameOver);
        assert_eq!(
            audio.music,
            vec![
                MusicCall::Start,
                MusicCall::Pause,
                MusicCall::Resume,
                MusicCall::Stop
            ]
        );
        assert_eq!(audio.played, vec![Sfx::GameOver]);
    }
}
