//! Synthesized sound effects and the in-game music loop.
//!
//! Every sound is a short fundsp graph rendered to a sample buffer and played
//! on a detached rodio sink, fire-and-forget. When no output device is
//! available the engine silently does nothing; audio can never take the game
//! down.

use fundsp::prelude32::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

const SAMPLE_RATE: u32 = 44100;

/// Six-note arpeggio looped while playing.
const MUSIC_NOTES: [f32; 6] = [440.0, 550.0, 660.0, 880.0, 660.0, 550.0];
/// One note every ~320 ms at sixty ticks per second.
const NOTE_INTERVAL_TICKS: u64 = 19;
const NOTE_DUR: f32 = 0.28;
const NOTE_GAIN: f32 = 0.05;

const DEFAULT_VOLUME: f32 = 0.28;
const VOLUME_STEP: f32 = 0.05;

#[derive(Clone, Copy)]
enum Wave {
    Sine,
    Saw,
    Triangle,
}

pub struct AudioEngine {
    stream: Option<OutputStream>,
    volume: f32,
    muted: bool,
    music_on: bool,
    music_idx: usize,
    music_clock: u64,
}

impl AudioEngine {
    pub fn new() -> Self {
        AudioEngine {
            stream: OutputStreamBuilder::open_default_stream().ok(),
            volume: DEFAULT_VOLUME,
            muted: false,
            music_on: false,
            music_idx: 0,
            music_clock: 0,
        }
    }

    pub fn play_flap(&self) {
        self.beep(Wave::Saw, 520.0, 0.06, 0.15);
    }

    pub fn play_score(&self) {
        self.beep(Wave::Triangle, 880.0, 0.09, 0.14);
    }

    /// Descending saw sweep, 400 Hz down to 80 Hz with a half-second decay.
    pub fn play_crash(&self) {
        let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
        let gain = lfo(|t: f32| 0.15 * (1.0 - (t / 0.5).min(1.0)));
        let mut unit = (freq >> saw()) * gain;
        self.play(render_samples(&mut unit, 0.5));
    }

    /// Gate the music loop; rising edge restarts the arpeggio from the top.
    pub fn set_music_active(&mut self, active: bool) {
        if active && !self.music_on {
            self.music_idx = 0;
            self.music_clock = 0;
        }
        self.music_on = active;
    }

    /// Called once per frame; emits the next arpeggio note on its interval.
    pub fn tick(&mut self) {
        if !self.music_on {
            return;
        }
        if self.music_clock % NOTE_INTERVAL_TICKS == 0 {
            let note = MUSIC_NOTES[self.music_idx];
            self.music_idx = (self.music_idx + 1) % MUSIC_NOTES.len();
            self.beep(Wave::Sine, note, NOTE_DUR, NOTE_GAIN);
        }
        self.music_clock += 1;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume_up(&mut self) {
        self.volume = (self.volume + VOLUME_STEP).min(1.0);
    }

    pub fn volume_down(&mut self) {
        self.volume = (self.volume - VOLUME_STEP).max(0.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Fixed-frequency beep with a linear decay envelope.
    fn beep(&self, wave: Wave, freq: f32, dur: f32, gain: f32) {
        let env = move |t: f32| gain * (1.0 - (t / dur).min(1.0));
        let mut unit: Box<dyn AudioUnit> = match wave {
            Wave::Sine => Box::new((constant(freq) >> sine()) * lfo(env)),
            Wave::Saw => Box::new((constant(freq) >> saw()) * lfo(env)),
            Wave::Triangle => Box::new((constant(freq) >> triangle()) * lfo(env)),
        };
        self.play(render_samples(unit.as_mut(), dur + 0.02));
    }

    fn play(&self, samples: Vec<f32>) {
        if self.muted {
            return;
        }
        let Some(stream) = &self.stream else {
            return;
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach();
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn render_samples(unit: &mut dyn AudioUnit, dur: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (dur * SAMPLE_RATE as f32) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}
