use tracing::info;

use crate::config::GameConfig;
use crate::synth::Cue;

/// Somewhere to send sound cues. Playback is fire-and-forget.
pub trait AudioSink {
    fn play(&self, cue: Cue);
}

/// Swallows every cue. Used when muted or when no output device opens.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, _cue: Cue) {}
}

#[cfg(feature = "audio")]
mod device {
    use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

    use super::AudioSink;
    use crate::synth::{Cue, SoundBank};

    pub struct RodioSink {
        // Dropping the stream silences everything, keep it alive
        _stream: OutputStream,
        handle: OutputStreamHandle,
        bank: SoundBank,
    }

    impl RodioSink {
        pub fn open(bank: SoundBank) -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(RodioSink { _stream: stream, handle, bank })
        }
    }

    impl AudioSink for RodioSink {
        fn play(&self, cue: Cue) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let samples = self.bank.samples(cue).to_vec();
                let source = SamplesBuffer::new(1, self.bank.sample_rate(), samples);
                sink.append(source);
                sink.detach();
            }
        }
    }
}

/// Opens the default output device, falling back to silence on failure.
#[cfg(feature = "audio")]
pub fn open(config: &GameConfig, mute: bool) -> Box<dyn AudioSink> {
    use crate::synth::SoundBank;

    if mute {
        info!("audio muted");
        return Box::new(NullSink);
    }

    let bank = SoundBank::generate(config.sample_rate, &mut rand::thread_rng());
    match device::RodioSink::open(bank) {
        Ok(sink) => {
            info!(sample_rate = config.sample_rate, "audio ready");
            Box::new(sink)
        }
        Err(e) => {
            tracing::warn!("audio init failed, continuing without sound: {}", e);
            Box::new(NullSink)
        }
    }
}

#[cfg(not(feature = "audio"))]
pub fn open(_config: &GameConfig, _mute: bool) -> Box<dyn AudioSink> {
    info!("built without audio support");
    Box::new(NullSink)
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::AudioSink;
    use crate::synth::Cue;

    /// Remembers what was played. Clones share the same log.
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        played: Rc<RefCell<Vec<Cue>>>,
    }

    impl RecordingSink {
        pub fn take(&self) -> Vec<Cue> {
            self.played.borrow_mut().drain(..).collect()
        }
    }

    impl AudioSink for RecordingSink {
        fn play(&self, cue: Cue) {
            self.played.borrow_mut().push(cue);
        }
    }
}
