//! WAV recording of captured audio.

use std::io::{Seek, Write};

use log::{error, info};

use crate::error::Result;

/// Float WAV writer that stops at the first write failure
pub struct WavRecorder<W: Write + Seek> {
    writer: Option<hound::WavWriter<W>>,
    samples_written: u64,
}

impl<W: Write + Seek> WavRecorder<W> {
    /// Start a 32-bit float recording on `writer`
    pub fn new(writer: W, channels: u16, sample_rate_hz: u32) -> Result<Self> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: sample_rate_hz,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        Ok(Self {
            writer: Some(hound::WavWriter::new(writer, spec)?),
            samples_written: 0,
        })
    }

    /// Append interleaved samples.
    ///
    /// The first failure is logged and ends the recording; later calls are
    /// no-ops.
    pub fn write(&mut self, samples: &[f32]) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        for &sample in samples {
            if let Err(e) = writer.write_sample(sample) {
                error!(
                    "Recording failed after {} samples, stopping: {}",
                    self.samples_written, e
                );
                self.writer = None;
                return;
            }
            self.samples_written += 1;
        }
    }

    /// Still accepting samples
    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Write the final header; a stopped recording finalizes to `Ok`
    pub fn finalize(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
            info!("Recording finalized ({} samples)", self.samples_written);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_recording_round_trips_through_hound() {
        let mut bytes = Cursor::new(Vec::new());
        {
            let mut recorder = WavRecorder::new(&mut bytes, 2, 8000).unwrap();
            recorder.write(&[0.5, -0.5, 0.25, -0.25]);
            assert_eq!(recorder.samples_written(), 4);
            recorder.finalize().unwrap();
            assert!(!recorder.is_recording());
        }

        let reader = hound::WavReader::new(Cursor::new(bytes.into_inner())).unwrap();
        assert_eq!(reader.spec().channels, 2);
        let samples: Vec<f32> = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.5, -0.5, 0.25, -0.25]);
    }

    #[test]
    fn test_write_failure_stops_recording() {
        // Room for the header and a few samples only
        let mut storage = [0u8; 128];
        let mut recorder = WavRecorder::new(Cursor::new(&mut storage[..]), 1, 8000).unwrap();

        recorder.write(&[0.1; 256]);
        assert!(!recorder.is_recording());
        let written = recorder.samples_written();
        assert!(written < 256);

        recorder.write(&[0.1; 8]);
        assert_eq!(recorder.samples_written(), written);
        assert!(recorder.finalize().is_ok());
    }
}
