//! Live capture system: cpal input stream feeding a shared sample history.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use log::{error, info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::sync::{Arc, Mutex};

use super::{
    PhysicalChannel, SampleHistory, SpectrumEngine, SpectrumSource, WavRecorder, WindowFunction,
};
use crate::error::{Error, Result};
use crate::params::{CaptureConfig, RecordingConfig};

type SharedRecorder = Arc<Mutex<WavRecorder<BufWriter<File>>>>;

/// Capture system computing spectra from the latest captured audio
pub struct CaptureSource {
    /// Shared capture history (written by the stream callback)
    history: Arc<Mutex<SampleHistory>>,

    engine: SpectrumEngine,
    block: Vec<f32>,
    sample_rate_hz: u32,
    channels: u16,

    /// Recording shared with the stream callback, finalized on drop
    recorder: Option<SharedRecorder>,

    /// Audio input stream (kept alive)
    _stream: cpal::Stream,
}

impl CaptureSource {
    /// Open the configured input device and start capturing
    pub fn new(config: CaptureConfig) -> Result<Self> {
        config.validate()?;

        let host = cpal::default_host();
        let device = select_device(&host, config.device_name.as_deref())?;

        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();
        let channels = stream_config.channels;
        let sample_rate_hz = stream_config.sample_rate.0;

        info!(
            "Capture: {} @ {}Hz, {} channels ({:?})",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels,
            sample_format
        );

        let recorder = config
            .recording
            .as_ref()
            .map(|recording| create_recorder(recording, channels, sample_rate_hz))
            .transpose()?;

        let history = Arc::new(Mutex::new(SampleHistory::new(config.history_len)));

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, Arc::clone(&history), recorder.clone())?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, Arc::clone(&history), recorder.clone())?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, Arc::clone(&history), recorder.clone())?
            }
            cpal::SampleFormat::I32 => {
                build_stream::<i32>(&device, &stream_config, Arc::clone(&history), recorder.clone())?
            }
            other => {
                return Err(Error::Capture(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        };

        stream.play()?;

        Ok(Self {
            history,
            engine: SpectrumEngine::new(config.scaling),
            block: Vec::new(),
            sample_rate_hz,
            channels,
            recorder,
            _stream: stream,
        })
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames captured and still held in history
    pub fn buffered_frames(&self) -> usize {
        self.history.lock().map(|h| h.len()).unwrap_or(0)
    }
}

impl SpectrumSource for CaptureSource {
    fn spectrum(&mut self, channel: PhysicalChannel, window: WindowFunction, out: &mut [f32]) {
        self.block.resize(out.len() * 2, 0.0);

        match self.history.lock() {
            Ok(history) => history.copy_latest(channel, &mut self.block),
            Err(_) => {
                out.fill(0.0);
                return;
            }
        }

        self.engine.compute(&self.block, window, out);
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        if let Err(e) = self._stream.pause() {
            warn!("Failed to stop capture stream: {}", e);
        }

        let Some(ref recorder) = self.recorder else {
            return;
        };
        match recorder.lock() {
            Ok(mut recorder) => {
                if let Err(e) = recorder.finalize() {
                    error!("Failed to finalize recording: {}", e);
                }
            }
            Err(_) => error!("Recording lock poisoned, WAV header not finalized"),
        }
    }
}

/// Default input device, or the first whose name contains `name`
fn select_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device> {
    match name {
        Some(wanted) => host
            .input_devices()?
            .find(|device| {
                device
                    .name()
                    .map(|n| n.contains(wanted))
                    .unwrap_or(false)
            })
            .ok_or(Error::NoInputDevice),
        None => host.default_input_device().ok_or(Error::NoInputDevice),
    }
}

fn create_recorder(
    recording: &RecordingConfig,
    channels: u16,
    sample_rate_hz: u32,
) -> Result<SharedRecorder> {
    let file = BufWriter::new(File::create(&recording.audio_path)?);
    let recorder = WavRecorder::new(file, channels, sample_rate_hz)?;
    info!("Recording capture to {}", recording.audio_path.display());
    Ok(Arc::new(Mutex::new(recorder)))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    history: Arc<Mutex<SampleHistory>>,
    recorder: Option<SharedRecorder>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut converted: Vec<f32> = Vec::new();

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|s| s.to_sample::<f32>()));

            if let Ok(mut history) = history.lock() {
                history.push_interleaved(&converted, channels);
            }

            if let Some(ref recorder) = recorder {
                if let Ok(mut recorder) = recorder.lock() {
                    recorder.write(&converted);
                }
            }
        },
        |err| error!("Capture stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
