// Moteur audio - Callback CPAL temps-réel
//
// The engine owns the output stream. Each callback first drains the command
// ring buffer (trigger requests from the clock thread), then renders the
// voice pool in f32 and writes the mono mix across every interleaved output
// channel, converting to the device's sample format via `FromSample<f32>`.
//
// Stream errors cannot be returned from the callback; they are forwarded to
// the UI as notifications instead.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use ringbuf::traits::{Consumer, Producer};

use crate::messaging::channels::{CommandConsumer, CommandProducer, NotificationProducer};
use crate::messaging::command::{Command, ToneParams};
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::sequencer::transport::ToneSink;
use crate::synth::voice_pool::VoicePool;

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
}

impl AudioEngine {
    pub fn new(
        command_rx: CommandConsumer,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Self, String> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or("no audio output device found")?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| format!("audio configuration error: {e}"))?;

        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        // Shared with the callback
        let voices = Arc::new(Mutex::new(VoicePool::new(sample_rate)));
        let command_rx = Arc::new(Mutex::new(command_rx));

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                channels,
                command_rx,
                voices,
                notification_tx,
            )?,
            SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                channels,
                command_rx,
                voices,
                notification_tx,
            )?,
            SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                channels,
                command_rx,
                voices,
                notification_tx,
            )?,
            other => return Err(format!("unsupported sample format: {other:?}")),
        };

        stream
            .play()
            .map_err(|e| format!("failed to start audio stream: {e}"))?;

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        command_rx: Arc<Mutex<CommandConsumer>>,
        voices: Arc<Mutex<VoicePool>>,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Stream, String>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    // No allocations, no I/O, non-blocking locks only
                    match (command_rx.try_lock(), voices.try_lock()) {
                        (Ok(mut rx), Ok(mut pool)) => {
                            while let Some(command) = rx.try_pop() {
                                match command {
                                    Command::Trigger(tone) => pool.trigger(&tone),
                                }
                            }

                            for frame in data.chunks_mut(channels) {
                                let value = T::from_sample(pool.next_sample());
                                for out in frame.iter_mut() {
                                    *out = value;
                                }
                            }
                        }
                        _ => {
                            // Contended: emit silence for this buffer
                            for out in data.iter_mut() {
                                *out = T::from_sample(0.0f32);
                            }
                        }
                    }
                },
                move |err| {
                    if let Ok(mut tx) = notification_tx.lock() {
                        let _ = tx.try_push(Notification::error(
                            NotificationCategory::Audio,
                            "Audio stream error",
                            err.to_string(),
                        ));
                    }
                },
                None,
            )
            .map_err(|e| format!("failed to build audio stream: {e}"))?;

        Ok(stream)
    }
}

/// Producer side of the engine's command channel; this is what the transport
/// uses as its tone sink.
pub struct AudioToneSink {
    commands: CommandProducer,
}

impl AudioToneSink {
    pub fn new(commands: CommandProducer) -> Self {
        Self { commands }
    }
}

impl ToneSink for AudioToneSink {
    fn trigger(&mut self, tone: ToneParams) {
        // A full ring buffer drops the trigger; the sink has no error channel
        let _ = self.commands.try_push(Command::Trigger(tone));
    }
}
