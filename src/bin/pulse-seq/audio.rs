//! Output device - runs the synth inside the cpal callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Stream, StreamConfig,
};
use tracing::{error, info};

use pulse_seq::{synth::PulseSynth, MAX_BLOCK_SIZE};

/// The default output device and the format it asked for.
pub struct Output {
    device: cpal::Device,
    config: StreamConfig,
}

impl Output {
    pub fn open_default() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            "output device opened"
        );
        Ok(Self {
            device,
            config: config.into(),
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    /// Start the stream. The synth is moved into the callback; keep the
    /// returned stream alive for as long as audio should play.
    pub fn play(self, mut synth: PulseSynth) -> EyreResult<Stream> {
        let channels = usize::from(self.config.channels);
        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let mono = &mut block[..frames];
                        synth.render_block(mono);

                        // Mono to all channels
                        let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
                        for (frame, &s) in out.chunks_exact_mut(channels).zip(mono.iter()) {
                            frame.fill(s);
                        }

                        frames_written += frames;
                    }
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        Ok(stream)
    }
}
