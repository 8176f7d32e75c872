//! Audio setup: open the default output device and drive the kick voice.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use kick_dsp::{KickConfig, KickSettings, KickVoice};

use super::ui::UiApp;

/// Run the application (takes over the terminal, plays audio)
pub fn run(settings: KickSettings, history_len: usize) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    tracing::info!(sample_rate, channels, "audio config");

    let kick_config = KickConfig::new(sample_rate)
        .with_history_len(history_len)
        .with_settings(settings);
    kick_config
        .validate()
        .wrap_err("invalid audio configuration")?;

    let (mut voice, handle) = KickVoice::new(kick_config);

    // The voice moves into the callback; only the handle stays here
    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| voice.render_block(data, channels),
            |err| tracing::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    tracing::info!("output stream started");

    let mut terminal = ratatui::init();
    let result = UiApp::new(handle).run(&mut terminal);
    ratatui::restore();
    result
}
