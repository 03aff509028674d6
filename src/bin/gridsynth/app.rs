//! Audio device setup and the hand-off to the TUI.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info};

use gridsynth::{
    runtime::{Session, SessionConfig},
    sequencing::Genre,
    synth::{RealtimeGraph, SignalGraph},
    MAX_BLOCK_SIZE,
};

use crate::ui::UiApp;

/// Samples kept in flight between the audio callback and the scope.
const SCOPE_QUEUE_SIZE: usize = 8192;

/// Open the default output device, start the stream and run the TUI until
/// the user quits.
pub fn run(config: SessionConfig, genre: Option<Genre>) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;
    info!(sample_rate, channels, "audio device opened");

    let (mut graph, handle) = RealtimeGraph::new(SignalGraph::new(sample_rate));
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames];
                    graph.render(block);

                    // Mono to every channel
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // A full scope queue just loses samples
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames;
                }
            },
            |err| error!(%err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    let mut session = Session::new(handle, config);
    if let Some(genre) = genre {
        session.generate(genre);
    }

    let mut terminal = ratatui::init();
    let result = UiApp::new(session, scope_rx, genre.unwrap_or_default(), sample_rate).run(&mut terminal);
    ratatui::restore();

    drop(stream);
    result
}
