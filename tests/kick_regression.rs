use std::{
    sync::{Arc, Mutex},
    thread,
};

use kick_dsp::{
    synth::preview::{render_preview, render_voice},
    synth::voice::ArmedVoice,
    KickConfig, KickSettings, KickVoice,
};

const SAMPLE_RATE: f32 = 48_000.0;

/// Render stereo blocks until the voice stops, collecting the left channel.
fn run_to_completion(voice: &mut KickVoice, block_frames: usize) -> Vec<f32> {
    let mut buffer = vec![0.0f32; block_frames * 2];
    let mut left = Vec::new();
    loop {
        voice.render_block(&mut buffer, 2);
        left.extend(buffer.chunks_exact(2).map(|frame| frame[0]));
        if !voice.is_playing() {
            return left;
        }
    }
}

#[test]
fn default_scenario_envelope() {
    let settings = KickSettings::default();
    let armed = ArmedVoice::new(&settings, SAMPLE_RATE).unwrap();

    assert_eq!(armed.frame_count(), 11_040);
    assert_eq!(armed.gain_at(0.0), 0.0);
    assert!((armed.gain_at(240.0) - 1.0).abs() < 1e-9);
    assert_eq!(armed.gain_at(11_040.0), 0.0);
    assert!((armed.frequency_at(0.0) - 200.0).abs() < 1e-9);
}

#[test]
fn default_scenario_voice() {
    let samples = render_voice(&KickSettings::default(), SAMPLE_RATE);

    assert_eq!(samples.len(), 11_040);
    // Opens at the bottom of the rise, closes at the bottom of the release
    assert!(samples[0].abs() < 0.01);
    assert!(samples[samples.len() - 1].abs() < 0.01);
    assert!(samples.iter().all(|s| s.abs() <= 1.0));
    assert!(samples.iter().any(|s| s.abs() > 0.5));
}

#[test]
fn live_voice_matches_offline_render() {
    let (mut voice, mut handle) = KickVoice::new(KickConfig::new(SAMPLE_RATE));
    let completed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&completed);
    handle.on_completed(move |samples| sink.lock().unwrap().push(samples.to_vec()));

    assert!(handle.trigger());
    let live = run_to_completion(&mut voice, 256);
    assert_eq!(handle.poll_events(), 1);

    let offline = handle.render_voice();
    let completed = completed.lock().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0], offline);
    assert_eq!(&live[..offline.len()], offline.as_slice());
    assert!(live[offline.len()..].iter().all(|&s| s == 0.0));
}

#[test]
fn block_size_does_not_change_output() {
    let render = |frames: usize| {
        let (mut voice, mut handle) = KickVoice::new(KickConfig::new(SAMPLE_RATE));
        handle.trigger();
        let mut out = run_to_completion(&mut voice, frames);
        out.truncate(11_040);
        out
    };
    assert_eq!(render(64), render(4096));
}

#[test]
fn history_window_ends_in_silence() {
    let (mut voice, mut handle) = KickVoice::new(KickConfig::new(SAMPLE_RATE));
    handle.trigger();
    run_to_completion(&mut voice, 512);

    let mut window = vec![1.0; handle.history().capacity()];
    assert_eq!(handle.copy_latest(&mut window), window.len());
    assert_eq!(*window.last().unwrap(), 0.0);
}

#[test]
fn preview_is_deterministic_and_sized() {
    let settings = KickSettings::default();
    let a = render_preview(&settings, SAMPLE_RATE, 8192);
    let b = render_preview(&settings, SAMPLE_RATE, 8192);
    assert_eq!(a.len(), 8192);
    assert_eq!(a, b);
}

#[test]
fn parameter_edits_apply_to_next_trigger_only() {
    let (mut voice, mut handle) = KickVoice::new(KickConfig::new(SAMPLE_RATE));
    let lengths = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lengths);
    handle.on_completed(move |samples| sink.lock().unwrap().push(samples.len()));

    handle.trigger();
    let mut buffer = vec![0.0f32; 1024];
    voice.render_block(&mut buffer, 1);

    // Mid-voice edit: the sounding voice keeps its armed length
    handle.params().set_fade_out_ms(100.0);
    run_to_completion(&mut voice, 1024);
    handle.poll_events();

    handle.trigger();
    run_to_completion(&mut voice, 1024);
    handle.poll_events();

    assert_eq!(*lengths.lock().unwrap(), vec![11_040, 13_440]);
}

#[test]
fn audio_thread_drives_voice() {
    let (mut voice, mut handle) = KickVoice::new(KickConfig::new(SAMPLE_RATE));
    let completed = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&completed);
    handle.on_completed(move |_| *sink.lock().unwrap() += 1);

    assert!(handle.trigger());
    let audio = thread::spawn(move || {
        let mut buffer = vec![0.0f32; 512];
        // Enough blocks to cover the whole voice
        for _ in 0..64 {
            voice.render_block(&mut buffer, 2);
        }
        voice
    });
    let voice = audio.join().unwrap();

    assert!(!voice.is_playing());
    assert_eq!(handle.poll_events(), 1);
    assert_eq!(*completed.lock().unwrap(), 1);
    assert!(!handle.is_playing());
}
