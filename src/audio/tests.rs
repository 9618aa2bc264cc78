use super::error::LoadError;
use super::player::AudioPlayer;
use super::sink::{duration_secs, read_duration};
use super::thread::{Loaded, load, tick};
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SurfaceEvent};
use crate::playback::{Binding, Command, MediaEvent, PlaybackController, PlaybackSurface};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

fn binding(path: &str) -> Binding {
    Binding {
        path: PathBuf::from(path),
        generation: 3,
    }
}

#[test]
fn duration_secs_is_nan_when_unknown() {
    assert!(duration_secs(None).is_nan());
    assert_eq!(duration_secs(Some(Duration::from_millis(1500))), 1.5);
}

#[test]
fn unreadable_file_has_no_duration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roto.wav");
    std::fs::write(&path, b"definitely not RIFF").unwrap();
    assert_eq!(read_duration(&path), None);
    assert_eq!(read_duration(&dir.path().join("missing.wav")), None);
}

#[test]
fn load_error_messages_name_the_file() {
    let err = LoadError::Open {
        path: PathBuf::from("assets/x.wav"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let msg = err.to_string();
    assert!(msg.contains("assets/x.wav"), "{msg}");
    assert!(msg.contains("gone"), "{msg}");

    let err = LoadError::NoOutput("no default device".into());
    assert_eq!(err.to_string(), "no audio output device: no default device");
}

#[test]
fn load_without_output_reports_load_start_then_error() {
    let (tx, rx) = mpsc::channel::<SurfaceEvent>();
    let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
    let b = binding("assets/a.wav");

    let loaded = load(&Err("no default device".to_string()), b.clone(), &tx, &info);
    assert!(loaded.is_none());

    let events: Vec<SurfaceEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.binding == b));
    assert_eq!(events[0].event, MediaEvent::LoadStart);
    assert!(matches!(
        &events[1].event,
        MediaEvent::Error(reason) if reason.contains("no default device")
    ));
    assert_eq!(info.lock().unwrap().duration, None);
}

fn shared_info() -> PlaybackHandle {
    Arc::new(Mutex::new(PlaybackInfo::default()))
}

#[test]
fn rebind_drops_the_previous_position_before_the_audio_thread_runs() {
    // Nobody drains `rx`, as if the audio thread were still busy loading.
    let (tx, rx) = mpsc::channel::<AudioCmd>();
    let info = shared_info();
    let mut controller = PlaybackController::new(AudioPlayer::detached(tx, info.clone()));

    let a = controller.bind(PathBuf::from("assets/a.wav"));
    {
        let mut i = info.lock().unwrap();
        assert_eq!(i.binding.as_ref(), Some(&a));
        i.elapsed = Duration::from_secs(200);
        i.duration = Some(Duration::from_secs(600));
    }

    let b = controller.bind(PathBuf::from("assets/b.wav"));
    assert_eq!(controller.position(), Some(0.0));
    assert!(controller.duration().is_nan());
    assert_eq!(info.lock().unwrap().binding.as_ref(), Some(&b));

    controller.command(Command::SeekRelative(10));
    assert_eq!(controller.position(), Some(10.0));

    let sent: Vec<AudioCmd> = rx.try_iter().collect();
    assert_eq!(sent.len(), 3, "{sent:?}");
    assert!(matches!(&sent[0], AudioCmd::Bind(x) if *x == a));
    assert!(matches!(&sent[1], AudioCmd::Bind(x) if *x == b));
    assert!(matches!(&sent[2], AudioCmd::SeekTo(secs) if *secs == 10.0));
}

#[test]
fn unbind_clears_position_and_duration_right_away() {
    let (tx, rx) = mpsc::channel::<AudioCmd>();
    let info = shared_info();
    let mut player = AudioPlayer::detached(tx, info.clone());

    player.bind(&binding("assets/a.wav"));
    {
        let mut i = info.lock().unwrap();
        i.elapsed = Duration::from_secs(42);
        i.duration = Some(Duration::from_secs(300));
    }
    assert_eq!(player.current_time(), 42.0);
    assert_eq!(player.duration(), 300.0);

    player.unbind();
    assert_eq!(player.current_time(), 0.0);
    assert!(player.duration().is_nan());
    assert!(info.lock().unwrap().binding.is_none());
    assert!(matches!(rx.try_iter().last(), Some(AudioCmd::Unbind)));
}

#[test]
fn tick_reports_end_once_the_sink_drains() {
    let (tx, rx) = mpsc::channel::<SurfaceEvent>();
    let info = shared_info();
    let b = binding("assets/a.wav");
    info.lock().unwrap().binding = Some(b.clone());

    let (sink, _output) = rodio::Sink::new();
    let mut cur = Loaded::playing(b.clone(), sink);

    tick(&mut cur, &tx, &info);
    assert!(cur.is_ended());
    // Paused after the end: later ticks stay quiet.
    tick(&mut cur, &tx, &info);

    let events: Vec<SurfaceEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].binding, b);
    assert_eq!(events[0].event, MediaEvent::Ended);
}

#[test]
fn tick_leaves_info_of_a_newer_binding_alone() {
    let (tx, _rx) = mpsc::channel::<SurfaceEvent>();
    let info = shared_info();
    let newer = binding("assets/b.wav");
    info.lock().unwrap().binding = Some(newer.clone());

    let (sink, _output) = rodio::Sink::new();
    let mut cur = Loaded::playing(binding("assets/a.wav"), sink);
    std::thread::sleep(Duration::from_millis(20));
    tick(&mut cur, &tx, &info);

    let i = info.lock().unwrap();
    assert_eq!(i.binding.as_ref(), Some(&newer));
    assert_eq!(i.elapsed, Duration::ZERO);
}
