use super::*;
use std::sync::mpsc;

fn make_track() -> TrackDescriptor {
    TrackDescriptor::new(
        "Test Title",
        "Test Artist",
        "https://audio.example/test.m4a",
        "https://art.example/100x100bb.jpg",
    )
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let mut handle = MprisHandle {
        state: state.clone(),
    };

    let track = make_track();
    handle.render_current(Some(&track));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.track.as_ref(), Some(&track));
        assert_eq!(s.track_number, 1);
    }

    handle.render_current(None);
    {
        let s = state.lock().unwrap();
        assert!(s.track.is_none());
        assert_eq!(s.track_number, 1);
    }
}

#[test]
fn playback_status_follows_current_track() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = PlayerIface {
        state: state.clone(),
    };
    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().track = Some(make_track());
    assert_eq!(iface.playback_status(), "Playing");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = PlayerIface {
        state: state.clone(),
    };

    let idle = iface.metadata();
    assert!(idle.contains_key("mpris:trackid"));
    assert!(!idle.contains_key("xesam:title"));

    {
        let mut s = state.lock().unwrap();
        s.track = Some(make_track());
        s.track_number = 3;
    }

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:artUrl",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn quit_is_forwarded() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let root = RootIface { tx };
    root.quit();
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Quit);
    assert!(root.can_quit());
}
