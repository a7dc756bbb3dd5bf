//! Integration tests for the playback controller state machine
//!
//! Every scenario drives the controller only through its public surface:
//! `play`, `stop`, `handle_event`, and the queries.

mod common;

use common::*;
use recite_playback::{
    ItemAffordance, PlayOptions, PlaybackConfig, PlaybackEvent, PlaybackState, ResourceEvent,
    ToggleWhileLoading,
};

// ===== Basic Lifecycle =====

#[test]
fn play_goes_loading_then_playing() {
    let (mut controller, log) = controller();

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 1).key()));
    assert_eq!(log.borrow().started.len(), 1);

    ready(&mut controller);
    assert_eq!(controller.state(), &PlaybackState::playing(item(1, 1).key()));
    assert_consistent(&controller);
}

#[test]
fn events_follow_transitions_in_order() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::single());
    end(&mut controller);

    let key = item(1, 1).key();
    assert_eq!(
        controller.drain_events(),
        vec![
            PlaybackEvent::StateChanged {
                state: PlaybackState::loading(key.clone())
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::playing(key.clone())
            },
            PlaybackEvent::ItemStarted { key: key.clone() },
            PlaybackEvent::ItemFinished { key },
            PlaybackEvent::StateChanged {
                state: PlaybackState::idle()
            },
        ]
    );
    assert!(!controller.has_pending_events());
}

#[test]
fn affordance_tracks_current_item() {
    let (mut controller, _) = controller();

    controller.play(item(36, 5), PlayOptions::single()).unwrap();
    assert_eq!(
        controller.state().affordance_for(&item(36, 5)),
        ItemAffordance::Loading
    );
    assert_eq!(
        controller.state().affordance_for(&item(36, 6)),
        ItemAffordance::Idle
    );

    ready(&mut controller);
    assert_eq!(
        controller.state().affordance_for(&item(36, 5)),
        ItemAffordance::Playing
    );
    assert!(controller.is_current(&item(36, 5)));
    assert!(!controller.is_current(&item(36, 6)));
}

// ===== Mutual Exclusion =====

#[test]
fn switching_items_releases_previous_resource_first() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(2, 1), PlayOptions::single());
    let first = controller.current_resource().unwrap();

    controller.play(item(2, 2), PlayOptions::single()).unwrap();
    let second = controller.current_resource().unwrap();

    assert_ne!(first, second);
    assert_eq!(log.borrow().released, vec![first]);
    assert_eq!(log.borrow().live(), vec![second]);
    assert_eq!(controller.state(), &PlaybackState::loading(item(2, 2).key()));
}

#[test]
fn superseded_resource_events_are_ignored() {
    let (mut controller, _) = controller();

    controller.play(item(2, 1), PlayOptions::autoplay(286)).unwrap();
    let stale = controller.current_resource().unwrap();

    controller.play(item(3, 1), PlayOptions::single()).unwrap();
    let before = controller.state().clone();
    controller.drain_events();

    assert!(!controller.handle_event(ResourceEvent::ready(stale)));
    assert!(!controller.handle_event(ResourceEvent::ended(stale)));
    assert!(!controller.handle_event(ResourceEvent::failed(stale, "late error")));

    assert_eq!(controller.state(), &before);
    assert!(!controller.has_pending_events());
}

#[test]
fn superseding_while_loading_leaves_no_trace() {
    let (mut controller, log) = controller();

    controller.play(item(4, 10), PlayOptions::single()).unwrap();
    let a = controller.current_resource().unwrap();
    controller.play(item(4, 11), PlayOptions::single()).unwrap();

    controller.handle_event(ResourceEvent::ready(a));
    assert_eq!(
        controller.state(),
        &PlaybackState::loading(item(4, 11).key())
    );

    ready(&mut controller);
    assert_eq!(
        controller.state(),
        &PlaybackState::playing(item(4, 11).key())
    );
    assert_eq!(log.borrow().live().len(), 1);
}

#[test]
fn events_after_stop_are_ignored() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::autoplay(7));
    let id = controller.current_resource().unwrap();
    controller.stop();

    assert!(!controller.handle_event(ResourceEvent::ended(id)));
    assert!(controller.state().is_idle());
    assert_eq!(controller.current_resource(), None);
}

// ===== Toggle =====

#[test]
fn same_item_while_playing_pauses_then_restarts() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::single());

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    assert_eq!(controller.state(), &PlaybackState::idle());
    assert!(log.borrow().live().is_empty());
    assert_eq!(log.borrow().opened.len(), 1);

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 1).key()));
    assert_eq!(log.borrow().opened.len(), 2);

    ready(&mut controller);
    assert_eq!(controller.state(), &PlaybackState::playing(item(1, 1).key()));
}

#[test]
fn pause_clears_autoplay_queue() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::autoplay(7));
    assert!(controller.autoplay_queue().is_active());

    controller.play(item(1, 1), PlayOptions::autoplay(7)).unwrap();
    assert!(controller.state().is_idle());
    assert!(!controller.autoplay_queue().is_active());
}

#[test]
fn same_item_while_loading_cancels_by_default() {
    let (mut controller, log) = controller();

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    controller.play(item(1, 1), PlayOptions::single()).unwrap();

    assert!(controller.state().is_idle());
    assert!(log.borrow().live().is_empty());
    assert_eq!(log.borrow().opened.len(), 1);
}

#[test]
fn same_item_while_loading_can_be_ignored() {
    let (mut controller, log) = controller_with(PlaybackConfig {
        toggle_while_loading: ToggleWhileLoading::Ignore,
        ..PlaybackConfig::default()
    });

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    let id = controller.current_resource().unwrap();
    controller.play(item(1, 1), PlayOptions::single()).unwrap();

    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 1).key()));
    assert_eq!(controller.current_resource(), Some(id));
    assert_eq!(log.borrow().opened.len(), 1);
}

#[test]
fn same_item_while_loading_can_restart() {
    let (mut controller, log) = controller_with(PlaybackConfig {
        toggle_while_loading: ToggleWhileLoading::Restart,
        ..PlaybackConfig::default()
    });

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    let first = controller.current_resource().unwrap();
    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    let second = controller.current_resource().unwrap();

    assert_ne!(first, second);
    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 1).key()));
    assert_eq!(log.borrow().released, vec![first]);
    assert!(!controller.handle_event(ResourceEvent::ready(first)));
}

// ===== Autoplay =====

#[test]
fn autoplay_chains_through_group() {
    let (mut controller, log) = controller();
    let length = 7;

    play_until_ready(&mut controller, item(1, 1), PlayOptions::autoplay(length));

    for next in 2..=length {
        end(&mut controller);
        assert_eq!(
            controller.state(),
            &PlaybackState::loading(item(1, next).key())
        );
        assert_eq!(controller.autoplay_queue().index(), next - 1);
        ready(&mut controller);
    }

    end(&mut controller);
    assert!(controller.state().is_idle());
    assert!(!controller.autoplay_queue().is_active());
    assert_eq!(
        log.borrow().opened_files(),
        vec![
            "001001.mp3",
            "001002.mp3",
            "001003.mp3",
            "001004.mp3",
            "001005.mp3",
            "001006.mp3",
            "001007.mp3"
        ]
    );
    assert!(log.borrow().live().is_empty());
}

#[test]
fn autoplay_reports_advance_and_exhaustion() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(108, 2), PlayOptions::autoplay(3));
    end(&mut controller);
    ready(&mut controller);
    end(&mut controller);

    let events = controller.drain_events();
    assert!(events.contains(&PlaybackEvent::AutoplayAdvanced {
        from: item(108, 2).key(),
        to: item(108, 3).key(),
    }));
    assert_eq!(
        events.last(),
        Some(&PlaybackEvent::StateChanged {
            state: PlaybackState::idle()
        })
    );
    assert!(events.contains(&PlaybackEvent::AutoplayExhausted { group_id: 108 }));
}

#[test]
fn autoplay_with_single_item_stops_after_it() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(5, 1), PlayOptions::autoplay(1));
    end(&mut controller);

    assert!(controller.state().is_idle());
    assert_eq!(log.borrow().opened.len(), 1);
}

#[test]
fn autoplay_from_middle_of_group() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(36, 82), PlayOptions::autoplay(83));
    end(&mut controller);
    assert_eq!(
        controller.state(),
        &PlaybackState::loading(item(36, 83).key())
    );
    ready(&mut controller);
    end(&mut controller);
    assert!(controller.state().is_idle());
}

#[test]
fn ended_without_autoplay_goes_idle() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(2, 3), PlayOptions::single());
    end(&mut controller);

    assert!(controller.state().is_idle());
    assert_eq!(log.borrow().opened.len(), 1);
    assert!(!controller
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlaybackEvent::AutoplayExhausted { .. })));
}

#[test]
fn non_autoplay_request_supersedes_queue() {
    let (mut controller, _) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::autoplay(7));
    play_until_ready(&mut controller, item(1, 4), PlayOptions::single());
    assert!(!controller.autoplay_queue().is_active());

    end(&mut controller);
    assert!(controller.state().is_idle());
}

#[test]
fn ended_before_ready_still_advances() {
    let (mut controller, _) = controller();

    controller.play(item(1, 1), PlayOptions::autoplay(7)).unwrap();
    end(&mut controller);

    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 2).key()));
}

// ===== Error Recovery =====

#[test]
fn failure_while_loading_skips_playing() {
    let (mut controller, log) = controller();

    controller.play(item(1, 3), PlayOptions::autoplay(7)).unwrap();
    controller.drain_events();
    fail(&mut controller, "HTTP 404");

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert!(!controller.autoplay_queue().is_active());
    assert!(log.borrow().live().is_empty());

    let events = controller.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::ItemFailed {
                key: item(1, 3).key(),
                message: "HTTP 404".to_string(),
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::idle()
            },
        ]
    );
}

#[test]
fn failure_while_playing_stops_autoplay() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::autoplay(7));
    fail(&mut controller, "device lost");

    assert!(controller.state().is_idle());
    assert!(!controller.autoplay_queue().is_active());
    assert_eq!(log.borrow().opened.len(), 1);
}

#[test]
fn synchronous_open_failure_during_autoplay_stops_chain() {
    let (mut backend, log) = RecordingBackend::new();
    backend.refuse.push("001003.mp3".to_string());
    let mut controller =
        recite_playback::PlaybackController::new(PlaybackConfig::default(), backend).unwrap();

    play_until_ready(&mut controller, item(1, 2), PlayOptions::autoplay(7));
    end(&mut controller);

    assert!(controller.state().is_idle());
    assert!(!controller.autoplay_queue().is_active());
    assert_eq!(controller.current_resource(), None);
    assert!(log.borrow().live().is_empty());
    assert!(controller.drain_events().contains(&PlaybackEvent::ItemFailed {
        key: item(1, 3).key(),
        message: "Audio backend error: refused 001003.mp3".to_string(),
    }));
}

#[test]
fn can_play_again_after_failure() {
    let (mut controller, _) = controller();

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    fail(&mut controller, "timeout");

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    assert_eq!(controller.state(), &PlaybackState::loading(item(1, 1).key()));
}

// ===== Stop =====

#[test]
fn stop_on_idle_is_a_no_op() {
    let (mut controller, _) = controller();

    controller.stop();
    controller.stop();

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert!(!controller.has_pending_events());
}

#[test]
fn stop_while_loading_or_playing_goes_idle() {
    let (mut controller, log) = controller();

    controller.play(item(1, 1), PlayOptions::single()).unwrap();
    controller.stop();
    assert_eq!(controller.state(), &PlaybackState::idle());

    play_until_ready(&mut controller, item(1, 2), PlayOptions::autoplay(7));
    controller.stop();
    assert_eq!(controller.state(), &PlaybackState::idle());
    assert!(!controller.autoplay_queue().is_active());
    assert!(log.borrow().live().is_empty());
}

// ===== Validation =====

#[test]
fn invalid_requests_leave_playback_untouched() {
    let (mut controller, log) = controller();

    play_until_ready(&mut controller, item(1, 1), PlayOptions::single());
    controller.drain_events();
    let before = controller.state().clone();

    assert!(controller.play(item(1, 0), PlayOptions::single()).is_err());
    assert!(controller
        .play(
            item(1, 2),
            PlayOptions {
                autoplay: true,
                queue_length: None
            }
        )
        .is_err());

    assert_eq!(controller.state(), &before);
    assert_eq!(log.borrow().opened.len(), 1);
    assert!(!controller.has_pending_events());
}

#[test]
fn custom_base_url_is_used() {
    let (mut controller, log) = controller_with(PlaybackConfig {
        audio_base_url: "http://localhost:8080/clips/".to_string(),
        ..PlaybackConfig::default()
    });

    controller.play(item(114, 6), PlayOptions::single()).unwrap();
    assert_eq!(
        log.borrow().opened[0].1.as_str(),
        "http://localhost:8080/clips/114006.mp3"
    );
}
