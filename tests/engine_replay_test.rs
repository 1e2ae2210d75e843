//! Async replay through the engine facade

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tui_2048::adapter::MemoryStore;
use tui_2048::core::GameSnapshot;
use tui_2048::engine::{Engine, EngineConfig, ReplayEnd};
use tui_2048::types::{Direction, GameAction, GameStatus};

fn engine(seed: u32, interval_ms: u32) -> Engine<MemoryStore> {
    let config = EngineConfig {
        seed,
        replay_interval_ms: interval_ms,
        persist_disabled: true,
        ..EngineConfig::default()
    };
    Engine::with_store(MemoryStore::new(), &config)
}

fn play(engine: &mut Engine<MemoryStore>, count: usize) {
    let mut committed = 0;
    let mut i = 0;
    while committed < count && !engine.session().is_over() {
        if engine.apply_action(GameAction::Move(Direction::ALL[i % 4])) {
            committed += 1;
        }
        i += 1;
    }
}

fn drain(rx: &mut mpsc::Receiver<GameSnapshot>) -> Vec<GameSnapshot> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[tokio::test(start_paused = true)]
async fn test_replay_frames_follow_move_log() {
    let mut e = engine(314, 250);
    play(&mut e, 10);
    let total = e.session().moves().len();
    let end = e.snapshot();

    let (tx, mut rx) = mpsc::channel(128);
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let started = tokio::time::Instant::now();
    assert_eq!(e.replay(tx, cancel_rx).await, ReplayEnd::Finished);
    // one pause before each replayed move
    assert_eq!(started.elapsed(), Duration::from_millis(250 * total as u64));

    let frames = drain(&mut rx);
    assert_eq!(frames.len(), total + 1);
    for (i, frame) in frames.iter().enumerate().skip(1).take(total - 1) {
        assert_eq!(frame.status, GameStatus::Replaying);
        assert_eq!(frame.replay_progress, Some((i as u32, total as u32)));
    }
    // scores never decrease during replay
    assert!(frames
        .windows(2)
        .all(|w| w[0].score.current <= w[1].score.current));
    let last = frames.last().unwrap();
    assert_eq!(last.grid, end.grid);
    assert_eq!(last.score, end.score);
    assert_eq!(last.status, end.status);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_flag_stops_replay() {
    let mut e = engine(2718, 250);
    play(&mut e, 8);
    let before = e.snapshot();

    let (tx, mut rx) = mpsc::channel(128);
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(600)).await;
        let _ = cancel_tx.send(true);
    });

    assert_eq!(e.replay(tx, cancel_rx).await, ReplayEnd::Cancelled);
    // seed frame plus the two moves replayed before the flag went up
    assert_eq!(drain(&mut rx).len(), 3);

    let after = e.snapshot();
    assert_eq!(after.grid, before.grid);
    assert_eq!(after.score, before.score);
    assert_eq!(after.status, before.status);
    assert!(after.controls.replay);
}

#[test]
fn test_replay_on_plain_runtime() {
    let mut e = engine(1, 1);
    play(&mut e, 3);
    let end = e.snapshot();

    let (tx, mut rx) = mpsc::channel(16);
    let (_cancel_tx, cancel_rx) = watch::channel(false);
    let result = tokio_test::block_on(e.replay(tx, cancel_rx));

    assert_eq!(result, ReplayEnd::Finished);
    assert_eq!(drain(&mut rx).last().map(|f| f.grid), Some(end.grid));
}
