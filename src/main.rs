use std::sync::{Arc, Mutex};
use std::time::Duration;

use ringbuf::traits::Consumer;

use bitboard::{
    AudioEngine, AudioToneSink, FileStore, Soundboard, create_command_channel,
    create_notification_channel,
};

// Ringbuffer capacity constants
// The clock thread pushes at most one trigger per track per tick (7 on the
// default kit), so even at 300 BPM a small buffer has plenty of headroom.
const COMMAND_RINGBUFFER_CAPACITY: usize = 256;
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 64;

fn main() {
    println!("=== Bitboard ===");
    println!("16-step soundboard engine\n");

    // Create the communication channels
    let (command_tx, command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);
    let (notification_tx, mut notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);

    // Shared between the board and the audio error callback
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    println!("Audio engine initialisation...");
    let engine = match AudioEngine::new(command_rx, Arc::clone(&notification_tx)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };
    println!("Sample rate: {} Hz", engine.sample_rate());

    let store = match FileStore::default_location() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };
    println!("Song library: {}\n", store.dir().display());

    let mut board = Soundboard::new(store, AudioToneSink::new(command_tx), notification_tx);

    if board.songs().is_empty() {
        println!("No saved songs yet.");
    } else {
        println!("Saved songs:");
        for (index, song) in board.songs().iter().enumerate() {
            println!("  {}. {} ({} BPM)", index + 1, song.title, song.bpm);
        }
    }

    // Lay down a short demonstration beat: sawtooth bass on the quarters,
    // square mid on the off-beats, a sine accent on step 0.
    for step in [0, 4, 8, 12] {
        board.toggle_step(6, step);
    }
    for step in [2, 6, 10, 14] {
        board.toggle_step(3, step);
    }
    board.toggle_step(1, 0);
    board.set_bpm(240);

    println!("\nPlaying the demo pattern for two bars...");
    board.toggle_play();

    // Two full 16-step cycles at 240 BPM (250ms per step)
    std::thread::sleep(Duration::from_millis(8_000));
    board.toggle_play();

    // Show what the host shell would have presented as toasts
    println!("\nNotifications:");
    while let Some(n) = notification_rx.try_pop() {
        println!("  [{:?}] {}: {}", n.level, n.title, n.detail);
    }

    board.shutdown();
    drop(engine);
    println!("\nDone.");
}
