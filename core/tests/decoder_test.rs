use std::io::ErrorKind;

use kobra_core::input::keymap::usage;
use kobra_core::input::{
    EventQueue, IngestSummary, InputDecoder, KeyCode, KeyEvent, Layout, translate,
};

mod common;
use common::ScriptedSource;

fn drain(dec: &mut InputDecoder) -> Vec<KeyEvent> {
    std::iter::from_fn(|| dec.pop()).collect()
}

fn code(hid: u8) -> KeyCode {
    translate(Layout::Standard, hid).unwrap()
}

// ==========================================================================
// Edge detection
// ==========================================================================

#[test]
fn test_left_ctrl_press_comes_first() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new().report(0x01, [0x04, 0, 0, 0, 0, 0]);
    dec.ingest_available(&mut src);
    assert_eq!(
        drain(&mut dec),
        vec![
            KeyEvent::pressed(code(usage::LEFT_CTRL)),
            KeyEvent::pressed(KeyCode(b'a')),
        ]
    );
}

#[test]
fn test_single_modifier_edge() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new().report(0x01, [0; 6]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.queued, 1);
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode::FIRE)]);
}

#[test]
fn test_sentinels_never_produce_events() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .report(0, [1, 2, 3, 0, 0, 0])
        .report(0, [3, 3, 1, 2, 0, 1])
        .report(0, [0; 6])
        .report(0, [2, 0, 0, 0, 0, 0]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.reports, 4);
    assert_eq!(summary.queued, 0);
    assert_eq!(dec.pop(), None);
}

#[test]
fn test_slot_moves_are_silent() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .report(0, [0x10, 0, 0, 0, 0, 0])
        .report(0, [0, 0, 0, 0x10, 0, 0]);
    dec.ingest_available(&mut src);
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode(b'm'))]);
}

#[test]
fn test_press_then_release_scenario() {
    let mut dec = InputDecoder::default();

    dec.ingest_available(&mut ScriptedSource::new().report(0, [4, 0, 0, 0, 0, 0]));
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode(b'a'))]);

    dec.ingest_available(&mut ScriptedSource::new().report(0, [4, 5, 0, 0, 0, 0]));
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode(b'b'))]);

    dec.ingest_available(&mut ScriptedSource::new().report(0, [5, 0, 0, 0, 0, 0]));
    assert_eq!(drain(&mut dec), vec![KeyEvent::released(KeyCode(b'a'))]);
}

#[test]
fn test_only_consecutive_reports_are_compared() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .report(0, [4, 0, 0, 0, 0, 0])
        .report(0, [0; 6])
        .report(0, [4, 0, 0, 0, 0, 0]);
    dec.ingest_available(&mut src);
    assert_eq!(
        drain(&mut dec),
        vec![
            KeyEvent::pressed(KeyCode(b'a')),
            KeyEvent::released(KeyCode(b'a')),
            KeyEvent::pressed(KeyCode(b'a')),
        ]
    );
}

#[test]
fn test_six_key_rollover() {
    let mut dec = InputDecoder::default();
    let keys = [0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
    dec.ingest_available(&mut ScriptedSource::new().report(0, keys));
    let codes: Vec<u8> = drain(&mut dec).iter().map(|e| e.code.0).collect();
    assert_eq!(codes, b"abcdef".to_vec());
}

// ==========================================================================
// Framing
// ==========================================================================

#[test]
fn test_report_id_is_stripped() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new().chunk(&[0x01, 0x00, 0x00, 0x2C, 0, 0, 0, 0, 0]);
    dec.ingest_available(&mut src);
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode::USE)]);
}

#[test]
fn test_short_chunk_discarded() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .report(0, [4, 0, 0, 0, 0, 0])
        .chunk(&[0, 0, 0, 0])
        .report(0, [4, 0, 0, 0, 0, 0]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(
        summary,
        IngestSummary {
            reports: 2,
            discarded: 1,
            queued: 1,
            dropped: 0,
            error: None,
        }
    );
    assert_eq!(drain(&mut dec), vec![KeyEvent::pressed(KeyCode(b'a'))]);
}

// ==========================================================================
// Transport errors
// ==========================================================================

#[test]
fn test_would_block_is_quiet() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new();
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary, IngestSummary::default());
    assert_eq!(src.reads, 1);
}

#[test]
fn test_interrupted_read_is_retried() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .error(ErrorKind::Interrupted)
        .report(0, [4, 0, 0, 0, 0, 0]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.reports, 1);
    assert_eq!(summary.error, None);
}

#[test]
fn test_hard_error_abandons_pass_and_keeps_state() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .report(0, [4, 0, 0, 0, 0, 0])
        .error(ErrorKind::BrokenPipe)
        .report(0, [0; 6]);

    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.reports, 1);
    assert_eq!(summary.error, Some(ErrorKind::BrokenPipe));
    assert_eq!(src.remaining(), 1);
    assert_eq!(dec.previous().keys[0], 4);

    // Next tick picks up where the failed pass left off.
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.reports, 1);
    assert_eq!(
        drain(&mut dec),
        vec![
            KeyEvent::pressed(KeyCode(b'a')),
            KeyEvent::released(KeyCode(b'a')),
        ]
    );
}

#[test]
fn test_end_of_stream_ends_pass() {
    let mut dec = InputDecoder::default();
    let mut src = ScriptedSource::new()
        .chunk(&[])
        .report(0, [4, 0, 0, 0, 0, 0]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.reports, 0);
    assert_eq!(src.remaining(), 1);
}

// ==========================================================================
// Queue backpressure
// ==========================================================================

#[test]
fn test_seventeenth_push_rejected() {
    let mut q: EventQueue = EventQueue::new();
    for n in 0..16u8 {
        assert!(q.try_push(KeyEvent::pressed(KeyCode(b'a' + n))).is_ok());
    }
    let extra = KeyEvent::pressed(KeyCode(b'z'));
    assert_eq!(q.try_push(extra), Err(extra));
    for n in 0..16u8 {
        assert_eq!(q.pop(), Some(KeyEvent::pressed(KeyCode(b'a' + n))));
    }
    assert_eq!(q.pop(), None);
}

#[test]
fn test_decoder_drops_newest_when_full() {
    let mut dec = InputDecoder::default();
    // Six presses then six releases, twice over: 24 events for 16 slots.
    let held = [0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
    let mut src = ScriptedSource::new()
        .report(0, held)
        .report(0, [0; 6])
        .report(0, held)
        .report(0, [0; 6]);
    let summary = dec.ingest_available(&mut src);
    assert_eq!(summary.queued, 16);
    assert_eq!(summary.dropped, 8);

    let events = drain(&mut dec);
    assert_eq!(events.len(), 16);
    assert!(events[..6].iter().all(|e| e.pressed));
    assert!(events[6..12].iter().all(|e| !e.pressed));
    assert!(events[12..].iter().all(|e| e.pressed));
    // State still tracks the last report even though its events were lost.
    assert_eq!(dec.previous().keys, [0; 6]);
}

