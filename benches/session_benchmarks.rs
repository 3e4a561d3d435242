use criterion::{Criterion, black_box, criterion_group, criterion_main};

use keyshape::engine::{AttemptEvent, RollingTracker};
use keyshape::generator::TokenSequence;
use keyshape::generator::paging::{PAGE_WIDTH, add_page_end_spaces};
use keyshape::generator::vocabulary::{Vocabulary, WordOrder};
use keyshape::keyboard::{KeyId, LayoutLayers, LayoutPreset};
use keyshape::session::{DrillSession, InputEvent};

fn practice_tokens(words: usize) -> TokenSequence {
    let tokens = Vocabulary::beginner().build_tokens(words, WordOrder::Shuffled { seed: 7 });
    TokenSequence::new(add_page_end_spaces(&tokens, PAGE_WIDTH))
}

/// Events that type `tokens` perfectly, with every 9th key wrong and fixed.
fn make_events(tokens: &TokenSequence) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut seq = 0;
    let mut push = |key_id: KeyId, ch: Option<char>| {
        seq += 1;
        events.push(InputEvent {
            seq,
            t: seq * 120,
            key_id: Some(key_id),
            mapped_char: ch.map(String::from),
            raw_char: ch,
            alt_key: false,
        });
    };

    for (i, token) in tokens.iter().enumerate() {
        if i % 9 == 8 {
            push(KeyId::Q, Some('q'));
            push(KeyId::Backspace, None);
        }
        if token.is_space() {
            push(KeyId::Space, Some(' '));
        } else {
            let key = KeyId::from_qwerty_char(token.expected).unwrap_or(KeyId::A);
            push(key, Some(token.expected));
        }
    }
    events
}

fn bench_session(c: &mut Criterion) {
    let tokens = practice_tokens(400);
    let events = make_events(&tokens);
    let mapped = LayoutLayers::from_preset(LayoutPreset::Qwerty).mapped_chars();

    c.bench_function("drill session process (400 words)", |b| {
        b.iter(|| {
            let mut session = DrillSession::new(tokens.clone());
            for event in &events {
                black_box(session.process(black_box(event), &mapped));
            }
            session.cursor()
        })
    });
}

fn bench_tracker(c: &mut Criterion) {
    c.bench_function("rolling tracker push + snapshot (2000 attempts)", |b| {
        b.iter(|| {
            let mut tracker = RollingTracker::new(15_000);
            let mut wpm = 0.0;
            for i in 0..2000u64 {
                tracker.push(AttemptEvent {
                    t: i * 90,
                    correct: i % 11 != 0,
                    counted: true,
                });
                if i % 5 == 0 {
                    wpm = tracker.snapshot(black_box(i * 90)).wpm;
                }
            }
            wpm
        })
    });
}

fn bench_paging(c: &mut Criterion) {
    let tokens = Vocabulary::beginner().build_tokens(2000, WordOrder::Cycle);

    c.bench_function("add_page_end_spaces (2000 words)", |b| {
        b.iter(|| add_page_end_spaces(black_box(&tokens), PAGE_WIDTH))
    });
}

criterion_group!(benches, bench_session, bench_tracker, bench_paging);
criterion_main!(benches);
