use vim_interp::traits::TextEdit;
use vim_interp::types::Position;
use vim_interp::{Engine, EngineConfig, Motion, MotionState, WordCharacters};

mod support;
use support::mock_buffer::MockBuffer;

fn type_keys(eng: &mut Engine, buf: &mut MockBuffer, keys: &str) {
    eng.type_text(buf, keys).expect("type_text");
}

#[test]
fn word_forward_basic() {
    let mut buf = MockBuffer::new("hello world rust\nprogramming is fun");
    let mut eng = Engine::new();

    // Move to next word "world"
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 6 });

    // Move to next word "rust"
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 12 });

    // Last word on the line: w stops at the line end, clamped onto 't'
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 15 });

    // From the last character, w wraps to the next line
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 1, col: 0 });
}

#[test]
fn word_forward_with_count() {
    let mut buf = MockBuffer::new("one two three four five");
    let mut eng = Engine::new();

    // Move forward 3 words
    type_keys(&mut eng, &mut buf, "3w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 14 }); // at "four"
}

#[test]
fn word_forward_from_whitespace() {
    let mut buf = MockBuffer::new("   abc");
    let mut eng = Engine::new();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 3 });
}

#[test]
fn word_forward_over_trailing_whitespace() {
    let mut buf = MockBuffer::new("abc   \nxyz").with_cursor(0, 3);
    let mut eng = Engine::new();

    // No word left on the line: end of line, clamped onto the last blank
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 5 });

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 1, col: 0 });
}

#[test]
fn word_forward_on_empty_and_last_line() {
    let mut buf = MockBuffer::from_lines(&["", "abc"]);
    let mut eng = Engine::new();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 1, col: 0 });

    // Nowhere to go from the last character of the last line
    type_keys(&mut eng, &mut buf, "$");
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 1, col: 2 });
}

#[test]
fn separators_form_their_own_words() {
    let mut buf = MockBuffer::new("foo.bar baz");
    let mut eng = Engine::new();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 3 });
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 4 });
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 8 });
}

#[test]
fn configured_separators() {
    let config = EngineConfig {
        word_separators: String::new(),
        ..EngineConfig::default()
    };
    let mut buf = MockBuffer::new("foo.bar baz");
    let mut eng = Engine::builder().config(config).build();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 8 });
}

#[test]
fn separators_can_change_mid_session() {
    let mut buf = MockBuffer::new("a-b-c d");
    let mut eng = Engine::new();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 1 });

    eng.set_word_separators(".");
    type_keys(&mut eng, &mut buf, "0");
    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 6 });
}

#[test]
fn word_end_lands_on_word_boundary() {
    let mut buf = MockBuffer::new("hello world");
    let mut eng = Engine::new();

    // e goes to the end boundary of the word, the blank after "hello"
    type_keys(&mut eng, &mut buf, "e");
    assert_eq!(buf.cursor(), Position { line: 0, col: 5 });

    // the boundary of "world" is the line end, clamped onto 'd'
    type_keys(&mut eng, &mut buf, "e");
    assert_eq!(buf.cursor(), Position { line: 0, col: 10 });
}

#[test]
fn word_end_wraps_and_falls_back_to_line_end() {
    let buf = MockBuffer::from_lines(&["ab  ", "cd"]);
    let mut state = MotionState::new(WordCharacters::default());

    let pos = Motion::NextWordEnd.run(&buf, Position { line: 0, col: 2 }, &mut state);
    assert_eq!(pos, Position { line: 0, col: 4 });

    let pos = Motion::NextWordEnd.run(&buf, Position { line: 0, col: 3 }, &mut state);
    assert_eq!(pos, Position { line: 1, col: 0 });
}

#[test]
fn word_motion_counts_graphemes() {
    let mut buf = MockBuffer::new("caf\u{0065}\u{0301} au lait");
    let mut eng = Engine::new();

    type_keys(&mut eng, &mut buf, "w");
    assert_eq!(buf.cursor(), Position { line: 0, col: 5 });
}
