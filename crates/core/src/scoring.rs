//! Scoring module - ten-pin bowling score calculation
//!
//! Scores are derived purely from frame contents: the same frames always give
//! the same scores, regardless of the order in which throws arrived.
//!
//! Bonus lookahead:
//! - A strike adds the next two throws, which may span two frames.
//! - A strike in frame 9 (index 8) takes both leading throws of the last frame.
//! - A spare adds the next throw.
//! - The last frame is the plain sum of its throws, and is only scored once the
//!   frame is complete (bonus throw included).

use crate::frame::Frame;
use crate::types::{FRAME_COUNT, LAST_FRAME, PIN_COUNT};

const MARK: u16 = PIN_COUNT as u16;

/// Whether the last frame has all the throws it is going to get.
///
/// Two throws without a mark end the frame; a strike or spare earns a third.
pub fn is_last_frame_complete(frame: &Frame) -> bool {
    match (frame.first(), frame.second()) {
        (Some(first), Some(second)) => {
            if first == PIN_COUNT || first + second == PIN_COUNT {
                frame.third().is_some()
            } else {
                true
            }
        }
        _ => false,
    }
}

/// Score of a single frame (not cumulative).
///
/// Returns `None` while the frame, or any throw its bonus depends on, is
/// still unrecorded.
pub fn calculate_frame_score(frames: &[Frame; FRAME_COUNT], frame_idx: usize) -> Option<u16> {
    let frame = frames.get(frame_idx)?;

    if frame_idx == LAST_FRAME {
        return is_last_frame_complete(frame).then(|| frame.pin_total());
    }

    let first = frame.first()?;
    let next = &frames[frame_idx + 1];

    // Strike
    if first == PIN_COUNT {
        let next_first = next.first()?;

        if next_first == PIN_COUNT && frame_idx + 1 < LAST_FRAME {
            // Back-to-back strikes borrow from the frame after next.
            let after = frames[frame_idx + 2].first()?;
            return Some(MARK + MARK + after as u16);
        }

        // Either the next frame is open/spare, or it is the last frame, which
        // always has a second throw once started.
        let next_second = next.second()?;
        return Some(MARK + next_first as u16 + next_second as u16);
    }

    let second = frame.second()?;

    // Spare
    if first + second == PIN_COUNT {
        let next_first = next.first()?;
        return Some(MARK + next_first as u16);
    }

    // Open frame
    Some(first as u16 + second as u16)
}

/// Running cumulative totals for all frames.
///
/// A frame's total is defined only when it and every earlier frame are
/// scoreable; the first undefined frame leaves itself and everything after it
/// as `None`.
pub fn calculate_all_scores(frames: &[Frame; FRAME_COUNT]) -> [Option<u16>; FRAME_COUNT] {
    let mut scores = [None; FRAME_COUNT];
    let mut cumulative: u16 = 0;

    for (frame_idx, slot) in scores.iter_mut().enumerate() {
        let Some(score) = calculate_frame_score(frames, frame_idx) else {
            break;
        };
        cumulative += score;
        *slot = Some(cumulative);
    }

    scores
}

/// Pins available to the next throw in `frame`.
///
/// In frames 1-9 the second throw only sees what the first left standing. In
/// the last frame the rack is reset after a first-throw strike and again before
/// the bonus throw.
pub fn standing_pins(frame: &Frame, frame_idx: usize) -> u8 {
    let throws = frame.throws();

    if frame_idx < LAST_FRAME {
        return match throws {
            [] => PIN_COUNT,
            [first] => PIN_COUNT.saturating_sub(*first),
            _ => 0,
        };
    }

    match throws {
        [] => PIN_COUNT,
        [first] if *first == PIN_COUNT => PIN_COUNT,
        [first] => PIN_COUNT - first,
        [first, second] if *first == PIN_COUNT || first + second == PIN_COUNT => PIN_COUNT,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build frames from per-frame throw lists.
    fn frames_from(throws: &[&[u8]]) -> [Frame; FRAME_COUNT] {
        let mut frames: [Frame; FRAME_COUNT] = Default::default();
        for (frame, pins) in frames.iter_mut().zip(throws) {
            for &p in pins.iter() {
                assert!(frame.record(p));
            }
        }
        frames
    }

    #[test]
    fn test_open_frame() {
        let frames = frames_from(&[&[3, 4]]);
        assert_eq!(calculate_frame_score(&frames, 0), Some(7));
    }

    #[test]
    fn test_first_throw_only_is_undefined() {
        let frames = frames_from(&[&[3]]);
        assert_eq!(calculate_frame_score(&frames, 0), None);

        let scores = calculate_all_scores(&frames);
        assert!(scores.iter().all(Option::is_none));
    }

    #[test]
    fn test_spare_bonus() {
        let frames = frames_from(&[&[5, 5], &[3]]);
        assert_eq!(calculate_frame_score(&frames, 0), Some(13));
        assert_eq!(calculate_frame_score(&frames, 1), None);

        let scores = calculate_all_scores(&frames);
        assert_eq!(scores[0], Some(13));
        assert_eq!(scores[1], None);
    }

    #[test]
    fn test_spare_waits_for_next_throw() {
        let frames = frames_from(&[&[7, 3]]);
        assert_eq!(calculate_frame_score(&frames, 0), None);
    }

    #[test]
    fn test_strike_with_open_next_frame() {
        let frames = frames_from(&[&[10], &[3, 4]]);
        assert_eq!(calculate_frame_score(&frames, 0), Some(17));

        let scores = calculate_all_scores(&frames);
        assert_eq!(scores[0], Some(17));
        assert_eq!(scores[1], Some(24));
        assert_eq!(scores[2], None);
    }

    #[test]
    fn test_strike_waits_for_second_bonus_throw() {
        let frames = frames_from(&[&[10], &[3]]);
        assert_eq!(calculate_frame_score(&frames, 0), None);
    }

    #[test]
    fn test_double_strike_reaches_two_frames_ahead() {
        let frames = frames_from(&[&[10], &[10]]);
        assert_eq!(calculate_frame_score(&frames, 0), None);

        let frames = frames_from(&[&[10], &[10], &[7]]);
        assert_eq!(calculate_frame_score(&frames, 0), Some(27));
        assert_eq!(calculate_frame_score(&frames, 1), None);
    }

    #[test]
    fn test_strike_in_ninth_frame_uses_last_frame_throws() {
        let mut throws: Vec<&[u8]> = vec![&[0u8, 0][..]; 8];
        throws.push(&[10]);
        throws.push(&[10, 10, 5]);
        let frames = frames_from(&throws);

        assert_eq!(calculate_frame_score(&frames, 8), Some(30));
        assert_eq!(calculate_frame_score(&frames, LAST_FRAME), Some(25));

        let scores = calculate_all_scores(&frames);
        assert_eq!(scores[7], Some(0));
        assert_eq!(scores[8], Some(30));
        assert_eq!(scores[9], Some(55));
    }

    #[test]
    fn test_strike_in_ninth_frame_waits_for_last_frame_second_throw() {
        let mut throws: Vec<&[u8]> = vec![&[0u8, 0][..]; 8];
        throws.push(&[10]);
        throws.push(&[10]);
        let frames = frames_from(&throws);

        assert_eq!(calculate_frame_score(&frames, 8), None);
    }

    #[test]
    fn test_last_frame_waits_for_bonus_throw() {
        let mut throws: Vec<&[u8]> = vec![&[0u8, 0][..]; 9];
        throws.push(&[6, 4]);
        let frames = frames_from(&throws);
        assert_eq!(calculate_frame_score(&frames, LAST_FRAME), None);

        throws[9] = &[6, 4, 8];
        let frames = frames_from(&throws);
        assert_eq!(calculate_frame_score(&frames, LAST_FRAME), Some(18));
    }

    #[test]
    fn test_last_frame_open() {
        let mut throws: Vec<&[u8]> = vec![&[0u8, 0][..]; 9];
        throws.push(&[4, 5]);
        let frames = frames_from(&throws);
        assert_eq!(calculate_frame_score(&frames, LAST_FRAME), Some(9));
        assert_eq!(calculate_all_scores(&frames)[LAST_FRAME], Some(9));
    }

    #[test]
    fn test_perfect_game() {
        let mut throws: Vec<&[u8]> = vec![&[10u8][..]; 9];
        throws.push(&[10, 10, 10]);
        let frames = frames_from(&throws);

        let scores = calculate_all_scores(&frames);
        assert_eq!(scores[0], Some(30));
        assert_eq!(scores[LAST_FRAME], Some(300));
    }

    #[test]
    fn test_gutter_game() {
        let throws: Vec<&[u8]> = vec![&[0u8, 0][..]; 10];
        let frames = frames_from(&throws);
        assert_eq!(calculate_all_scores(&frames), [Some(0); FRAME_COUNT]);
    }

    #[test]
    fn test_all_spares_with_five() {
        let mut throws: Vec<&[u8]> = vec![&[5u8, 5][..]; 9];
        throws.push(&[5, 5, 5]);
        let frames = frames_from(&throws);
        assert_eq!(calculate_all_scores(&frames)[LAST_FRAME], Some(150));
    }

    #[test]
    fn test_gap_leaves_later_frames_undefined() {
        // Frame 1 is a pending spare; frame 2 is open but must not be totalled.
        let frames = frames_from(&[&[3, 4], &[6, 4]]);
        let scores = calculate_all_scores(&frames);
        assert_eq!(scores[0], Some(7));
        assert_eq!(scores[1], None);
        assert_eq!(scores[2], None);
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let frames = frames_from(&[&[10], &[7, 3], &[9, 0], &[10], &[0, 8]]);
        let a = calculate_all_scores(&frames);
        let b = calculate_all_scores(&frames);
        assert_eq!(a, b);
        assert_eq!(a[0], Some(20));
        assert_eq!(a[1], Some(39));
        assert_eq!(a[2], Some(48));
        assert_eq!(a[3], Some(66));
        assert_eq!(a[4], Some(74));
    }

    #[test]
    fn test_out_of_range_frame() {
        let frames = frames_from(&[]);
        assert_eq!(calculate_frame_score(&frames, FRAME_COUNT), None);
    }

    #[test]
    fn test_standing_pins_regular_frame() {
        let frames = frames_from(&[&[], &[7], &[10]]);
        assert_eq!(standing_pins(&frames[0], 0), 10);
        assert_eq!(standing_pins(&frames[1], 1), 3);
        assert_eq!(standing_pins(&frames[2], 2), 0);
    }

    fn frame_of(throws: &[u8]) -> Frame {
        let mut frame = Frame::new();
        for &p in throws {
            assert!(frame.record(p));
        }
        frame
    }

    #[test]
    fn test_standing_pins_last_frame() {
        assert_eq!(standing_pins(&frame_of(&[]), LAST_FRAME), 10);
        assert_eq!(standing_pins(&frame_of(&[10]), LAST_FRAME), 10);
        assert_eq!(standing_pins(&frame_of(&[6]), LAST_FRAME), 4);
        assert_eq!(standing_pins(&frame_of(&[10, 10]), LAST_FRAME), 10);
        // The rack is reset before the bonus throw.
        assert_eq!(standing_pins(&frame_of(&[10, 3]), LAST_FRAME), 10);
        assert_eq!(standing_pins(&frame_of(&[6, 4]), LAST_FRAME), 10);
        assert_eq!(standing_pins(&frame_of(&[6, 3]), LAST_FRAME), 0);
        assert_eq!(standing_pins(&frame_of(&[10, 10, 10]), LAST_FRAME), 0);
    }
}
