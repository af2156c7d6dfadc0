//! Dartboard to pin transposition.
//!
//! Each dart hit knocks down a fixed set of pins:
//!
//! | Hit | Pins |
//! |-----|------|
//! | Inner bull | all ten (strike) |
//! | Outer bull | 1, 2, 3, 5 |
//! | Double ring (any segment) | 1-6 |
//! | Triple ring (any segment) | 7-10 |
//! | Single 1-10 | the pin with that number |
//! | Single 11-20 | a fixed pair or triple, see [`pins_for_hit`] |
//! | Miss | none |

use crate::types::DartHit;

const ALL_PINS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
const OUTER_BULL: [u8; 4] = [1, 2, 3, 5];
const DOUBLE_RING: [u8; 6] = [1, 2, 3, 4, 5, 6];
const TRIPLE_RING: [u8; 4] = [7, 8, 9, 10];

/// Pins for single-ring segments 11-20, indexed by `segment - 11`.
const HIGH_SINGLES: [&[u8]; 10] = [
    &[1, 2],
    &[1, 3],
    &[2, 3],
    &[4, 5],
    &[5, 6],
    &[7, 8],
    &[8, 9],
    &[9, 10],
    &[1, 2, 3],
    &[4, 5, 6],
];

/// Pin ids knocked down by a dart hit, ascending
///
/// # Examples
///
/// ```
/// use bulling_input::pins_for_hit;
/// use bulling_input::types::{DartHit, Segment};
///
/// assert_eq!(pins_for_hit(DartHit::InnerBull).len(), 10);
/// assert_eq!(pins_for_hit(DartHit::Single(Segment::new(19).unwrap())), &[1, 2, 3]);
/// assert!(pins_for_hit(DartHit::Miss).is_empty());
/// ```
pub fn pins_for_hit(hit: DartHit) -> &'static [u8] {
    match hit {
        DartHit::InnerBull => &ALL_PINS,
        DartHit::OuterBull => &OUTER_BULL,
        DartHit::Double(_) => &DOUBLE_RING,
        DartHit::Triple(_) => &TRIPLE_RING,
        DartHit::Single(segment) => match segment.get() {
            n @ 1..=10 => &ALL_PINS[(n - 1) as usize..n as usize],
            n => HIGH_SINGLES
                .get((n - 11) as usize)
                .copied()
                .unwrap_or(&[]),
        },
        DartHit::Miss => &[],
    }
}
