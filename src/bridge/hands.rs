//! Flat landmark parsing - JS delivers hands as one Float32Array
//!
//! MediaPipe's results are flattened to `hands x 21 x 3` floats before
//! crossing the boundary; this module turns them back into typed hands.

use crate::interaction::{Hand, Landmark};

pub const LANDMARKS_PER_HAND: usize = 21;
pub const FLOATS_PER_HAND: usize = LANDMARKS_PER_HAND * 3;

/// Detection is configured for at most two hands; anything more is dropped
pub const MAX_HANDS: usize = 2;

/// Rebuild typed hands from the flat array. The length must match the
/// advertised hand count exactly; a mismatched frame is rejected whole.
pub fn parse_hands(data: &[f32], num_hands: usize) -> Result<Vec<Hand>, String> {
    if data.len() != num_hands * FLOATS_PER_HAND {
        return Err(format!(
            "Invalid landmark data length: {} (expected {} for {} hands)",
            data.len(),
            num_hands * FLOATS_PER_HAND,
            num_hands
        ));
    }

    let mut hands = Vec::with_capacity(num_hands.min(MAX_HANDS));
    for h in 0..num_hands.min(MAX_HANDS) {
        let mut hand = Hand::default();
        for i in 0..LANDMARKS_PER_HAND {
            let base = h * FLOATS_PER_HAND + i * 3;
            hand.landmarks[i] = Landmark {
                x: data[base],
                y: data[base + 1],
                z: data[base + 2],
            };
        }
        hands.push(hand);
    }
    Ok(hands)
}
