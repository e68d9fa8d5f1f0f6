//! Shuffle algorithm for queue randomization
//!
//! Uniform Fisher-Yates permutation via `rand`'s `SliceRandom`.

use crate::types::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle tracks in place with the thread-local RNG
pub fn shuffle_tracks(tracks: &mut [Track]) {
    shuffle_tracks_with(tracks, &mut rand::thread_rng());
}

/// Shuffle tracks in place with a caller-supplied RNG
///
/// Every permutation is equally likely.
pub fn shuffle_tracks_with<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Random permutation of `0..len`
///
/// `result[new_position] == old_position`, so callers can follow a
/// specific element through the shuffle.
pub fn permutation_with<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}
