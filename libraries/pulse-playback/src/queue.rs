//! Play queue
//!
//! Ordered list of tracks with one designated current position.
//! Navigation is index-based and never reorders the list; only an explicit
//! shuffle does.

use crate::shuffle::permutation_with;
use crate::types::{Track, TrackId};
use rand::Rng;

/// Ordered play queue
///
/// Invariant: `index < tracks.len()` whenever the queue is non-empty, and
/// `index == 0` when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<Track>,
    index: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue
    ///
    /// `index` is clamped into range.
    pub fn replace(&mut self, tracks: Vec<Track>, index: usize) {
        self.index = index.min(tracks.len().saturating_sub(1));
        self.tracks = tracks;
    }

    /// Drop every track
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = 0;
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    /// Track at an arbitrary position
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// First position holding the given track id
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Move to the next position
    ///
    /// Past the last track: wraps to 0 when `wrap` is set, otherwise returns
    /// `None` and leaves the position alone. Empty queue returns `None`.
    pub fn step_forward(&mut self, wrap: bool) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        let next = self.index + 1;
        if next < self.tracks.len() {
            self.index = next;
        } else if wrap {
            self.index = 0;
        } else {
            return None;
        }

        self.tracks.get(self.index)
    }

    /// Move to the previous position
    ///
    /// Before the first track: wraps to the last position when `wrap` is set,
    /// otherwise stays at 0. Empty queue returns `None`.
    pub fn step_back(&mut self, wrap: bool) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        self.index = match self.index.checked_sub(1) {
            Some(prev) => prev,
            None if wrap => self.tracks.len() - 1,
            None => 0,
        };

        self.tracks.get(self.index)
    }

    /// Jump directly to a position
    ///
    /// Out-of-range positions leave the queue untouched and return `None`.
    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        if index >= self.tracks.len() {
            return None;
        }
        self.index = index;
        self.tracks.get(index)
    }

    /// Re-permute the queue uniformly, following the current track
    ///
    /// The element at the current position keeps its identity and the index
    /// moves to wherever it landed. If `current` names a track that is not at
    /// the current position (re-play from outside the queue), its first
    /// occurrence in the new order is used instead; if it is not in the
    /// queue at all the followed position is kept.
    pub fn shuffle_keeping_current<R: Rng + ?Sized>(
        &mut self,
        current: Option<TrackId>,
        rng: &mut R,
    ) {
        if self.tracks.is_empty() {
            return;
        }

        let order = permutation_with(self.tracks.len(), rng);
        let mut old: Vec<Option<Track>> = std::mem::take(&mut self.tracks)
            .into_iter()
            .map(Some)
            .collect();
        self.tracks = order.iter().filter_map(|&i| old[i].take()).collect();

        let followed = order
            .iter()
            .position(|&i| i == self.index)
            .unwrap_or_default();
        self.index = followed;

        if let Some(id) = current {
            if self.tracks[followed].id != id {
                if let Some(pos) = self.position_of(id) {
                    self.index = pos;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_track(id: i64) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", 180)
    }

    fn queue_of(count: i64) -> Queue {
        let mut queue = Queue::new();
        queue.replace((1..=count).map(create_test_track).collect(), 0);
        queue
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn replace_clamps_index() {
        let mut queue = Queue::new();
        queue.replace(vec![create_test_track(1), create_test_track(2)], 9);
        assert_eq!(queue.index(), 1);

        queue.replace(vec![], 3);
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn step_forward_without_wrap_stops_at_end() {
        let mut queue = queue_of(3);
        queue.jump_to(2);

        assert!(queue.step_forward(false).is_none());
        assert_eq!(queue.index(), 2);
    }

    #[test]
    fn step_forward_wraps() {
        let mut queue = queue_of(3);
        queue.jump_to(2);

        let track = queue.step_forward(true).unwrap();
        assert_eq!(track.id, TrackId(1));
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn step_back_clamps_or_wraps() {
        let mut queue = queue_of(3);

        assert_eq!(queue.step_back(false).unwrap().id, TrackId(1));
        assert_eq!(queue.index(), 0);

        assert_eq!(queue.step_back(true).unwrap().id, TrackId(3));
        assert_eq!(queue.index(), 2);
    }

    #[test]
    fn empty_queue_navigation_is_noop() {
        let mut queue = Queue::new();
        assert!(queue.step_forward(true).is_none());
        assert!(queue.step_back(true).is_none());
        assert!(queue.jump_to(0).is_none());
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut queue = queue_of(3);
        queue.jump_to(1);
        assert!(queue.jump_to(5).is_none());
        assert_eq!(queue.index(), 1);
    }

    #[test]
    fn shuffle_follows_current_track() {
        let mut queue = queue_of(5);
        queue.jump_to(2);

        for seed in 0..20 {
            queue.shuffle_keeping_current(Some(TrackId(3)), &mut StdRng::seed_from_u64(seed));
            assert_eq!(queue.current().unwrap().id, TrackId(3));
            assert_eq!(queue.len(), 5);
        }
    }

    #[test]
    fn shuffle_follows_position_with_duplicate_ids() {
        let mut queue = Queue::new();
        queue.replace(
            vec![
                create_test_track(1),
                create_test_track(2),
                create_test_track(1),
            ],
            2,
        );

        queue.shuffle_keeping_current(Some(TrackId(1)), &mut StdRng::seed_from_u64(3));
        assert_eq!(queue.current().unwrap().id, TrackId(1));
    }

    #[test]
    fn shuffle_finds_current_outside_followed_position() {
        let mut queue = queue_of(4);
        queue.jump_to(0);

        // Current track is #4 even though the index points at #1
        queue.shuffle_keeping_current(Some(TrackId(4)), &mut StdRng::seed_from_u64(11));
        assert_eq!(queue.current().unwrap().id, TrackId(4));
    }
}
