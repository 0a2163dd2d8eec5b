use crate::constants::BEARING_OFFSETS_DEG;

/// One (bearing, distance) pair tried by the bike direct search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCandidate {
    /// Degrees clockwise from true north, in `[0, 360)`
    pub bearing_deg: u16,
    pub distance_km: f64,
}

/// Candidate bearings fanned around `base_bearing`, in search order.
pub fn candidate_bearings(base_bearing: u32) -> Vec<u16> {
    BEARING_OFFSETS_DEG
        .iter()
        .map(|offset| (base_bearing as i64 + *offset as i64).rem_euclid(360) as u16)
        .collect()
}

/// Walks the bearing/distance grid: outer loop over bearings, inner loop over
/// distances. Finite, so a search driven by it always terminates.
#[derive(Debug, Clone)]
pub struct SearchCandidates {
    bearings: Vec<u16>,
    distances_km: Vec<f64>,
    bearing_index: usize,
    distance_index: usize,
}

impl SearchCandidates {
    pub fn new(base_bearing: u32, distances_km: &[f64]) -> Self {
        SearchCandidates {
            bearings: candidate_bearings(base_bearing),
            distances_km: distances_km.to_vec(),
            bearing_index: 0,
            distance_index: 0,
        }
    }

    /// Total number of candidates in the grid.
    pub fn grid_size(&self) -> usize {
        self.bearings.len() * self.distances_km.len()
    }
}

impl Iterator for SearchCandidates {
    type Item = SearchCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.distances_km.is_empty() {
            return None;
        }
        let bearing_deg = *self.bearings.get(self.bearing_index)?;
        let distance_km = self.distances_km[self.distance_index];

        self.distance_index += 1;
        if self.distance_index == self.distances_km.len() {
            self.distance_index = 0;
            self.bearing_index += 1;
        }

        Some(SearchCandidate {
            bearing_deg,
            distance_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearings_fan_around_base() {
        assert_eq!(candidate_bearings(100), vec![100, 130, 70, 160, 40, 190, 10]);
    }

    #[test]
    fn test_bearings_normalized() {
        assert_eq!(candidate_bearings(10), vec![10, 40, 340, 70, 310, 100, 280]);
        assert_eq!(candidate_bearings(350), vec![350, 20, 320, 50, 290, 80, 260]);
        assert_eq!(candidate_bearings(720), candidate_bearings(0));
        for base in 0..360 {
            assert!(candidate_bearings(base).iter().all(|b| *b < 360));
        }
    }

    #[test]
    fn test_iteration_order_bearing_major() {
        let candidates: Vec<_> = SearchCandidates::new(0, &[100.0, 90.0]).take(4).collect();
        assert_eq!(
            candidates,
            vec![
                SearchCandidate { bearing_deg: 0, distance_km: 100.0 },
                SearchCandidate { bearing_deg: 0, distance_km: 90.0 },
                SearchCandidate { bearing_deg: 30, distance_km: 100.0 },
                SearchCandidate { bearing_deg: 30, distance_km: 90.0 },
            ]
        );
    }

    #[test]
    fn test_grid_is_finite() {
        let distances = [110.0, 100.0, 95.0, 90.0, 85.0, 80.0, 70.0, 60.0];
        let candidates = SearchCandidates::new(42, &distances);
        assert_eq!(candidates.grid_size(), 56);
        assert_eq!(candidates.count(), 56);

        assert_eq!(SearchCandidates::new(42, &[]).count(), 0);
    }
}
