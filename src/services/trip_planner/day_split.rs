use super::geodesy::{cumulative_distances_km, great_circle_distance_km};
use crate::constants::{TWO_DAY_MAX_FRACTION, TWO_DAY_MIN_FRACTION};
use crate::models::Coordinates;

/// Day-1 threshold for a two-day split: aim for half the total, keep it in the
/// 40%..60% window and never above the daily cap.
///
/// When the cap is below 40% of the total the window is inverted; the upper
/// bound wins and day 1 stops at the cap.
pub fn two_day_split_threshold(total_km: f64, max_km_per_day: f64) -> f64 {
    let naive = total_km / 2.0;
    let lower = (TWO_DAY_MIN_FRACTION * total_km).max(naive.min(max_km_per_day));
    let upper = (TWO_DAY_MAX_FRACTION * total_km).min(max_km_per_day);
    // Not f64::clamp: the window may be inverted.
    naive.max(lower).min(upper)
}

/// Partition a path into per-day distances (km).
///
/// Segments accumulate into the current day while it stays within
/// `max_km_per_day`; a segment that would overflow opens the next day. The
/// last day takes whatever is left, even past the cap. Two-day trips also
/// move to day 2 as soon as day 1 would pass [`two_day_split_threshold`].
pub fn split_into_days(path: &[Coordinates], days: usize, max_km_per_day: f64) -> Vec<f64> {
    if days == 0 {
        return Vec::new();
    }

    let mut day_distances = vec![0.0; days];
    if days == 1 {
        day_distances[0] = cumulative_distances_km(path).last().copied().unwrap_or(0.0);
        return day_distances;
    }

    let two_day_threshold = if days == 2 {
        let total = cumulative_distances_km(path).last().copied().unwrap_or(0.0);
        Some(two_day_split_threshold(total, max_km_per_day))
    } else {
        None
    };

    let last_day = days - 1;
    let mut current_day = 0;
    for window in path.windows(2) {
        let segment = great_circle_distance_km(&window[0], &window[1]);
        let next_total = day_distances[current_day] + segment;

        let past_threshold = match two_day_threshold {
            Some(threshold) => current_day == 0 && next_total > threshold,
            None => false,
        };

        if past_threshold {
            current_day = 1;
            day_distances[current_day] += segment;
        } else if next_total <= max_km_per_day {
            day_distances[current_day] = next_total;
        } else if current_day < last_day {
            current_day += 1;
            day_distances[current_day] += segment;
        } else {
            // Nowhere left to push distance
            day_distances[current_day] += segment;
        }
    }

    day_distances
}
