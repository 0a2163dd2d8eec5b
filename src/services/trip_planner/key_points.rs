use crate::models::Coordinates;

/// Indices of up to `count` evenly spaced points along a path of `len` points.
/// Includes both ends whenever `count >= 2` and `len >= 1`.
pub fn key_point_indices(len: usize, count: usize) -> Vec<usize> {
    match (len, count) {
        (0, _) | (_, 0) => Vec::new(),
        (_, 1) => vec![0],
        _ => {
            let step = (len - 1) as f64 / (count - 1) as f64;
            let mut indices: Vec<usize> = (0..count)
                .map(|i| (i as f64 * step).round() as usize)
                .filter(|index| *index < len)
                .collect();
            // Indices are non-decreasing, so adjacent dedup removes every repeat
            indices.dedup();
            indices
        }
    }
}

/// Evenly spaced subset of a route, used to look up place names along the way.
pub fn sample_key_points(path: &[Coordinates], count: usize) -> Vec<Coordinates> {
    key_point_indices(path.len(), count)
        .into_iter()
        .map(|index| path[index])
        .collect()
}
