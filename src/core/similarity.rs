use crate::core::tags::TagSet;

/// Jaccard similarity of two tag sets, as a percentage (0-100)
///
/// similarity = |A ∩ B| / |A ∪ B| * 100
///
/// Two empty sets have nothing in common and score 0.
#[inline]
pub fn jaccard_similarity(a: &TagSet, b: &TagSet) -> f64 {
    let intersection = a.intersection_count(b);
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return 0.0;
    }

    (intersection as f64 / union as f64) * 100.0
}
