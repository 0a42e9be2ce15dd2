use std::collections::HashMap;

/// One model related to the target by shared file content.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    pub purl: String,
    pub shared_hash_count: usize,
    /// Directed containment: shared hashes over the target's hash-set
    /// size. 1.0 means every file of the target also appears in this
    /// model, however many other files it has.
    pub overlap_ratio: f64,
}

/// Ranks candidate models by how much of the target they contain.
///
/// `shared_counts` maps each candidate identifier to the number of target
/// hashes it shares; callers build it from reverse-index lookups and must
/// have excluded the target itself. A target with no hashes has no
/// meaningful denominator and yields no results.
///
/// Ordering is `(overlap_ratio desc, purl asc)` so equal ratios list in a
/// stable, deterministic order.
pub fn rank_by_overlap(
    target_hash_count: usize,
    shared_counts: HashMap<String, usize>,
) -> Vec<SimilarityResult> {
    if target_hash_count == 0 {
        return Vec::new();
    }
    let mut results: Vec<SimilarityResult> = shared_counts
        .into_iter()
        .map(|(purl, shared_hash_count)| SimilarityResult {
            overlap_ratio: shared_hash_count as f64 / target_hash_count as f64,
            purl,
            shared_hash_count,
        })
        .collect();
    results.sort_by(|a, b| {
        b.overlap_ratio
            .total_cmp(&a.overlap_ratio)
            .then_with(|| a.purl.cmp(&b.purl))
    });
    results
}

/// 1-based pagination over an already ranked list.
pub fn paginate<T>(items: Vec<T>, page: usize, items_per_page: usize) -> Vec<T> {
    let page = page.max(1);
    items
        .into_iter()
        .skip((page - 1) * items_per_page)
        .take(items_per_page)
        .collect()
}
