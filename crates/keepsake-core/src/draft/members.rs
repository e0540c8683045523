//! Shared member-list math: normalization, fingerprinting, Jaccard overlap,
//! and subset containment over sorted id slices.

use super::MediaId;

/// Normalize a member list: numerically sorted, duplicates removed.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(ids: &[MediaId]) -> Vec<MediaId> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

/// Order-independent identity of a member set: blake3 hex over the
/// normalized id list. Two drafts with the same members (in any order, with
/// any duplication) share a fingerprint.
pub fn fingerprint(ids: &[MediaId]) -> String {
    let normalized = normalize(ids);
    let mut hasher = blake3::Hasher::new();
    for id in &normalized {
        hasher.update(&id.0.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Intersection size of two normalized slices (two-pointer merge, O(n+m)).
pub fn intersection_len(a: &[MediaId], b: &[MediaId]) -> usize {
    let (mut i, mut j, mut count) = (0usize, 0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Jaccard overlap `|A∩B| / |A∪B|` of two normalized slices.
/// Two empty sets have overlap 0.0.
pub fn jaccard(a: &[MediaId], b: &[MediaId]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let inter = intersection_len(a, b);
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

/// Whether `inner` is a strict subset of `outer`. Both must be normalized.
pub fn is_strict_subset(inner: &[MediaId], outer: &[MediaId]) -> bool {
    inner.len() < outer.len() && intersection_len(inner, outer) == inner.len()
}
