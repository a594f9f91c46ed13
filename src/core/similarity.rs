use std::collections::HashSet;

/// Normalize a collection of free-text tags into a comparable set.
///
/// Every tag is trimmed and lower-cased; blank entries are discarded and
/// duplicates collapse. Normalizing an already-normalized set yields the
/// same set.
pub fn normalize_tags<I>(tags: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref().trim().to_lowercase();
            if tag.is_empty() {
                None
            } else {
                Some(tag)
            }
        })
        .collect()
}

/// Jaccard index between two tag collections: |A ∩ B| / |A ∪ B|.
///
/// Both sides are normalized before comparison, so the function accepts raw
/// tag lists as well as sets the caller normalized earlier. Returns 0.0 when
/// the union is empty. Result is always within [0, 1].
pub fn jaccard_similarity<A, B>(a: A, b: B) -> f64
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    B: IntoIterator,
    B::Item: AsRef<str>,
{
    let set_a = normalize_tags(a);
    let set_b = normalize_tags(b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}
