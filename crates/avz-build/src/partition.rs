//! Round-robin work partitioning.

/// Deal `items` across `workers` buckets like cards: item `i` goes to bucket
/// `i % workers`.
///
/// Every bucket ends up with `floor(n / w)` or `ceil(n / w)` items regardless
/// of how long any individual item takes to process. A worker count of zero
/// is treated as one. Buckets may be empty when there are more workers than
/// items.
pub fn round_robin<T: Clone>(items: &[T], workers: usize) -> Vec<Vec<T>> {
    let workers = workers.max(1);
    let mut buckets: Vec<Vec<T>> = (0..workers)
        .map(|_| Vec::with_capacity(items.len() / workers + 1))
        .collect();
    for (index, item) in items.iter().enumerate() {
        buckets[index % workers].push(item.clone());
    }
    buckets
}
