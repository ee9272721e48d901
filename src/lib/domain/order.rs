use std::cmp::Ordering;

/// Sorts descending on `key`. Records with numerically equal keys, `0.0` and
/// `-0.0` included, keep their input order.
pub fn sort_descending_by<T>(mut records: Vec<T>, key: impl Fn(&T) -> f64) -> Vec<T> {
    records.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    records
}
