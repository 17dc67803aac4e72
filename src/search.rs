/// Bracket-narrowing binary search over an ascending slice.
///
/// Checks both endpoints first, then halves `[low, high]` until the bracket
/// is at most one slot wide. Returns `None` when `key` is absent.
///
/// When `key` occurs more than once, the index returned is whichever copy
/// the bracket converges on. Callers must not assume it is the first or last.
pub fn binary_search(key: i64, sorted: &[i64]) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    let mut low = 0;
    let mut high = sorted.len() - 1;

    if sorted[low] == key {
        return Some(low);
    }
    if sorted[high] == key {
        return Some(high);
    }

    let mut mid = (low + high) / 2;
    while high - low > 1 {
        if sorted[mid] == key {
            return Some(mid);
        } else if sorted[mid] < key {
            low = mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2;
    }

    None
}
