use std::cmp::Ordering;

use log::warn;

/// Compares dotted numeric versions such as `1.13.0.0`.
///
/// Missing components count as zero, so `1.13` equals `1.13.0.0`. A
/// component that is not a number makes the versions incomparable, which is
/// reported as `Equal` after a warning.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (Some(left), Some(right)) = (parse(a), parse(b)) else {
        warn!("Cannot compare versions {:?} and {:?}", a, b);
        return Ordering::Equal;
    };

    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn parse(version: &str) -> Option<Vec<u64>> {
    version
        .trim()
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}
