use std::cmp::Ordering;

/// VersionMatcher decides whether a database version bound covers a target version
pub struct VersionMatcher;

impl VersionMatcher {
    /// Returns true when `version_end_including` is at or above `target`.
    ///
    /// Both strings are compared as floats when both parse as finite
    /// numbers (`"2.40"` vs `"2.39"`). Otherwise, when both are dotted
    /// numeric versions (`"1.2.13"`), they are compared segment by segment
    /// with missing segments counted as zero. Anything else is reported as
    /// not affected.
    pub fn is_version_affected(version_end_including: &str, target: &str) -> bool {
        let bound = version_end_including.trim();
        let target = target.trim();

        if let (Some(b), Some(t)) = (parse_float(bound), parse_float(target)) {
            return b >= t;
        }

        match (parse_dotted(bound), parse_dotted(target)) {
            (Some(b), Some(t)) => compare_segments(&b, &t) != Ordering::Less,
            _ => false,
        }
    }
}

fn parse_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_dotted(value: &str) -> Option<Vec<u64>> {
    if value.is_empty() {
        return None;
    }
    value
        .split('.')
        .map(|segment| {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                segment.parse::<u64>().ok()
            }
        })
        .collect()
}

fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
