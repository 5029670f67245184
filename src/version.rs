//! Release version ordering.
//!
//! Versions are dotted strings such as `1.10.2`. Components are compared pairwise:
//! numeric components numerically, missing components as `0`, and a numeric component
//! always orders before a non-numeric one (`1.0.0` < `1.0.rc1`). Two non-numeric
//! components compare lexicographically. A leading `v` is ignored.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Component<'a> {
    Numeric(u64),
    Text(&'a str),
}

impl<'a> Component<'a> {
    fn parse(raw: &'a str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) => Component::Numeric(n),
            Err(_) => Component::Text(raw),
        }
    }
}

impl Ord for Component<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Numeric(a), Component::Numeric(b)) => a.cmp(b),
            (Component::Numeric(_), Component::Text(_)) => Ordering::Less,
            (Component::Text(_), Component::Numeric(_)) => Ordering::Greater,
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Component<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn components(version: &str) -> Vec<Component<'_>> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    trimmed.split('.').map(Component::parse).collect()
}

/// Compares two version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = components(a);
    let b = components(b);
    let zero = Component::Numeric(0);

    for i in 0..a.len().max(b.len()) {
        let left = a.get(i).unwrap_or(&zero);
        let right = b.get(i).unwrap_or(&zero);

        match left.cmp(right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// True when `remote` is strictly newer than `local`.
pub fn is_newer(remote: &str, local: &str) -> bool {
    compare(remote, local) == Ordering::Greater
}
