//! Interval-containment search over ascending timestamps.

use crate::transcript::{Document, TimeCode};

/// Find the half-open interval containing `t`.
///
/// Returns `i` such that `timestamps[i] <= t` and either `i` is the last
/// index or `timestamps[i + 1] > t`. Returns `None` when `t` precedes the
/// first timestamp or the slice is empty. `timestamps` must be ascending.
pub fn find_active(timestamps: &[TimeCode], t: TimeCode) -> Option<usize> {
    if timestamps.is_empty() {
        return None;
    }

    let last = timestamps.len() - 1;
    let mut left = 0usize;
    let mut right = last;

    while left <= right {
        let mid = left + (right - left) / 2;
        let value = timestamps[mid];

        if value == t {
            return Some(mid);
        }

        if value < t {
            if mid == last || timestamps[mid + 1] > t {
                return Some(mid);
            }
            left = mid + 1;
        } else {
            if mid == 0 {
                return None;
            }
            if timestamps[mid - 1] <= t {
                return Some(mid - 1);
            }
            right = mid - 1;
        }
    }

    None
}

/// Strictly ascending timestamps of a document's timed lines.
///
/// Lines sharing a timestamp (a lyric and its translation, say) form one
/// entry and are highlighted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncIndex {
    timestamps: Vec<TimeCode>,
    lines: Vec<Vec<usize>>,
}

impl SyncIndex {
    /// Build the index from a document. Untimed lines are left out.
    ///
    /// The sort is stable, so lines within an entry keep parse order.
    pub fn from_document(document: &Document) -> Self {
        let mut entries: Vec<(TimeCode, usize)> = document
            .timed_lines()
            .filter_map(|(i, line)| line.timestamp.map(|ts| (ts, i)))
            .collect();
        entries.sort_by_key(|(ts, _)| *ts);
        Self::group(entries)
    }

    /// Build an index where the `i`-th timestamp belongs to line `i`.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = TimeCode>) -> Self {
        let mut entries: Vec<(TimeCode, usize)> =
            timestamps.into_iter().enumerate().map(|(i, ts)| (ts, i)).collect();
        entries.sort_by_key(|(ts, _)| *ts);
        Self::group(entries)
    }

    fn group(sorted: Vec<(TimeCode, usize)>) -> Self {
        let mut index = Self::default();
        for (ts, line) in sorted {
            match index.timestamps.last() {
                Some(last) if *last == ts => {
                    if let Some(group) = index.lines.last_mut() {
                        group.push(line);
                    }
                }
                _ => {
                    index.timestamps.push(ts);
                    index.lines.push(vec![line]);
                }
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[TimeCode] {
        &self.timestamps
    }

    /// Index entry active at `t`.
    pub fn find(&self, t: TimeCode) -> Option<usize> {
        find_active(&self.timestamps, t)
    }

    /// Document lines of an index entry.
    pub fn lines_of(&self, entry: usize) -> &[usize] {
        self.lines.get(entry).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index entry holding a document line.
    pub fn entry_of_line(&self, line: usize) -> Option<usize> {
        self.lines.iter().position(|group| group.contains(&line))
    }

    /// Timestamp of an index entry.
    pub fn timestamp_of(&self, entry: usize) -> Option<TimeCode> {
        self.timestamps.get(entry).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_document;

    fn ms(values: &[u64]) -> Vec<TimeCode> {
        values.iter().copied().map(TimeCode::from_millis).collect()
    }

    fn find(values: &[u64], t: u64) -> Option<usize> {
        find_active(&ms(values), TimeCode::from_millis(t))
    }

    /// Linear reference: last index whose timestamp is <= t.
    fn reference(values: &[u64], t: u64) -> Option<usize> {
        values.iter().rposition(|&v| v <= t)
    }

    fn holds_containment(values: &[u64], t: u64, r: Option<usize>) -> bool {
        match r {
            None => values.first().map_or(true, |&first| first > t),
            Some(i) => values[i] <= t && (i + 1 == values.len() || values[i + 1] > t),
        }
    }

    fn ascending(n: u64) -> Vec<u64> {
        (0..n).map(|i| i * 7 + (i % 3)).collect()
    }

    #[test]
    fn test_find_inside_and_outside_range() {
        assert_eq!(find(&[1000, 3500], 2000), Some(0));
        assert_eq!(find(&[1000, 3500], 500), None);
        assert_eq!(find(&[1000, 3500], 10_000), Some(1));
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(find(&[], 0), None);
        assert_eq!(find(&[1000], 999), None);
        assert_eq!(find(&[1000], 1000), Some(0));
        assert_eq!(find(&[1000], 5000), Some(0));
        assert_eq!(find(&[0, 10, 20], 0), Some(0));
        assert_eq!(find(&[0, 10, 20], 10), Some(1));
        assert_eq!(find(&[0, 10, 20], 19), Some(1));
        assert_eq!(find(&[0, 10, 20], 20), Some(2));
    }

    #[test]
    fn test_matches_linear_reference() {
        // Distinct ascending arrays: the binary search must agree exactly
        // with the linear scan.
        for n in 0..40u64 {
            let values = ascending(n);
            for t in 0..(n * 7 + 10) {
                let r = find(&values, t);
                assert_eq!(r, reference(&values, t), "n={} t={}", n, t);
                assert!(holds_containment(&values, t, r));
            }
        }
    }

    #[test]
    fn test_duplicates_land_in_the_right_interval() {
        // With repeated values the exact-match arm may pick any of the equal
        // entries, but never one from a different interval.
        let arrays: [&[u64]; 4] = [
            &[5, 5, 5],
            &[0, 0, 10, 10, 10, 20],
            &[1, 2, 2, 3, 3, 3, 4],
            &[100, 100],
        ];
        for values in arrays {
            for t in 0..130 {
                let r = find(values, t);
                let expected = reference(values, t);
                assert_eq!(
                    r.map(|i| values[i]),
                    expected.map(|i| values[i]),
                    "{:?} t={}",
                    values,
                    t
                );
            }
        }
    }

    #[test]
    fn test_index_skips_untimed_and_sorts() {
        let doc = parse_document(
            "[00:05]b\n[99999999999999999999999:00:00]untimed\n[00:02]a\n[00:09]c",
        );
        let index = SyncIndex::from_document(&doc);

        assert_eq!(index.timestamps(), ms(&[2000, 5000, 9000]).as_slice());
        assert_eq!(index.lines_of(0), &[2]);
        assert_eq!(index.lines_of(1), &[0]);
        assert_eq!(index.lines_of(2), &[3]);
        assert_eq!(index.find(TimeCode::from_millis(6000)), Some(1));
        assert!(index.lines_of(7).is_empty());
        assert_eq!(index.entry_of_line(1), None);
    }

    #[test]
    fn test_index_groups_shared_timestamps() {
        let doc = parse_document("[00:01]Hola\n[00:01]Hello\n[00:04]Adios");
        let index = SyncIndex::from_document(&doc);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lines_of(0), &[0, 1]);
        assert_eq!(index.entry_of_line(1), Some(0));

        // strictly ascending, so containment holds exactly
        let values: Vec<u64> = index.timestamps().iter().map(|t| t.as_millis()).collect();
        for t in 0..6000 {
            assert!(holds_containment(&values, t, index.find(TimeCode::from_millis(t))));
        }
    }
}
