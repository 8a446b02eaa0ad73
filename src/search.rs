use std::cmp::Ordering;

use crate::array::ArrayView;
use crate::comparator::{compare, Pattern};

/// Finds the half-open sub-range `[lo, hi)` of `array` whose suffixes
/// have `pattern` as a prefix, searching only within `[lo, hi)` of the
/// array. Returns `None` when no entry in that range matches.
///
/// A zero-length pattern matches everything in `[lo, hi)`.
pub fn bracket(
    text: &[u8],
    array: &ArrayView,
    pattern: &Pattern<'_>,
    lo: usize,
    hi: usize,
) -> Option<(usize, usize)> {
    if lo >= hi {
        return None;
    }
    if pattern.len() == pattern.skip {
        return Some((lo, hi - 1));
    }

    let first = lower_bound(text, array, pattern, lo, hi);
    if first >= hi || compare(text, array.get(first) as usize, pattern) != Ordering::Equal {
        return None;
    }
    let last = upper_bound(text, array, pattern, first, hi) - 1;
    Some((first, last))
}

/// Smallest `i` in `[lo, hi)` such that `pattern <= suffix(array[i])`.
/// Returns `hi` if no such index exists.
fn lower_bound(text: &[u8], array: &ArrayView, pattern: &Pattern<'_>, lo: usize, hi: usize) -> usize {
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let offset = array.get(mid) as usize;
        if compare(text, offset, pattern) == Ordering::Greater {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Smallest `i` in `[lo, hi)` such that `pattern < suffix(array[i])`.
/// Returns `hi` if no such index exists; `upper_bound - 1` is the
/// last matching index once a match is known to exist.
fn upper_bound(text: &[u8], array: &ArrayView, pattern: &Pattern<'_>, lo: usize, hi: usize) -> usize {
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let offset = array.get(mid) as usize;
        if compare(text, offset, pattern) == Ordering::Less {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Distinct ASCII case foldings of `byte`, in (upper, lower) order, as
/// the original `sary` tool enumerates them. A non-alphabetic byte has
/// exactly one folding: itself.
pub fn expand_byte(byte: u8) -> [u8; 2] {
    if byte.is_ascii_alphabetic() {
        [byte.to_ascii_uppercase(), byte.to_ascii_lowercase()]
    } else {
        [byte, byte]
    }
}

/// True when `expand_byte` has only one distinct candidate.
pub fn is_single_folding(byte: u8) -> bool {
    !byte.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn naive_bracket(text: &[u8], offsets: &[u32], pat: &[u8]) -> Option<(usize, usize)> {
        let matches: Vec<usize> = offsets
            .iter()
            .enumerate()
            .filter(|(_, &off)| text[off as usize..].starts_with(pat))
            .map(|(i, _)| i)
            .collect();
        if matches.is_empty() {
            None
        } else {
            Some((matches[0], *matches.last().unwrap()))
        }
    }

    fn sorted_offsets(text: &[u8]) -> Vec<u32> {
        let mut offs: Vec<u32> = (0..text.len() as u32).collect();
        offs.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        offs
    }

    #[test]
    fn bracket_matches_naive_oracle() {
        let text = b"abracadabra";
        let offs = sorted_offsets(text);
        let array = ArrayView::from_offsets(&offs, 4);

        for pat in [&b""[..], b"a", b"ab", b"abra", b"bra", b"z", b"dabra"] {
            let pattern = Pattern::new(pat);
            let got = bracket(text, &array, &pattern, 0, array.len());
            let want = if pat.is_empty() {
                Some((0, array.len() - 1))
            } else {
                naive_bracket(text, &offs, pat)
            };
            assert_eq!(got, want, "pattern {:?}", std::str::from_utf8(pat));
        }
    }

    #[test]
    fn empty_array_never_matches() {
        let text = b"";
        let array = ArrayView::from_offsets(&[], 4);
        let pattern = Pattern::new(b"x");
        assert_eq!(bracket(text, &array, &pattern, 0, array.len()), None);
    }

    #[test]
    fn expand_byte_preserves_order_and_dedups_non_alpha() {
        assert_eq!(expand_byte(b'a'), [b'A', b'a']);
        assert_eq!(expand_byte(b'Z'), [b'Z', b'z']);
        let [u, l] = expand_byte(b'5');
        assert_eq!(u, l);
        assert!(is_single_folding(b'5'));
        assert!(!is_single_folding(b'a'));
    }

    #[test]
    fn case_fold_candidates_cover_all_foldings_of_short_pattern() {
        // sanity check that recursively combining expand_byte over "Ab"
        // yields exactly {AB, Ab, aB, ab}.
        let mut got = BTreeSet::new();
        for &c0 in &expand_byte(b'A') {
            for &c1 in &expand_byte(b'b') {
                got.insert(vec![c0, c1]);
            }
        }
        let want: BTreeSet<Vec<u8>> = ["AB", "Ab", "aB", "ab"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        assert_eq!(got, want);
    }
}
