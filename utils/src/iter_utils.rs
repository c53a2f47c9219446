use std::ops::Range;

/// Splits `0..len` into at most `parts` contiguous, non-empty ranges of
/// near-equal size.
///
/// The first `len % parts` ranges are one element longer than the rest.
/// Empty input or `parts == 0` produces no ranges.
pub fn split_ranges(len: usize, parts: usize) -> impl Iterator<Item = Range<usize>> {
    let parts = parts.min(len);
    let (base, extra) = if parts == 0 {
        (0, 0)
    } else {
        (len / parts, len % parts)
    };

    (0..parts).scan(0usize, move |start, i| {
        let size = base + usize::from(i < extra);
        let range = *start..*start + size;
        *start = range.end;
        Some(range)
    })
}

#[cfg(test)]
mod test {
    use super::split_ranges;
    use itertools::Itertools;
    use rstest::rstest;

    #[rstest]
    #[case(10, 3, vec![0..4, 4..7, 7..10])]
    #[case(4, 4, vec![0..1, 1..2, 2..3, 3..4])]
    #[case(2, 5, vec![0..1, 1..2])]
    #[case(0, 3, vec![])]
    #[case(7, 0, vec![])]
    fn splits(
        #[case] len: usize,
        #[case] parts: usize,
        #[case] expected: Vec<std::ops::Range<usize>>,
    ) {
        assert_eq!(split_ranges(len, parts).collect_vec(), expected);
    }

    #[test]
    fn covers_every_index_once() {
        let covered = split_ranges(1000, 7).flatten().collect_vec();
        assert_eq!(covered, (0..1000).collect_vec());
    }
}
