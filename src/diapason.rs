use std::collections::BTreeSet;
use std::num::ParseIntError;

/// Parses a diapason string into the sorted, unique integers it covers.
///
/// Items are separated by commas and are either a single integer or an
/// inclusive `lo-hi` range, so `"8-10, 1-5, 6"` gives `[1, 2, 3, 4, 5, 6, 8, 9, 10]`.
/// A malformed item anywhere makes the whole result empty.
pub fn parse_diapason(diapason: &str) -> Vec<i64> {
    match parse_items(diapason) {
        Ok(indexes) => indexes.into_iter().collect(),
        Err(err) => {
            log::warn!("\"{diapason}\" is not a correct diapason string: {err}");
            Vec::new()
        },
    }
}

fn parse_items(diapason: &str) -> Result<BTreeSet<i64>, ParseIntError> {
    let mut indexes = BTreeSet::new();

    for item in diapason.split(',') {
        let mut bounds = item.split('-');
        let first = bounds.next().unwrap_or(item);
        let last = bounds.last().unwrap_or(first);
        let lo = first.trim().parse::<i64>()?;
        let hi = last.trim().parse::<i64>()?;

        indexes.extend(lo..=hi);
    }

    Ok(indexes)
}

#[test]
fn test_parse_diapason() {
    let positive: [(&str, &[i64]); 7] = [
        ("1", &[1]),
        ("1,5", &[1, 5]),
        ("1-5", &[1, 2, 3, 4, 5]),
        ("8-10, 1-5, 6", &[1, 2, 3, 4, 5, 6, 8, 9, 10]),
        ("11, 11, 12, 12, 1-5, 3-7", &[1, 2, 3, 4, 5, 6, 7, 11, 12]),
        (" 3 - 4 ", &[3, 4]),
        // reversed ranges cover nothing
        ("5-1", &[]),
    ];

    for (input, expected) in positive {
        assert_eq!(parse_diapason(input), expected, "input {input:?}");
    }

    for input in ["", "-", "1-", ",", "1,", "a-3", "1.5"] {
        assert!(parse_diapason(input).is_empty(), "input {input:?}");
    }
}
