#![allow(clippy::unwrap_used)]

use super::*;
use proptest::prelude::*;

#[test]
fn test_display_full() {
    assert_eq!(SourceLocation::new(3, 14).to_string(), "3, 14");
}

#[test]
fn test_display_line_only() {
    assert_eq!(SourceLocation::line_only(7).to_string(), "7");
}

#[test]
fn test_display_invalid() {
    assert_eq!(SourceLocation::INVALID.to_string(), "invalid");
    assert_eq!(SourceLocation::default().to_string(), "invalid");
}

#[test]
fn test_debug_braces() {
    assert_eq!(format!("{:?}", SourceLocation::new(0, 17)), "{0, 17}");
}

#[test]
fn test_validity() {
    assert!(SourceLocation::new(0, 0).is_valid());
    assert!(!SourceLocation::line_only(0).is_valid());
    assert!(SourceLocation::line_only(0).has_line());
    assert!(!SourceLocation::INVALID.has_line());
}

#[test]
fn test_reading_order() {
    let mut locations = vec![
        SourceLocation::new(1, 0),
        SourceLocation::new(0, 9),
        SourceLocation::new(0, 2),
    ];
    locations.sort();
    assert_eq!(
        locations,
        vec![
            SourceLocation::new(0, 2),
            SourceLocation::new(0, 9),
            SourceLocation::new(1, 0),
        ]
    );
}

#[test]
fn test_from_indices_saturates() {
    let loc = SourceLocation::from_indices(2, usize::MAX);
    assert_eq!(loc.line, 2);
    assert!(!loc.has_column());
}

proptest! {
    #[test]
    fn display_of_valid_location_round_trips(line in 0u32..u32::MAX, column in 0u32..u32::MAX) {
        let text = SourceLocation::new(line, column).to_string();
        let (l, c) = text.split_once(", ").unwrap();
        prop_assert_eq!(l.parse::<u32>().unwrap(), line);
        prop_assert_eq!(c.parse::<u32>().unwrap(), column);
    }
}
