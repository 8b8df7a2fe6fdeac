//! Panel grouping invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use time_frame::{Column, GroupKeys, TimeIndex, TimeIndexedFrame};

fn panel(labels: &[u8]) -> TimeIndexedFrame {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let index = TimeIndex::date_range(start, Duration::days(1), labels.len()).unwrap();
    let keys = GroupKeys::single("h0", labels.iter().map(|l| format!("h0_{l}")).collect()).unwrap();
    let values = (0..labels.len()).map(|i| i as f64).collect();
    TimeIndexedFrame::panel(keys, index, vec![Column::float("c0", values)]).unwrap()
}

#[test]
fn two_groups_of_three() {
    let frame = panel(&[0, 0, 0, 1, 1, 1]);
    let groups = frame.groups();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, vec!["h0_0".to_string()]);
    assert_eq!(groups[0].rows, vec![0, 1, 2]);
    assert_eq!(groups[1].key, vec!["h0_1".to_string()]);
    assert_eq!(groups[1].rows, vec![3, 4, 5]);
}

#[test]
fn multi_level_keys() {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let index = TimeIndex::date_range(start, Duration::days(1), 4).unwrap();
    let keys = GroupKeys::new(
        vec!["h0".to_string(), "h1".to_string()],
        vec![
            vec!["a".to_string(), "x".to_string()],
            vec!["a".to_string(), "y".to_string()],
            vec!["a".to_string(), "x".to_string()],
            vec!["a".to_string(), "y".to_string()],
        ],
    )
    .unwrap();
    let frame = TimeIndexedFrame::panel(keys, index, Vec::new()).unwrap();

    let groups = frame.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].key, vec!["a".to_string(), "y".to_string()]);
    assert_eq!(groups[1].rows, vec![1, 3]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn groups_partition_every_row_once(labels in prop::collection::vec(0u8..5, 0..60)) {
        let frame = panel(&labels);
        let groups = frame.groups();

        let mut seen: Vec<usize> = groups.iter().flat_map(|g| g.rows.iter().copied()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());

        for group in &groups {
            prop_assert!(group.rows.windows(2).all(|w| w[0] < w[1]));
            for &row in &group.rows {
                prop_assert_eq!(frame.keys().unwrap().row(row), group.key.as_slice());
            }
        }
    }
}
