use thumbsift_core::error::ThumbsiftError;
use thumbsift_core::stats::{OutlierFilter, StatBounds};

// ---------------------------------------------------------------------------
// StatBounds
// ---------------------------------------------------------------------------

#[test]
fn test_bounds_order_holds() {
    let samples: [&[f64]; 4] = [
        &[1.0, 2.0, 3.0],
        &[-5.0, 0.0, 100.0, 7.5],
        &[0.001, 0.002],
        &[1e9, 1e9 + 1.0, 1e9 - 3.0],
    ];
    for values in samples {
        let b = StatBounds::from_values(values).unwrap();
        assert!(b.lower <= b.mean && b.mean <= b.upper, "{b:?}");
        assert!(b.stddev >= 0.0);
    }
}

#[test]
fn test_bounds_empty_input() {
    assert!(matches!(
        StatBounds::from_values(&[]),
        Err(ThumbsiftError::EmptyInput)
    ));
}

#[test]
fn test_bounds_single_value() {
    let b = StatBounds::from_values(&[42.0]).unwrap();
    assert_eq!(b.stddev, 0.0);
    assert_eq!(b.lower, 42.0);
    assert_eq!(b.upper, 42.0);
}

// ---------------------------------------------------------------------------
// OutlierFilter
// ---------------------------------------------------------------------------

#[test]
fn test_filter_partitions_by_bounds() {
    let values = vec![10.0, 12.0, 11.0, 50.0, 13.0, 9.0, -20.0];
    let filtered = OutlierFilter::new(|v: &f64| *v).apply(&values).unwrap();
    let b = filtered.bounds;

    for v in &values {
        let kept = filtered.retained.iter().any(|r| std::ptr::eq(*r, v));
        if kept {
            assert!(b.contains(*v));
        } else {
            assert!(*v < b.lower || *v > b.upper, "{v} excluded but inside {b:?}");
        }
    }
    assert!(!filtered.retained.iter().any(|r| **r == 50.0));
    assert!(!filtered.retained.iter().any(|r| **r == -20.0));
}

#[test]
fn test_filter_keeps_input_order_by_default() {
    let values = vec![13.0, 10.0, 12.0, 11.0, 50.0];
    let filtered = OutlierFilter::new(|v: &f64| *v).apply(&values).unwrap();
    let kept: Vec<f64> = filtered.retained.iter().map(|v| **v).collect();
    assert_eq!(kept, vec![13.0, 10.0, 12.0, 11.0]);
}

#[test]
fn test_filter_sorted_ascending_and_stable() {
    let items = vec![("a", 3.0), ("b", 1.0), ("c", 3.0), ("d", 2.0)];
    let filtered = OutlierFilter::new(|item: &(&str, f64)| item.1)
        .sorted()
        .apply(&items)
        .unwrap();
    let names: Vec<&str> = filtered.retained.iter().map(|item| item.0).collect();
    // mean 2.25, stddev ~0.83: 1.0 falls out, the two 3.0s keep input order.
    assert_eq!(names, vec!["d", "a", "c"]);
}

#[test]
fn test_filter_all_equal_retains_everything() {
    let values = vec![0.3; 9];
    let filtered = OutlierFilter::new(|v: &f64| *v).apply(&values).unwrap();
    assert_eq!(filtered.len(), 9);
    assert_eq!(filtered.bounds.lower, filtered.bounds.upper);
}

#[test]
fn test_filter_single_element_retained() {
    let values = vec![7.0];
    let filtered = OutlierFilter::new(|v: &f64| *v).apply(&values).unwrap();
    assert_eq!(filtered.len(), 1);
}

#[test]
fn test_filter_empty_input() {
    let values: Vec<f64> = Vec::new();
    let result = OutlierFilter::new(|v: &f64| *v).apply(&values);
    assert!(matches!(result, Err(ThumbsiftError::EmptyInput)));
}
