use rs2_query::*;
use std::cell::{Cell, RefCell};

#[test]
fn test_filter_keeps_matching_elements_in_order() {
    let result = stream(vec![1, 2, 3, 4]).filter(|x| x % 2 == 0).to_list();
    assert_eq!(result, vec![2, 4]);
}

#[test]
fn test_filter_is_lazy_until_iterated() {
    let calls = Cell::new(0);
    let evens = stream(vec![1, 2, 3, 4, 5, 6]).filter(|x| {
        calls.set(calls.get() + 1);
        x % 2 == 0
    });

    assert_eq!(calls.get(), 0);
    assert_eq!(evens.first(), Ok(2));
    // Pulled 1 (rejected) and 2 (accepted), nothing more.
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_filter_evaluates_predicate_once_per_element_per_pass() {
    let calls = Cell::new(0);
    let odds = stream(vec![1, 2, 3, 4, 5]).filter(|x| {
        calls.set(calls.get() + 1);
        x % 2 == 1
    });

    assert_eq!(odds.to_list(), vec![1, 3, 5]);
    assert_eq!(calls.get(), 5);
    assert_eq!(odds.count(), 3);
    assert_eq!(calls.get(), 10);
}

#[test]
fn test_filter_reverse_uses_same_predicate() {
    let result = stream(vec![1, 2, 3, 4, 5, 6])
        .filter(|x| x % 3 != 0)
        .reverse()
        .to_list();
    assert_eq!(result, vec![5, 4, 2, 1]);
}

#[test]
fn test_select_transforms_each_element() {
    let result = stream(vec![1, 2, 3]).select(|x| x * 10).to_list();
    assert_eq!(result, vec![10, 20, 30]);
}

#[test]
fn test_select_changes_element_type() {
    let result = stream(vec![1, 2, 3]).select(|x| format!("#{}", x)).to_list();
    assert_eq!(result, vec!["#1".to_string(), "#2".to_string(), "#3".to_string()]);
}

#[test]
fn test_select_preserves_known_count() {
    let calls = Cell::new(0);
    let projected = stream(vec![1, 2, 3, 4]).select(|x| {
        calls.set(calls.get() + 1);
        x + 1
    });

    assert_eq!(projected.known_count(), Some(4));
    assert_eq!(projected.count(), 4);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_select_reverse_is_native_and_lazy() {
    let seen = RefCell::new(Vec::new());
    let projected = stream(vec![1, 2, 3]).select(|x| {
        seen.borrow_mut().push(x);
        x * 2
    });

    assert_eq!(projected.reverse().first(), Ok(6));
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn test_skip_then_take() {
    let result = stream(vec![1, 2, 3, 4, 5])
        .skip(2)
        .unwrap()
        .take(2)
        .unwrap()
        .to_list();
    assert_eq!(result, vec![3, 4]);
}

#[test]
fn test_take_zero_is_empty() {
    let taken = stream(vec![1, 2, 3]).take(0).unwrap();
    assert!(taken.to_list().is_empty());
    assert_eq!(taken.known_count(), Some(0));
}

#[test]
fn test_take_more_than_available() {
    let taken = stream(vec![1, 2, 3]).take(10).unwrap();
    assert_eq!(taken.to_list(), vec![1, 2, 3]);
    assert_eq!(taken.count(), 3);
}

#[test]
fn test_take_stops_pulling_upstream() {
    let pulls = Cell::new(0);
    let taken = stream(vec![1, 2, 3, 4, 5])
        .select(|x| {
            pulls.set(pulls.get() + 1);
            x
        })
        .take(2)
        .unwrap();

    assert_eq!(taken.to_list(), vec![1, 2]);
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_take_zero_count_known_even_for_unknown_upstream() {
    let taken = stream(vec![1, 2, 3]).filter(|_| true).take(0).unwrap();
    assert_eq!(taken.known_count(), Some(0));
}

#[test]
fn test_skip_past_end_is_empty() {
    let skipped = stream(vec![1, 2, 3]).skip(5).unwrap();
    assert!(skipped.to_list().is_empty());
    assert_eq!(skipped.count(), 0);
}

#[test]
fn test_skip_count_known_without_iterating() {
    let pulls = Cell::new(0);
    let skipped = stream(vec![1, 2, 3, 4, 5])
        .select(|x| {
            pulls.set(pulls.get() + 1);
            x
        })
        .skip(2)
        .unwrap();

    assert_eq!(skipped.count(), 3);
    assert_eq!(pulls.get(), 0);
}

#[test]
fn test_skip_count_unknown_upstream_iterates() {
    let skipped = stream(vec![1, 2, 3, 4, 5, 6]).filter(|x| x % 2 == 0).skip(1).unwrap();
    assert_eq!(skipped.known_count(), None);
    assert_eq!(skipped.count(), 2);
}

#[test]
fn test_take_and_skip_reverse() {
    let taken = stream(vec![1, 2, 3, 4, 5]).take(3).unwrap();
    assert_eq!(taken.reverse().to_list(), vec![3, 2, 1]);

    let skipped = stream(vec![1, 2, 3, 4, 5]).skip(3).unwrap();
    assert_eq!(skipped.last(), Ok(5));
    assert_eq!(skipped.reverse().to_list(), vec![5, 4]);
}

#[test]
fn test_negative_counts_are_rejected() {
    assert!(matches!(stream(vec![1]).take(-1), Err(QueryError::InvalidArgument(_))));
    assert!(matches!(stream(vec![1]).skip(-3), Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_reverse_list() {
    assert_eq!(stream(vec![1, 2, 3]).reverse().to_list(), vec![3, 2, 1]);
}

#[test]
fn test_double_reverse_is_identity() {
    let twice = stream(vec![4, 8, 15, 16, 23, 42]).reverse().reverse();
    assert_eq!(twice.to_list(), vec![4, 8, 15, 16, 23, 42]);
}

#[test]
fn test_reverse_of_forward_only_source_materializes() {
    let reversed = from_iter(1..=4).reverse();
    assert_eq!(reversed.to_list(), vec![4, 3, 2, 1]);
    assert_eq!(reversed.last(), Ok(1));
}

#[test]
fn test_reverse_preserves_known_count() {
    let reversed = stream(vec!['a', 'b', 'c']).reverse();
    assert_eq!(reversed.known_count(), Some(3));
    assert_eq!(reversed.into_inner().to_list(), vec!['a', 'b', 'c']);
}

#[test]
fn test_borrowed_stream_is_not_consumed() {
    let numbers = stream(vec![1, 2, 3]);
    let doubled = (&numbers).select(|x| x * 2).to_list();
    let odd = (&numbers).filter(|x| x % 2 == 1).to_list();

    assert_eq!(doubled, vec![2, 4, 6]);
    assert_eq!(odd, vec![1, 3]);
    assert_eq!(numbers.count(), 3);
}

#[test]
fn test_stream_is_reiterable() {
    let pipeline = stream(vec![5, 6, 7]).select(|x| x - 5).filter(|x| *x > 0);
    assert_eq!(pipeline.to_list(), vec![1, 2]);
    assert_eq!(pipeline.to_list(), vec![1, 2]);
}

#[test]
fn test_slice_pipeline_yields_references() {
    let words = ["apple", "kiwi", "banana"];
    let long: Vec<&&str> = stream(&words).filter(|w| w.len() > 4).to_list();
    assert_eq!(long, vec![&"apple", &"banana"]);
}
