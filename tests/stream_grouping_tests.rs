use rs2_query::*;
use std::cell::Cell;

fn pairs() -> Vec<(&'static str, i32)> {
    vec![("a", 1), ("b", 2), ("a", 3)]
}

fn flatten<K: Clone, E: Clone>(groups: Vec<Grouping<K, E>>) -> Vec<(K, Vec<E>)> {
    groups
        .into_iter()
        .map(|group| {
            let (key, elements) = group.into_parts();
            (key, elements.into_vec())
        })
        .collect()
}

#[test]
fn test_group_by_with_element_selector() {
    let groups = stream(pairs()).group_by_with(|p| p.0, |p| p.1).to_list();
    assert_eq!(flatten(groups), vec![("a", vec![1, 3]), ("b", vec![2])]);
}

#[test]
fn test_group_by_keeps_whole_elements() {
    let groups = stream(pairs()).group_by(|p| p.0).to_list();
    assert_eq!(
        flatten(groups),
        vec![("a", vec![("a", 1), ("a", 3)]), ("b", vec![("b", 2)])]
    );
}

#[test]
fn test_group_keys_in_first_seen_order() {
    let keys: Vec<i32> = stream(vec![5, 12, 3, 27, 14, 8])
        .group_by(|n| n / 10)
        .select(|group| *group.key())
        .to_list();
    assert_eq!(keys, vec![0, 1, 2]);
}

#[test]
fn test_group_elements_are_streams() {
    let groups = stream(vec!["apple", "avocado", "banana", "blueberry", "cherry"])
        .group_by(|w| w.chars().next())
        .to_list();

    let b = &groups[1];
    assert_eq!(b.key(), &Some('b'));
    assert_eq!(b.len(), 2);
    assert_eq!(b.elements().filter(|w| w.starts_with("bl")).to_list(), vec!["blueberry"]);
    assert_eq!(b.elements().last(), Ok("blueberry"));
    assert!(!groups[2].is_empty());
}

#[test]
fn test_group_by_empty_stream() {
    let groups = empty::<i32>().group_by(|n| *n);
    assert!(!groups.any());
    assert_eq!(groups.count(), 0);
}

#[test]
fn test_group_by_reverse_reverses_groups_only() {
    let reversed = stream(pairs())
        .group_by_with(|p| p.0, |p| p.1)
        .reverse()
        .to_list();
    assert_eq!(flatten(reversed), vec![("b", vec![2]), ("a", vec![1, 3])]);
}

#[test]
fn test_group_by_reruns_upstream_each_pass() {
    let pulls = Cell::new(0);
    let groups = stream(pairs())
        .select(|p| {
            pulls.set(pulls.get() + 1);
            p
        })
        .group_by(|p| p.0);

    assert_eq!(pulls.get(), 0);
    assert_eq!(groups.count(), 2);
    assert_eq!(pulls.get(), 3);
    assert_eq!(groups.first().map(|g| g.len()), Ok(2));
    assert_eq!(pulls.get(), 6);
}

#[test]
fn test_grouping_serializes_as_key_and_elements() {
    let group = stream(pairs())
        .group_by_with(|p| p.0, |p| p.1)
        .first()
        .unwrap();
    let json = serde_json::to_string(&group).unwrap();
    assert_eq!(json, r#"{"key":"a","elements":[1,3]}"#);

    let back: Grouping<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.key(), "a");
    assert_eq!(back.elements().to_list(), vec![1, 3]);
}

#[test]
fn test_group_then_order_by_size() {
    let words = vec!["one", "two", "three", "four", "five", "six", "seven"];
    let by_size = stream(words)
        .group_by(|w| w.len())
        .order_by_descending(|g| g.len())
        .then_by(|g| *g.key())
        .select(|g| (*g.key(), g.len()))
        .to_list();
    assert_eq!(by_size, vec![(3, 3), (4, 2), (5, 2)]);
}

#[test]
fn test_group_by_over_borrowed_slice() {
    let scores = [("ana", 7), ("bia", 4), ("ana", 9), ("caio", 5), ("bia", 6)];
    let totals: Vec<(&str, i32)> = stream(&scores)
        .group_by(|s| s.0)
        .select(|g| (*g.key(), g.elements().sum(|s| s.1)))
        .to_list();
    assert_eq!(totals, vec![("ana", 16), ("bia", 10), ("caio", 5)]);
}

#[test]
fn test_group_by_with_buffer_config() {
    let config = BufferConfig::new().initial_capacity(1);
    let groups = stream(vec![1, 2, 3, 4, 5, 6])
        .group_by(|n| n % 3)
        .with_buffer_config(config)
        .select(|g| g.elements().to_list())
        .to_list();
    assert_eq!(groups, vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
}
