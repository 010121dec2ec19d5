mod helpers;

use std::collections::HashSet;

use helpers::open_store;

#[tokio::test]
async fn two_candidates_alternate_within_each_round() {
    let (store, _) = open_store(&["Alice: first", "Alice: second", "Bob: other"]).await;

    let picks: Vec<usize> = (0..10)
        .map(|_| store.quote_by("alice").unwrap().index())
        .collect();

    // Every round of two serves both quotes before the history resets
    for round in picks.chunks(2) {
        let distinct: HashSet<_> = round.iter().collect();
        assert_eq!(distinct.len(), 2, "round {round:?} repeated a quote");
    }
    assert!(picks.iter().all(|i| *i == 1 || *i == 2));
}

#[tokio::test]
async fn random_quote_cycles_whole_corpus() {
    let lines: Vec<String> = (1..=20).map(|i| format!("Person{i}: line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (store, _) = open_store(&refs).await;

    let first_cycle: HashSet<usize> = (0..20)
        .map(|_| store.random_quote().unwrap().index())
        .collect();
    assert_eq!(first_cycle.len(), 20);
    assert_eq!(store.recently_served_count(), 20);

    store.random_quote().unwrap();
    assert_eq!(store.recently_served_count(), 1);
}

#[tokio::test]
async fn history_is_shared_between_author_and_subject_lookups() {
    let (store, _) = open_store(&["Alice: cats are great", "Bob: cats are fine"]).await;

    let by_author = store.quote_by("alice").unwrap();
    assert_eq!(by_author.index(), 1);

    // Alice's quote was just served, so the subject lookup must pick Bob's
    let about = store.quote_about("cats").unwrap();
    assert_eq!(about.index(), 2);
}

#[tokio::test]
async fn single_candidate_is_always_served() {
    let (store, _) = open_store(&["Alice: only one"]).await;
    for _ in 0..5 {
        assert_eq!(store.quote_by("alice").unwrap().index(), 1);
    }
    assert_eq!(store.recently_served_count(), 1);
}
