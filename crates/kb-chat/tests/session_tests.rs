use std::sync::Arc;
use std::thread;

use kb_chat::{Role, SessionStore};

#[test]
fn oldest_turns_are_dropped_first() {
    let store = SessionStore::new(3);
    for i in 0..5 {
        store.append("a", Role::User, format!("m{i}")).unwrap();
    }
    let contents: Vec<String> = store.history("a").unwrap().into_iter().map(|t| t.content).collect();
    assert_eq!(contents, vec!["m2", "m3", "m4"]);
}

#[test]
fn sessions_are_isolated() {
    let store = SessionStore::new(10);
    store.append("a", Role::User, "hello").unwrap();
    store.append("a", Role::Assistant, "hi there").unwrap();
    store.append("b", Role::User, "other").unwrap();

    assert_eq!(store.turns("a").unwrap(), 2);
    assert_eq!(store.turns("b").unwrap(), 1);
    assert_eq!(store.last_assistant_turn("a").unwrap().as_deref(), Some("hi there"));
    assert_eq!(store.last_assistant_turn("b").unwrap(), None);
    assert_eq!(store.session_count().unwrap(), 2);

    assert!(store.clear("a").unwrap());
    assert!(!store.clear("a").unwrap());
    assert_eq!(store.history("a").unwrap(), vec![]);
}

#[test]
fn zero_capacity_still_keeps_the_latest_turn() {
    let store = SessionStore::new(0);
    assert_eq!(store.capacity(), 1);
    store.append("a", Role::User, "one").unwrap();
    assert_eq!(store.append("a", Role::User, "two").unwrap(), 1);
}

#[test]
fn concurrent_appends_respect_the_cap() {
    let store = Arc::new(SessionStore::new(8));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let n = store.append("shared", Role::User, format!("{t}-{i}")).unwrap();
                    assert!(n <= 8);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.turns("shared").unwrap(), 8);
}

#[test]
fn least_recently_used_session_is_dropped_past_the_bound() {
    let store = SessionStore::new(4).with_max_sessions(2);
    store.append("a", Role::User, "first").unwrap();
    store.append("b", Role::User, "second").unwrap();
    store.append("a", Role::Assistant, "reply").unwrap();
    store.append("c", Role::User, "third").unwrap();

    assert_eq!(store.session_count().unwrap(), 2);
    assert_eq!(store.turns("b").unwrap(), 0);
    assert_eq!(store.turns("a").unwrap(), 2);
    assert_eq!(store.turns("c").unwrap(), 1);

    // Appending to a known session never evicts.
    store.append("a", Role::User, "again").unwrap();
    assert_eq!(store.turns("c").unwrap(), 1);
}

#[test]
fn session_bound_is_at_least_one() {
    let store = SessionStore::new(4).with_max_sessions(0);
    assert_eq!(store.max_sessions(), 1);
    store.append("a", Role::User, "one").unwrap();
    store.append("b", Role::User, "two").unwrap();
    assert_eq!(store.session_count().unwrap(), 1);
    assert_eq!(store.turns("b").unwrap(), 1);
}
