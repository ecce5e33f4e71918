//! Integration tests for shelfr
//!
//! These tests verify end-to-end search and mutation workflows against an
//! in-memory store standing in for the catalog service.

use shelfr::catalog::{CatalogEntry, EntryDraft, NewEntry};
use shelfr::remote::{CatalogStore, Confirmation, RemoteError, Result as RemoteResult};
use shelfr::search;
use shelfr::session::{CatalogViewState, QueryController, SearchOutcome, mutation};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// In-memory catalog service
///
/// Search is deliberately generous (any shared character makes a candidate)
/// so the client-side subsequence narrowing has real work to do.
struct InMemoryStore {
    entries: Mutex<Vec<CatalogEntry>>,
    next_id: AtomicU64,
    fail_searches: AtomicBool,
}

impl InMemoryStore {
    fn seed(titles: &[(&str, u32)]) -> Self {
        let entries: Vec<CatalogEntry> = titles
            .iter()
            .enumerate()
            .map(|(i, (title, location))| CatalogEntry::new(i as u64 + 1, *title, *location))
            .collect();
        let next_id = entries.len() as u64 + 1;
        Self {
            entries: Mutex::new(entries),
            next_id: AtomicU64::new(next_id),
            fail_searches: AtomicBool::new(false),
        }
    }

    fn titles(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect()
    }
}

impl CatalogStore for InMemoryStore {
    fn search(&self, query: &str) -> RemoteResult<Vec<CatalogEntry>> {
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected("search unavailable".to_string()));
        }
        let needles: Vec<char> = query
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|e| {
                let hay = e.title.to_lowercase();
                needles.iter().any(|c| hay.contains(*c))
            })
            .cloned()
            .collect())
    }

    fn create(&self, entry: &NewEntry) -> RemoteResult<CatalogEntry> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = CatalogEntry::new(id, entry.title.clone(), entry.location);
        self.entries.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    fn update(&self, id: u64, fields: &NewEntry) -> RemoteResult<Confirmation> {
        let mut entries = self.entries.lock().unwrap();
        let Some(slot) = entries.iter_mut().find(|e| e.id == id) else {
            return Err(RemoteError::Rejected("Book not found".to_string()));
        };
        slot.title = fields.title.clone();
        slot.location = fields.location;
        Ok(Confirmation {
            message: "Book updated successfully".to_string(),
        })
    }

    fn delete(&self, id: u64) -> RemoteResult<Confirmation> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(RemoteError::Rejected("Book not found".to_string()));
        }
        Ok(Confirmation {
            message: "Book deleted successfully".to_string(),
        })
    }
}

fn library_store() -> InMemoryStore {
    InMemoryStore::seed(&[
        ("해리포터", 3),
        ("해변의 카프카", 7),
        ("Harry Potter", 4),
        ("Dune", 5),
        ("Dune Messiah", 6),
    ])
}

/// Drive one complete search round: edit, wait out the window, apply the
/// store's answer. Returns the instant the request fired at.
fn run_search_round(
    controller: &mut QueryController,
    view: &mut CatalogViewState,
    store: &dyn CatalogStore,
    text: &str,
    now: Instant,
) -> Instant {
    controller.set_query(text, now);
    let fired_at = now + DEBOUNCE + Duration::from_millis(50);
    let request = controller.poll_due(fired_at).expect("window elapsed");
    match controller.apply_response(request.seq, store.search(&request.query)) {
        SearchOutcome::Results(entries) => view.replace_results(entries),
        SearchOutcome::Failed(_) => view.clear_results(),
        SearchOutcome::Stale => {}
    }
    fired_at
}

#[test]
fn test_korean_query_round_trip_with_highlighting() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();

    run_search_round(&mut controller, &mut view, &store, "해리", Instant::now());

    // "해변의 카프카" shares 해 but has no 리 after it; only 해리포터 survives
    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["해리포터"]);

    let pieces = search::spans(&view.results()[0].title, "해리");
    assert_eq!(
        pieces
            .iter()
            .filter(|s| s.matched)
            .map(|s| s.text)
            .collect::<Vec<_>>(),
        vec!["해", "리"]
    );
    let reconstructed: String = pieces.iter().map(|s| s.text).collect();
    assert_eq!(reconstructed, "해리포터");
}

#[test]
fn test_case_and_whitespace_insensitive_matching() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();

    run_search_round(&mut controller, &mut view, &store, "h p", Instant::now());

    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Harry Potter"]);
}

#[test]
fn test_keystroke_burst_issues_one_request_with_final_text() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let t0 = Instant::now();

    controller.set_query("d", t0);
    controller.set_query("du", t0 + Duration::from_millis(100));
    controller.set_query("dun", t0 + Duration::from_millis(200));

    // The window re-arms on every keystroke, so nothing fires before the
    // last edit's quiet period elapses
    assert!(controller.poll_due(t0 + Duration::from_millis(450)).is_none());

    let request = controller.poll_due(t0 + Duration::from_millis(510)).unwrap();
    assert_eq!(request.query, "dun");
    assert!(controller.poll_due(t0 + Duration::from_millis(600)).is_none());

    let outcome = controller.apply_response(request.seq, store.search(&request.query));
    let SearchOutcome::Results(entries) = outcome else {
        panic!("expected results");
    };
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
}

#[test]
fn test_stale_round_never_overwrites_newer_results() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();
    let t0 = Instant::now();

    controller.set_query("du", t0);
    let first = controller.poll_due(t0 + Duration::from_millis(350)).unwrap();
    let first_answer = store.search(&first.query);

    controller.set_query("dune m", t0 + Duration::from_millis(400));
    let second = controller.poll_due(t0 + Duration::from_millis(750)).unwrap();
    let second_answer = store.search(&second.query);

    // The newer round lands first; the older reply must then be dropped
    match controller.apply_response(second.seq, second_answer) {
        SearchOutcome::Results(entries) => view.replace_results(entries),
        other => panic!("expected results, got {other:?}"),
    }
    assert_eq!(
        controller.apply_response(first.seq, first_answer),
        SearchOutcome::Stale
    );

    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Messiah"]);
}

#[test]
fn test_blank_query_clears_without_a_request() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();
    let t0 = Instant::now();

    run_search_round(&mut controller, &mut view, &store, "du", t0);
    assert_eq!(view.results().len(), 2);

    // An in-flight request at the time of clearing must go stale
    controller.set_query("dune", t0 + Duration::from_millis(800));
    let pending = controller
        .poll_due(t0 + Duration::from_millis(1150))
        .unwrap();

    controller.set_query("   ", t0 + Duration::from_millis(1200));
    view.clear_results();

    assert!(view.results().is_empty());
    assert!(!controller.in_flight());
    assert!(controller.poll_due(t0 + Duration::from_secs(5)).is_none());
    assert_eq!(
        controller.apply_response(pending.seq, store.search(&pending.query)),
        SearchOutcome::Stale
    );
}

#[test]
fn test_failed_search_falls_back_to_empty() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();
    let t0 = Instant::now();

    run_search_round(&mut controller, &mut view, &store, "du", t0);
    assert_eq!(view.results().len(), 2);

    store.fail_searches.store(true, Ordering::SeqCst);
    controller.set_query("dune", t0 + Duration::from_millis(800));
    let request = controller
        .poll_due(t0 + Duration::from_millis(1150))
        .unwrap();
    let outcome = controller.apply_response(request.seq, store.search(&request.query));

    let SearchOutcome::Failed(reason) = outcome else {
        panic!("expected failure");
    };
    assert!(reason.contains("search unavailable"));
    view.clear_results();
    assert!(view.results().is_empty());
}

#[test]
fn test_add_flow_after_no_match() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();
    view.set_admin_mode(true);
    let t0 = Instant::now();

    let fired = run_search_round(&mut controller, &mut view, &store, "solaris", t0);
    assert!(view.results().is_empty());
    assert!(view.can_add("solaris"));

    let mut draft = EntryDraft::from_title("Solaris");
    draft.location = Some(2);
    view.open_draft(draft);

    let entry = mutation::create_from_draft(&store, &mut view).unwrap();
    assert!(entry.is_persisted());
    assert_eq!(view.results().len(), 1);
    assert!(view.editor().is_idle());

    // The entry is now part of the store's catalog
    run_search_round(
        &mut controller,
        &mut view,
        &store,
        "solaris",
        fired + Duration::from_secs(1),
    );
    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Solaris"]);
}

#[test]
fn test_delete_flow_removes_entry_everywhere() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();
    view.set_admin_mode(true);
    let t0 = Instant::now();

    let fired = run_search_round(&mut controller, &mut view, &store, "dune", t0);
    assert_eq!(view.results().len(), 2);
    let dune_id = view.results()[0].id;

    mutation::delete(&store, &mut view, dune_id).unwrap();
    assert_eq!(view.results().len(), 1);
    assert!(!store.titles().contains(&"Dune".to_string()));

    run_search_round(
        &mut controller,
        &mut view,
        &store,
        "dune",
        fired + Duration::from_secs(1),
    );
    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Messiah"]);
}

#[test]
fn test_update_flow_rewrites_title_in_place() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();

    run_search_round(&mut controller, &mut view, &store, "dune", Instant::now());
    let target = view.results()[0].clone();
    view.open_edit(target.clone());

    let renamed = CatalogEntry::new(target.id, "Dune (1965)", 9);
    let confirmation = mutation::update(&store, &mut view, &renamed).unwrap();
    assert_eq!(confirmation.message, "Book updated successfully");

    // Position preserved, fields replaced, editor released
    assert_eq!(view.results()[0].title, "Dune (1965)");
    assert_eq!(view.results()[0].location, 9);
    assert_eq!(view.results()[1].title, "Dune Messiah");
    assert!(view.editor().is_idle());
    assert!(store.titles().contains(&"Dune (1965)".to_string()));
}

#[test]
fn test_failed_update_leaves_view_untouched() {
    let store = library_store();
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();

    run_search_round(&mut controller, &mut view, &store, "dune", Instant::now());
    let before = view.results().to_vec();
    view.open_edit(before[0].clone());

    let missing = CatalogEntry::new(999, "Ghost", 1);
    let err = mutation::update(&store, &mut view, &missing).unwrap_err();
    assert!(err.to_string().contains("Book not found"));

    assert_eq!(view.results(), &before[..]);
    assert!(!view.editor().is_idle());
}

#[test]
fn test_store_order_is_preserved() {
    let store = InMemoryStore::seed(&[("abc", 1), ("cab", 2), ("bca", 3), ("aabbcc", 4)]);
    let mut controller = QueryController::new(DEBOUNCE);
    let mut view = CatalogViewState::new();

    run_search_round(&mut controller, &mut view, &store, "abc", Instant::now());

    // Narrowing keeps the store's ordering: no re-ranking happens locally
    let titles: Vec<&str> = view.results().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["abc", "aabbcc"]);
}
