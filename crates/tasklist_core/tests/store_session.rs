use rusqlite::Connection;
use std::time::Duration;
use tasklist_core::{
    CommitOutcome, PendingChange, SessionError, StoreSession, StoreTarget, Task,
};

const REJECT_INSERTS_SQL: &str = "CREATE TRIGGER reject_inserts BEFORE INSERT ON tasks
BEGIN
    SELECT RAISE(ABORT, 'store is read-only');
END;";

#[test]
fn session_opens_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let mut session = StoreSession::new(StoreTarget::File(path.clone()));
    assert!(!session.is_open());
    assert!(!path.exists());

    assert!(session.fetch_all().unwrap().is_empty());
    assert!(session.is_open());
    assert!(path.exists());
}

#[test]
fn commit_without_changes_is_clean_and_does_not_open_store() {
    let mut session = StoreSession::new(StoreTarget::InMemory);

    assert_eq!(session.commit().unwrap(), CommitOutcome::Clean);
    assert_eq!(session.commit().unwrap(), CommitOutcome::Clean);
    assert!(!session.is_open());
}

#[test]
fn staged_changes_are_visible_before_commit() {
    let mut session = StoreSession::new(StoreTarget::InMemory);
    let task = Task::new("pending").unwrap();

    session.insert(task.clone());
    assert!(session.has_changes());
    assert_eq!(session.pending_changes(), [PendingChange::Insert(task.clone())]);
    assert_eq!(session.fetch_all().unwrap(), vec![task]);
}

#[test]
fn commit_writes_all_staged_changes_in_order() {
    let mut session = StoreSession::new(StoreTarget::InMemory);
    let mut keep = Task::new("keep").unwrap();
    let drop_me = Task::new("drop").unwrap();

    session.insert(keep.clone());
    session.insert(drop_me.clone());
    keep.rename("kept");
    session.update(keep.clone());
    session.delete(drop_me.uuid);

    assert_eq!(
        session.commit().unwrap(),
        CommitOutcome::Saved { changes: 4 }
    );
    assert!(!session.has_changes());
    assert_eq!(session.fetch_all().unwrap(), vec![keep]);
    assert_eq!(session.commit().unwrap(), CommitOutcome::Clean);
}

#[test]
fn rollback_discards_staged_changes() {
    let mut session = StoreSession::new(StoreTarget::InMemory);
    session.insert(Task::new("never saved").unwrap());

    session.rollback();
    assert!(!session.has_changes());
    assert!(session.fetch_all().unwrap().is_empty());
}

#[test]
fn failed_commit_rolls_back_transaction_and_clears_working_context() {
    let mut session = StoreSession::new(StoreTarget::InMemory);
    let saved = Task::new("saved").unwrap();
    session.insert(saved.clone());
    session.commit().unwrap();

    let mut renamed = saved.clone();
    renamed.rename("renamed");
    session.update(renamed);
    session.insert(Task::new("rejected").unwrap());
    session
        .connection()
        .unwrap()
        .execute_batch(REJECT_INSERTS_SQL)
        .unwrap();

    let err = session.commit().unwrap_err();
    assert!(matches!(err, SessionError::Repo(_)), "unexpected error: {err}");
    assert!(!session.has_changes());
    assert_eq!(session.fetch_all().unwrap(), vec![saved]);
}

#[test]
fn commit_against_locked_store_fails_fast_and_leaves_rows_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let mut session = StoreSession::new(StoreTarget::File(path.clone()));
    session.connection().unwrap().busy_timeout(Duration::ZERO).unwrap();

    let writer = Connection::open(&path).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();

    session.insert(Task::new("blocked").unwrap());
    let error = session.commit().unwrap_err();
    assert!(matches!(error, SessionError::Repo(_)));
    assert!(!session.has_changes());

    writer.execute_batch("ROLLBACK;").unwrap();
    assert!(session.fetch_all().unwrap().is_empty());

    session.insert(Task::new("after unlock").unwrap());
    assert_eq!(
        session.commit().unwrap(),
        CommitOutcome::Saved { changes: 1 }
    );
    let titles: Vec<String> = session
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, ["after unlock"]);
}

#[test]
fn commit_of_unknown_task_update_fails_with_not_found() {
    let mut session = StoreSession::new(StoreTarget::InMemory);
    session.update(Task::new("ghost").unwrap());

    let err = session.commit().unwrap_err();
    assert!(err.to_string().contains("task not found"), "unexpected error: {err}");
}

#[test]
fn open_failure_is_reported_and_retried_on_next_access() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let mut session = StoreSession::new(StoreTarget::File(blocker.join("tasks.sqlite3")));
    let err = session.fetch_all().unwrap_err();
    assert!(matches!(err, SessionError::Open(_)));
    assert!(!session.is_open());

    std::fs::remove_file(&blocker).unwrap();
    assert!(session.fetch_all().unwrap().is_empty());
    assert!(session.is_open());
}

#[test]
fn saved_tasks_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let task = Task::new("X").unwrap();

    let mut session = StoreSession::new(StoreTarget::File(path.clone()));
    session.insert(task.clone());
    session.commit().unwrap();
    drop(session);

    let mut reopened = StoreSession::new(StoreTarget::File(path));
    assert_eq!(reopened.fetch_all().unwrap(), vec![task]);
}
