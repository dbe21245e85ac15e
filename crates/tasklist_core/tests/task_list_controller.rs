use tasklist_core::{
    ControllerError, DispatchOutcome, RowChange, StoreSession, StoreTarget, TaskIntent,
    TaskListController,
};

fn empty_controller() -> TaskListController {
    TaskListController::load(StoreSession::new(StoreTarget::InMemory))
}

fn add(controller: &mut TaskListController, title: &str) -> DispatchOutcome {
    controller
        .dispatch(TaskIntent::Add(title.to_string()))
        .unwrap()
}

fn stored_titles(controller: &mut TaskListController) -> Vec<String> {
    controller
        .session_mut()
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect()
}

#[test]
fn add_appends_one_row_with_the_given_text() {
    let mut controller = empty_controller();
    add(&mut controller, "first");

    for text in ["Buy milk", " ", "ünïcödé ✓", "a much longer title with spaces"] {
        let before = controller.len();
        let outcome = add(&mut controller, text);

        assert_eq!(outcome.row_change(), Some(RowChange::Inserted(before)));
        assert_eq!(controller.len(), before + 1);
        assert_eq!(controller.title_at(before), Some(text));
    }
    assert_eq!(stored_titles(&mut controller), controller.titles());
}

#[test]
fn add_with_empty_text_changes_nothing() {
    let mut controller = empty_controller();
    add(&mut controller, "only");

    let outcome = add(&mut controller, "");
    assert!(matches!(outcome, DispatchOutcome::Ignored));
    assert_eq!(controller.titles(), ["only"]);
    assert!(!controller.session_mut().has_changes());
}

#[test]
fn edit_changes_only_the_target_row() {
    let mut controller = empty_controller();
    for title in ["a", "b", "c"] {
        add(&mut controller, title);
    }
    let ids_before = controller
        .tasks()
        .iter()
        .map(|task| task.uuid)
        .collect::<Vec<_>>();

    let outcome = controller
        .dispatch(TaskIntent::Edit(1, "B".to_string()))
        .unwrap();

    assert_eq!(outcome.row_change(), Some(RowChange::Reloaded));
    assert_eq!(controller.titles(), ["a", "B", "c"]);
    let ids_after = controller
        .tasks()
        .iter()
        .map(|task| task.uuid)
        .collect::<Vec<_>>();
    assert_eq!(ids_before, ids_after);
    assert_eq!(stored_titles(&mut controller), ["a", "B", "c"]);
}

#[test]
fn edit_with_empty_text_is_ignored() {
    let mut controller = empty_controller();
    add(&mut controller, "keep me");

    let outcome = controller.dispatch(TaskIntent::Edit(0, String::new())).unwrap();
    assert!(matches!(outcome, DispatchOutcome::Ignored));
    assert_eq!(controller.titles(), ["keep me"]);
}

#[test]
fn delete_removes_exactly_the_target_and_preserves_order() {
    let mut controller = empty_controller();
    for title in ["a", "b", "c", "d"] {
        add(&mut controller, title);
    }
    let removed = controller.tasks()[2].uuid;

    let outcome = controller.dispatch(TaskIntent::Delete(2)).unwrap();

    assert_eq!(outcome.row_change(), Some(RowChange::Deleted(2)));
    assert_eq!(controller.titles(), ["a", "b", "d"]);
    assert!(controller.tasks().iter().all(|task| task.uuid != removed));
    assert_eq!(stored_titles(&mut controller), ["a", "b", "d"]);
}

#[test]
fn out_of_range_rows_are_errors_and_change_nothing() {
    let mut controller = empty_controller();
    add(&mut controller, "a");

    let err = controller.dispatch(TaskIntent::Delete(1)).unwrap_err();
    assert!(matches!(err, ControllerError::IndexOutOfRange { index: 1, len: 1 }));

    let err = controller
        .dispatch(TaskIntent::Edit(5, "x".to_string()))
        .unwrap_err();
    assert!(matches!(err, ControllerError::IndexOutOfRange { index: 5, len: 1 }));
    assert_eq!(controller.titles(), ["a"]);
}

#[test]
fn walkthrough_add_add_edit_delete() {
    let mut controller = empty_controller();
    assert!(controller.is_empty());

    add(&mut controller, "Buy milk");
    assert_eq!(controller.titles(), ["Buy milk"]);

    add(&mut controller, "Call mom");
    assert_eq!(controller.titles(), ["Buy milk", "Call mom"]);

    controller
        .dispatch(TaskIntent::Edit(0, "Buy oat milk".to_string()))
        .unwrap();
    assert_eq!(controller.titles(), ["Buy oat milk", "Call mom"]);

    controller.dispatch(TaskIntent::Delete(1)).unwrap();
    assert_eq!(controller.titles(), ["Buy oat milk"]);
    assert_eq!(stored_titles(&mut controller), ["Buy oat milk"]);
}

#[test]
fn added_task_is_listed_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let mut controller = TaskListController::load(StoreSession::new(StoreTarget::File(path.clone())));
    add(&mut controller, "X");
    drop(controller);

    let restarted = TaskListController::load(StoreSession::new(StoreTarget::File(path)));
    assert!(restarted.titles().contains(&"X"));
}

#[test]
fn failed_save_keeps_list_and_store_in_step() {
    let mut controller = empty_controller();
    add(&mut controller, "saved");
    controller
        .session_mut()
        .connection()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_inserts BEFORE INSERT ON tasks
             BEGIN
                 SELECT RAISE(ABORT, 'store is read-only');
             END;",
        )
        .unwrap();

    let outcome = add(&mut controller, "rejected");

    assert!(matches!(outcome, DispatchOutcome::RolledBack(_)));
    assert_eq!(outcome.row_change(), None);
    assert_eq!(controller.titles(), ["saved"]);
    assert!(!controller.session_mut().has_changes());
    assert_eq!(stored_titles(&mut controller), ["saved"]);
}

#[test]
fn failed_delete_keeps_row_in_list_and_store() {
    let mut controller = empty_controller();
    add(&mut controller, "a");
    add(&mut controller, "b");
    controller
        .session_mut()
        .connection()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_deletes BEFORE DELETE ON tasks
             BEGIN
                 SELECT RAISE(ABORT, 'store is read-only');
             END;",
        )
        .unwrap();

    let outcome = controller.dispatch(TaskIntent::Delete(1)).unwrap();

    assert!(matches!(outcome, DispatchOutcome::RolledBack(_)));
    assert_eq!(outcome.row_change(), None);
    assert_eq!(controller.titles(), ["a", "b"]);
    assert!(!controller.session_mut().has_changes());
    assert_eq!(stored_titles(&mut controller), ["a", "b"]);
}

#[test]
fn load_failure_starts_with_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file where a directory should be").unwrap();

    let controller =
        TaskListController::load(StoreSession::new(StoreTarget::File(blocker.join("t.db"))));
    assert!(controller.is_empty());
}

#[test]
fn reload_picks_up_rows_written_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let mut viewer = TaskListController::load(StoreSession::new(StoreTarget::File(path.clone())));
    let mut writer = TaskListController::load(StoreSession::new(StoreTarget::File(path)));
    add(&mut writer, "from writer");

    assert!(viewer.is_empty());
    viewer.reload().unwrap();
    assert_eq!(viewer.titles(), ["from writer"]);
}
