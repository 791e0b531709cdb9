//! Item, view, settings and notification tool tests
mod common;

use chrono::{Duration, NaiveDate};
use common::{add, days_from_today, get_test_handler};
use progress_mcp::tracker::DATE_FMT;
use progress_mcp::TrackerServerHandler;
use tempfile::TempDir;

#[tokio::test]
async fn test_add_and_list() {
    let (handler, _dir) = get_test_handler();

    let response = handler
        .handle_add_item(
            "  Essay ".to_string(),
            Some(2.0),
            Some("2030-03-15".to_string()),
            Some(3.5),
            Some("english; writing".to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(response, "Item #1 added: Essay");

    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.starts_with("Found 1 item(s):"));
    assert!(list.contains(
        "- [#1] Essay (status: Not started, done: no, weight: 2.00, est: 3.5h, due: 2030-03-15)"
    ));
    assert!(list.contains("  Tags: english, writing"));
}

#[tokio::test]
async fn test_add_rejects_invalid_fields() {
    let (handler, _dir) = get_test_handler();

    let empty = handler
        .handle_add_item("   ".to_string(), None, None, None, None, None, None)
        .await;
    assert!(empty.is_err());

    let zero_weight = handler
        .handle_add_item("a".to_string(), Some(0.0), None, None, None, None, None)
        .await;
    assert!(zero_weight.is_err());

    let negative_hours = handler
        .handle_add_item("a".to_string(), None, None, Some(-1.0), None, None, None)
        .await;
    assert!(negative_hours.is_err());

    let bad_date = handler
        .handle_add_item(
            "a".to_string(),
            None,
            Some("15/03/2030".to_string()),
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(bad_date.is_err());

    let bad_status = handler
        .handle_add_item(
            "a".to_string(),
            None,
            None,
            None,
            None,
            Some("Waiting".to_string()),
            None,
        )
        .await;
    assert!(bad_status.is_err());

    let list = handler.handle_list_items(None, None).await.unwrap();
    assert_eq!(list, "No items found");
}

#[tokio::test]
async fn test_progress_label() {
    let (handler, _dir) = get_test_handler();
    handler
        .handle_add_item(
            "Lab".to_string(),
            Some(2.0),
            Some("2024-01-10".to_string()),
            Some(3.0),
            None,
            None,
            Some(true),
        )
        .await
        .unwrap();
    handler
        .handle_add_item("Quiz".to_string(), None, None, Some(1.0), None, None, None)
        .await
        .unwrap();

    let progress = handler.handle_progress().await.unwrap();
    assert_eq!(
        progress,
        "66.7% (2.0 / 3.0 weight) | Hours: 4.0 total / 1.0 remaining | Nearest due: 2024-01-10 | Mode: Weighted"
    );
}

#[tokio::test]
async fn test_progress_empty_is_zero() {
    let (handler, _dir) = get_test_handler();
    let progress = handler.handle_progress().await.unwrap();
    assert!(progress.starts_with("0.0% (0.0 / 0.0 weight)"));
    assert!(progress.contains("Nearest due: none"));
}

#[tokio::test]
async fn test_done_and_status_stay_in_sync() {
    let (handler, _dir) = get_test_handler();
    let id = add(&handler, "Task", None, None, None).await;

    handler
        .handle_update_item(
            id.clone(),
            None,
            None,
            None,
            None,
            None,
            Some("Done".to_string()),
            None,
        )
        .await
        .unwrap();
    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("(status: Done, done: yes"));

    handler
        .handle_update_item(id.clone(), None, Some(false), None, None, None, None, None)
        .await
        .unwrap();
    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("(status: Not started, done: no"));

    handler
        .handle_update_item(
            id.clone(),
            None,
            None,
            None,
            None,
            None,
            Some("Blocked".to_string()),
            None,
        )
        .await
        .unwrap();
    handler
        .handle_update_item(id, None, Some(false), None, None, None, None, None)
        .await
        .unwrap();
    // Un-doing a non-Done item keeps its status
    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("(status: Blocked, done: no"));
}

#[tokio::test]
async fn test_update_is_atomic() {
    let (handler, _dir) = get_test_handler();
    let id = add(&handler, "Original", Some(2.0), None, None).await;

    let result = handler
        .handle_update_item(
            id,
            Some("Renamed".to_string()),
            None,
            Some(-1.0),
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(result.is_err());

    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("Original"));
    assert!(!list.contains("Renamed"));
    assert!(list.contains("weight: 2.00"));
}

#[tokio::test]
async fn test_update_clears_due_and_tags() {
    let (handler, _dir) = get_test_handler();
    let id = add(&handler, "Task", None, Some("2030-01-01".to_string()), Some("x")).await;

    handler
        .handle_update_item(
            id,
            None,
            None,
            None,
            Some(String::new()),
            None,
            None,
            Some(String::new()),
        )
        .await
        .unwrap();
    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("due: none"));
    assert!(!list.contains("Tags:"));
}

#[tokio::test]
async fn test_update_without_fields_fails() {
    let (handler, _dir) = get_test_handler();
    let id = add(&handler, "Task", None, None, None).await;
    let result = handler
        .handle_update_item(id, None, None, None, None, None, None, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_remove_and_clear() {
    let (handler, _dir) = get_test_handler();
    let first = add(&handler, "First", None, None, None).await;
    add(&handler, "Second", None, None, None).await;

    let removed = handler.handle_remove_item(first.clone()).await.unwrap();
    assert_eq!(removed, "Item #1 removed: First");
    assert!(handler.handle_remove_item(first).await.is_err());
    assert!(handler.handle_remove_item("abc".to_string()).await.is_err());

    let cleared = handler.handle_clear_items().await.unwrap();
    assert_eq!(cleared, "Removed 1 item(s)");
    assert_eq!(
        handler.handle_list_items(None, None).await.unwrap(),
        "No items found"
    );
}

#[tokio::test]
async fn test_handles_accept_bare_numbers() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Task", None, None, None).await;
    handler
        .handle_update_item(
            "1".to_string(),
            Some("Renamed".to_string()),
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("[#1] Renamed"));
}

#[tokio::test]
async fn test_sort_settings_reorder_list() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "beta", None, None, None).await;
    add(&handler, "Alpha", None, Some(days_from_today(5)), None).await;
    add(&handler, "gamma", None, Some(days_from_today(1)), None).await;

    // Default: due date ascending, undated last
    let list = handler.handle_list_items(None, None).await.unwrap();
    let gamma = list.find("gamma").unwrap();
    let alpha = list.find("Alpha").unwrap();
    let beta = list.find("beta").unwrap();
    assert!(gamma < alpha && alpha < beta);

    handler
        .handle_update_settings(
            None,
            Some("Name".to_string()),
            Some("desc".to_string()),
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let list = handler.handle_list_items(None, None).await.unwrap();
    let gamma = list.find("gamma").unwrap();
    let alpha = list.find("Alpha").unwrap();
    let beta = list.find("beta").unwrap();
    assert!(gamma < beta && beta < alpha);
}

#[tokio::test]
async fn test_tag_filter_views() {
    let (handler, _dir) = get_test_handler();
    let math = add(&handler, "Homework", Some(3.0), None, Some("math")).await;
    add(&handler, "Sketch", Some(1.0), None, Some("Art")).await;
    handler
        .handle_update_item(math.clone(), None, Some(true), None, None, None, None, None)
        .await
        .unwrap();

    let tags = handler.handle_tags().await.unwrap();
    assert_eq!(tags, "Filter options: All, Art, math\nActive filter: All");

    let weighted_all = handler.handle_progress().await.unwrap();
    handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            None,
            None,
            Some("Art".to_string()),
            None,
            None,
        )
        .await
        .unwrap();

    // Weighted mode ignores the filter
    assert_eq!(handler.handle_progress().await.unwrap(), weighted_all);

    let list = handler.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("Sketch"));
    assert!(!list.contains("Homework"));
    let list = handler.handle_list_items(Some(true), None).await.unwrap();
    assert!(list.contains("Homework"));

    handler
        .handle_update_settings(
            None,
            None,
            None,
            Some("Unweighted".to_string()),
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let progress = handler.handle_progress().await.unwrap();
    assert!(progress.starts_with("0.0% (0.0 / 1.0 items)"));
}

#[tokio::test]
async fn test_filter_on_unused_tag_rejected() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Task", None, None, Some("real")).await;

    let result = handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            None,
            None,
            Some("ghost".to_string()),
            None,
            None,
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_filter_resets_when_tag_removed() {
    let (handler, _dir) = get_test_handler();
    let id = add(&handler, "Task", None, None, Some("temp")).await;
    handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            None,
            None,
            Some("temp".to_string()),
            None,
            None,
        )
        .await
        .unwrap();

    handler.handle_remove_item(id).await.unwrap();
    let settings = handler.handle_settings().await.unwrap();
    assert!(settings.contains("Tag filter: All"));
}

#[tokio::test]
async fn test_update_settings_validation() {
    let (handler, _dir) = get_test_handler();

    let nothing = handler
        .handle_update_settings(None, None, None, None, None, None, None, None, None)
        .await;
    assert!(nothing.is_err());

    let too_far = handler
        .handle_update_settings(None, None, None, None, None, Some(400), None, None, None)
        .await;
    assert!(too_far.is_err());

    let bad_mode = handler
        .handle_update_settings(
            None,
            None,
            None,
            Some("Random".to_string()),
            Some(false),
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(bad_mode.is_err());
    // The valid part of a rejected change is not applied either
    let settings = handler.handle_settings().await.unwrap();
    assert!(settings.contains("Notifications: on (horizon 3 day(s))"));

    let missing_image = handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Some("/no/such/image.png".to_string()),
        )
        .await;
    assert!(missing_image.is_err());
}

#[tokio::test]
async fn test_goal_text_shown_with_progress() {
    let (handler, _dir) = get_test_handler();
    handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Some("Pass the finals".to_string()),
            None,
        )
        .await
        .unwrap();
    let progress = handler.handle_progress().await.unwrap();
    assert!(progress.starts_with("Goal: Pass the finals\n0.0%"));
}

#[tokio::test]
async fn test_weekly_view() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Today", None, Some(days_from_today(0)), Some("a")).await;
    add(&handler, "Soon", None, Some(days_from_today(2)), None).await;
    add(&handler, "Next week", None, Some(days_from_today(7)), None).await;
    add(&handler, "Past", None, Some(days_from_today(-1)), None).await;

    let weekly = handler.handle_weekly(None).await.unwrap();
    assert!(weekly.starts_with("Due this week: 2 item(s)"));
    assert!(weekly.contains("  - Today [Not started] today #a\n"));
    assert!(weekly.contains("  - Soon [Not started] soon\n"));
    assert!(!weekly.contains("Next week"));
    assert!(!weekly.contains("Past"));

    assert!(
        handler
            .handle_weekly(Some("not a date".to_string()))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_weekly_view_at_end_of_calendar() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Anything", None, None, None).await;

    let start = (NaiveDate::MAX - Duration::days(2))
        .format(DATE_FMT)
        .to_string();
    let weekly = handler.handle_weekly(Some(start)).await.unwrap();
    assert!(weekly.starts_with("Due this week: 0 item(s)"));

    // The session is still usable afterwards
    assert!(handler.handle_progress().await.is_ok());
    assert!(handler.handle_weekly(None).await.is_ok());
}

#[tokio::test]
async fn test_check_deadlines_dedup() {
    let (handler, _dir) = get_test_handler();
    let late_due = days_from_today(-1);
    add(&handler, "Late", None, Some(late_due.clone()), None).await;
    add(&handler, "Soon", None, Some(days_from_today(2)), None).await;
    add(&handler, "Far", None, Some(days_from_today(10)), None).await;

    let first = handler.handle_check_deadlines().await.unwrap();
    assert!(first.contains(&format!("Overdue: Late ({})", late_due)));
    assert!(first.contains("Due soon: Soon"));
    assert!(!first.contains("Far"));

    let second = handler.handle_check_deadlines().await.unwrap();
    assert_eq!(second, "No new deadlines");
    assert_eq!(
        handler.handle_notifications().await.unwrap(),
        "No new alerts"
    );
}

#[tokio::test]
async fn test_scheduler_alert_reaches_notifications_tool() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Late", None, Some(days_from_today(-3)), None).await;

    let alert = progress_mcp::notify::tick(&handler.session()).unwrap();
    assert_eq!(alert.overdue.len(), 1);

    let text = handler.handle_notifications().await.unwrap();
    assert!(text.starts_with("1 alert(s):\n- Overdue: Late"));
    // Drained
    assert!(
        handler
            .handle_notifications()
            .await
            .unwrap()
            .starts_with("No new alerts")
    );
}

#[tokio::test]
async fn test_notifications_disabled() {
    let (handler, _dir) = get_test_handler();
    add(&handler, "Late", None, Some(days_from_today(-1)), None).await;
    handler
        .handle_update_settings(
            None,
            None,
            None,
            None,
            Some(false),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        handler.handle_check_deadlines().await.unwrap(),
        "Notifications are disabled"
    );
    assert!(progress_mcp::notify::tick(&handler.session()).is_none());
}

#[tokio::test]
async fn test_autosave_after_mutation() {
    let dir = TempDir::new().unwrap();
    let path = common::data_path(&dir);
    {
        let handler = TrackerServerHandler::new(&path, true);
        add(&handler, "Persisted", Some(4.0), None, Some("keep")).await;
    }
    assert!(path.exists());

    let reopened = TrackerServerHandler::new(&path, true);
    let list = reopened.handle_list_items(None, None).await.unwrap();
    assert!(list.contains("Persisted"));
    assert!(list.contains("weight: 4.00"));
}

#[tokio::test]
async fn test_no_autosave_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = common::data_path(&dir);
    let handler = TrackerServerHandler::new(&path, false);
    add(&handler, "Ephemeral", None, None, None).await;
    assert!(!path.exists());
}

#[tokio::test]
async fn test_corrupt_working_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = common::data_path(&dir);
    std::fs::write(&path, "{ not json").unwrap();

    let handler = TrackerServerHandler::new(&path, false);
    assert_eq!(
        handler.handle_list_items(None, None).await.unwrap(),
        "No items found"
    );
}
