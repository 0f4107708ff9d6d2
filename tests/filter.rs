mod common;

use common::TestApp;
use task_manager::filter::{Choice, TaskFilter};
use task_manager::repositories::TaskRepository;

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_filter_parsing() {
    let filter = TaskFilter::from_pairs(&pairs(&[
        ("status", "2"),
        ("executor", ""),
        ("labels", "x"),
        ("self_tasks", "on"),
        ("page", "3"),
    ]));
    assert_eq!(filter.status, Choice::Id(2));
    assert_eq!(filter.executor, Choice::Any);
    assert!(filter.label.is_invalid());
    assert!(filter.self_tasks);
    assert!(filter.matches_nothing());

    let empty = TaskFilter::from_pairs(&pairs(&[("status", ""), ("self_tasks", "")]));
    assert!(empty.is_empty());
    assert!(!empty.matches_nothing());
}

#[test]
fn test_last_value_wins() {
    let filter = TaskFilter::from_pairs(&pairs(&[("status", "1"), ("status", "5")]));
    assert_eq!(filter.status.id(), Some(5));
}

#[tokio::test]
async fn test_filters_combine() {
    let app = TestApp::spawn().await;
    let conn = &app.storage().conn;

    let me = app.create_user("me").await;
    let other = app.create_user("other").await;
    let new = app.create_status("new").await;
    let done = app.create_status("done").await;
    let bug = app.create_label("bug").await;
    let ui = app.create_label("ui").await;

    let t1 = app.create_task("one", &me, &other, &new, &[&bug]).await;
    let t2 = app.create_task("two", &other, &me, &new, &[&bug, &ui]).await;
    let t3 = app.create_task("three", &me, &me, &done, &[&ui]).await;
    let t4 = app.create_task("four", &other, &other, &done, &[]).await;

    let ids = |filter: TaskFilter| {
        let conn = conn.clone();
        let me_id = me.id;
        async move {
            TaskRepository::get_filtered(&conn, &filter, me_id)
                .await
                .unwrap()
                .into_iter()
                .map(|task| task.id)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(ids(TaskFilter::default()).await, vec![t1.id, t2.id, t3.id, t4.id]);

    let status = new.id.to_string();
    assert_eq!(ids(TaskFilter::from_pairs(&pairs(&[("status", status.as_str())]))).await, vec![t1.id, t2.id]);

    let executor = me.id.to_string();
    assert_eq!(ids(TaskFilter::from_pairs(&pairs(&[("executor", executor.as_str())]))).await, vec![t2.id, t3.id]);

    let label = bug.id.to_string();
    assert_eq!(ids(TaskFilter::from_pairs(&pairs(&[("labels", label.as_str())]))).await, vec![t1.id, t2.id]);

    assert_eq!(ids(TaskFilter::from_pairs(&pairs(&[("self_tasks", "on")]))).await, vec![t1.id, t3.id]);

    let ui_label = ui.id.to_string();
    assert_eq!(
        ids(TaskFilter::from_pairs(&pairs(&[
            ("labels", ui_label.as_str()),
            ("self_tasks", "on"),
        ])))
        .await,
        vec![t3.id]
    );

    assert!(ids(TaskFilter::from_pairs(&pairs(&[("status", "abc")]))).await.is_empty());
    assert!(ids(TaskFilter::from_pairs(&pairs(&[("executor", "999")]))).await.is_empty());
}
