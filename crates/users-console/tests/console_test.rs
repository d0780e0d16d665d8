use console_core::mock::MockGateway;
use console_core::{
    ConsoleClient, DialogView, GatewayError, Notification, NotificationStream, SubmitOutcome,
    TableBody,
};
use std::time::Duration;
use users_console::lifecycle::ConsoleSystem;
use users_console::model::{User, UserDraft};

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        phone: "555".to_string(),
        website: String::new(),
        username: name.to_lowercase(),
        address: Default::default(),
        company: Default::default(),
    }
}

async fn settled_body(client: &ConsoleClient<User>) -> TableBody<User> {
    for _ in 0..200 {
        let view = client.view().await.expect("session alive");
        if !matches!(view.body, TableBody::Loading) {
            return view.body;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("cache never settled");
}

async fn recv_notification(notifications: &mut NotificationStream) -> Notification {
    tokio::time::timeout(Duration::from_secs(1), notifications.recv())
        .await
        .expect("notification within deadline")
        .expect("notification channel open")
}

#[tokio::test]
async fn loading_the_collection_shows_one_row_per_user() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_list().return_ok(vec![user("1", "Ann")]);

    let system = ConsoleSystem::new(gateway.clone());
    system.client.load().await.unwrap();

    match settled_body(&system.client).await {
        TableBody::Rows(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].record.name, "Ann");
            assert_eq!(rows[0].record.email, "ann@x.com");
        }
        other => panic!("expected rows, got {other:?}"),
    }

    gateway.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn an_empty_collection_shows_the_empty_state() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_list().return_ok(vec![]);

    let system = ConsoleSystem::new(gateway.clone());
    system.client.load().await.unwrap();

    assert!(matches!(
        settled_body(&system.client).await,
        TableBody::Empty
    ));

    gateway.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn an_invalid_create_draft_never_reaches_the_gateway() {
    // No expectations: any gateway traffic would panic the session task and
    // the missing reload would hang the assertions below.
    let gateway = MockGateway::<User>::new();
    let system = ConsoleSystem::new(gateway.clone());

    system.client.open_create().await.unwrap();
    let outcome = system
        .client
        .submit_create(UserDraft::new("Jo", "bad", "1"))
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(
                errors.get("name"),
                Some("Name must consist of at least three characters")
            );
            assert_eq!(errors.get("email"), Some("Email is not valid"));
            assert!(errors.get("phone").is_none());
        }
        other => panic!("expected local rejection, got {other:?}"),
    }

    // The dialog stays open for correction.
    let view = system.client.view().await.unwrap();
    assert!(matches!(view.dialog, DialogView::CreateForm { .. }));

    gateway.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn a_successful_create_closes_the_dialog_and_refreshes_the_list() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_create().return_ok(user("11", "Cara"));
    gateway
        .expect_list()
        .return_ok(vec![user("1", "Ann"), user("11", "Cara")]);

    let mut system = ConsoleSystem::new(gateway.clone());

    system.client.open_create().await.unwrap();
    let outcome = system
        .client
        .submit_create(UserDraft::new("Cara", "cara@x.com", "555-0100"))
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Dispatched);

    assert_eq!(
        recv_notification(&mut system.notifications).await,
        Notification::Success("User created successfully".to_string())
    );

    let view = system.client.view().await.unwrap();
    assert_eq!(view.dialog, DialogView::Hidden);

    match settled_body(&system.client).await {
        TableBody::Rows(rows) => {
            let names: Vec<&str> = rows.iter().map(|r| r.record.name.as_str()).collect();
            assert_eq!(names, vec!["Ann", "Cara"]);
        }
        other => panic!("expected rows, got {other:?}"),
    }

    gateway.verify();
}

#[tokio::test]
async fn a_successful_edit_reports_and_refreshes() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_list().return_ok(vec![user("1", "Ann")]);
    gateway.expect_update().return_ok(user("1", "Anna"));
    gateway.expect_list().return_ok(vec![user("1", "Anna")]);

    let mut system = ConsoleSystem::new(gateway.clone());

    system.client.load().await.unwrap();
    let target = match settled_body(&system.client).await {
        TableBody::Rows(rows) => rows[0].record.clone(),
        other => panic!("expected rows, got {other:?}"),
    };

    system.client.open_edit(target).await.unwrap();
    let outcome = system
        .client
        .submit_edit(UserDraft::new("Anna", "anna@x.com", "555-0101"))
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Dispatched);

    assert_eq!(
        recv_notification(&mut system.notifications).await,
        Notification::Success("User edited successfully".to_string())
    );

    match settled_body(&system.client).await {
        TableBody::Rows(rows) => assert_eq!(rows[0].record.name, "Anna"),
        other => panic!("expected rows, got {other:?}"),
    }

    gateway.verify();
}

#[tokio::test]
async fn a_failed_delete_keeps_the_dialog_and_the_rows() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_list().return_ok(vec![user("1", "Ann")]);
    gateway
        .expect_delete("1".to_string())
        .return_err(GatewayError::Rejected {
            status: 500,
            body: "internal error".to_string(),
        });

    let mut system = ConsoleSystem::new(gateway.clone());

    system.client.load().await.unwrap();
    let before = settled_body(&system.client).await;

    system.client.open_delete(user("1", "Ann")).await.unwrap();
    let outcome = system.client.confirm_delete().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Dispatched);

    match recv_notification(&mut system.notifications).await {
        Notification::Error(message) => {
            assert!(message.starts_with("Failed deleting user"), "{message}");
            assert!(message.contains("internal error"), "{message}");
        }
        other => panic!("expected error notification, got {other:?}"),
    }

    // The dialog survives for a retry; the collection is untouched.
    let view = system.client.view().await.unwrap();
    match view.dialog {
        DialogView::ConfirmDelete { target, prompt, pending } => {
            assert_eq!(target.id, "1");
            assert_eq!(prompt, "Are you sure you want to delete user Ann?");
            assert!(!pending);
        }
        other => panic!("expected delete confirmation, got {other:?}"),
    }
    assert_eq!(view.body, before);

    gateway.verify();
}

#[tokio::test]
async fn a_successful_delete_reports_with_the_users_name() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_delete("1".to_string()).return_ok();
    gateway.expect_list().return_ok(vec![]);

    let mut system = ConsoleSystem::new(gateway.clone());

    system.client.open_delete(user("1", "Ann")).await.unwrap();
    let outcome = system.client.confirm_delete().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Dispatched);

    assert_eq!(
        recv_notification(&mut system.notifications).await,
        Notification::Success("User Ann deleted successfully".to_string())
    );

    let view = system.client.view().await.unwrap();
    assert_eq!(view.dialog, DialogView::Hidden);
    assert!(matches!(settled_body(&system.client).await, TableBody::Empty));

    gateway.verify();
}

#[tokio::test]
async fn a_load_failure_dominates_previously_cached_rows() {
    let mut gateway = MockGateway::<User>::new();
    gateway.expect_list().return_ok(vec![user("1", "Ann")]);
    gateway.expect_list().return_err(GatewayError::Transport(
        "connection refused".to_string(),
    ));

    let system = ConsoleSystem::new(gateway.clone());
    system.client.load().await.unwrap();
    assert!(matches!(
        settled_body(&system.client).await,
        TableBody::Rows(_)
    ));

    // The retry fails: the error branch replaces the stale rows outright.
    system.client.load().await.unwrap();
    match settled_body(&system.client).await {
        TableBody::Error { message } => assert!(message.contains("connection refused")),
        other => panic!("expected error branch, got {other:?}"),
    }

    gateway.verify();
    system.shutdown().await.unwrap();
}
