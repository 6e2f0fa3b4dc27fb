use std::time::Duration;

use httpmock::prelude::*;
use tokio::task::JoinHandle;
use url::Url;

use viper_framework::mock::RecordingView;
use viper_framework::{PresenterHandle, ViewCommand};
use viper_sample::model::User;
use viper_sample::router::UsersRouter;

/// One started screen with a recording surface attached, pointed at a
/// mock server instead of the real directory.
struct Scenario {
    router: UsersRouter,
    presenter: PresenterHandle<User>,
    probe: RecordingView<User>,
    surface: JoinHandle<RecordingView<User>>,
}

fn launch(server: &MockServer) -> Scenario {
    let endpoint = Url::parse(&server.url("/users")).expect("mock server URL must parse");
    let (router, entry) = UsersRouter::start_at(endpoint);
    let probe = RecordingView::new();
    let presenter = entry.presenter().clone();
    let surface = tokio::spawn(entry.run_on(probe.clone()));
    Scenario {
        router,
        presenter,
        probe,
        surface,
    }
}

async fn settled(probe: &RecordingView<User>, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), probe.wait_for(count))
        .await
        .expect("timed out waiting for view updates");
}

/// Full happy path over real HTTP: the view reports ready, the screen
/// fetches once, and the users land in payload order in a single update.
#[tokio::test]
async fn test_screen_renders_fetched_users() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"[
                    {"id": 1, "name": "Leanne Graham", "username": "Bret",
                     "email": "leanne@april.biz", "address": {"city": "Gwenborough"}},
                    {"id": 2, "name": "Ervin Howell", "username": "Antonette",
                     "email": "ervin@melissa.tv", "company": {"name": "Deckow-Crist"}}
                ]"#,
            );
    });

    let scenario = launch(&server);
    assert!(scenario.presenter.view_ready());
    settled(&scenario.probe, 1).await;

    assert_eq!(
        scenario.probe.recorded(),
        vec![ViewCommand::UpdateList(vec![
            User::new(1, "Leanne Graham").with_email("leanne@april.biz"),
            User::new(2, "Ervin Howell").with_email("ervin@melissa.tv"),
        ])]
    );
    mock.assert();

    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    scenario.surface.await.expect("Surface task panicked");
}

/// A server-side failure must reach the view as a transport error, and
/// no list update may accompany it.
#[tokio::test]
async fn test_server_error_reaches_view_as_transport_failure() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(500);
    });

    let scenario = launch(&server);
    scenario.presenter.view_ready();
    settled(&scenario.probe, 1).await;

    let recorded = scenario.probe.recorded();
    assert_eq!(recorded.len(), 1, "expected exactly one update");
    match &recorded[0] {
        ViewCommand::UpdateError(message) => {
            assert!(message.contains("Transport"), "got {message:?}");
        }
        other => panic!("expected an error update, got {other:?}"),
    }
    mock.assert();

    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    scenario.surface.await.expect("Surface task panicked");
}

/// A payload that is not a user list must reach the view as a decode
/// error rather than a crash or an empty list.
#[tokio::test]
async fn test_malformed_payload_reaches_view_as_decode_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error": "directory under maintenance"}"#);
    });

    let scenario = launch(&server);
    scenario.presenter.view_ready();
    settled(&scenario.probe, 1).await;

    let recorded = scenario.probe.recorded();
    assert_eq!(recorded.len(), 1, "expected exactly one update");
    match &recorded[0] {
        ViewCommand::UpdateError(message) => {
            assert!(message.contains("Decode"), "got {message:?}");
        }
        other => panic!("expected an error update, got {other:?}"),
    }

    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    scenario.surface.await.expect("Surface task panicked");
}

/// Every trigger costs one request and yields one update: the endpoint
/// is hit once for ready and once more for refresh, never in between.
#[tokio::test]
async fn test_refresh_fetches_again() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 1, "name": "Ada"}]"#);
    });

    let scenario = launch(&server);
    scenario.presenter.view_ready();
    settled(&scenario.probe, 1).await;
    scenario.presenter.request_refresh();
    settled(&scenario.probe, 2).await;

    mock.assert_hits(2);
    assert_eq!(
        scenario.probe.recorded(),
        vec![
            ViewCommand::UpdateList(vec![User::new(1, "Ada")]),
            ViewCommand::UpdateList(vec![User::new(1, "Ada")]),
        ]
    );

    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    scenario.surface.await.expect("Surface task panicked");
}

/// Dismissing while the response is still on the wire: the completion
/// arrives against a torn-down screen and must render nothing.
#[tokio::test]
async fn test_dismissal_with_fetch_in_flight_renders_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .delay(Duration::from_millis(500))
            .body(r#"[{"id": 1, "name": "Ada"}]"#);
    });

    let scenario = launch(&server);
    scenario.presenter.view_ready();
    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    let probe = scenario.surface.await.expect("Surface task panicked");

    // Wait past the response delay so the completion has come and gone.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(probe.recorded().is_empty(), "got {:?}", probe.recorded());
}

/// An empty directory is data, not a failure: the view receives an
/// empty list and may render its own placeholder.
#[tokio::test]
async fn test_empty_directory_renders_empty_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });

    let scenario = launch(&server);
    scenario.presenter.view_ready();
    settled(&scenario.probe, 1).await;

    assert_eq!(
        scenario.probe.recorded(),
        vec![ViewCommand::UpdateList(Vec::new())]
    );

    scenario.router.dismiss().await.expect("Failed to dismiss screen");
    scenario.surface.await.expect("Surface task panicked");
}
