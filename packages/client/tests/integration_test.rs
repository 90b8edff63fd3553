//! Integration tests driving real controllers against an in-process server.
//!
//! The server router is served on an ephemeral port inside the test runtime,
//! so every test gets its own isolated backend and no subprocesses are
//! spawned.

use std::sync::Arc;

use tokio::net::TcpListener;

use zazen_client::api::{ActiveSession, HttpSessionApi, SessionApi};
use zazen_client::controller::{FocusController, Phase, SessionNotice};
use zazen_client::error::ClientError;
use zazen_client::sync;
use zazen_server::{AppState, build_router};
use zazen_shared::time::{Clock, SystemClock};

/// Serve a fresh backend on an ephemeral port; returns its base URL.
async fn spawn_server() -> String {
    let state = Arc::new(AppState::default());
    let app = build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server task failed");
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str, duration_secs: u32) -> (Arc<dyn SessionApi>, FocusController) {
    let api: Arc<dyn SessionApi> = Arc::new(HttpSessionApi::new(base_url));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let controller = FocusController::new(api.clone(), clock, duration_secs);
    (api, controller)
}

#[tokio::test]
async fn test_start_carries_goals_and_runs_locally() {
    // テスト項目: start が goals をサーバーに送り、ローカルは 1500 秒で走り出す
    // given (前提条件):
    let base_url = spawn_server().await;
    let (api, mut controller) = client_for(&base_url, 1500);

    // when (操作):
    let notice = controller
        .start(vec!["Write report".to_string()])
        .await
        .expect("start should succeed");

    // then (期待する結果):
    assert_eq!(
        notice,
        Some(SessionNotice::Started {
            goals: vec!["Write report".to_string()]
        })
    );
    assert_eq!(controller.phase(), Phase::Running);
    assert!(controller.timer().is_running());
    assert_eq!(controller.timer().remaining_secs(), 1500);

    // the server received the goal list verbatim
    match api.active_session().await.expect("poll should succeed") {
        ActiveSession::Active(session) => {
            assert_eq!(session.goals, vec!["Write report".to_string()]);
            assert!(!session.id.is_empty());
        }
        ActiveSession::Inactive => panic!("server should report an active session"),
    }
}

#[tokio::test]
async fn test_second_client_adopts_and_converges() {
    // テスト項目: どちらが start しても 2 ポーリングサイクル以内に両クライアントが収束する
    // given (前提条件):
    let base_url = spawn_server().await;
    let (_api_a, mut client_a) = client_for(&base_url, 1500);
    let (api_b, mut client_b) = client_for(&base_url, 1500);
    client_a.start(vec![]).await.expect("start should succeed");

    // when (操作):
    let first_poll = sync::poll_once(api_b.as_ref(), &mut client_b).await;
    let second_poll = sync::poll_once(api_b.as_ref(), &mut client_b).await;

    // then (期待する結果):
    assert_eq!(first_poll, Some(SessionNotice::ResumedElsewhere));
    assert!(second_poll.is_none(), "adoption must notify exactly once");
    assert_eq!(client_b.phase(), Phase::Running);

    let a_remaining = client_a.timer().remaining_secs() as i64;
    let b_remaining = client_b.timer().remaining_secs() as i64;
    assert!(
        (a_remaining - b_remaining).abs() <= 2,
        "clients diverged: {} vs {}",
        a_remaining,
        b_remaining
    );
}

#[tokio::test]
async fn test_session_ended_elsewhere_resets_this_client() {
    // テスト項目: 他クライアントの終了をポーリングで検知して Idle に戻る（通知は一度だけ）
    // given (前提条件):
    let base_url = spawn_server().await;
    let (_api_a, mut client_a) = client_for(&base_url, 1500);
    let (api_b, mut client_b) = client_for(&base_url, 1500);
    client_a.start(vec![]).await.expect("start should succeed");
    sync::poll_once(api_b.as_ref(), &mut client_b).await;
    assert_eq!(client_b.phase(), Phase::Running);

    // when (操作):
    client_a.stop().await.expect("a session was running");
    let first_poll = sync::poll_once(api_b.as_ref(), &mut client_b).await;
    let second_poll = sync::poll_once(api_b.as_ref(), &mut client_b).await;

    // then (期待する結果):
    assert_eq!(first_poll, Some(SessionNotice::EndedElsewhere));
    assert!(second_poll.is_none());
    assert_eq!(client_b.phase(), Phase::Idle);
    assert_eq!(client_b.timer().remaining_secs(), 1500);
}

#[tokio::test]
async fn test_start_while_active_is_rejected_then_adopted() {
    // テスト項目: 既にアクティブなら start は 409 で拒否され、次のポーリングで引き継ぐ
    // given (前提条件):
    let base_url = spawn_server().await;
    let (_api_a, mut client_a) = client_for(&base_url, 1500);
    let (api_b, mut client_b) = client_for(&base_url, 1500);
    client_a.start(vec![]).await.expect("start should succeed");

    // when (操作):
    let rejected = client_b.start(vec![]).await;
    let poll = sync::poll_once(api_b.as_ref(), &mut client_b).await;

    // then (期待する結果):
    assert!(matches!(rejected, Err(ClientError::Transient(_))));
    assert_eq!(poll, Some(SessionNotice::ResumedElsewhere));
    assert_eq!(client_b.phase(), Phase::Running);
}

#[tokio::test]
async fn test_end_without_active_session_is_not_an_error() {
    // テスト項目: アクティブなセッションが無くても end は成功する
    // given (前提条件):
    let base_url = spawn_server().await;
    let (api, _controller) = client_for(&base_url, 1500);

    // when (操作):
    let result = api.end_session().await;

    // then (期待する結果):
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_stats_reflect_completed_sessions() {
    // テスト項目: 完了したセッションが統計に反映される
    // given (前提条件):
    let base_url = spawn_server().await;
    let (api, mut controller) = client_for(&base_url, 1500);
    controller.start(vec![]).await.expect("start should succeed");
    controller.stop().await.expect("a session was running");

    // when (操作):
    let stats = api.stats().await.expect("stats should succeed");

    // then (期待する結果):
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.current_streak_days, 1);
}

#[tokio::test]
async fn test_poll_failure_is_swallowed() {
    // テスト項目: サーバーに到達できないポーリングは黙って無視される
    // given (前提条件):
    // nothing is listening on this port
    let (api, mut controller) = client_for("http://127.0.0.1:1", 1500);

    // when (操作):
    let notice = sync::poll_once(api.as_ref(), &mut controller).await;

    // then (期待する結果):
    assert!(notice.is_none());
    assert_eq!(controller.phase(), Phase::Idle);
}
