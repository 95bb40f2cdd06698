use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use pagewatch::application::usecases::RunTickUseCase;
use pagewatch::application::{AppError, PageChecker};
use pagewatch::domain::{PageTarget, PollState, SmsRoute, TickOutcome};
use pagewatch::infrastructure::fake::RecordingNotifier;
use pagewatch::infrastructure::http_page_checker::HttpPageChecker;

/// Serves a 200 whose Content-Length promises more bytes than are sent,
/// then closes the connection. Returns the base url.
async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                match sock.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => req.extend_from_slice(&buf[..n]),
                }
            }
            let _ = sock
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n<html>Hello")
                .await;
            let _ = sock.shutdown().await;
        }
    });

    format!("http://{addr}/")
}

async fn check_against(status: usize, body: &str, phrase: &str) -> Result<bool, AppError> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/page")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    let target = PageTarget::new(format!("{}/page", server.url()), phrase);
    let result = HttpPageChecker::new().check(&target).await;
    mock.assert_async().await;
    result
}

#[tokio::test]
async fn phrase_present_in_body() {
    let present = check_against(200, "<html>Hello World</html>", "Hello World")
        .await
        .unwrap();
    assert!(present);
}

#[tokio::test]
async fn phrase_absent_from_body() {
    let present = check_against(200, "<html>Goodbye</html>", "Hello World")
        .await
        .unwrap();
    assert!(!present);
}

#[tokio::test]
async fn match_is_case_sensitive() {
    let present = check_against(200, "<html>HELLO WORLD</html>", "Hello World")
        .await
        .unwrap();
    assert!(!present);
}

#[tokio::test]
async fn non_200_status_is_an_error() {
    let err = check_against(404, "Hello World", "Hello World")
        .await
        .unwrap_err();
    match err {
        AppError::Status { code, ref line } => {
            assert_eq!(code, 404);
            assert_eq!(line, "404 Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn other_success_codes_are_errors_too() {
    let err = check_against(202, "Hello World", "Hello World")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Status { code: 202, .. }));
}

#[tokio::test]
async fn server_error_is_an_error() {
    let err = check_against(503, "", "Hello World").await.unwrap_err();
    assert_eq!(err.to_string(), "503 Service Unavailable");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // port 1 on loopback is never listening in the test environment
    let target = PageTarget::new("http://127.0.0.1:1/", "anything");
    let err = HttpPageChecker::new().check(&target).await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
}

#[tokio::test]
async fn nonstandard_status_has_no_trailing_space() {
    let err = check_against(599, "", "Hello World").await.unwrap_err();
    assert_eq!(err.to_string(), "599");
}

#[tokio::test]
async fn short_body_is_a_body_error() {
    let target = PageTarget::new(truncated_body_server().await, "Hello");
    let err = HttpPageChecker::new().check(&target).await.unwrap_err();
    assert!(matches!(err, AppError::Body(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn short_body_counts_as_a_failed_check() {
    let target = PageTarget::new(truncated_body_server().await, "Hello");
    let route = SmsRoute {
        to: "1".into(),
        from: "2".into(),
    };
    let checker = HttpPageChecker::new();
    let notifier = RecordingNotifier::new();
    let tick = RunTickUseCase {
        checker: &checker,
        notifier: &notifier,
        target: &target,
        route: &route,
        dry_run: false,
    };

    let mut state = PollState::Idle;
    let outcome = tick.execute(&mut state, 0).await;
    assert!(
        matches!(outcome, TickOutcome::CheckFailed(ref msg) if msg.starts_with("could not read response body")),
        "unexpected outcome: {outcome:?}"
    );
    assert_eq!(state, PollState::Waiting);
    assert_eq!(notifier.attempts(), 0);

    // the next tick tries again rather than giving up
    assert!(matches!(
        tick.execute(&mut state, 1).await,
        TickOutcome::CheckFailed(_)
    ));
    assert_eq!(state, PollState::Waiting);
}
