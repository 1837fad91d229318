use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use workout_logger_lib::{
    FetchError, HttpGateway, WeightUnit, WorkoutCandidate, WorkoutGateway, WorkoutId,
};

/// What the server saw for a single request.
struct Captured {
    method: String,
    path: String,
    body: String,
}

/// Serves exactly one canned response and hands back the request it got.
async fn serve_once(status_line: &str, body: &str) -> Result<(String, JoinHandle<Result<Captured>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}/api/", listener.local_addr()?);
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let (head_len, content_length) = loop {
            let n = socket.read(&mut buf).await?;
            anyhow::ensure!(n > 0, "connection closed before headers finished");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&raw[..pos]).to_string();
                let content_length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                break (pos + 4, content_length);
            }
        };
        while raw.len() < head_len + content_length {
            let n = socket.read(&mut buf).await?;
            anyhow::ensure!(n > 0, "connection closed before body finished");
            raw.extend_from_slice(&buf[..n]);
        }

        let head = String::from_utf8_lossy(&raw[..head_len]).to_string();
        let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_string();
        let path = request_line.next().unwrap_or_default().to_string();
        let body = String::from_utf8_lossy(&raw[head_len..head_len + content_length]).to_string();

        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;
        Ok::<_, anyhow::Error>(Captured { method, path, body })
    });

    Ok((base_url, handle))
}

fn squat() -> WorkoutCandidate {
    WorkoutCandidate {
        exercise: "Squat".to_string(),
        custom_exercise: None,
        weight: 225.0,
        weight_unit: WeightUnit::Lbs,
        reps: 5,
        rpe: 8.0,
        tempo: "3-1-1".to_string(),
    }
}

#[tokio::test]
async fn test_list_workouts_decodes_server_records() -> Result<()> {
    let body = r#"[
        {"id": 7, "exercise": "Squat", "weight": 225.0, "weight_unit": "lbs",
         "reps": 5, "rpe": 8.0, "tempo": "3-1-1", "date": "2024-03-17T14:05:09.123456"},
        {"id": 6, "exercise": "Deadlift", "weight": 180, "weight_unit": "kgs",
         "reps": 3, "rpe": 9.5, "tempo": "2-0-1", "date": "2024-03-16T09:00:00"}
    ]"#;
    let (base_url, server) = serve_once("200 OK", body).await?;
    let gateway = HttpGateway::new(base_url);

    let workouts = gateway.list_workouts().await?;
    let captured = server.await??;

    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/api/workouts");
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].id, WorkoutId::from(7));
    assert_eq!(workouts[1].exercise, "Deadlift");
    assert_eq!(workouts[1].weight_unit, WeightUnit::Kgs);
    assert_eq!(workouts[1].rpe, 9.5);
    Ok(())
}

#[tokio::test]
async fn test_list_exercises() -> Result<()> {
    let (base_url, server) = serve_once("200 OK", r#"["Squat", "Bench Press"]"#).await?;
    let gateway = HttpGateway::new(base_url);

    let names = gateway.list_exercises().await?;
    let captured = server.await??;

    assert_eq!(captured.path, "/api/exercises");
    assert_eq!(names, ["Squat", "Bench Press"]);
    Ok(())
}

#[tokio::test]
async fn test_create_posts_candidate_json() -> Result<()> {
    let (base_url, server) = serve_once("201 Created", r#"{"message": "ok"}"#).await?;
    let gateway = HttpGateway::new(base_url);

    gateway.create_workout(&squat()).await?;
    let captured = server.await??;

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/workouts");
    let sent: serde_json::Value = serde_json::from_str(&captured.body)?;
    assert_eq!(sent["exercise"], "Squat");
    assert_eq!(sent["weight"], 225.0);
    assert_eq!(sent["weight_unit"], "lbs");
    assert_eq!(sent["reps"], 5);
    assert_eq!(sent["rpe"], 8.0);
    assert_eq!(sent["tempo"], "3-1-1");
    assert!(sent.get("customExercise").is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_sends_custom_name() -> Result<()> {
    let (base_url, server) = serve_once("201 Created", "{}").await?;
    let gateway = HttpGateway::new(base_url);
    let candidate = WorkoutCandidate {
        exercise: "Sled Push".to_string(),
        custom_exercise: Some("Sled Push".to_string()),
        ..squat()
    };

    gateway.create_workout(&candidate).await?;
    let sent: serde_json::Value = serde_json::from_str(&server.await??.body)?;

    assert_eq!(sent["exercise"], "Sled Push");
    assert_eq!(sent["customExercise"], "Sled Push");
    Ok(())
}

#[tokio::test]
async fn test_delete_targets_workout_path() -> Result<()> {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "deleted"}"#).await?;
    let gateway = HttpGateway::new(base_url);

    gateway.delete_workout(&WorkoutId::from(42)).await?;
    let captured = server.await??;

    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.path, "/api/workouts/42");
    Ok(())
}

#[tokio::test]
async fn test_delete_escapes_reserved_characters_in_id() -> Result<()> {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "deleted"}"#).await?;
    let gateway = HttpGateway::new(base_url);

    gateway.delete_workout(&WorkoutId::from("a/b#c")).await?;
    let captured = server.await??;

    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.path, "/api/workouts/a%2Fb%23c");
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_an_error() -> Result<()> {
    let (base_url, server) = serve_once("404 NOT FOUND", r#"{"error": "Workout not found"}"#).await?;
    let gateway = HttpGateway::new(base_url);

    let err = gateway
        .delete_workout(&WorkoutId::from(999))
        .await
        .expect_err("404 must fail");
    server.await??;

    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("Workout not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() -> Result<()> {
    let (base_url, server) = serve_once("200 OK", r#"{"not": "a list"}"#).await?;
    let gateway = HttpGateway::new(base_url);

    let err = gateway.list_workouts().await.expect_err("object is not a list");
    server.await??;

    assert!(matches!(err, FetchError::Decode { .. }));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}/api", listener.local_addr()?);
    drop(listener);
    let gateway = HttpGateway::new(base_url);

    let err = gateway.list_exercises().await.expect_err("nothing is listening");
    assert!(matches!(err, FetchError::Transport { .. }));
    Ok(())
}
