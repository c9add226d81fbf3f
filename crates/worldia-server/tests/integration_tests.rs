//! Integration tests for the worldia-server HTTP API.
//!
//! Most tests start the real router on an ephemeral port with an in-memory
//! interaction store and a scripted AI provider, then drive it with reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncBufReadExt;
use worldia_core::ai::{CompletionRequest, ImageJob, SpeechJob, VideoJob, VideoStatus, VideoTask};
use worldia_core::{
    AiProvider, CatalogStore, InteractionStore, Result as CoreResult, ToolsResponse, WorldiaError,
};
use worldia_server::{start_server, AppState};

/// AI provider with canned answers. Prompts containing "fail" error upstream.
struct ScriptedProvider;

#[async_trait]
impl AiProvider for ScriptedProvider {
    async fn chat(&self, request: &CompletionRequest) -> CoreResult<String> {
        let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
        if last.contains("fail") {
            return Err(WorldiaError::Upstream {
                service: "ai".into(),
                message: "model overloaded".into(),
            });
        }
        Ok(format!("echo: {} ({} messages)", last, request.messages.len()))
    }

    async fn image(&self, job: &ImageJob) -> CoreResult<String> {
        Ok(format!("base64-for-{}", job.size))
    }

    async fn speech(&self, job: &SpeechJob) -> CoreResult<Bytes> {
        Ok(Bytes::from(format!("RIFF{}", job.input.len())))
    }

    async fn transcribe(&self, _audio_base64: &str) -> CoreResult<String> {
        Ok("hola mundo".into())
    }

    async fn create_video(&self, job: &VideoJob) -> CoreResult<VideoTask> {
        Ok(VideoTask {
            task_id: format!("task-{}s", job.duration),
            status: "PROCESSING".into(),
        })
    }

    async fn video_status(&self, task_id: &str) -> CoreResult<VideoStatus> {
        Ok(VideoStatus {
            task_id: task_id.to_string(),
            status: "SUCCESS".into(),
            video_url: Some(format!("https://cdn.example.com/{}.mp4", task_id)),
        })
    }
}

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::new(
            CatalogStore::builtin(),
            InteractionStore::in_memory().unwrap(),
            Arc::new(ScriptedProvider),
        );
        let addr = start_server(state, "127.0.0.1", 0).await.unwrap();
        Self {
            base: format!("http://{}", addr),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header("cookie", cookie);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: Value, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(cookie) = cookie {
            request = request.header("cookie", cookie);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    /// Register a user and return the `name=value` part of the session cookie.
    async fn register(&self, name: &str, email: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": "s3cret" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response)
    }
}

fn session_cookie(response: &reqwest::Response) -> String {
    let header = response
        .headers()
        .get("set-cookie")
        .expect("missing set-cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_tools_default_response_shape() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/api/tools", None).await;
    assert_eq!(status, StatusCode::OK);

    let response: ToolsResponse = serde_json::from_value(body).unwrap();
    let catalog = CatalogStore::builtin();
    assert_eq!(response.total_count, catalog.len());
    assert_eq!(response.pagination.page, 1);
    assert_eq!(response.pagination.limit, 50);
    assert_eq!(response.pagination.total, catalog.len());
    assert_eq!(response.tools.len(), catalog.len().min(50));
    assert!(!response.categories.is_empty());
    assert!(!response.ai_glossary.is_empty());
}

#[tokio::test]
async fn test_tools_malformed_params_fall_back() {
    let server = TestServer::start().await;
    let (status, body) = server
        .get("/api/tools?page=abc&limit=-5&topRated=TRUE&featured=1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 50);
    assert_eq!(body["pagination"]["total"], body["totalCount"]);
}

#[tokio::test]
async fn test_tools_repeated_params_keep_first_value_and_filters() {
    let server = TestServer::start().await;
    let (status, body) = server
        .get("/api/tools?category=coding&page=1&page=2&limit=100", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 100);

    let tools = body["tools"].as_array().unwrap();
    let coding = CatalogStore::builtin()
        .tools()
        .iter()
        .filter(|t| t.category == worldia_core::Category::Coding)
        .count();
    assert!(coding > 0);
    assert_eq!(tools.len(), coding);
    assert_eq!(body["pagination"]["total"], coding);
    assert!(tools.iter().all(|t| t["category"] == "coding"));
}

#[tokio::test]
async fn test_tools_filters_and_out_of_range_page() {
    let server = TestServer::start().await;

    let (_, body) = server.get("/api/tools?category=coding&limit=2", None).await;
    let tools = body["tools"].as_array().unwrap();
    assert!(tools.len() <= 2);
    assert!(tools.iter().all(|t| t["category"] == "coding"));

    let (status, body) = server.get("/api/tools?page=999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tools"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["hasMore"], false);

    let (_, body) = server.get("/api/tools?category=cooking", None).await;
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_tools_top_rated_sorted() {
    let server = TestServer::start().await;
    let (_, body) = server.get("/api/tools?topRated=true&limit=200", None).await;
    let ratings: Vec<f64> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["rating"].as_f64().unwrap())
        .collect();
    assert!(!ratings.is_empty());
    assert!(ratings.iter().all(|r| *r >= 4.5));
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_tools_same_query_is_byte_identical() {
    let server = TestServer::start().await;
    let url = server.url("/api/tools?search=chat&limit=5");
    let first = server.client.get(&url).send().await.unwrap().bytes().await.unwrap();
    let second = server.client.get(&url).send().await.unwrap().bytes().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_single_tool_lookup() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/api/tools/chatgpt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "ChatGPT");

    let (status, body) = server.get("/api/tools/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tool not found: nope");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_register_login_logout_flow() {
    let server = TestServer::start().await;
    let cookie = server.register("Ada", "ada@example.com").await;
    assert!(cookie.starts_with("worldia_session="));

    let (_, body) = server.get("/api/auth/user", Some(&cookie)).await;
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password").is_none());

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "email": "ADA@example.com", "password": "s3cret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login_cookie = session_cookie(&response);

    let (status, _) = server.post("/api/auth/logout", json!({}), Some(&login_cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = server.get("/api/auth/user", Some(&login_cookie)).await;
    assert!(body["user"].is_null());

    // The first session is independent of the one that logged out.
    let (_, body) = server.get("/api/auth/user", Some(&cookie)).await;
    assert_eq!(body["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_duplicate_registration_and_bad_password() {
    let server = TestServer::start().await;
    server.register("Ada", "ada@example.com").await;

    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "x" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = server
        .post(
            "/api/auth/login",
            json!({ "email": "ada@example.com", "password": "wrong" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_register_validation_and_bad_json() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post("/api/auth/register", json!({ "email": "a@b.co" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_anonymous_user_is_null() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/api/auth/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].is_null());
}

// =============================================================================
// Interactions
// =============================================================================

#[tokio::test]
async fn test_like_requires_session() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post("/api/interactions/like", json!({ "itemId": "chatgpt", "itemType": "tool" }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let server = TestServer::start().await;
    let cookie = server.register("Ada", "ada@example.com").await;
    let item = json!({ "itemId": "chatgpt", "itemType": "tool" });
    let summary_path = "/api/interactions/like?itemId=chatgpt&itemType=tool";

    let (_, body) = server.post("/api/interactions/like", item.clone(), Some(&cookie)).await;
    assert_eq!(body["liked"], true);
    let (_, body) = server.get(summary_path, Some(&cookie)).await;
    assert_eq!(body, json!({ "count": 1, "isLiked": true }));
    let (_, body) = server.get(summary_path, None).await;
    assert_eq!(body, json!({ "count": 1, "isLiked": false }));

    let (_, body) = server.post("/api/interactions/like", item, Some(&cookie)).await;
    assert_eq!(body["liked"], false);
    let (_, body) = server.get(summary_path, Some(&cookie)).await;
    assert_eq!(body, json!({ "count": 0, "isLiked": false }));
}

#[tokio::test]
async fn test_interaction_requires_item() {
    let server = TestServer::start().await;
    let cookie = server.register("Ada", "ada@example.com").await;
    let (status, body) = server
        .post("/api/interactions/favorite", json!({ "itemId": "chatgpt" }), Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "itemId and itemType are required");

    let (status, _) = server.get("/api/interactions/favorite?itemId=chatgpt", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rating_upsert_and_summary() {
    let server = TestServer::start().await;
    let ada = server.register("Ada", "ada@example.com").await;
    let bob = server.register("Bob", "bob@example.com").await;

    for (cookie, score) in [(&ada, json!(2)), (&ada, json!("5")), (&bob, json!(4))] {
        let (status, body) = server
            .post(
                "/api/interactions/rate",
                json!({ "itemId": "claude", "itemType": "tool", "score": score }),
                Some(cookie),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (_, body) = server
        .get("/api/interactions/rate?itemId=claude&itemType=tool", Some(&ada))
        .await;
    assert_eq!(body["totalRatings"], 2);
    assert_eq!(body["averageRating"], 4.5);
    assert_eq!(body["userRating"], 5);

    let (status, body) = server
        .post(
            "/api/interactions/rate",
            json!({ "itemId": "claude", "itemType": "tool", "score": 0 }),
            Some(&bob),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Score must be between 1 and 5");
}

#[tokio::test]
async fn test_comments_newest_first() {
    let server = TestServer::start().await;
    let ada = server.register("Ada", "ada@example.com").await;
    let bob = server.register("Bob", "bob@example.com").await;

    server
        .post(
            "/api/interactions/comment",
            json!({ "itemId": "suno", "itemType": "tool", "content": "Me encanta" }),
            Some(&ada),
        )
        .await;
    let (_, body) = server
        .post(
            "/api/interactions/comment",
            json!({ "itemId": "suno", "itemType": "tool", "content": "Great", "rating": 4 }),
            Some(&bob),
        )
        .await;
    assert_eq!(body["comment"]["user"]["name"], "Bob");

    let (_, body) = server
        .get("/api/interactions/comment?itemId=suno&itemType=tool", None)
        .await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "Great");
    assert_eq!(comments[1]["user"]["name"], "Ada");

    let (status, _) = server
        .post(
            "/api/interactions/comment",
            json!({ "itemId": "suno", "itemType": "tool" }),
            Some(&ada),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shares_are_anonymous_and_counted() {
    let server = TestServer::start().await;
    let item = json!({ "itemId": "cursor", "itemType": "tool", "platform": "twitter" });
    let (status, body) = server.post("/api/interactions/share", item.clone(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform"], "twitter");
    server.post("/api/interactions/share", item, None).await;

    let (_, body) = server
        .get("/api/interactions/share?itemId=cursor&itemType=tool", None)
        .await;
    assert_eq!(body["count"], 2);

    let (status, _) = server
        .post("/api/interactions/share", json!({ "itemId": "cursor", "itemType": "tool" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Analytics
// =============================================================================

#[tokio::test]
async fn test_click_tracking_stats() {
    let server = TestServer::start().await;
    for tool in ["chatgpt", "claude", "chatgpt"] {
        let (status, body) = server
            .post(
                "/api/analytics/click",
                json!({ "toolId": tool, "toolName": tool, "category": "chat", "action": "click" }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tracked"], true);
    }
    server
        .post("/api/analytics/click", json!({ "toolId": "claude", "action": "share" }), None)
        .await;

    let (_, body) = server.get("/api/analytics/click", None).await;
    assert_eq!(body["totalClicks"], 3);
    assert_eq!(body["todayClicks"], 3);
    assert_eq!(body["topTools"][0], json!({ "id": "chatgpt", "clicks": 2 }));
    assert!(body["revenue"]["total"].is_number());

    let (_, body) = server.get("/api/analytics/click?top=1", None).await;
    assert_eq!(body["topTools"].as_array().unwrap().len(), 1);

    let (status, _) = server.post("/api/analytics/click", json!({ "toolName": "x" }), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// AI proxy
// =============================================================================

#[tokio::test]
async fn test_ai_chat_and_code() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post(
            "/api/ai/chat",
            json!({ "message": "hola", "history": [{ "role": "user", "content": "hi" }] }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "echo: hola (3 messages)");

    let (status, body) = server.post("/api/ai/chat", json!({}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");

    let (_, body) = server
        .post("/api/ai/code", json!({ "prompt": "fizzbuzz", "language": "rust" }), None)
        .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], "echo: Generate rust code for: fizzbuzz (2 messages)");
}

#[tokio::test]
async fn test_ai_upstream_failure_is_bad_gateway() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post("/api/ai/chat", json!({ "message": "please fail" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_ai_image_tts_asr() {
    let server = TestServer::start().await;
    let (_, body) = server
        .post("/api/ai/image", json!({ "prompt": " a llama ", "size": "768x1344" }), None)
        .await;
    assert_eq!(body["image"], "base64-for-768x1344");
    assert_eq!(body["prompt"], "a llama");

    let (status, _) = server
        .post("/api/ai/image", json!({ "prompt": "x", "size": "1x1" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = server
        .client
        .post(server.url("/api/ai/tts"))
        .json(&json!({ "text": "a".repeat(1200) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "audio/wav");
    assert_eq!(response.bytes().await.unwrap(), Bytes::from("RIFF1000"));

    let (_, body) = server.post("/api/ai/asr", json!({ "audio": "UklGRg==" }), None).await;
    assert_eq!(body["text"], "hola mundo");
    let (status, _) = server.post("/api/ai/asr", json!({}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_video_task_and_poll() {
    let server = TestServer::start().await;
    let (_, body) = server.post("/api/ai/video", json!({ "prompt": "waves" }), None).await;
    assert_eq!(body["taskId"], "task-5s");
    assert_eq!(body["status"], "PROCESSING");

    let (_, body) = server.get("/api/ai/video?taskId=task-5s", None).await;
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["videoUrl"], "https://cdn.example.com/task-5s.mp4");

    let (status, body) = server.get("/api/ai/video", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "taskId is required");

    let (status, _) = server.post("/api/ai/video", json!({}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Binary
// =============================================================================

struct ServerProcess {
    child: tokio::process::Child,
    port: u16,
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
    }
}

/// Start the server binary and read the port it prints.
async fn start_binary(data_dir: &std::path::Path) -> std::result::Result<ServerProcess, String> {
    let binary = PathBuf::from(env!("CARGO_BIN_EXE_worldia-server"));
    let mut child = tokio::process::Command::new(&binary)
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg("0")
        .arg("--data-dir")
        .arg(data_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("failed to spawn worldia-server: {e}"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "failed to capture stdout".to_string())?;
    let mut lines = tokio::io::BufReader::new(stdout).lines();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(20);
    while tokio::time::Instant::now() < deadline {
        match tokio::time::timeout(Duration::from_millis(250), lines.next_line()).await {
            Ok(Ok(Some(line))) => {
                if let Some(value) = line.strip_prefix("WORLDIA_PORT=") {
                    let port = value
                        .trim()
                        .parse::<u16>()
                        .map_err(|e| format!("invalid WORLDIA_PORT value '{value}': {e}"))?;
                    return Ok(ServerProcess { child, port });
                }
            }
            Ok(Ok(None)) => break,
            Ok(Err(err)) => return Err(format!("failed to read stdout: {err}")),
            Err(_) => continue,
        }
    }
    Err("WORLDIA_PORT line not emitted".to_string())
}

#[tokio::test]
async fn test_binary_serves_and_creates_database() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let process = start_binary(&data_dir).await.unwrap();

    let body: Value = Client::new()
        .get(format!("http://127.0.0.1:{}/health", process.port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert!(data_dir.join("worldia.sqlite").exists());
}
