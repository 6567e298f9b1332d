use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    full_name: String,
    avatar_initials: String,
    sustainability_score: u64,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    user: UserResponse,
    profile: Option<ProfileResponse>,
}

#[derive(Debug, Deserialize)]
struct SessionUserResponse {
    user: UserResponse,
    profile: Option<ProfileResponse>,
}

#[derive(Debug, Deserialize)]
struct HabitResponse {
    id: String,
    name: String,
    frequency: String,
    completed: bool,
    reminder_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    id: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    completed_today: usize,
    total_habits: usize,
    completion_rate: u32,
    total_completed: usize,
    current_streak: u32,
    best_streak: u32,
}

#[derive(Debug, Deserialize)]
struct ChartPoint {
    label: String,
    completions: usize,
}

#[derive(Debug, Deserialize)]
struct WeekBucket {
    week: String,
    completed: u32,
}

#[derive(Debug, Deserialize)]
struct DistributionSlice {
    name: String,
    value: usize,
}

#[derive(Debug, Deserialize)]
struct ProgressResponse {
    stats: StatsResponse,
    week: Vec<ChartPoint>,
    month: Vec<ChartPoint>,
    year: Vec<ChartPoint>,
    monthly: Vec<WeekBucket>,
    distribution: Vec<DistributionSlice>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "ecohabits_http_{}_{}.json",
        std::process::id(),
        unique_suffix()
    ));
    path.to_string_lossy().to_string()
}

fn unique_email(tag: &str) -> String {
    format!("{tag}+{}@example.com", unique_suffix())
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(base_url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_ecohabits"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn signup(client: &Client, base_url: &str, email: &str, full_name: &str) {
    let response = client
        .post(format!("{base_url}/api/auth/signup"))
        .json(&serde_json::json!({
            "email": email,
            "password": "greenroots",
            "full_name": full_name,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn login(client: &Client, base_url: &str, email: &str) -> SessionResponse {
    let response = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&serde_json::json!({
            "email": email,
            "password": "greenroots",
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn create_habit(
    client: &Client,
    base_url: &str,
    token: &str,
    name: &str,
    frequency: &str,
) -> HabitResponse {
    let response = client
        .post(format!("{base_url}/api/habits"))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "name": name,
            "frequency": frequency,
            "reminder_enabled": false,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn fetch_stats(client: &Client, base_url: &str, token: &str) -> StatsResponse {
    client
        .get(format!("{base_url}/api/stats"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_signup_login_and_session() {
    let server = shared_server().await;
    let client = Client::new();
    let email = unique_email("session");

    signup(&client, &server.base_url, &email, "Ada Lovelace").await;

    // Same email again is a conflict.
    let duplicate = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&serde_json::json!({
            "email": email,
            "password": "greenroots",
            "full_name": "Ada Again",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let session = login(&client, &server.base_url, &email).await;
    assert_eq!(session.user.email, email);
    let profile = session.profile.expect("profile created at signup");
    assert_eq!(profile.full_name, "Ada Lovelace");
    assert_eq!(profile.avatar_initials, "AL");
    assert_eq!(profile.sustainability_score, 0);

    let me: SessionUserResponse = client
        .get(format!("{}/api/auth/session", server.base_url))
        .bearer_auth(&session.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me.user.id, session.user.id);
    assert!(me.profile.is_some());

    // Wrong password reads the same as an unknown account.
    let bad = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&serde_json::json!({ "email": email, "password": "wrongwrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);

    let logout = client
        .post(format!("{}/api/auth/logout", server.base_url))
        .bearer_auth(&session.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let stale = client
        .get(format!("{}/api/auth/session", server.base_url))
        .bearer_auth(&session.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_rejects_requests_without_token() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_habit_lifecycle_updates_stats() {
    let server = shared_server().await;
    let client = Client::new();
    let email = unique_email("lifecycle");

    signup(&client, &server.base_url, &email, "Grace Hopper").await;
    let session = login(&client, &server.base_url, &email).await;
    let token = session.access_token;

    let habit = create_habit(&client, &server.base_url, &token, "Cycle to work", "daily").await;
    assert_eq!(habit.name, "Cycle to work");
    assert_eq!(habit.frequency, "daily");
    assert!(!habit.completed);
    assert!(!habit.reminder_enabled);

    let before = fetch_stats(&client, &server.base_url, &token).await;
    assert_eq!(before.total_habits, 1);
    assert_eq!(before.completed_today, 0);
    assert_eq!(before.total_completed, 0);
    assert_eq!(before.current_streak, 0);

    let toggled: ToggleResponse = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled.id, habit.id);
    assert!(toggled.completed);

    let listed: Vec<HabitResponse> = client
        .get(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].completed);

    let done = fetch_stats(&client, &server.base_url, &token).await;
    assert_eq!(done.completed_today, 1);
    assert_eq!(done.completion_rate, 100);
    assert_eq!(done.total_completed, 1);
    assert_eq!(done.current_streak, 1);
    assert_eq!(done.best_streak, 1);

    // Completing a habit credits the sustainability score.
    let me: SessionUserResponse = client
        .get(format!("{}/api/auth/session", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me.profile.unwrap().sustainability_score, 10);

    // Toggling back off clears the flag but keeps the log history.
    let untoggled: ToggleResponse = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!untoggled.completed);

    let after = fetch_stats(&client, &server.base_url, &token).await;
    assert_eq!(after.completed_today, 0);
    assert_eq!(after.total_completed, 1);
    assert_eq!(after.current_streak, 1);

    let renamed: HabitResponse = client
        .put(format!("{}/api/habits/{}", server.base_url, habit.id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "name": "Cycle everywhere" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(renamed.name, "Cycle everywhere");
    assert_eq!(renamed.frequency, "daily");

    let deleted = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let empty: Vec<HabitResponse> = client
        .get(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.is_empty());

    // The log survives the habit it came from.
    let final_stats = fetch_stats(&client, &server.base_url, &token).await;
    assert_eq!(final_stats.total_habits, 0);
    assert_eq!(final_stats.total_completed, 1);
}

#[tokio::test]
async fn http_rejects_bad_habit_input() {
    let server = shared_server().await;
    let client = Client::new();
    let email = unique_email("validation");

    signup(&client, &server.base_url, &email, "Mary Anning").await;
    let session = login(&client, &server.base_url, &email).await;

    let blank = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&session.access_token)
        .json(&serde_json::json!({ "name": "   ", "frequency": "daily" }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let cadence = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&session.access_token)
        .json(&serde_json::json!({ "name": "Compost", "frequency": "hourly" }))
        .send()
        .await
        .unwrap();
    assert_eq!(cadence.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_users_are_isolated() {
    let server = shared_server().await;
    let client = Client::new();
    let first_email = unique_email("first");
    let second_email = unique_email("second");

    signup(&client, &server.base_url, &first_email, "First User").await;
    signup(&client, &server.base_url, &second_email, "Second User").await;
    let first = login(&client, &server.base_url, &first_email).await;
    let second = login(&client, &server.base_url, &second_email).await;

    let habit = create_habit(
        &client,
        &server.base_url,
        &first.access_token,
        "Plant a tree",
        "weekly",
    )
    .await;

    let other_list: Vec<HabitResponse> = client
        .get(format!("{}/api/habits", server.base_url))
        .bearer_auth(&second.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(other_list.is_empty());

    // Another user's habit is invisible to mutation too.
    let foreign_toggle = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .bearer_auth(&second.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign_toggle.status(), StatusCode::NOT_FOUND);

    let foreign_delete = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .bearer_auth(&second.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_progress_series_shapes() {
    let server = shared_server().await;
    let client = Client::new();
    let email = unique_email("progress");

    signup(&client, &server.base_url, &email, "Rachel Carson").await;
    let session = login(&client, &server.base_url, &email).await;
    let token = session.access_token;

    create_habit(&client, &server.base_url, &token, "Meat-free day", "daily").await;
    create_habit(&client, &server.base_url, &token, "Repair something", "weekly").await;

    let progress: ProgressResponse = client
        .get(format!("{}/api/progress", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(progress.stats.total_habits, 2);
    assert_eq!(progress.week.len(), 7);
    assert_eq!(progress.month.len(), 30);
    assert_eq!(progress.year.len(), 12);
    assert_eq!(progress.monthly.len(), 4);
    assert!(progress.week.iter().all(|point| !point.label.is_empty()));
    assert_eq!(progress.monthly[0].week, "Week 1");
    assert!(progress.monthly.iter().all(|bucket| bucket.completed <= 100));

    let names: Vec<&str> = progress
        .distribution
        .iter()
        .map(|slice| slice.name.as_str())
        .collect();
    assert_eq!(names, ["Daily", "Weekly"]);
    assert_eq!(progress.distribution[0].value, 1);
    assert_eq!(progress.distribution[1].value, 1);

    // Completion lands in today's bucket of the week series.
    let toggle = client
        .post(format!(
            "{}/api/habits/{}/toggle",
            server.base_url,
            create_habit(&client, &server.base_url, &token, "Short shower", "daily")
                .await
                .id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert!(toggle.status().is_success());

    let refreshed: ProgressResponse = client
        .get(format!("{}/api/progress", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(refreshed.week.last().unwrap().completions, 1);
    assert_eq!(refreshed.year.last().unwrap().completions, 1);
    assert_eq!(refreshed.stats.completed_today, 1);
}
