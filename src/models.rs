use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cadence of a habit. Daily habits reset at midnight, weekly habits at the
/// start of the next ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_initials: String,
    pub sustainability_score: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub frequency: Frequency,
    pub completed: bool,
    pub reminder_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// One completion event. Rows are append-only: toggling a habit back off
/// clears the habit's flag but never removes history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub habit_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

/// Everything persisted to the snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: Vec<UserAccount>,
    pub profiles: Vec<Profile>,
    pub habits: Vec<Habit>,
    pub logs: Vec<CompletionLog>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_initials: String,
    pub sustainability_score: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub user: UserResponse,
    pub profile: Option<ProfileResponse>,
}

#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub user: UserResponse,
    pub profile: Option<ProfileResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub frequency: String,
    #[serde(default)]
    pub reminder_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    pub frequency: Option<String>,
    pub reminder_enabled: Option<bool>,
}

/// A habit annotated with its completion status for the current period,
/// which is what the UI shows instead of the raw stored flag.
#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub id: Uuid,
    pub name: String,
    pub frequency: Frequency,
    pub completed: bool,
    pub reminder_enabled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: Uuid,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub completed_today: usize,
    pub total_habits: usize,
    pub completion_rate: u32,
    pub total_completed: usize,
    pub current_streak: u32,
    pub best_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub completions: usize,
    pub target: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekBucket {
    pub week: String,
    pub completed: u32,
    pub target: u32,
}

#[derive(Debug, Serialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub stats: StatsResponse,
    pub week: Vec<ChartPoint>,
    pub month: Vec<ChartPoint>,
    pub year: Vec<ChartPoint>,
    pub monthly: Vec<WeekBucket>,
    pub distribution: Vec<DistributionSlice>,
}
