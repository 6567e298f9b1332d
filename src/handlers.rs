use crate::auth::{self, AuthSession};
use crate::errors::AppError;
use crate::models::{
    AppData, CompletionLog, CreateHabitRequest, Frequency, Habit, HabitResponse, LoginRequest,
    Profile, ProfileResponse, ProgressResponse, SessionResponse, SessionUserResponse, SignupRequest,
    StatsResponse, ToggleResponse, UpdateHabitRequest, UpdateProfileRequest, UserAccount,
    UserResponse,
};
use crate::state::AppState;
use crate::stats;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use uuid::Uuid;

/// Points added to the owner's sustainability score per completion event.
const SCORE_PER_COMPLETION: u64 = 10;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let email = payload.email.trim().to_ascii_lowercase();
    let full_name = payload.full_name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("a valid email is required"));
    }
    if full_name.is_empty() {
        return Err(AppError::bad_request("full name must not be empty"));
    }
    if payload.password.len() < auth::MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "password must be at least 6 characters",
        ));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let now = Utc::now();

    let mut data = state.data.lock().await;
    if data
        .users
        .iter()
        .any(|user| user.email.eq_ignore_ascii_case(&email))
    {
        return Err(AppError::conflict(
            "an account with this email already exists",
        ));
    }

    let user = UserAccount {
        id: Uuid::new_v4(),
        email,
        password_hash,
        created_at: now,
    };
    let profile = Profile {
        id: user.id,
        avatar_initials: auth::derive_initials(&full_name),
        full_name,
        sustainability_score: 0,
        created_at: now,
    };

    let response = user_response(&user);
    data.users.push(user);
    data.profiles.push(profile);
    persist_data(&state.data_path, &data).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let data = state.data.lock().await;
    // One error for both unknown email and bad password.
    let user = data
        .users
        .iter()
        .find(|user| user.email.eq_ignore_ascii_case(payload.email.trim()))
        .filter(|user| auth::verify_password(&user.password_hash, &payload.password))
        .ok_or_else(|| AppError::unauthorized("invalid email or password"))?;

    let token = Uuid::new_v4();
    let mut sessions = state.sessions.lock().await;
    sessions.insert(token, user.id);

    Ok(Json(SessionResponse {
        access_token: token.to_string(),
        user: user_response(user),
        profile: find_profile(&data.profiles, user.id),
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<StatusCode, AppError> {
    let mut sessions = state.sessions.lock().await;
    sessions.remove(&session.token);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<SessionUserResponse>, AppError> {
    let data = state.data.lock().await;
    let user = data
        .users
        .iter()
        .find(|user| user.id == session.user_id)
        .ok_or_else(|| AppError::unauthorized("session user no longer exists"))?;

    Ok(Json(SessionUserResponse {
        user: user_response(user),
        profile: find_profile(&data.profiles, user.id),
    }))
}

pub async fn list_habits(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<HabitResponse>>, AppError> {
    let today = today();
    let data = state.data.lock().await;

    let mut habits: Vec<&Habit> = data
        .habits
        .iter()
        .filter(|habit| habit.user_id == session.user_id)
        .collect();
    habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let responses = habits
        .into_iter()
        .map(|habit| habit_response(habit, &data.logs, today))
        .collect();
    Ok(Json(responses))
}

pub async fn create_habit(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitResponse>), AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }
    let frequency = Frequency::parse(&payload.frequency)
        .ok_or_else(|| AppError::bad_request("frequency must be 'daily' or 'weekly'"))?;

    let habit = Habit {
        id: Uuid::new_v4(),
        user_id: session.user_id,
        name,
        frequency,
        // New habits always start incomplete, whatever the caller sends.
        completed: false,
        reminder_enabled: payload.reminder_enabled,
        created_at: Utc::now(),
    };

    let mut data = state.data.lock().await;
    let response = habit_response(&habit, &data.logs, today());
    data.habits.push(habit);
    persist_data(&state.data_path, &data).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<Json<HabitResponse>, AppError> {
    let today = today();
    let mut data = state.data.lock().await;
    let index = find_habit(&data.habits, id, session.user_id)?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("habit name must not be empty"));
        }
        data.habits[index].name = name;
    }
    if let Some(frequency) = payload.frequency {
        data.habits[index].frequency = Frequency::parse(&frequency)
            .ok_or_else(|| AppError::bad_request("frequency must be 'daily' or 'weekly'"))?;
    }
    if let Some(reminder_enabled) = payload.reminder_enabled {
        data.habits[index].reminder_enabled = reminder_enabled;
    }

    let response = habit_response(&data.habits[index], &data.logs, today);
    persist_data(&state.data_path, &data).await?;
    Ok(Json(response))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let index = find_habit(&data.habits, id, session.user_id)?;

    // Logs stay: they are the historical record the statistics run over.
    data.habits.remove(index);
    persist_data(&state.data_path, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flips the habit's current-period status. Turning a habit on appends one
/// completion log and credits the sustainability score; turning it off only
/// clears the stored flag.
pub async fn toggle_habit(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, AppError> {
    let today = today();
    let mut data = state.data.lock().await;
    let index = find_habit(&data.habits, id, session.user_id)?;

    let completed = stats::habit_completed_at(&data.habits[index], &data.logs, today);
    let next = !completed;
    data.habits[index].completed = next;

    if next {
        data.logs.push(CompletionLog {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            habit_id: id,
            completed_at: Utc::now(),
        });
        if let Some(profile) = data
            .profiles
            .iter_mut()
            .find(|profile| profile.id == session.user_id)
        {
            profile.sustainability_score += SCORE_PER_COMPLETION;
        }
    }

    persist_data(&state.data_path, &data).await?;
    Ok(Json(ToggleResponse {
        id,
        completed: next,
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    let (habits, logs) = rows_for(&data, session.user_id);
    Ok(Json(stats::build_stats(&habits, &logs)))
}

pub async fn get_progress(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<ProgressResponse>, AppError> {
    let data = state.data.lock().await;
    let (habits, logs) = rows_for(&data, session.user_id);
    Ok(Json(stats::build_progress(&habits, &logs)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<ProfileResponse>, AppError> {
    let data = state.data.lock().await;
    find_profile(&data.profiles, session.user_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("profile not found"))
}

pub async fn update_profile(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let full_name = payload.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::bad_request("full name must not be empty"));
    }

    let mut data = state.data.lock().await;
    let profile = data
        .profiles
        .iter_mut()
        .find(|profile| profile.id == session.user_id)
        .ok_or_else(|| AppError::not_found("profile not found"))?;

    profile.avatar_initials = auth::derive_initials(&full_name);
    profile.full_name = full_name;
    let response = profile_response(profile);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(response))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn find_habit(habits: &[Habit], id: Uuid, user_id: Uuid) -> Result<usize, AppError> {
    habits
        .iter()
        .position(|habit| habit.id == id && habit.user_id == user_id)
        .ok_or_else(|| AppError::not_found("habit not found"))
}

fn rows_for(data: &AppData, user_id: Uuid) -> (Vec<Habit>, Vec<CompletionLog>) {
    let habits = data
        .habits
        .iter()
        .filter(|habit| habit.user_id == user_id)
        .cloned()
        .collect();
    let logs = data
        .logs
        .iter()
        .filter(|log| log.user_id == user_id)
        .cloned()
        .collect();
    (habits, logs)
}

fn habit_response(habit: &Habit, logs: &[CompletionLog], today: NaiveDate) -> HabitResponse {
    HabitResponse {
        id: habit.id,
        name: habit.name.clone(),
        frequency: habit.frequency,
        completed: stats::habit_completed_at(habit, logs, today),
        reminder_enabled: habit.reminder_enabled,
        created_at: habit.created_at,
    }
}

fn user_response(user: &UserAccount) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        created_at: user.created_at,
    }
}

fn profile_response(profile: &Profile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        full_name: profile.full_name.clone(),
        avatar_initials: profile.avatar_initials.clone(),
        sustainability_score: profile.sustainability_score,
        created_at: profile.created_at,
    }
}

fn find_profile(profiles: &[Profile], user_id: Uuid) -> Option<ProfileResponse> {
    profiles
        .iter()
        .find(|profile| profile.id == user_id)
        .map(profile_response)
}
