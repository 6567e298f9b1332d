use crate::models::{
    ChartPoint, CompletionLog, DistributionSlice, Frequency, Habit, ProgressResponse,
    StatsResponse, WeekBucket,
};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streaks {
    pub current: u32,
    pub best: u32,
}

/// Calendar day of a stored instant, in the server's local time zone. All
/// day bucketing goes through here so logs written just before midnight UTC
/// land on the day the user actually saw.
pub fn local_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Walks the distinct calendar days carrying at least one completion.
///
/// Best streak is the longest run of consecutive days anywhere in the
/// window. Current streak is zero unless the most recent day is `today` or
/// yesterday; from there it counts down until the first gap. Several logs on
/// one day count as a single day.
pub fn compute_streaks(days: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> Streaks {
    let mut distinct: Vec<NaiveDate> = days.into_iter().collect();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    if distinct.is_empty() {
        return Streaks { current: 0, best: 0 };
    }

    let mut best = 1u32;
    let mut run = 1u32;
    for pair in distinct.windows(2) {
        if pair[0] - pair[1] == Duration::days(1) {
            run += 1;
        } else {
            best = best.max(run);
            run = 1;
        }
    }
    best = best.max(run);

    let mut current = 0u32;
    if distinct[0] == today || distinct[0] == today - Duration::days(1) {
        current = 1;
        for pair in distinct.windows(2) {
            if pair[0] - pair[1] == Duration::days(1) {
                current += 1;
            } else {
                break;
            }
        }
    }

    Streaks { current, best }
}

/// Completion status shown to the user: the stored flag gated by a log row
/// in the current period. Daily habits need a log today, weekly habits a log
/// in the current ISO week, so the status resets on its own when the period
/// rolls over.
pub fn habit_completed_at(habit: &Habit, logs: &[CompletionLog], today: NaiveDate) -> bool {
    if !habit.completed {
        return false;
    }

    logs.iter()
        .filter(|log| log.habit_id == habit.id)
        .any(|log| {
            let day = local_day(log.completed_at);
            match habit.frequency {
                Frequency::Daily => day == today,
                Frequency::Weekly => day.iso_week() == today.iso_week(),
            }
        })
}

pub fn build_stats(habits: &[Habit], logs: &[CompletionLog]) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), habits, logs)
}

pub fn build_stats_at(today: NaiveDate, habits: &[Habit], logs: &[CompletionLog]) -> StatsResponse {
    let total_habits = habits.len();
    let completed_today = habits
        .iter()
        .filter(|habit| habit_completed_at(habit, logs, today))
        .count();
    let completion_rate = if total_habits == 0 {
        0
    } else {
        (100.0 * completed_today as f64 / total_habits as f64).round() as u32
    };

    let streaks = compute_streaks(logs.iter().map(|log| local_day(log.completed_at)), today);

    StatsResponse {
        completed_today,
        total_habits,
        completion_rate,
        total_completed: logs.len(),
        current_streak: streaks.current,
        best_streak: streaks.best,
    }
}

pub fn build_progress(habits: &[Habit], logs: &[CompletionLog]) -> ProgressResponse {
    build_progress_at(Local::now().date_naive(), habits, logs)
}

pub fn build_progress_at(
    today: NaiveDate,
    habits: &[Habit],
    logs: &[CompletionLog],
) -> ProgressResponse {
    ProgressResponse {
        stats: build_stats_at(today, habits, logs),
        week: daily_series_at(today, 7, habits, logs),
        month: daily_series_at(today, 30, habits, logs),
        year: monthly_series_at(today, habits, logs),
        monthly: week_buckets_at(today, habits, logs),
        distribution: distribution(habits),
    }
}

/// One point per calendar day for the last `days` days, ending today. The
/// target line is the number of daily habits.
pub fn daily_series_at(
    today: NaiveDate,
    days: usize,
    habits: &[Habit],
    logs: &[CompletionLog],
) -> Vec<ChartPoint> {
    let target = daily_habit_count(habits);

    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            let completions = logs
                .iter()
                .filter(|log| local_day(log.completed_at) == date)
                .count();
            let label = if days <= 7 {
                date.format("%a").to_string()
            } else {
                format!("{} {}", MONTH_LABELS[date.month0() as usize], date.day())
            };
            ChartPoint {
                label,
                completions,
                target,
            }
        })
        .collect()
}

/// Twelve calendar months ending with the current one, completions bucketed
/// by month. The target assumes 30 days per month.
pub fn monthly_series_at(
    today: NaiveDate,
    habits: &[Habit],
    logs: &[CompletionLog],
) -> Vec<ChartPoint> {
    let target = daily_habit_count(habits) * 30;

    (0..12)
        .rev()
        .map(|offset| {
            let (year, month) = month_back(today, offset);
            let completions = logs
                .iter()
                .filter(|log| {
                    let day = local_day(log.completed_at);
                    day.year() == year && day.month() == month
                })
                .count();
            ChartPoint {
                label: MONTH_LABELS[(month - 1) as usize].to_string(),
                completions,
                target,
            }
        })
        .collect()
}

/// Four week-sized buckets covering the last 28 days, each reported as a
/// completion percentage against `daily habits x 7`, capped at 100.
pub fn week_buckets_at(
    today: NaiveDate,
    habits: &[Habit],
    logs: &[CompletionLog],
) -> Vec<WeekBucket> {
    let target = daily_habit_count(habits) * 7;

    (0..4)
        .map(|index| {
            let start = today - Duration::days(28 - index as i64 * 7);
            let end = start + Duration::days(7);
            let count = logs
                .iter()
                .filter(|log| {
                    let day = local_day(log.completed_at);
                    day >= start && day < end
                })
                .count();
            let completed = if target == 0 {
                0
            } else {
                ((100.0 * count as f64 / target as f64).round() as u32).min(100)
            };
            WeekBucket {
                week: format!("Week {}", index + 1),
                completed,
                target: 100,
            }
        })
        .collect()
}

pub fn distribution(habits: &[Habit]) -> Vec<DistributionSlice> {
    let daily = daily_habit_count(habits);
    let weekly = habits
        .iter()
        .filter(|habit| habit.frequency == Frequency::Weekly)
        .count();

    if daily == 0 && weekly == 0 {
        return Vec::new();
    }

    vec![
        DistributionSlice {
            name: "Daily".to_string(),
            value: daily,
        },
        DistributionSlice {
            name: "Weekly".to_string(),
            value: weekly,
        },
    ]
}

fn daily_habit_count(habits: &[Habit]) -> usize {
    habits
        .iter()
        .filter(|habit| habit.frequency == Frequency::Daily)
        .count()
}

fn month_back(date: NaiveDate, offset: u32) -> (i32, u32) {
    let total = date.year() * 12 + date.month0() as i32 - offset as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).unwrap()
    }

    // Local noon keeps the instant inside the intended calendar day in any
    // server time zone.
    fn log_on(day: NaiveDate, habit_id: Uuid, user_id: Uuid) -> CompletionLog {
        let instant = Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap()
            .with_timezone(&Utc);
        CompletionLog {
            id: Uuid::new_v4(),
            user_id,
            habit_id,
            completed_at: instant,
        }
    }

    fn habit(user_id: Uuid, frequency: Frequency, completed: bool) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            user_id,
            name: "Cycle to work".to_string(),
            frequency,
            completed,
            reminder_enabled: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn streaks_empty_input() {
        let today = day(2026, 8, 6);
        let streaks = compute_streaks([], today);
        assert_eq!(streaks, Streaks { current: 0, best: 0 });
    }

    #[test]
    fn streaks_stale_activity_only() {
        let today = day(2026, 8, 6);
        let streaks = compute_streaks([today - Duration::days(5)], today);
        assert_eq!(streaks.current, 0);
        assert_eq!(streaks.best, 1);
    }

    #[test]
    fn streaks_three_consecutive_days() {
        let today = day(2026, 8, 6);
        let days = [today, today - Duration::days(1), today - Duration::days(2)];
        let streaks = compute_streaks(days, today);
        assert_eq!(streaks.current, 3);
        assert_eq!(streaks.best, 3);
    }

    #[test]
    fn streaks_gap_breaks_current() {
        let today = day(2026, 8, 6);
        let streaks = compute_streaks([today, today - Duration::days(3)], today);
        assert_eq!(streaks.current, 1);
        assert_eq!(streaks.best, 1);
    }

    #[test]
    fn streaks_same_day_counts_once() {
        let today = day(2026, 8, 6);
        let days = [today, today, today, today - Duration::days(1)];
        let streaks = compute_streaks(days, today);
        assert_eq!(streaks.current, 2);
        assert_eq!(streaks.best, 2);
    }

    #[test]
    fn streaks_past_best_survives_zero_current() {
        let today = day(2026, 8, 6);
        let days = [
            today - Duration::days(10),
            today - Duration::days(11),
            today - Duration::days(12),
            today - Duration::days(13),
        ];
        let streaks = compute_streaks(days, today);
        assert_eq!(streaks.current, 0);
        assert_eq!(streaks.best, 4);
    }

    #[test]
    fn streaks_anchor_at_yesterday() {
        let today = day(2026, 8, 6);
        let days = [today - Duration::days(1), today - Duration::days(2)];
        let streaks = compute_streaks(days, today);
        assert_eq!(streaks.current, 2);
        assert_eq!(streaks.best, 2);
    }

    #[test]
    fn stats_empty_user() {
        let today = day(2026, 8, 6);
        let stats = build_stats_at(today, &[], &[]);
        assert_eq!(stats.total_habits, 0);
        assert_eq!(stats.completed_today, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.total_completed, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 0);
    }

    #[test]
    fn stats_completion_rate_rounds() {
        let user = Uuid::new_v4();
        let today = day(2026, 8, 6);
        let habits = [
            habit(user, Frequency::Daily, true),
            habit(user, Frequency::Daily, false),
            habit(user, Frequency::Daily, false),
        ];
        let logs = [log_on(today, habits[0].id, user)];
        let stats = build_stats_at(today, &habits, &logs);
        assert_eq!(stats.completed_today, 1);
        // 1 of 3 rounds to 33, not truncated to 0 or bumped to 34
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn daily_habit_needs_a_log_today() {
        let user = Uuid::new_v4();
        let today = day(2026, 8, 6);
        let stale = habit(user, Frequency::Daily, true);
        let logs = [log_on(today - Duration::days(1), stale.id, user)];
        assert!(!habit_completed_at(&stale, &logs, today));

        let fresh_logs = [log_on(today, stale.id, user)];
        assert!(habit_completed_at(&stale, &fresh_logs, today));
    }

    #[test]
    fn weekly_habit_holds_for_the_iso_week() {
        let user = Uuid::new_v4();
        // 2026-08-06 is a Thursday; Monday the 3rd is in the same ISO week,
        // Sunday the 2nd is not.
        let today = day(2026, 8, 6);
        let weekly = habit(user, Frequency::Weekly, true);

        let same_week = [log_on(day(2026, 8, 3), weekly.id, user)];
        assert!(habit_completed_at(&weekly, &same_week, today));

        let prior_week = [log_on(day(2026, 8, 2), weekly.id, user)];
        assert!(!habit_completed_at(&weekly, &prior_week, today));
    }

    #[test]
    fn cleared_flag_wins_over_todays_log() {
        let user = Uuid::new_v4();
        let today = day(2026, 8, 6);
        let toggled_off = habit(user, Frequency::Daily, false);
        let logs = [log_on(today, toggled_off.id, user)];
        assert!(!habit_completed_at(&toggled_off, &logs, today));
    }

    #[test]
    fn progress_series_shapes() {
        let user = Uuid::new_v4();
        let today = day(2026, 8, 6);
        let habits = [
            habit(user, Frequency::Daily, false),
            habit(user, Frequency::Weekly, false),
        ];
        let progress = build_progress_at(today, &habits, &[]);

        assert_eq!(progress.week.len(), 7);
        assert_eq!(progress.month.len(), 30);
        assert_eq!(progress.year.len(), 12);
        assert_eq!(progress.monthly.len(), 4);
        assert_eq!(progress.week.last().unwrap().label, "Thu");
        assert_eq!(progress.year.last().unwrap().label, "Aug");
        assert_eq!(progress.year.first().unwrap().label, "Sep");

        let names: Vec<&str> = progress
            .distribution
            .iter()
            .map(|slice| slice.name.as_str())
            .collect();
        assert_eq!(names, ["Daily", "Weekly"]);
        assert_eq!(progress.distribution[0].value, 1);
        assert_eq!(progress.distribution[1].value, 1);
    }

    #[test]
    fn distribution_empty_without_habits() {
        assert!(distribution(&[]).is_empty());
    }

    #[test]
    fn week_buckets_cap_at_hundred() {
        let user = Uuid::new_v4();
        let today = day(2026, 8, 6);
        let habits = [habit(user, Frequency::Daily, false)];
        // 10 completions against a weekly target of 7 in the newest bucket
        let mut logs = Vec::new();
        for i in 0..5 {
            logs.push(log_on(today - Duration::days(i), habits[0].id, user));
            logs.push(log_on(today - Duration::days(i), habits[0].id, user));
        }
        let buckets = week_buckets_at(today, &habits, &logs);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[3].completed, 100);
        assert_eq!(buckets[0].completed, 0);
        assert_eq!(buckets[0].week, "Week 1");
    }

    #[test]
    fn month_back_crosses_year_boundary() {
        let anchor = day(2026, 2, 14);
        assert_eq!(month_back(anchor, 0), (2026, 2));
        assert_eq!(month_back(anchor, 1), (2026, 1));
        assert_eq!(month_back(anchor, 2), (2025, 12));
        assert_eq!(month_back(anchor, 13), (2025, 1));
    }
}
