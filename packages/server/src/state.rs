//! Session store and statistics accounting.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Store-level errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The single-active-session invariant would be violated
    #[error("a session is already active")]
    AlreadyActive,
}

/// Currently open session
#[derive(Debug, Clone)]
pub struct ActiveRecord {
    pub id: String,
    /// Authoritative start time (UTC milliseconds)
    pub started_at_millis: i64,
    pub goals: Vec<String>,
}

/// Completed session retained for statistics
#[derive(Debug, Clone, Copy)]
pub struct CompletedRecord {
    pub ended_at_millis: i64,
    pub duration_secs: u64,
}

/// Statistics snapshot for the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_duration_secs: u64,
    pub total_sessions: u64,
    pub current_streak_days: u32,
}

/// One user's focus history: at most one open session, plus everything
/// completed so far.
#[derive(Debug, Default)]
pub struct FocusStore {
    active: Option<ActiveRecord>,
    completed: Vec<CompletedRecord>,
}

impl FocusStore {
    /// Open a session. Fails when one is already active.
    pub fn start(&mut self, goals: Vec<String>, now_millis: i64) -> Result<ActiveRecord, StoreError> {
        if self.active.is_some() {
            return Err(StoreError::AlreadyActive);
        }
        let record = ActiveRecord {
            id: Uuid::new_v4().to_string(),
            started_at_millis: now_millis,
            goals,
        };
        self.active = Some(record.clone());
        Ok(record)
    }

    /// Close the open session, if any. Idempotent: ending with nothing
    /// active returns `None` and is not an error.
    pub fn end(&mut self, now_millis: i64) -> Option<CompletedRecord> {
        let active = self.active.take()?;
        let duration_secs = ((now_millis - active.started_at_millis).max(0) / 1000) as u64;
        let completed = CompletedRecord {
            ended_at_millis: now_millis,
            duration_secs,
        };
        self.completed.push(completed);
        Some(completed)
    }

    pub fn active(&self) -> Option<&ActiveRecord> {
        self.active.as_ref()
    }

    pub fn stats(&self, today: NaiveDate) -> StatsSnapshot {
        StatsSnapshot {
            total_duration_secs: self.completed.iter().map(|c| c.duration_secs).sum(),
            total_sessions: self.completed.len() as u64,
            current_streak_days: current_streak_days(&self.completed, today),
        }
    }
}

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Focus history behind an async lock; handlers hold it only briefly
    pub store: Mutex<FocusStore>,
}

/// Consecutive days with at least one completed session, walking back from
/// `today`. A quiet day today does not break yesterday's streak.
pub fn current_streak_days(completed: &[CompletedRecord], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = completed
        .iter()
        .filter_map(|c| DateTime::from_timestamp_millis(c.ended_at_millis))
        .map(|dt| dt.date_naive())
        .collect();

    let mut cursor = today;
    if !days.contains(&cursor) {
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => return 0,
        }
    }

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MILLIS: i64 = 86_400_000;
    const BASE_MILLIS: i64 = 1_700_000_000_000;

    fn completed_on(day_offset: i64) -> CompletedRecord {
        CompletedRecord {
            ended_at_millis: BASE_MILLIS + day_offset * DAY_MILLIS,
            duration_secs: 1500,
        }
    }

    fn date_of(day_offset: i64) -> NaiveDate {
        DateTime::from_timestamp_millis(BASE_MILLIS + day_offset * DAY_MILLIS)
            .unwrap()
            .date_naive()
    }

    #[test]
    fn test_start_enforces_single_active_session() {
        // テスト項目: アクティブなセッションがあると start が失敗する
        // given (前提条件):
        let mut store = FocusStore::default();
        store.start(vec![], BASE_MILLIS).unwrap();

        // when (操作):
        let second = store.start(vec![], BASE_MILLIS + 1_000);

        // then (期待する結果):
        assert!(matches!(second, Err(StoreError::AlreadyActive)));
    }

    #[test]
    fn test_end_records_duration_in_whole_seconds() {
        // テスト項目: end が経過時間を秒単位で記録する
        // given (前提条件):
        let mut store = FocusStore::default();
        store.start(vec!["Write report".to_string()], BASE_MILLIS).unwrap();

        // when (操作):
        let completed = store.end(BASE_MILLIS + 1_500_500).unwrap();

        // then (期待する結果):
        assert_eq!(completed.duration_secs, 1500);
        assert!(store.active().is_none());
    }

    #[test]
    fn test_end_without_active_session_is_idempotent() {
        // テスト項目: アクティブなセッションが無い end は何もしない
        // given (前提条件):
        let mut store = FocusStore::default();

        // when (操作):
        let completed = store.end(BASE_MILLIS);

        // then (期待する結果):
        assert!(completed.is_none());
        assert_eq!(store.stats(date_of(0)).total_sessions, 0);
    }

    #[test]
    fn test_stats_aggregate_completed_sessions() {
        // テスト項目: 統計が完了セッションの合計を返す
        // given (前提条件):
        let mut store = FocusStore::default();
        store.start(vec![], BASE_MILLIS).unwrap();
        store.end(BASE_MILLIS + 900_000);
        store.start(vec![], BASE_MILLIS + 1_000_000).unwrap();
        store.end(BASE_MILLIS + 1_000_000 + 1_500_000);

        // when (操作):
        let stats = store.stats(date_of(0));

        // then (期待する結果):
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_duration_secs, 2400);
        assert_eq!(stats.current_streak_days, 1);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        // テスト項目: 連続した日のみがストリークに数えられる
        // given (前提条件):
        let completed = vec![completed_on(0), completed_on(1), completed_on(2)];

        // when (操作):
        let streak = current_streak_days(&completed, date_of(2));

        // then (期待する結果):
        assert_eq!(streak, 3);
    }

    #[test]
    fn test_streak_breaks_on_a_gap() {
        // テスト項目: 抜けた日があるとストリークが途切れる
        // given (前提条件):
        let completed = vec![completed_on(0), completed_on(2)];

        // when (操作):
        let streak = current_streak_days(&completed, date_of(2));

        // then (期待する結果):
        assert_eq!(streak, 1);
    }

    #[test]
    fn test_quiet_today_keeps_yesterdays_streak() {
        // テスト項目: 今日まだセッションが無くても昨日までのストリークは保持される
        // given (前提条件):
        let completed = vec![completed_on(0), completed_on(1)];

        // when (操作):
        let streak = current_streak_days(&completed, date_of(2));

        // then (期待する結果):
        assert_eq!(streak, 2);
    }

    #[test]
    fn test_streak_is_zero_with_no_recent_sessions() {
        // テスト項目: 直近 2 日にセッションが無ければストリークは 0
        // given (前提条件):
        let completed = vec![completed_on(0)];

        // when (操作):
        let streak = current_streak_days(&completed, date_of(3));

        // then (期待する結果):
        assert_eq!(streak, 0);
    }
}
