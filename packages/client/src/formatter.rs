//! Terminal rendering for the countdown, statistics, and notices.

use crate::api::FocusStats;
use crate::controller::{Phase, SessionNotice};
use crate::timer::TimerState;

/// Status formatter for terminal display
pub struct StatusFormatter;

impl StatusFormatter {
    /// Render a countdown as `MM:SS` (minutes may exceed 59)
    pub fn format_countdown(secs: u32) -> String {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Render a total duration as `Xh Ym` / `Ym`
    pub fn format_duration(secs: u64) -> String {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        if hours > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}m", minutes)
        }
    }

    /// One-line phase + countdown summary
    pub fn format_status(phase: Phase, timer: &TimerState) -> String {
        let label = match phase {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        };
        format!(
            "[{}] {} / {}",
            label,
            Self::format_countdown(timer.remaining_secs()),
            Self::format_countdown(timer.initial_duration_secs()),
        )
    }

    /// Multi-line statistics block
    pub fn format_stats(stats: &FocusStats) -> String {
        format!(
            "Focused time: {}\nSessions: {}\nCurrent streak: {} day(s)",
            Self::format_duration(stats.total_duration_secs),
            stats.total_sessions,
            stats.current_streak_days,
        )
    }

    /// User-facing line for a controller notice
    pub fn format_notice(notice: &SessionNotice) -> String {
        match notice {
            SessionNotice::Started { goals } if goals.is_empty() => {
                "Zen mode activated. Distractions blocked.".to_string()
            }
            SessionNotice::Started { goals } => {
                format!("Zen mode activated. Goal: {}", goals.join("; "))
            }
            SessionNotice::Ended { completed: true } => {
                "Focus session completed! Great job!".to_string()
            }
            SessionNotice::Ended { completed: false } => "Session ended.".to_string(),
            SessionNotice::ResumedElsewhere => {
                "Resumed active session from another client.".to_string()
            }
            SessionNotice::EndedElsewhere => "Session ended on another client.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_formatting_pads_and_rolls_minutes() {
        // テスト項目: MM:SS 形式でゼロ埋めされ、60 分超も分のまま表示される
        assert_eq!(StatusFormatter::format_countdown(0), "00:00");
        assert_eq!(StatusFormatter::format_countdown(65), "01:05");
        assert_eq!(StatusFormatter::format_countdown(1500), "25:00");
        assert_eq!(StatusFormatter::format_countdown(3600), "60:00");
    }

    #[test]
    fn test_duration_formatting_switches_units() {
        // テスト項目: 1 時間未満は分のみ、それ以上は h/m 表記になる
        assert_eq!(StatusFormatter::format_duration(1500), "25m");
        assert_eq!(StatusFormatter::format_duration(3_900), "1h 5m");
    }

    #[test]
    fn test_status_line_shows_phase_and_countdown() {
        // テスト項目: ステータス行にフェーズと残り時間が含まれる
        // given (前提条件):
        let mut timer = TimerState::new(1500);
        timer.start();
        timer.tick();

        // when (操作):
        let line = StatusFormatter::format_status(Phase::Running, &timer);

        // then (期待する結果):
        assert_eq!(line, "[running] 24:59 / 25:00");
    }

    #[test]
    fn test_started_notice_mentions_goal() {
        // テスト項目: 開始通知に goal が載り、goal 無しでも文章になる
        let with_goal = StatusFormatter::format_notice(&SessionNotice::Started {
            goals: vec!["Write report".to_string()],
        });
        let without_goal = StatusFormatter::format_notice(&SessionNotice::Started { goals: vec![] });

        assert!(with_goal.contains("Write report"));
        assert!(without_goal.contains("Zen mode activated"));
    }

    #[test]
    fn test_completed_and_stopped_notices_differ() {
        // テスト項目: 自動完了と手動終了の通知が区別される
        let completed = StatusFormatter::format_notice(&SessionNotice::Ended { completed: true });
        let stopped = StatusFormatter::format_notice(&SessionNotice::Ended { completed: false });

        assert_ne!(completed, stopped);
        assert!(completed.contains("completed"));
    }
}
