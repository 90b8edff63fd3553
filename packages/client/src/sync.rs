//! Cross-client synchronization: drift math and the status poll.
//!
//! There is no push channel, so every client polls the status endpoint on a
//! fixed interval and feeds the result into the controller. The poll result
//! is authoritative but latent: the freshest poll always beats the local
//! countdown, except inside a small tolerance band that prevents visible
//! jitter from polling latency.

use std::time::Duration;

use crate::api::SessionApi;
use crate::controller::{FocusController, SessionNotice};

/// How often every client asks the server for the active session
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Corrections smaller than this are ignored to avoid visible jitter
pub const DRIFT_TOLERANCE_SECS: f64 = 2.0;

/// Remaining seconds implied by the authoritative start time, at millisecond
/// precision: `max(0, initial - (now - start))`.
pub fn expected_remaining_secs(
    initial_duration_secs: u32,
    start_time_millis: i64,
    now_millis: i64,
) -> f64 {
    let elapsed_secs = (now_millis - start_time_millis) as f64 / 1000.0;
    (f64::from(initial_duration_secs) - elapsed_secs).max(0.0)
}

/// Whether the authoritative value is far enough from the local countdown to
/// be worth applying
pub fn exceeds_tolerance(expected_secs: f64, local_secs: u32) -> bool {
    (expected_secs - f64::from(local_secs)).abs() > DRIFT_TOLERANCE_SECS
}

/// One poll cycle: fetch the active session and reconcile.
///
/// Transient poll failures are swallowed — a failed cycle is "no update",
/// never a user-visible error. Only state-changing results produce a notice.
pub async fn poll_once(
    api: &dyn SessionApi,
    controller: &mut FocusController,
) -> Option<SessionNotice> {
    match api.active_session().await {
        Ok(poll) => controller.apply_poll(&poll),
        Err(e) => {
            tracing::debug!("status poll failed, skipping this cycle: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_remaining_counts_down_from_start_time() {
        // テスト項目: 経過時間から残り秒数が計算される
        // given (前提条件):
        let start = 1_700_000_000_000;

        // when (操作):
        let expected = expected_remaining_secs(1500, start, start + 100_000);

        // then (期待する結果):
        assert_eq!(expected, 1400.0);
    }

    #[test]
    fn test_expected_remaining_clamps_at_zero() {
        // テスト項目: 初期時間を超えて経過した場合は 0 にクランプされる
        // given (前提条件):
        let start = 1_700_000_000_000;

        // when (操作):
        let expected = expected_remaining_secs(900, start, start + 1_000_000);

        // then (期待する結果):
        assert_eq!(expected, 0.0);
    }

    #[test]
    fn test_expected_remaining_keeps_subsecond_precision() {
        // テスト項目: ミリ秒精度が保持される（1000.5 秒など）
        // given (前提条件):
        let start = 1_700_000_000_000;

        // when (操作):
        let expected = expected_remaining_secs(1500, start, start + 499_500);

        // then (期待する結果):
        assert_eq!(expected, 1000.5);
    }

    #[test]
    fn test_half_second_drift_is_within_tolerance() {
        // テスト項目: 0.5 秒のずれは許容範囲内で補正されない
        // given (前提条件):
        let expected = 1000.5;

        // when (操作):
        let apply = exceeds_tolerance(expected, 1000);

        // then (期待する結果):
        assert!(!apply);
    }

    #[test]
    fn test_fifty_second_drift_exceeds_tolerance() {
        // テスト項目: 50 秒のずれは補正対象になる
        // given (前提条件):
        let expected = 950.0;

        // when (操作):
        let apply = exceeds_tolerance(expected, 1000);

        // then (期待する結果):
        assert!(apply);
    }

    #[test]
    fn test_exact_tolerance_boundary_is_not_applied() {
        // テスト項目: ちょうど 2 秒のずれは「超える」に該当しない
        // given (前提条件):
        let expected = 998.0;

        // when (操作):
        let apply = exceeds_tolerance(expected, 1000);

        // then (期待する結果):
        assert!(!apply);
    }
}
