use crate::tests::support::harness;

use std::{sync::atomic::Ordering, time::Duration};

use tokio::time::sleep;

use crate::tests::support::FakeProvider;

/// WHAT: The poll leaves an open window alone
/// WHY: Resume must only trigger on observed closure
#[tokio::test(start_paused = true)]
async fn given_open_window_when_polling_then_no_resume() {
    // Given: An armed flow whose window stays open
    let h = harness();
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );

    // When: Several poll ticks pass
    sleep(Duration::from_secs(5)).await;

    // Then: Still paused, still tracked, no resume
    assert_eq!(h.resume_calls(), 0);
    assert!(h.controller.snapshot().await.is_paused);
    assert!(h.controller.inner.lock().await.window.is_some());
}

/// WHAT: Closure detected on a poll tick triggers exactly one resume
/// WHY: The watchdog's primary trigger
#[tokio::test(start_paused = true)]
async fn given_closed_window_when_next_poll_ticks_then_single_resume() {
    // Given: An armed flow
    let h = harness();
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );

    // When: The user closes the window before the next tick
    h.opener.close_window();
    sleep(Duration::from_secs(3)).await;

    // Then: One resume request, unpaused, nothing left armed
    assert_eq!(h.resume_calls(), 1);
    assert!(!h.controller.snapshot().await.is_paused);
    let inner = h.controller.inner.lock().await;
    assert!(inner.window.is_none());
    assert!(inner.timers.window_poll.is_none());
    assert!(inner.timers.failsafe.is_none());
}

/// WHAT: The focus shortcut resumes without waiting for the next poll tick
/// WHY: Perceived latency, and the poll must then stay silent
#[tokio::test(start_paused = true)]
async fn given_closed_window_when_focus_returns_then_immediate_resume() {
    // Given: An armed flow whose window the user just closed
    let h = harness();
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );
    h.opener.close_window();

    // When: The host window regains focus
    h.controller.on_host_focus().await;

    // Then: One resume right away, and no second one from the poll later
    assert_eq!(h.resume_calls(), 1);
    assert!(!h.controller.snapshot().await.is_paused);
    sleep(Duration::from_secs(5)).await;
    assert_eq!(h.resume_calls(), 1);
}

/// WHAT: Focus return with the window still open does nothing
/// WHY: The shortcut only fires on an already-closed window
#[tokio::test(start_paused = true)]
async fn given_open_window_when_focus_returns_then_no_action() {
    let h = harness();
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );

    h.controller.on_host_focus().await;

    assert_eq!(h.resume_calls(), 0);
    assert!(h.controller.snapshot().await.is_paused);
    assert!(h.controller.inner.lock().await.window.is_some());
}

/// WHAT: Both triggers firing in the same tick issue exactly one resume
/// WHY: Taking the window handle out of its slot is the shared cancellation
///      token; whichever trigger wins invalidates the other
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_closed_window_when_poll_and_focus_race_then_single_resume() {
    // Given: An armed flow with a just-closed window
    let h = harness();
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );
    h.opener.close_window();

    // When: The focus shortcut races the poll tick
    let controller = h.controller.clone();
    let focus = tokio::spawn(async move { controller.on_host_focus().await });
    sleep(Duration::from_secs(5)).await;
    focus.await.unwrap();

    // Then: Exactly one resume request from this component
    assert_eq!(h.resume_calls(), 1);
    assert!(!h.controller.snapshot().await.is_paused);
}

/// WHAT: A closed window with nothing paused does not resume
/// WHY: The watchdog re-checks the paused flag before acting
#[tokio::test(start_paused = true)]
async fn given_unpaused_session_when_window_closes_then_no_resume() {
    // Given: A flow whose pause request failed, leaving the session unpaused
    let provider = FakeProvider::default();
    provider.fail_next_pauses(1);
    let h = crate::tests::support::harness_with(provider);
    h.start_call("i1").await;
    assert!(
        h.controller
            .open_secure_link_flow("https://pay.example.com")
            .await
            .is_ok()
    );
    assert!(!h.controller.snapshot().await.is_paused);

    // When: The window closes and the poll observes it
    h.opener.close_window();
    sleep(Duration::from_secs(3)).await;

    // Then: No resume request, window slot released
    assert_eq!(h.resume_calls(), 0);
    assert!(h.controller.inner.lock().await.window.is_none());
    assert_eq!(h.provider.pause_calls.load(Ordering::SeqCst), 1);
}
