//! Idle-session watcher. While an admin is signed in it listens for input on
//! the window, ticks the shared [`InactivityMonitor`] once a second, shows a
//! warning before the timeout and signs the admin out when it elapses.
//! Qualifying activity also sends a throttled heartbeat to the backend.

mod warning;

use crate::{
    app_lib::{config::AppConfig, now_ms},
    features::auth::{client, state::use_auth},
};
use admin_session::{
    inactivity::{HeartbeatThrottle, ACTIVITY_EVENTS, TICK_INTERVAL_MS},
    InactivityMonitor, LogoutReason, Transition,
};
use leptos::{prelude::*, task::spawn_local};
use std::time::Duration;
use tracing::{debug, info, warn};
use warning::WarningDialog;

/// Mounts the watcher only while a session exists, so signing out tears
/// down every listener and timer.
#[component]
pub fn InactivityWatcher() -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show when=move || auth.is_authenticated.get()>
            <ActiveWatcher />
        </Show>
    }
}

#[component]
fn ActiveWatcher() -> impl IntoView {
    let auth = use_auth();
    let config = AppConfig::load().inactivity();
    let monitor = StoredValue::new_local(InactivityMonitor::new(config, now_ms()));
    let heartbeat = StoredValue::new_local(HeartbeatThrottle::default());
    // Remaining milliseconds while the warning is up.
    let remaining = RwSignal::new(None::<u64>);

    let on_activity = move || {
        let now = now_ms();
        if let Some(Some(Transition::Resume)) = monitor.try_update_value(|m| m.record_activity(now)) {
            debug!("activity resumed idle session");
            remaining.set(None);
        }
        if heartbeat
            .try_update_value(|throttle| throttle.should_send(now))
            .unwrap_or(false)
        {
            spawn_local(async move {
                if let Err(err) = client::update_activity(now).await {
                    warn!("activity heartbeat failed: {err}");
                }
            });
        }
    };

    let listeners: Vec<_> = ACTIVITY_EVENTS
        .iter()
        .map(|event| window_event_listener_untyped(event, move |_| on_activity()))
        .collect();

    let interval = set_interval_with_handle(
        move || {
            let now = now_ms();
            match monitor.try_update_value(|m| m.tick(now)).flatten() {
                Some(Transition::Warn { remaining_ms }) => {
                    info!(remaining_ms, "idle session warning");
                    remaining.set(Some(remaining_ms));
                }
                Some(Transition::Expire) => {
                    remaining.set(None);
                    auth.logout(Some(LogoutReason::SessionExpired));
                }
                Some(Transition::Resume) | None => {
                    if remaining.get_untracked().is_some() {
                        let left = monitor.with_value(|m| m.remaining_ms(now));
                        remaining.set(Some(left));
                    }
                }
            }
        },
        Duration::from_millis(u64::from(TICK_INTERVAL_MS)),
    )
    .map_err(|err| warn!("failed to start inactivity timer: {err:?}"))
    .ok();

    on_cleanup(move || {
        for listener in listeners {
            listener.remove();
        }
        if let Some(interval) = interval {
            interval.clear();
        }
        debug!("inactivity watcher stopped");
    });

    view! {
        {move || {
            remaining
                .get()
                .map(|left| {
                    view! {
                        <WarningDialog
                            remaining_ms=left
                            on_stay=Callback::new(move |()| on_activity())
                            on_logout=Callback::new(move |()| auth.logout(None))
                        />
                    }
                })
        }}
    }
}
