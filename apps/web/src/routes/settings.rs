//! Platform settings for super admins, saved in this browser.

use crate::{
    components::{
        Alert, AlertKind, Button, ButtonKind, Checkbox, TextField, CARD_CLASS, INPUT_CLASS,
        LABEL_CLASS,
    },
    features::{auth::RequireRole, settings},
    routes::paths::{self, required_role},
};
use dashboard_model::settings::{number_or, BackupFrequency, Settings, LANGUAGES, TIMEZONES};
use leptos::prelude::*;
use tracing::info;

macro_rules! text_setting {
    ($draft:ident, $field:ident, $id:literal, $label:literal) => {
        view! {
            <TextField
                id=$id
                label=$label
                value=Signal::derive(move || $draft.with(|s| s.$field.clone()))
                on_input=Callback::new(move |value: String| $draft.update(|s| s.$field = value))
            />
        }
    };
}

/// Numeric inputs fall back to the default when cleared or invalid.
macro_rules! number_setting {
    ($draft:ident, $field:ident, $id:literal, $label:literal) => {
        view! {
            <TextField
                id=$id
                label=$label
                input_type="number"
                value=Signal::derive(move || $draft.with(|s| s.$field.to_string()))
                on_input=Callback::new(move |value: String| {
                    $draft.update(|s| s.$field = number_or(&value, Settings::default().$field))
                })
            />
        }
    };
}

macro_rules! flag_setting {
    ($draft:ident, $field:ident, $id:literal, $label:literal) => {
        view! {
            <Checkbox
                id=$id
                label=$label
                checked=Signal::derive(move || $draft.with(|s| s.$field))
                on_change=Callback::new(move |value: bool| $draft.update(|s| s.$field = value))
            />
        }
    };
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <RequireRole role=required_role(paths::SETTINGS)>
            <SettingsForm />
        </RequireRole>
    }
}

#[component]
fn Section(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class=format!("{CARD_CLASS} p-6 space-y-4")>
            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">{title}</h2>
            {children()}
        </section>
    }
}

#[component]
fn SettingsForm() -> impl IntoView {
    let draft = RwSignal::new(settings::load());
    let outcome = RwSignal::new(None::<(AlertKind, String)>);

    let on_save = move |event: leptos::ev::SubmitEvent| {
        event.prevent_default();
        let result = draft.with_untracked(settings::save);
        outcome.set(Some(match result {
            Ok(()) => {
                info!("settings saved");
                (AlertKind::Success, "Settings saved.".to_string())
            }
            Err(err) => (AlertKind::Error, err.to_string()),
        }));
    };

    let on_reset = Callback::new(move |_| match settings::reset() {
        Ok(defaults) => {
            draft.set(defaults);
            outcome.set(Some((AlertKind::Info, "Settings reset to defaults.".to_string())));
        }
        Err(err) => outcome.set(Some((AlertKind::Error, err.to_string()))),
    });

    view! {
        <form class="space-y-6" on:submit=on_save>
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Settings"</h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "Platform configuration. Changes are stored in this browser."
                    </p>
                </div>
                <div class="flex gap-3">
                    <Button kind=ButtonKind::Secondary on_click=on_reset>"Reset"</Button>
                    <Button button_type="submit">"Save settings"</Button>
                </div>
            </div>

            {move || outcome.get().map(|(kind, message)| view! { <Alert kind=kind message=message /> })}

            <Section title="General">
                <div class="grid gap-4 sm:grid-cols-2">
                    {text_setting!(draft, site_name, "site_name", "Site name")}
                    {text_setting!(draft, site_description, "site_description", "Site description")}
                    <div>
                        <label class=LABEL_CLASS for="timezone">"Timezone"</label>
                        <select
                            id="timezone"
                            class=INPUT_CLASS
                            on:change=move |event| draft.update(|s| s.timezone = event_target_value(&event))
                        >
                            {TIMEZONES.into_iter().map(|(value, label)| view! {
                                <option value=value selected=move || draft.with(|s| s.timezone == value)>{label}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="language">"Language"</label>
                        <select
                            id="language"
                            class=INPUT_CLASS
                            on:change=move |event| draft.update(|s| s.language = event_target_value(&event))
                        >
                            {LANGUAGES.into_iter().map(|(value, label)| view! {
                                <option value=value selected=move || draft.with(|s| s.language == value)>{label}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>
            </Section>

            <Section title="Security">
                <div class="grid gap-4 sm:grid-cols-2">
                    {number_setting!(draft, session_timeout, "session_timeout", "Session timeout (minutes)")}
                    {number_setting!(draft, password_min_length, "password_min_length", "Minimum password length")}
                    {flag_setting!(draft, enable_two_factor, "enable_two_factor", "Require two-factor authentication")}
                    {flag_setting!(draft, require_strong_passwords, "require_strong_passwords", "Require strong passwords")}
                </div>
            </Section>

            <Section title="Notifications">
                <div class="grid gap-3 sm:grid-cols-2">
                    {flag_setting!(draft, email_notifications, "email_notifications", "Email notifications")}
                    {flag_setting!(draft, sms_notifications, "sms_notifications", "SMS notifications")}
                    {flag_setting!(draft, push_notifications, "push_notifications", "Push notifications")}
                    {flag_setting!(draft, admin_alerts, "admin_alerts", "Admin alerts")}
                </div>
            </Section>

            <Section title="Integrations">
                <div class="grid gap-4 sm:grid-cols-2">
                    {number_setting!(draft, api_rate_limit, "api_rate_limit", "API rate limit (requests/hour)")}
                    {flag_setting!(draft, enable_api_logging, "enable_api_logging", "Log API requests")}
                    {text_setting!(draft, cybrid_api_url, "cybrid_api_url", "Cybrid API URL")}
                    {text_setting!(draft, yellowcard_api_url, "yellowcard_api_url", "Yellow Card API URL")}
                </div>
            </Section>

            <Section title="Data">
                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label class=LABEL_CLASS for="backup_frequency">"Backup frequency"</label>
                        <select
                            id="backup_frequency"
                            class=INPUT_CLASS
                            on:change=move |event| {
                                let frequency = BackupFrequency::from_value(&event_target_value(&event));
                                draft.update(|s| s.backup_frequency = frequency);
                            }
                        >
                            {BackupFrequency::ALL.into_iter().map(|f| view! {
                                <option value=f.as_str() selected=move || draft.with(|s| s.backup_frequency == f)>{f.label()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    {number_setting!(draft, data_retention_days, "data_retention_days", "Data retention (days)")}
                    {flag_setting!(draft, enable_audit_log, "enable_audit_log", "Audit log")}
                </div>
            </Section>
        </form>
    }
}
