use crate::{
    components::{Alert, AlertKind, Button, ButtonKind, Checkbox, Modal, TextField, INPUT_CLASS, LABEL_CLASS},
    features::customers::client,
};
use dashboard_model::customers::{
    Customer, CustomerStatus, CustomerUpdate, UserType, VerificationStatus,
};
use leptos::prelude::*;
use tracing::info;

/// Text input bound to one `String` field of the draft.
macro_rules! draft_text {
    ($draft:ident, $field:ident, $id:literal, $label:literal) => {
        view! {
            <TextField
                id=$id
                label=$label
                value=Signal::derive(move || $draft.with(|d| d.$field.clone()))
                on_input=Callback::new(move |value: String| $draft.update(|d| d.$field = value))
            />
        }
    };
}

macro_rules! draft_flag {
    ($draft:ident, $field:ident, $id:literal, $label:literal) => {
        view! {
            <Checkbox
                id=$id
                label=$label
                checked=Signal::derive(move || $draft.with(|d| d.$field))
                on_change=Callback::new(move |value: bool| $draft.update(|d| d.$field = value))
            />
        }
    };
}

/// Edit form for one customer. The draft is validated before the PUT; the
/// backend message is surfaced on success.
#[component]
pub fn EditCustomer(
    customer: Customer,
    on_saved: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user_id = customer.user_id.clone();
    let draft = RwSignal::new(CustomerUpdate::from(&customer));

    let save = Action::new_local(move |update: &CustomerUpdate| {
        let update = update.clone();
        let user_id = user_id.clone();
        async move { client::update_customer(&user_id, &update).await }
    });

    Effect::new(move |_| {
        if let Some(Ok(message)) = save.value().get() {
            info!("customer updated");
            on_saved.run(message.unwrap_or_else(|| "User updated.".to_string()));
        }
    });

    view! {
        <Modal title="Edit user" on_close=on_cancel>
            <form
                class="space-y-6"
                on:submit=move |event| {
                    event.prevent_default();
                    save.dispatch(draft.get_untracked());
                }
            >
                <div class="grid gap-4 sm:grid-cols-2">
                    {draft_text!(draft, first_name, "first_name", "First name")}
                    {draft_text!(draft, last_name, "last_name", "Last name")}
                    {draft_text!(draft, display_name, "display_name", "Display name")}
                    {draft_text!(draft, email, "email", "Email")}
                    {draft_text!(draft, phone, "phone", "Phone")}
                    {draft_text!(draft, dob, "dob", "Date of birth")}
                    {draft_text!(draft, gender, "gender", "Gender")}
                    {draft_text!(draft, marital_status, "marital_status", "Marital status")}
                    {draft_text!(draft, address, "address", "Address")}
                    {draft_text!(draft, employment_status, "employment_status", "Employment status")}
                    {draft_text!(draft, occupation, "occupation", "Occupation")}
                    {draft_text!(draft, employer, "employer", "Employer")}
                </div>

                <div class="grid gap-4 sm:grid-cols-3">
                    <div>
                        <label class=LABEL_CLASS for="status">"Status"</label>
                        <select
                            id="status"
                            class=INPUT_CLASS
                            on:change=move |event| {
                                if let Some(status) = CustomerStatus::from_value(&event_target_value(&event)) {
                                    draft.update(|d| d.status = status);
                                }
                            }
                        >
                            {CustomerStatus::SELECTABLE.into_iter().map(|s| view! {
                                <option value=s.as_str() selected=move || draft.with(|d| d.status == s)>{s.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="user_type">"Type"</label>
                        <select
                            id="user_type"
                            class=INPUT_CLASS
                            on:change=move |event| {
                                if let Some(user_type) = UserType::from_value(&event_target_value(&event)) {
                                    draft.update(|d| d.user_type = user_type);
                                }
                            }
                        >
                            {UserType::SELECTABLE.into_iter().map(|t| view! {
                                <option value=t.as_str() selected=move || draft.with(|d| d.user_type == t)>{t.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="verification_status">"Verification"</label>
                        <select
                            id="verification_status"
                            class=INPUT_CLASS
                            on:change=move |event| {
                                if let Some(verification) = VerificationStatus::from_value(&event_target_value(&event)) {
                                    draft.update(|d| d.verification_status = verification);
                                }
                            }
                        >
                            {VerificationStatus::SELECTABLE.into_iter().map(|v| view! {
                                <option value=v.as_str() selected=move || draft.with(|d| d.verification_status == v)>{v.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <fieldset class="grid gap-3 sm:grid-cols-2">
                    <legend class=LABEL_CLASS>"Onboarding"</legend>
                    {draft_flag!(draft, onboarding_completed, "onboarding_completed", "Onboarding completed")}
                    {draft_flag!(draft, compliance_docs_sent, "compliance_docs_sent", "Compliance documents sent")}
                    {draft_flag!(draft, agreement_submitted, "agreement_submitted", "Agreement submitted")}
                    {draft_flag!(draft, precise_fp_form_completed, "precise_fp_form_completed", "Precise FP form completed")}
                    {draft_flag!(draft, borabond_onboarding_completed, "borabond_onboarding_completed", "BoraBond onboarding completed")}
                    {draft_flag!(draft, investment_strategy_complete, "investment_strategy_complete", "Investment strategy complete")}
                    {draft_flag!(draft, cybrid_integration_completed, "cybrid_integration_completed", "Cybrid integration completed")}
                </fieldset>

                {move || match save.value().get() {
                    Some(Err(err)) => Some(view! { <Alert kind=AlertKind::Error message=err.to_string() /> }),
                    _ => None,
                }}

                <div class="flex justify-end gap-3">
                    <Button kind=ButtonKind::Secondary on_click=Callback::new(move |_| on_cancel.run(()))>
                        "Cancel"
                    </Button>
                    <Button button_type="submit" disabled=save.pending()>
                        "Save changes"
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
