//! Auth Pages
//!
//! Login, registration and password reset. Rendered without the shell.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{FieldError, INPUT_CLASS, PRIMARY_BUTTON};
use crate::state::GlobalState;
use crate::validation::{validate_login, validate_new_password, validate_registration, FieldErrors};

/// Delay before leaving a page that just showed a success message
const REDIRECT_DELAY_MS: u32 = 2000;

#[component]
fn AuthCard(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="min-h-screen flex items-center justify-center p-6 sm:p-12">
            <div class="w-full max-w-md space-y-6 bg-white dark:bg-zinc-800 p-10 rounded-lg shadow-lg">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">{title}</h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">{subtitle}</p>
                </div>
                {children()}
            </div>
        </section>
    }
}

#[component]
fn TextField(
    label: &'static str,
    field: &'static str,
    #[prop(default = "text")]
    kind: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm mb-1">{label}</label>
            <input
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
            <FieldError field=field errors=errors />
        </div>
    }
}

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get().trim().to_string();
        let password = password.get().trim().to_string();

        let found = validate_login(&email, &password);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(()) => {
                    state.signed_in.set(true);
                    state.show_success("Signed in");
                    navigate("/", Default::default());
                }
                Err(e) => state.report("sign in", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Sign in" subtitle="Manage your landing page content">
            <form on:submit=on_submit class="space-y-5">
                <TextField label="Email" field="email" kind="email" value=email errors=errors />
                <TextField label="Password" field="password" kind="password" value=password errors=errors />
                <div class="text-right text-sm">
                    <A href="/forgot-password" class="text-blue-600 hover:underline">"Forgot password?"</A>
                </div>
                <button type="submit" disabled=move || submitting.get() class=format!("w-full {}", PRIMARY_BUTTON)>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="text-center text-sm">
                "No account? "
                <A href="/register" class="text-blue-600 hover:underline">"Register"</A>
            </p>
        </AuthCard>
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (name, email, phone, password) = (
            name.get().trim().to_string(),
            email.get().trim().to_string(),
            phone.get().trim().to_string(),
            password.get().trim().to_string(),
        );

        let found = validate_registration(&name, &email, &phone, &password);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&name, &email, &phone, &password).await {
                Ok(message) => {
                    let message = if message.is_empty() { "Registration successful".to_string() } else { message };
                    state.show_success(&message);
                    navigate("/login", Default::default());
                }
                Err(e) => state.report("register", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Create account" subtitle="Register a new administrator">
            <form on:submit=on_submit class="space-y-5">
                <TextField label="Name" field="name" value=name errors=errors />
                <TextField label="Email" field="email" kind="email" value=email errors=errors />
                <TextField label="Phone" field="phone" kind="tel" value=phone errors=errors />
                <TextField label="Password" field="password" kind="password" value=password errors=errors />
                <button type="submit" disabled=move || submitting.get() class=format!("w-full {}", PRIMARY_BUTTON)>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
            <p class="text-center text-sm">
                "Already registered? "
                <A href="/login" class="text-blue-600 hover:underline">"Sign in"</A>
            </p>
        </AuthCard>
    }
}

/// Reset form for a token pasted from the reset email
#[component]
pub fn ForgotPassword() -> impl IntoView {
    view! {
        <AuthCard title="Reset Password" subtitle="Paste the code from your reset email">
            <ResetForm token=String::new() ask_token=true />
        </AuthCard>
    }
}

/// Reset form reached through the emailed `/reset-password/:token` link
#[component]
pub fn ResetPassword() -> impl IntoView {
    let params = use_params_map();
    let token = params.with_untracked(|p| p.get("token").cloned().unwrap_or_default());

    view! {
        <AuthCard title="Reset Password" subtitle="Enter your new password below">
            <ResetForm token=token ask_token=false />
        </AuthCard>
    }
}

#[component]
fn ResetForm(token: String, ask_token: bool) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let token = create_rw_signal(token);
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let (status, set_status) = create_signal(None::<Result<String, String>>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (token, password, confirm) = (token.get().trim().to_string(), password.get(), confirm.get());

        let mut found = validate_new_password(&password, &confirm);
        if token.is_empty() {
            found.insert("token", "Reset code is required".to_string());
        }
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::reset_password(&token, &password).await {
                Ok(message) => {
                    state.show_success("Password reset");
                    set_status.set(Some(Ok(message)));
                    gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
                        navigate("/login", Default::default());
                    })
                    .forget();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to reset password: {}", e).into());
                    set_status.set(Some(Err(e.user_message())));
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-5">
            <Show when=move || ask_token>
                <TextField label="Reset code" field="token" value=token errors=errors />
            </Show>
            <TextField label="New password" field="password" kind="password" value=password errors=errors />
            <TextField label="Confirm new password" field="confirm" kind="password" value=confirm errors=errors />
            <button type="submit" class=format!("w-full {}", PRIMARY_BUTTON)>"Reset Password"</button>
        </form>
        {move || status.get().map(|result| match result {
            Ok(message) => view! { <p class="text-center text-sm text-green-600">{message}</p> },
            Err(message) => view! { <p class="text-center text-sm text-red-600">{message}</p> },
        })}
    }
}
