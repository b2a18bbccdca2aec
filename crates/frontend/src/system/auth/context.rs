use contracts::system::auth::{LoginResponse, SessionInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// How often the signed-in session (access map, company flags) is re-read.
pub const SESSION_POLL_INTERVAL_MS: u32 = 60_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub session: Option<SessionInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.session.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // Try to restore session from localStorage on mount
    create_effect(move |_| {
        if storage::get_access_token().is_none() {
            return;
        }
        spawn_local(async move {
            match fetch_session().await {
                Ok(state) => set_auth_state.set(state),
                Err(e) => {
                    log::info!("stored session rejected: {}", e);
                    storage::clear_tokens();
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Reads the session with the stored access token, refreshing the token once
/// if the server rejects it.
pub async fn fetch_session() -> Result<AuthState, String> {
    let access_token = storage::get_access_token().ok_or("no stored access token")?;
    match api::get_session(&access_token).await {
        Ok(session) => Ok(AuthState {
            access_token: Some(access_token),
            session: Some(session),
        }),
        Err(first_error) => {
            let refresh_token = storage::get_refresh_token().ok_or(first_error)?;
            let response = api::refresh_token(refresh_token).await?;
            storage::save_access_token(&response.access_token);
            let session = api::get_session(&response.access_token).await?;
            Ok(AuthState {
                access_token: Some(response.access_token),
                session: Some(session),
            })
        }
    }
}

/// Stores tokens from a successful login and switches the app to the main layout.
pub fn apply_login(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_tokens(&response.access_token, &response.refresh_token);
    log::info!("signed in as {}", response.session.user.username);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        session: Some(response.session),
    });
}

pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("{}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
