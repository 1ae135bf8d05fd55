//! Login screen reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use doorway_core::{AuthError, Field, SessionSnapshot, validate};

use crate::common::RequestId;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus, Phase};

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Mounted(snapshot) => handle_mounted(app, snapshot),
        UiEvent::Unmounted => handle_unmounted(app),
        // Nothing below may touch state once the screen is gone.
        _ if !app.mounted => {
            tracing::debug!("event after unmount ignored");
            vec![]
        }
        UiEvent::SessionChanged { authenticated } => {
            if authenticated {
                navigate_to_landing(app)
            } else {
                vec![]
            }
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::EditField { field, value } => {
            set_field(app, field, value);
            vec![]
        }
        UiEvent::Submit => submit(app),
        UiEvent::LoginFinished { request, result } => handle_login_finished(app, request, result),
    }
}

fn handle_mounted(app: &mut AppState, snapshot: SessionSnapshot) -> Vec<UiEffect> {
    if app.mounted {
        return vec![];
    }
    app.mounted = true;
    tracing::info!(authenticated = snapshot.authenticated, "login screen mounted");

    let mut effects = Vec::new();
    if let Some(message) = snapshot.expired_message {
        app.form.expired_notice = Some(message);
        effects.push(UiEffect::ClearExpiredMessage);
    }
    if snapshot.authenticated {
        effects.extend(navigate_to_landing(app));
    }
    effects
}

fn handle_unmounted(app: &mut AppState) -> Vec<UiEffect> {
    if !app.mounted {
        return vec![];
    }
    app.mounted = false;
    match app.login.cancel() {
        Some(token) => {
            tracing::info!("login screen unmounted with a pending login");
            vec![UiEffect::CancelLogin { token }]
        }
        None => vec![],
    }
}

fn navigate_to_landing(app: &mut AppState) -> Vec<UiEffect> {
    if app.form.phase == Phase::NavigatedAway {
        return vec![];
    }
    app.form.phase = Phase::NavigatedAway;
    vec![UiEffect::Navigate {
        path: app.landing_path.clone(),
        replace: true,
    }]
}

fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.form.phase != Phase::Idle {
        tracing::debug!(phase = ?app.form.phase, "submit ignored");
        return vec![];
    }

    let errors = validate(&app.form.email, &app.form.password);
    if !errors.is_empty() {
        tracing::info!(fields = ?errors.fields(), "submit blocked by validation");
        app.form.field_errors = errors;
        return vec![];
    }

    app.form.field_errors.clear();
    app.form.submit_error = None;
    let (request, cancel) = app.login.begin();
    app.form.phase = Phase::Submitting(request);
    tracing::info!(request = request.0, "login submitted");

    vec![UiEffect::Login {
        request,
        cancel,
        email: app.form.email.clone(),
        password: app.form.password.clone(),
    }]
}

fn handle_login_finished(
    app: &mut AppState,
    request: RequestId,
    result: Result<(), AuthError>,
) -> Vec<UiEffect> {
    if !app.login.finish_if_active(request) {
        tracing::debug!(request = request.0, "stale login result dropped");
        return vec![];
    }
    if app.form.phase == Phase::NavigatedAway {
        tracing::debug!(request = request.0, "login result after navigation dropped");
        return vec![];
    }

    match result {
        Ok(()) => {
            tracing::info!(request = request.0, "login succeeded");
            navigate_to_landing(app)
        }
        Err(err) => {
            tracing::warn!(request = request.0, error = %err, "login failed");
            app.form.submit_error = Some(err.display_message(app.strings().login_failed));
            app.form.phase = Phase::Idle;
            vec![]
        }
    }
}

fn set_field(app: &mut AppState, field: Field, value: String) {
    *app.form.value_mut(field) = value;
    app.form.field_errors.clear_field(field);
}

fn edit_focused(app: &mut AppState, edit: impl FnOnce(&mut String)) {
    if let Some(field) = app.form.focus.field() {
        edit(app.form.value_mut(field));
        app.form.field_errors.clear_field(field);
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    if app.form.phase == Phase::NavigatedAway {
        return vec![];
    }
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            let text: String = text.chars().filter(|c| !c.is_control()).collect();
            edit_focused(app, |value| value.push_str(&text));
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::Down => {
            app.form.focus = app.form.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus = app.form.focus.prev();
            vec![]
        }
        KeyCode::Enter => match app.form.focus {
            Focus::Email => {
                app.form.focus = Focus::Password;
                vec![]
            }
            Focus::Password | Focus::Submit => submit(app),
        },
        KeyCode::Backspace => {
            edit_focused(app, |value| {
                value.pop();
            });
            vec![]
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            edit_focused(app, |value| value.push(c));
            vec![]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use doorway_core::{Locale, ValidationError};

    use super::*;

    fn mounted_app() -> AppState {
        let mut app = AppState::new(Locale::En, "/dashboard");
        let effects = update(&mut app, UiEvent::Mounted(SessionSnapshot::default()));
        assert!(effects.is_empty());
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    fn fill(app: &mut AppState, email: &str, password: &str) {
        update(
            app,
            UiEvent::EditField {
                field: Field::Email,
                value: email.to_string(),
            },
        );
        update(
            app,
            UiEvent::EditField {
                field: Field::Password,
                value: password.to_string(),
            },
        );
    }

    fn submitted_request(effects: &[UiEffect]) -> RequestId {
        match effects {
            [UiEffect::Login { request, .. }] => *request,
            other => panic!("expected a single login effect, got {other:?}"),
        }
    }

    #[test]
    fn test_authenticated_at_mount_navigates_with_replace() {
        let mut app = AppState::new(Locale::En, "/dashboard");
        let effects = update(
            &mut app,
            UiEvent::Mounted(SessionSnapshot {
                authenticated: true,
                expired_message: None,
            }),
        );

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Navigate { path, replace: true }] if path == "/dashboard"
        ));
        assert_eq!(app.form.phase, Phase::NavigatedAway);
    }

    #[test]
    fn test_expired_message_is_kept_and_cleared_once() {
        let mut app = AppState::new(Locale::En, "/dashboard");
        let snapshot = SessionSnapshot {
            authenticated: false,
            expired_message: Some("session expired".to_string()),
        };

        let effects = update(&mut app, UiEvent::Mounted(snapshot.clone()));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ClearExpiredMessage]
        ));
        assert_eq!(app.form.expired_notice.as_deref(), Some("session expired"));

        // A repeated mount signal while mounted does not clear again.
        assert!(update(&mut app, UiEvent::Mounted(snapshot)).is_empty());

        // Editing never drops the notice.
        type_text(&mut app, "x");
        assert_eq!(app.form.expired_notice.as_deref(), Some("session expired"));
    }

    #[test]
    fn test_invalid_submit_sets_field_errors_without_login() {
        let mut app = mounted_app();
        fill(&mut app, "invalid-email", "123");

        let effects = update(&mut app, UiEvent::Submit);

        assert!(effects.is_empty());
        assert_eq!(app.form.phase, Phase::Idle);
        let errors = &app.form.field_errors;
        assert_eq!(errors.get(Field::Email), [ValidationError::InvalidEmail]);
        assert!(errors.contains(ValidationError::PasswordTooShort));
        assert!(errors.contains(ValidationError::PasswordComposition));
    }

    #[test]
    fn test_valid_submit_emits_login_with_credentials() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");

        let effects = update(&mut app, UiEvent::Submit);

        match effects.as_slice() {
            [
                UiEffect::Login {
                    email, password, ..
                },
            ] => {
                assert_eq!(email, "test@example.com");
                assert_eq!(password, "password123");
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(app.form.is_submitting());
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");

        let request = submitted_request(&update(&mut app, UiEvent::Submit));
        assert!(update(&mut app, UiEvent::Submit).is_empty());
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.form.phase, Phase::Submitting(request));
    }

    #[test]
    fn test_login_success_navigates_once() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");
        let request = submitted_request(&update(&mut app, UiEvent::Submit));

        let effects = update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Ok(()),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Navigate { path, replace: true }] if path == "/dashboard"
        ));

        // The provider flipping to authenticated afterwards does not navigate twice.
        assert!(update(&mut app, UiEvent::SessionChanged { authenticated: true }).is_empty());
    }

    #[test]
    fn test_login_failure_shows_server_message() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");
        let request = submitted_request(&update(&mut app, UiEvent::Submit));

        let effects = update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Err(AuthError::rejected(401, "Invalid credentials")),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(app.form.submit_error.as_deref(), Some("Invalid credentials"));
        assert_eq!(app.form.phase, Phase::Idle);
    }

    #[test]
    fn test_failure_after_session_redirect_leaves_form_untouched() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");
        let request = submitted_request(&update(&mut app, UiEvent::Submit));

        let effects = update(&mut app, UiEvent::SessionChanged { authenticated: true });
        assert_eq!(effects.len(), 1);

        let effects = update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Err(AuthError::rejected(401, "Invalid credentials")),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.form.phase, Phase::NavigatedAway);
        assert!(app.form.submit_error.is_none());
    }

    #[test]
    fn test_login_failure_without_message_uses_locale_fallback() {
        let mut app = AppState::new(Locale::ZhTw, "/dashboard");
        update(&mut app, UiEvent::Mounted(SessionSnapshot::default()));
        fill(&mut app, "test@example.com", "password123");
        let request = submitted_request(&update(&mut app, UiEvent::Submit));

        update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Err(AuthError::Rejected {
                    status: 500,
                    body: None,
                }),
            },
        );

        assert_eq!(app.form.submit_error.as_deref(), Some("登入失敗，請稍後再試"));
    }

    #[test]
    fn test_resubmit_clears_previous_submit_error() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");
        let request = submitted_request(&update(&mut app, UiEvent::Submit));
        update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Err(AuthError::rejected(401, "Invalid credentials")),
            },
        );

        submitted_request(&update(&mut app, UiEvent::Submit));
        assert_eq!(app.form.submit_error, None);
    }

    #[test]
    fn test_unmount_cancels_and_ignores_late_result() {
        let mut app = mounted_app();
        fill(&mut app, "test@example.com", "password123");
        let effects = update(&mut app, UiEvent::Submit);
        let (request, cancel) = match effects.as_slice() {
            [UiEffect::Login {
                request, cancel, ..
            }] => (*request, cancel.clone()),
            other => panic!("unexpected effects {other:?}"),
        };

        let effects = update(&mut app, UiEvent::Unmounted);
        match effects.as_slice() {
            [UiEffect::CancelLogin { token }] => token.cancel(),
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(cancel.is_cancelled());

        let effects = update(
            &mut app,
            UiEvent::LoginFinished {
                request,
                result: Err(AuthError::rejected(401, "Invalid credentials")),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.form.submit_error, None);
        assert!(update(&mut app, UiEvent::SessionChanged { authenticated: true }).is_empty());
    }

    #[test]
    fn test_typing_clears_only_that_fields_errors() {
        let mut app = mounted_app();
        fill(&mut app, "bad", "short");
        update(&mut app, UiEvent::Submit);
        assert!(!app.form.field_errors.get(Field::Password).is_empty());

        type_text(&mut app, "@example.com");

        assert_eq!(app.form.email, "bad@example.com");
        assert!(app.form.field_errors.get(Field::Email).is_empty());
        assert!(!app.form.field_errors.get(Field::Password).is_empty());
    }

    #[test]
    fn test_keyboard_flow_submits_from_password() {
        let mut app = mounted_app();
        type_text(&mut app, "test@example.com");
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.form.focus, Focus::Password);

        type_text(&mut app, "password1234");
        update(&mut app, key(KeyCode::Backspace));
        let effects = update(&mut app, key(KeyCode::Enter));

        match effects.as_slice() {
            [UiEffect::Login { password, .. }] => assert_eq!(password, "password123"),
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn test_focus_navigation_and_quit_keys() {
        let mut app = mounted_app();
        update(&mut app, key(KeyCode::Tab));
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.form.focus, Focus::Submit);

        // Typing on the submit control edits nothing.
        type_text(&mut app, "abc");
        assert!(app.form.email.is_empty() && app.form.password.is_empty());

        update(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.form.focus, Focus::Password);

        assert!(matches!(
            update(&mut app, key(KeyCode::Esc)).as_slice(),
            [UiEffect::Quit]
        ));
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(matches!(update(&mut app, ctrl_c).as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = mounted_app();
        let release = UiEvent::Terminal(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        )));
        update(&mut app, release);
        assert!(app.form.email.is_empty());
    }

    #[test]
    fn test_paste_strips_control_characters() {
        let mut app = mounted_app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("test@example.com\n".to_string())),
        );
        assert_eq!(app.form.email, "test@example.com");
    }
}
