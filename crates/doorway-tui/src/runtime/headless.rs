//! Drives the login page without a terminal.

use doorway_core::{AuthProvider, Field, Navigator};

use super::page::LoginPage;
use crate::events::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessOutcome {
    /// Signed in (or already signed in); holds the new location.
    Navigated(String),
    /// Validation blocked the submit; localized messages in field order.
    Invalid(Vec<String>),
    /// The login call failed; holds the message the form would show.
    Failed(String),
}

/// Mounts the page, submits the credentials and waits for the outcome.
/// The page is unmounted before returning.
pub async fn run_headless<P, N>(
    page: &mut LoginPage<P, N>,
    email: &str,
    password: &str,
) -> HeadlessOutcome
where
    P: AuthProvider + 'static,
    N: Navigator,
{
    page.mount();
    let outcome = drive(page, email, password).await;
    page.unmount();
    outcome
}

async fn drive<P, N>(page: &mut LoginPage<P, N>, email: &str, password: &str) -> HeadlessOutcome
where
    P: AuthProvider + 'static,
    N: Navigator,
{
    if page.has_left() {
        return HeadlessOutcome::Navigated(page.navigator().location().to_string());
    }

    page.dispatch(UiEvent::EditField {
        field: Field::Email,
        value: email.to_string(),
    });
    page.dispatch(UiEvent::EditField {
        field: Field::Password,
        value: password.to_string(),
    });
    page.dispatch(UiEvent::Submit);

    let strings = page.state().strings();
    let errors = &page.state().form.field_errors;
    if !errors.is_empty() {
        return HeadlessOutcome::Invalid(
            errors
                .iter()
                .map(|error| error.message(strings).to_string())
                .collect(),
        );
    }

    while page.state().form.is_submitting() {
        if !page.next_event().await {
            break;
        }
    }

    if page.has_left() {
        HeadlessOutcome::Navigated(page.navigator().location().to_string())
    } else {
        HeadlessOutcome::Failed(
            page.state()
                .form
                .submit_error
                .clone()
                .unwrap_or_else(|| strings.login_failed.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use doorway_core::{AuthError, HistoryNavigator, Locale};

    use super::*;
    use crate::runtime::PageOptions;
    use crate::test_support::StubProvider;

    fn page(provider: StubProvider, locale: Locale) -> LoginPage<StubProvider, HistoryNavigator> {
        LoginPage::new(
            Arc::new(provider),
            HistoryNavigator::new("/login"),
            PageOptions {
                locale,
                landing_path: "/dashboard".to_string(),
                login_path: "/login".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_headless_success_reports_landing() {
        let mut page = page(StubProvider::new(), Locale::En);
        let outcome = run_headless(&mut page, "test@example.com", "password123").await;

        assert_eq!(outcome, HeadlessOutcome::Navigated("/dashboard".to_string()));
        assert!(!page.state().mounted);
    }

    #[tokio::test]
    async fn test_headless_invalid_input_makes_no_call() {
        let mut page = page(StubProvider::new(), Locale::ZhTw);
        let outcome = run_headless(&mut page, "invalid-email", "12345678").await;

        assert_eq!(
            outcome,
            HeadlessOutcome::Invalid(vec![
                "請輸入有效的 Email 格式".to_string(),
                "密碼必須包含英文字母和數字".to_string(),
            ])
        );
        assert!(page.provider().calls().is_empty());
    }

    #[tokio::test]
    async fn test_headless_failure_reports_message() {
        let provider =
            StubProvider::new().respond(Err(AuthError::rejected(401, "Invalid credentials")));
        let mut page = page(provider, Locale::En);
        let outcome = run_headless(&mut page, "test@example.com", "password123").await;

        assert_eq!(
            outcome,
            HeadlessOutcome::Failed("Invalid credentials".to_string())
        );
        assert_eq!(page.navigator().location(), "/login");
    }

    #[tokio::test]
    async fn test_headless_already_authenticated_skips_login() {
        let mut page = page(StubProvider::new().authenticated(), Locale::En);
        let outcome = run_headless(&mut page, "", "").await;

        assert_eq!(outcome, HeadlessOutcome::Navigated("/dashboard".to_string()));
        assert!(page.provider().calls().is_empty());
    }
}
