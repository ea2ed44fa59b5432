//! Tests for private token resolution.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

use super::*;
use crate::gitlab::MockSessionGateway;

const TOKEN_URL: &str = "http://gitlab.example.com/profile/account";
const STORE_PATH: &str = "/work/project/.lab";

struct Collaborators {
    store: MockTokenStore,
    prompt: MockLoginPrompt,
    session: MockSessionGateway,
}

impl Collaborators {
    fn resolve(&self, explicit: Option<&str>) -> Result<ResolvedToken, LabError> {
        CredentialResolver::new(
            &self.store,
            &self.prompt,
            &self.session,
            TOKEN_URL,
            STORE_PATH,
        )
        .resolve(explicit)
    }
}

#[fixture]
fn collaborators() -> Collaborators {
    Collaborators {
        store: MockTokenStore::new(),
        prompt: MockLoginPrompt::new(),
        session: MockSessionGateway::new(),
    }
}

fn token(value: &str) -> PrivateToken {
    PrivateToken::new(value).expect("token should be valid")
}

#[rstest]
fn explicit_token_short_circuits_all_io(mut collaborators: Collaborators) {
    collaborators.store.expect_load().never();
    collaborators.store.expect_save().never();
    collaborators.prompt.expect_is_interactive().never();
    collaborators.prompt.expect_login().never();
    collaborators.session.expect_get_session().never();

    let resolved = collaborators
        .resolve(Some("explicit-token"))
        .expect("explicit token should resolve");

    assert_eq!(resolved.token, token("explicit-token"));
    assert_eq!(resolved.source, TokenSource::Explicit);
}

#[rstest]
fn stored_token_is_used_without_prompting(mut collaborators: Collaborators) {
    collaborators
        .store
        .expect_load()
        .times(1)
        .returning(|| Ok(Some(token("stored-token"))));
    collaborators.prompt.expect_is_interactive().never();
    collaborators.session.expect_get_session().never();

    let resolved = collaborators
        .resolve(Some("   "))
        .expect("stored token should resolve");

    assert_eq!(resolved.token, token("stored-token"));
    assert_eq!(
        resolved.source,
        TokenSource::Stored {
            path: Utf8PathBuf::from(STORE_PATH)
        }
    );
}

#[rstest]
fn unreadable_store_is_fatal(mut collaborators: Collaborators) {
    collaborators.store.expect_load().returning(|| {
        Err(LabError::Configuration {
            message: "failed to parse .lab".to_owned(),
        })
    });
    collaborators.prompt.expect_is_interactive().never();

    let result = collaborators.resolve(None);

    assert!(matches!(result, Err(LabError::Configuration { .. })));
}

#[rstest]
fn interactive_login_saves_new_token(mut collaborators: Collaborators) {
    collaborators.store.expect_load().returning(|| Ok(None));
    collaborators
        .prompt
        .expect_is_interactive()
        .return_const(true);
    let mut login_answers = vec!["jane".to_owned(), String::new()];
    collaborators
        .prompt
        .expect_login()
        .times(2)
        .returning(move || Ok(login_answers.pop().unwrap_or_default()));
    collaborators
        .prompt
        .expect_password()
        .times(1)
        .returning(|| Ok("hunter2".to_owned()));
    collaborators
        .session
        .expect_get_session()
        .withf(|login, password| login == "jane" && password == "hunter2")
        .times(1)
        .returning(|_, _| Ok(token("fresh-token")));
    collaborators
        .store
        .expect_save()
        .withf(|saved| saved.value() == "fresh-token")
        .times(1)
        .returning(|_| Ok(Utf8PathBuf::from(STORE_PATH)));

    let resolved = collaborators
        .resolve(None)
        .expect("login should resolve a token");

    assert_eq!(resolved.token, token("fresh-token"));
    assert_eq!(
        resolved.source,
        TokenSource::Login {
            saved_to: Utf8PathBuf::from(STORE_PATH)
        }
    );
}

#[rstest]
fn rejected_login_is_not_saved(mut collaborators: Collaborators) {
    collaborators.store.expect_load().returning(|| Ok(None));
    collaborators.store.expect_save().never();
    collaborators
        .prompt
        .expect_is_interactive()
        .return_const(true);
    collaborators
        .prompt
        .expect_login()
        .returning(|| Ok("jane".to_owned()));
    collaborators
        .prompt
        .expect_password()
        .returning(|| Ok("wrong".to_owned()));
    collaborators.session.expect_get_session().returning(|_, _| {
        Err(LabError::Authentication {
            message: "Unauthorized".to_owned(),
        })
    });

    let result = collaborators.resolve(None);

    assert!(matches!(result, Err(LabError::Authentication { .. })));
}

#[rstest]
fn non_interactive_without_token_names_every_option(mut collaborators: Collaborators) {
    collaborators.store.expect_load().returning(|| Ok(None));
    collaborators
        .prompt
        .expect_is_interactive()
        .return_const(false);
    collaborators.prompt.expect_login().never();
    collaborators.session.expect_get_session().never();

    let error = collaborators
        .resolve(None)
        .expect_err("resolution should fail");

    let message = error.to_string();
    assert!(message.contains(TOKEN_URL), "message: {message}");
    assert!(message.contains("LAB_PRIVATE_TOKEN"), "message: {message}");
    assert!(message.contains("--token"), "message: {message}");
}
