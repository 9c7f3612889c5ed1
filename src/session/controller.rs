//! Session/navigation controller
//!
//! Owns the [`Session`] value, the durable [`SessionStore`] mirror and the
//! [`GovApi`] gateway. Every screen action makes exactly one API call and, on
//! success, returns to the home menu with a confirmation notice. Failures
//! leave the citizen on the same screen with the error shown inline.

use crate::api::models::{IdApplicationReceipt, PaymentReceipt, RegistrationReceipt, ReportReceipt};
use crate::session::client::GovApi;
use crate::session::error::{Result, SessionError};
use crate::session::model::{ActionResult, Screen, Session, User, View};
use crate::session::storage::{LocalStorage, SessionStore};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct SessionController<A, S> {
    api: A,
    store: SessionStore<S>,
    session: Session,
}

impl<A: GovApi, S: LocalStorage> SessionController<A, S> {
    /// Start up, restoring a previously stored user if there is one
    pub fn start(api: A, store: SessionStore<S>) -> Self {
        let user = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read stored session; starting signed out");
            None
        });

        if let Some(user) = &user {
            info!(nrc = %user.nrc, "Restored stored session");
        }

        Self {
            api,
            store,
            session: Session::restore(user),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn view(&self) -> View {
        View::of(&self.session)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    fn transition(&mut self, step: impl FnOnce(Session) -> Session) {
        let current = std::mem::take(&mut self.session);
        self.session = step(current);
    }

    /// Surface an error inline and hand it back to the caller
    fn fail(&mut self, err: SessionError) -> SessionError {
        let message = err.to_string();
        self.transition(|s| s.with_notice(message));
        err
    }

    /// Sign in with a phone number. Any non-empty number is accepted by the mock.
    pub async fn login(&mut self, identifier: &str) -> Result<&User> {
        if self.session.is_authenticated() {
            let err = SessionError::WrongScreen {
                expected: Screen::Login,
                actual: self.screen(),
            };
            return Err(self.fail(err));
        }

        let phone = identifier.trim();
        if phone.is_empty() {
            let err = SessionError::Validation("Please enter your phone number".to_string());
            return Err(self.fail(err));
        }

        let user: User = match self.api.login(phone).await {
            Ok(resp) => resp.into(),
            Err(e) => return Err(self.fail(e)),
        };

        if let Err(e) = self.store.save(&user) {
            warn!(error = %e, "Could not persist session; it will not survive a reload");
        }

        info!(nrc = %user.nrc, "Signed in");
        self.session = Session::signed_in(user);

        self.session.user().ok_or(SessionError::NotAuthenticated)
    }

    /// Sign out, clearing the in-memory and stored user.
    ///
    /// Memory is cleared even when the stored copy cannot be removed; that
    /// failure is returned and shown on the login screen, since the next
    /// start would otherwise sign the citizen back in.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.session.user() {
            info!(nrc = %user.nrc, "Signed out");
        }
        self.session = Session::signed_out();

        self.store.clear().map_err(|e| {
            warn!(error = %e, "Could not remove stored session");
            self.fail(e.into())
        })
    }

    /// Open a screen from the home menu; ignored while signed out
    pub fn navigate(&mut self, screen: Screen) {
        let from = self.screen();
        self.transition(|s| s.navigate(screen));
        if self.screen() == from && from != screen {
            debug!(from = %from, to = %screen, "Navigation ignored");
        }
    }

    /// Return to the home menu
    pub fn back(&mut self) {
        self.transition(Session::back);
    }

    /// Token of the signed-in user, provided the citizen is on `expected`
    fn authorize(&mut self, expected: Screen) -> Result<String> {
        let token = match self.session.user().map(|user| user.token.clone()) {
            Some(token) => token,
            None => return Err(self.fail(SessionError::NotAuthenticated)),
        };

        let actual = self.screen();
        if actual != expected {
            return Err(self.fail(SessionError::WrongScreen { expected, actual }));
        }

        Ok(token)
    }

    fn finish<T: Clone>(&mut self, outcome: Result<T>, wrap: fn(T) -> ActionResult) -> Result<T> {
        match outcome {
            Ok(receipt) => {
                let result = wrap(receipt.clone());
                info!(reference = %result.reference(), "Action completed");
                self.transition(|s| s.complete(result));
                Ok(receipt)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn pay_tax(&mut self, amount: Value, tax_type: Value) -> Result<PaymentReceipt> {
        let token = self.authorize(Screen::Pay)?;
        let outcome = self.api.pay_tax(&token, amount, tax_type).await;
        self.finish(outcome, ActionResult::Payment)
    }

    pub async fn register_business(&mut self, data: Value) -> Result<RegistrationReceipt> {
        let token = self.authorize(Screen::Register)?;
        let outcome = self.api.register_business(&token, data).await;
        self.finish(outcome, ActionResult::Registration)
    }

    pub async fn apply_for_id(&mut self) -> Result<IdApplicationReceipt> {
        let token = self.authorize(Screen::IdApply)?;
        let outcome = self.api.apply_for_id(&token).await;
        self.finish(outcome, ActionResult::IdApplication)
    }

    pub async fn submit_report(&mut self, details: Option<&str>) -> Result<ReportReceipt> {
        let token = self.authorize(Screen::Report)?;
        let outcome = self.api.submit_report(Some(&token), details).await;
        self.finish(outcome, ActionResult::Report)
    }
}
