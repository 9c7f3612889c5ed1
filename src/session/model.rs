//! Session state: the signed-in citizen, the active screen and what to render

use crate::api::models::{IdApplicationReceipt, PaymentReceipt, RegistrationReceipt, ReportReceipt};
use crate::auth::models::LoginResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The signed-in citizen as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub nrc: String,
    pub token: String,
}

impl From<LoginResponse> for User {
    fn from(resp: LoginResponse) -> Self {
        Self {
            name: resp.name,
            nrc: resp.nrc,
            token: resp.token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Home,
    Pay,
    Register,
    #[serde(rename = "id")]
    IdApply,
    Docs,
    Report,
}

impl Screen {
    /// Screens reachable from the home menu, in menu order
    pub const ACTIONS: [Screen; 5] = [
        Screen::Pay,
        Screen::Register,
        Screen::IdApply,
        Screen::Docs,
        Screen::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Home => "home",
            Screen::Pay => "pay",
            Screen::Register => "register",
            Screen::IdApply => "id",
            Screen::Docs => "docs",
            Screen::Report => "report",
        }
    }

    /// Label shown on the home menu
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Home => "Home",
            Screen::Pay => "Pay Taxes (ZRA)",
            Screen::Register => "Register a Business (PACRA)",
            Screen::IdApply => "Apply for National ID",
            Screen::Docs => "My Documents",
            Screen::Report => "Report Corruption",
        }
    }

    pub fn is_action(&self) -> bool {
        Self::ACTIONS.contains(self)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "login" => Ok(Screen::Login),
            "home" => Ok(Screen::Home),
            "pay" => Ok(Screen::Pay),
            "register" => Ok(Screen::Register),
            "id" => Ok(Screen::IdApply),
            "docs" => Ok(Screen::Docs),
            "report" => Ok(Screen::Report),
            other => Err(format!("unknown screen: {}", other)),
        }
    }
}

/// Receipt of one completed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionResult {
    Payment(PaymentReceipt),
    Registration(RegistrationReceipt),
    IdApplication(IdApplicationReceipt),
    Report(ReportReceipt),
}

impl ActionResult {
    /// Confirmation line shown inline after the action completes
    pub fn message(&self) -> String {
        match self {
            ActionResult::Payment(r) => format!("Payment successful. Ref: {}", r.reference),
            ActionResult::Registration(r) => format!("Business registered. Reg No: {}", r.reg_no),
            ActionResult::IdApplication(r) => {
                format!("ID application submitted. Application ID: {}", r.app_id)
            }
            ActionResult::Report(r) => format!("Report submitted. Case ID: {}", r.case_id),
        }
    }

    pub fn reference(&self) -> &str {
        match self {
            ActionResult::Payment(r) => &r.reference,
            ActionResult::Registration(r) => &r.reg_no,
            ActionResult::IdApplication(r) => &r.app_id,
            ActionResult::Report(r) => &r.case_id,
        }
    }
}

/// Session value threaded through every navigation step.
///
/// Transitions consume the current session and return the next one. A
/// session without a user is always on [`Screen::Login`].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<User>,
    screen: Screen,
    notice: Option<String>,
    receipts: Vec<ActionResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl Session {
    pub fn signed_out() -> Self {
        Self {
            user: None,
            screen: Screen::Login,
            notice: None,
            receipts: Vec::new(),
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            screen: Screen::Home,
            notice: None,
            receipts: Vec::new(),
        }
    }

    /// Session for a user restored from durable storage at startup
    pub fn restore(user: Option<User>) -> Self {
        user.map_or_else(Self::signed_out, Self::signed_in)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn receipts(&self) -> &[ActionResult] {
        &self.receipts
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Home → action screen. Ignored without a user or off the home screen.
    pub fn navigate(mut self, screen: Screen) -> Self {
        if !self.is_authenticated() {
            return self;
        }
        match (self.screen, screen) {
            (Screen::Home, target) if target.is_action() => {
                self.screen = target;
                self.notice = None;
            }
            (current, Screen::Home) if current != Screen::Home => return self.back(),
            _ => {}
        }
        self
    }

    /// Any non-home screen → home, while signed in
    pub fn back(mut self) -> Self {
        if self.is_authenticated() && self.screen != Screen::Home {
            self.screen = Screen::Home;
            self.notice = None;
        }
        self
    }

    /// Record a completed action and return to the home menu with its confirmation
    pub fn complete(mut self, result: ActionResult) -> Self {
        if self.is_authenticated() {
            self.notice = Some(result.message());
            self.receipts.push(result);
            self.screen = Screen::Home;
        }
        self
    }

    /// Show a message inline without changing screens
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// One row on the documents screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub title: String,
    pub reference: String,
}

/// What the client renders for the current session
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Login {
        notice: Option<String>,
    },
    Home {
        name: String,
        nrc: String,
        menu: Vec<Screen>,
        notice: Option<String>,
    },
    PayTax {
        notice: Option<String>,
    },
    RegisterBusiness {
        notice: Option<String>,
    },
    IdApplication {
        nrc: String,
        notice: Option<String>,
    },
    Documents {
        documents: Vec<DocumentEntry>,
    },
    Report {
        notice: Option<String>,
    },
}

impl View {
    /// Render boundary: every screen maps to exactly one view
    pub fn of(session: &Session) -> Self {
        let notice = session.notice.clone();
        let user = match &session.user {
            Some(user) => user,
            None => return View::Login { notice },
        };

        match session.screen {
            // A signed-in session never sits on the login screen; show home.
            Screen::Login | Screen::Home => View::Home {
                name: user.name.clone(),
                nrc: user.nrc.clone(),
                menu: Screen::ACTIONS.to_vec(),
                notice,
            },
            Screen::Pay => View::PayTax { notice },
            Screen::Register => View::RegisterBusiness { notice },
            Screen::IdApply => View::IdApplication {
                nrc: user.nrc.clone(),
                notice,
            },
            Screen::Docs => View::Documents {
                documents: documents_for(user, &session.receipts),
            },
            Screen::Report => View::Report { notice },
        }
    }
}

fn documents_for(user: &User, receipts: &[ActionResult]) -> Vec<DocumentEntry> {
    let mut documents = vec![DocumentEntry {
        title: "National Registration Card".to_string(),
        reference: user.nrc.clone(),
    }];

    documents.extend(receipts.iter().map(|receipt| {
        let title = match receipt {
            ActionResult::Payment(_) => "Tax payment receipt",
            ActionResult::Registration(_) => "Business registration certificate",
            ActionResult::IdApplication(_) => "National ID application",
            ActionResult::Report(_) => "Corruption report",
        };
        DocumentEntry {
            title: title.to_string(),
            reference: receipt.reference().to_string(),
        }
    }));

    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            name: "Test Citizen".to_string(),
            nrc: "0977000000".to_string(),
            token: "token".to_string(),
        }
    }

    fn report(case_id: &str) -> ActionResult {
        ActionResult::Report(ReportReceipt {
            status: "OK".to_string(),
            case_id: case_id.to_string(),
        })
    }

    #[test]
    fn test_screen_names_round_trip_through_str() {
        for screen in [Screen::Login, Screen::Home]
            .into_iter()
            .chain(Screen::ACTIONS)
        {
            assert_eq!(screen.as_str().parse::<Screen>().unwrap(), screen);
        }
        assert!("settings".parse::<Screen>().is_err());
        assert_eq!(serde_json::to_string(&Screen::IdApply).unwrap(), "\"id\"");
    }

    #[test]
    fn test_navigate_ignored_when_signed_out() {
        let session = Session::signed_out().navigate(Screen::Pay);
        assert_eq!(session.screen(), Screen::Login);
        assert_eq!(View::of(&session), View::Login { notice: None });
    }

    #[test]
    fn test_navigate_only_from_home() {
        let session = Session::signed_in(user()).navigate(Screen::Pay);
        assert_eq!(session.screen(), Screen::Pay);

        // Action screens do not chain into each other.
        let session = session.navigate(Screen::Report);
        assert_eq!(session.screen(), Screen::Pay);

        let session = session.navigate(Screen::Home);
        assert_eq!(session.screen(), Screen::Home);

        // Login is not a navigation target.
        let session = session.navigate(Screen::Login);
        assert_eq!(session.screen(), Screen::Home);
    }

    #[test]
    fn test_back_returns_home() {
        for screen in Screen::ACTIONS {
            let session = Session::signed_in(user()).navigate(screen).back();
            assert_eq!(session.screen(), Screen::Home);
        }
        assert_eq!(Session::signed_out().back().screen(), Screen::Login);
    }

    #[test]
    fn test_complete_returns_home_with_message() {
        let session = Session::signed_in(user())
            .navigate(Screen::Report)
            .complete(report("CASE-ABC1234"));

        assert_eq!(session.screen(), Screen::Home);
        assert_eq!(session.notice(), Some("Report submitted. Case ID: CASE-ABC1234"));
        assert_eq!(session.receipts().len(), 1);

        // Navigating away clears the confirmation.
        let session = session.navigate(Screen::Docs);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_complete_ignored_when_signed_out() {
        let session = Session::signed_out().complete(report("CASE-ABC1234"));
        assert!(session.receipts().is_empty());
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn test_restore() {
        assert_eq!(Session::restore(None).screen(), Screen::Login);
        let restored = Session::restore(Some(user()));
        assert_eq!(restored.screen(), Screen::Home);
        assert_eq!(restored.user(), Some(&user()));
    }

    #[test]
    fn test_view_per_screen() {
        let home = Session::signed_in(user());
        match View::of(&home) {
            View::Home { name, menu, .. } => {
                assert_eq!(name, "Test Citizen");
                assert_eq!(menu, Screen::ACTIONS.to_vec());
            }
            other => panic!("expected home view, got {:?}", other),
        }

        assert!(matches!(View::of(&home.clone().navigate(Screen::Pay)), View::PayTax { .. }));
        assert!(matches!(
            View::of(&home.clone().navigate(Screen::Register)),
            View::RegisterBusiness { .. }
        ));
        assert!(matches!(
            View::of(&home.clone().navigate(Screen::IdApply)),
            View::IdApplication { .. }
        ));
        assert!(matches!(View::of(&home.clone().navigate(Screen::Report)), View::Report { .. }));
    }

    #[test]
    fn test_documents_view_lists_nrc_and_receipts() {
        let session = Session::signed_in(user())
            .navigate(Screen::Report)
            .complete(report("CASE-XYZ9876"))
            .navigate(Screen::Docs);

        let View::Documents { documents } = View::of(&session) else {
            panic!("expected documents view");
        };
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].reference, "0977000000");
        assert_eq!(documents[1].reference, "CASE-XYZ9876");
    }
}
