//! # Navigation Module
//!
//! Screens as a finite enumeration and a pure transition function.
//!
//! Views emit a [`NavIntent`]; the [`Router`] applies it. The mapping is
//! testable without any rendering:
//!
//! ```text
//! Home -> Login -> {Admin,Employee}Dashboard -> CreateTraining / Reports / ... -> Dashboard
//! ```

use crate::account::{Role, SessionUser};
use crate::{TrainflowError, TrainingId};
use serde::{Deserialize, Serialize};

/// Every screen of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "training", rename_all = "snake_case")]
pub enum Screen {
    Home,
    Login,
    AdminDashboard,
    EmployeeDashboard,
    CreateTraining,
    Reports,
    TrainingViewer(TrainingId),
    VideoManager(TrainingId),
}

/// A navigation request emitted by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIntent {
    GetStarted,
    SignedIn(SessionUser),
    Logout,
    Back,
    OpenCreateTraining,
    TrainingCreated,
    OpenReports,
    OpenTraining(TrainingId),
    ManageVideos(TrainingId),
    TrainingCompleted,
    VideoAdded,
}

fn dashboard_for(role: Role) -> Screen {
    match role {
        Role::Admin => Screen::AdminDashboard,
        Role::Employee => Screen::EmployeeDashboard,
    }
}

/// The screen reached by applying `intent` on `screen`, if the intent is
/// meaningful there.
#[must_use]
pub fn transition(screen: Screen, intent: &NavIntent) -> Option<Screen> {
    use NavIntent as I;
    use Screen as S;

    match (screen, intent) {
        (S::Home | S::Login, I::Logout) => None,
        (_, I::Logout) => Some(S::Home),

        (S::Home, I::GetStarted) => Some(S::Login),
        (S::Login, I::SignedIn(user)) => Some(dashboard_for(user.role)),
        (S::Login, I::Back) => Some(S::Home),

        (S::AdminDashboard, I::OpenCreateTraining) => Some(S::CreateTraining),
        (S::AdminDashboard, I::OpenReports) => Some(S::Reports),
        (S::AdminDashboard, I::ManageVideos(id)) => Some(S::VideoManager(*id)),
        (S::CreateTraining, I::Back | I::TrainingCreated) => Some(S::AdminDashboard),
        (S::Reports, I::Back) => Some(S::AdminDashboard),
        (S::VideoManager(_), I::Back | I::VideoAdded) => Some(S::AdminDashboard),

        (S::EmployeeDashboard, I::OpenTraining(id)) => Some(S::TrainingViewer(*id)),
        (S::TrainingViewer(_), I::Back | I::TrainingCompleted) => Some(S::EmployeeDashboard),

        _ => None,
    }
}

/// Holds the current screen and the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    screen: Screen,
    user: Option<SessionUser>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Start on the home screen, signed out.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            user: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Apply an intent. Invalid intents leave the router unchanged.
    pub fn apply(&mut self, intent: NavIntent) -> Result<Screen, TrainflowError> {
        let next = transition(self.screen, &intent).ok_or_else(|| {
            TrainflowError::InvalidNavigation {
                screen: format!("{:?}", self.screen),
                intent: format!("{:?}", intent),
            }
        })?;

        match intent {
            NavIntent::SignedIn(user) => self.user = Some(user),
            NavIntent::Logout => self.user = None,
            _ => {}
        }
        self.screen = next;
        Ok(next)
    }
}

// =============================================================================
// TESTS
// =============================================================================
