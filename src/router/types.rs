//! Request and reply types for the router.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc::CalculatorKind;

/// Per-user conversation state, owned by the caller and passed into every
/// router call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Fresh for every inbound message; tags log lines
    pub request_id: Uuid,
    pub user_id: i64,
    /// Calculator chosen through a `calc_<kind>` action, awaiting parameters
    #[serde(default)]
    pub pending: Option<CalculatorKind>,
}

impl RequestContext {
    pub fn new(user_id: i64) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user_id,
            pending: None,
        }
    }

    /// Start a new request for the same user, keeping session state.
    pub fn next_request(&mut self) -> &mut Self {
        self.request_id = Uuid::new_v4();
        self
    }
}

/// Which pipeline produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Calculator,
    Material,
    Knowledge,
    Statistics,
    /// Menus, prompts and unknown actions
    Navigation,
}

/// A button the transport may render under a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpAction {
    /// Passed back to `Router::handle_action` when chosen
    pub id: String,
    pub label: String,
}

impl FollowUpAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Text plus follow-up actions, ready for the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub actions: Vec<FollowUpAction>,
    pub intent: Intent,
}

impl Reply {
    pub fn new(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            intent,
        }
    }

    pub fn with_actions(mut self, actions: Vec<FollowUpAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_action(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.actions.push(FollowUpAction::new(id, label));
        self
    }

    /// Ids of every attached action, in order.
    pub fn action_ids(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.id.as_str()).collect()
    }
}
