//! Authored-answer payload for `POST /submit-answer`.
//!
//! An answer is the acceptance specification for a puzzle: the event key it
//! is stored under, the reward text shown on success, and the constraints a
//! submission must satisfy. Constraints are evaluated server-side in
//! insertion order with AND semantics.

use serde::{Deserialize, Serialize};

use keyhunt_domain::{AnswerDraft, Constraint};

/// A completed answer specification bound to an event key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub event_key: String,
    pub reward_text: String,
    pub constraints: Vec<Constraint>,
}

impl AnswerSubmission {
    /// Bind a draft to the event key it will be stored under.
    pub fn from_draft(event_key: impl Into<String>, draft: &AnswerDraft) -> Self {
        Self {
            event_key: event_key.into(),
            reward_text: draft.reward_text().to_string(),
            constraints: draft.constraints().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhunt_domain::{EquipmentConstraint, LocationConstraint};

    #[test]
    fn test_from_draft_preserves_constraint_order() {
        let mut draft = AnswerDraft::new();
        draft.set_reward_text("A kitten");
        draft.add_constraint(Constraint::Location(LocationConstraint::exact(3222, 3218, 0)));
        draft.add_constraint(Constraint::Equipment(EquipmentConstraint::contains(1163)));

        let submission = AnswerSubmission::from_draft("spring-hunt", &draft);
        assert_eq!(submission.event_key, "spring-hunt");
        assert_eq!(submission.reward_text, "A kitten");
        assert_eq!(submission.constraints.len(), 2);
        assert_eq!(submission.constraints[0].constraint_type(), "location");
        assert_eq!(submission.constraints[1].constraint_type(), "equipment");
    }

    #[test]
    fn test_wire_shape() {
        let mut draft = AnswerDraft::new();
        draft.set_reward_text("Gold");
        draft.add_constraint(Constraint::Equipment(EquipmentConstraint::contains(1163)));

        let value =
            serde_json::to_value(AnswerSubmission::from_draft("k", &draft)).expect("serialize");
        assert_eq!(value["event_key"], "k");
        assert_eq!(value["constraints"][0]["constraint_type"], "equipment");
        assert_eq!(value["constraints"][0]["type"], "contains");
    }
}
