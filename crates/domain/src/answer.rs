//! Answer: a user's response to a question, unique per (user, question).

use serde::{Deserialize, Serialize};

use crate::id::{AnswerId, QuestionId, UserId};
use crate::time::Timestamp;

/// A stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub content: String,
    /// Time of the last create or update.
    pub updated_at: Timestamp,
}

impl Answer {
    /// Start a fresh answer owned by `user_id`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        question_id: QuestionId,
        content: impl Into<String>,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id: AnswerId::new(),
            user_id,
            question_id,
            content: content.into(),
            updated_at,
        }
    }

    /// Replace the content in place, keeping identity and ownership.
    pub fn revise(&mut self, content: impl Into<String>, updated_at: Timestamp) {
        self.content = content.into();
        self.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_keep_identity_when_revised() {
        let mut answer = Answer::new(UserId::new(), QuestionId::new(), "blue", now());
        let id = answer.id;
        let owner = answer.user_id;

        answer.revise("green", now());

        assert_eq!(answer.id, id);
        assert_eq!(answer.user_id, owner);
        assert_eq!(answer.content, "green");
    }
}
