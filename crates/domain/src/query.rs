//! Question query builder.
//!
//! A [`QuestionQuery`] is composed from inclusion predicates (AND-ed) and
//! exclusion predicates (each negated, then AND-ed) before it reaches a
//! repository. Repositories either translate it into their own query
//! language or evaluate it in memory with [`QuestionQuery::matches`].

use crate::answer::Answer;
use crate::id::UserId;
use crate::question::Question;
use crate::time::Timestamp;

/// Equality conditions on a question or its relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equality {
    /// The question's title equals the value exactly.
    Title(String),
    /// Some answer to the question belongs to this user.
    AnsweredBy(UserId),
}

/// Range conditions on a question's end time.
///
/// A missing end time satisfies neither bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTimeBound {
    /// `end_time >= instant`.
    AtOrAfter(Timestamp),
    /// `end_time < instant`.
    Before(Timestamp),
}

impl EndTimeBound {
    #[must_use]
    pub fn contains(self, end_time: Option<Timestamp>) -> bool {
        match (self, end_time) {
            (_, None) => false,
            (Self::AtOrAfter(instant), Some(end)) => end >= instant,
            (Self::Before(instant), Some(end)) => end < instant,
        }
    }
}

/// A single condition over a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(Equality),
    Range(EndTimeBound),
    /// Case-insensitive containment on the title.
    TitleContains(String),
}

impl Predicate {
    /// Evaluate against a question and the answers recorded for it.
    #[must_use]
    pub fn matches(&self, question: &Question, answers: &[Answer]) -> bool {
        match self {
            Self::Equals(Equality::Title(title)) => question.title == *title,
            Self::Equals(Equality::AnsweredBy(user_id)) => answers
                .iter()
                .any(|a| a.question_id == question.id && a.user_id == *user_id),
            Self::Range(bound) => bound.contains(question.end_time),
            Self::TitleContains(needle) => question
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// A composed question query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    inclusions: Vec<Predicate>,
    exclusions: Vec<Predicate>,
    user_answer: Option<UserId>,
}

impl QuestionQuery {
    /// A query selecting every question.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_equals(mut self, equality: Equality) -> Self {
        self.inclusions.push(Predicate::Equals(equality));
        self
    }

    #[must_use]
    pub fn with_range(mut self, bound: EndTimeBound) -> Self {
        self.inclusions.push(Predicate::Range(bound));
        self
    }

    #[must_use]
    pub fn with_substring_match(mut self, needle: impl Into<String>) -> Self {
        self.inclusions.push(Predicate::TitleContains(needle.into()));
        self
    }

    /// Drop every question matching `predicate`.
    #[must_use]
    pub fn with_exclusion(mut self, predicate: Predicate) -> Self {
        self.exclusions.push(predicate);
        self
    }

    /// Attach `user_id`'s own answer to each result. Does not filter.
    #[must_use]
    pub fn with_user_answer(mut self, user_id: UserId) -> Self {
        self.user_answer = Some(user_id);
        self
    }

    #[must_use]
    pub fn inclusions(&self) -> &[Predicate] {
        &self.inclusions
    }

    #[must_use]
    pub fn exclusions(&self) -> &[Predicate] {
        &self.exclusions
    }

    /// User whose answers should be attached, if any.
    #[must_use]
    pub fn user_answer(&self) -> Option<UserId> {
        self.user_answer
    }

    /// Whether `question` is selected: all inclusions hold and no exclusion does.
    #[must_use]
    pub fn matches(&self, question: &Question, answers: &[Answer]) -> bool {
        self.inclusions.iter().all(|p| p.matches(question, answers))
            && !self.exclusions.iter().any(|p| p.matches(question, answers))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::now;

    fn question(title: &str, end_time: Option<Timestamp>) -> Question {
        let builder = Question::builder().title(title);
        match end_time {
            Some(end) => builder.end_time(end).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    #[test]
    fn should_match_everything_when_empty() {
        let q = question("Anything", None);
        assert!(QuestionQuery::new().matches(&q, &[]));
    }

    #[test]
    fn should_keep_missing_end_time_out_of_both_bounds() {
        let instant = now();
        assert!(!EndTimeBound::AtOrAfter(instant).contains(None));
        assert!(!EndTimeBound::Before(instant).contains(None));
    }

    #[test]
    fn should_keep_missing_end_time_when_bound_is_excluded() {
        let q = question("Pets?", None);
        let query = QuestionQuery::new()
            .with_exclusion(Predicate::Range(EndTimeBound::AtOrAfter(now())));
        assert!(query.matches(&q, &[]));
    }

    #[test]
    fn should_split_end_times_at_instant() {
        let instant = now();
        let past = Some(instant - Duration::minutes(1));

        assert!(EndTimeBound::AtOrAfter(instant).contains(Some(instant)));
        assert!(!EndTimeBound::Before(instant).contains(Some(instant)));
        assert!(EndTimeBound::Before(instant).contains(past));
        assert!(!EndTimeBound::AtOrAfter(instant).contains(past));
    }

    #[test]
    fn should_match_title_case_insensitively() {
        let q = question("What is your Favourite Colour?", None);
        let query = QuestionQuery::new().with_substring_match("favourite colour");
        assert!(query.matches(&q, &[]));
    }

    #[test]
    fn should_only_count_answers_of_the_given_user() {
        let q = question("Pets?", None);
        let me = UserId::new();
        let other = UserId::new();
        let answers = [Answer::new(other, q.id, "cat", now())];

        let answered = QuestionQuery::new().with_equals(Equality::AnsweredBy(me));
        let unanswered = QuestionQuery::new()
            .with_exclusion(Predicate::Equals(Equality::AnsweredBy(me)));

        assert!(!answered.matches(&q, &answers));
        assert!(unanswered.matches(&q, &answers));
    }

    #[test]
    fn should_apply_exclusions_after_inclusions() {
        let me = UserId::new();
        let q = question("Travel?", None);
        let answers = [Answer::new(me, q.id, "yes", now())];

        let query = QuestionQuery::new()
            .with_substring_match("travel")
            .with_exclusion(Predicate::Equals(Equality::AnsweredBy(me)));

        assert!(!query.matches(&q, &answers));
    }

    #[test]
    fn should_not_filter_on_attached_user_answer() {
        let q = question("Food?", None);
        let query = QuestionQuery::new().with_user_answer(UserId::new());
        assert!(query.matches(&q, &[]));
    }
}
