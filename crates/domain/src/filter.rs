//! Question listing filters and their translation into a [`QuestionQuery`].

use serde::Deserialize;

use crate::error::FieldErrors;
use crate::form::cleaned;
use crate::id::UserId;
use crate::query::{EndTimeBound, Equality, Predicate, QuestionQuery};
use crate::question::MAX_TITLE_LEN;
use crate::time::Timestamp;

/// A filter flag that is either set to a boolean or left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    #[default]
    Unset,
}

impl TriState {
    /// Parse a raw query value. Missing and blank values are [`TriState::Unset`].
    ///
    /// # Errors
    ///
    /// Returns the validation message when the value is neither `true` nor `false`.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match cleaned(raw) {
            None => Ok(Self::Unset),
            Some("true") => Ok(Self::True),
            Some("false") => Ok(Self::False),
            Some(other) => Err(format!(
                "Select a valid choice. {other} is not one of the available choices."
            )),
        }
    }
}

/// Raw query parameters of the question listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilterForm {
    pub active: Option<String>,
    pub has_answer: Option<String>,
    pub title: Option<String>,
}

impl QuestionFilterForm {
    /// Validate every parameter, collecting all errors.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors for unknown flag values or an oversized title.
    pub fn validate(&self) -> Result<QuestionFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        let active = TriState::parse(self.active.as_deref()).unwrap_or_else(|msg| {
            errors.add("active", msg);
            TriState::Unset
        });
        let has_answer = TriState::parse(self.has_answer.as_deref()).unwrap_or_else(|msg| {
            errors.add("has_answer", msg);
            TriState::Unset
        });

        let title = cleaned(self.title.as_deref()).map(str::to_owned);
        if let Some(len) = title.as_deref().map(|t| t.chars().count())
            && len > MAX_TITLE_LEN
        {
            errors.add(
                "title",
                format!("Ensure this value has at most {MAX_TITLE_LEN} characters (it has {len})."),
            );
        }

        errors.into_result(QuestionFilter {
            active,
            has_answer,
            title,
        })
    }
}

/// Validated listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub active: TriState,
    pub has_answer: TriState,
    pub title: Option<String>,
}

impl QuestionFilter {
    /// Build the query for `user_id` as of `now`.
    ///
    /// | flag               | effect                                    |
    /// |--------------------|-------------------------------------------|
    /// | `active=true`      | include end time at or after `now`        |
    /// | `active=false`     | include end time strictly before `now`    |
    /// | `has_answer=true`  | include questions answered by the user    |
    /// | `has_answer=false` | exclude questions answered by the user    |
    /// | `title=t`          | include titles containing `t`, any case   |
    ///
    /// The user's own answer is always attached to each result.
    #[must_use]
    pub fn to_query(&self, user_id: UserId, now: Timestamp) -> QuestionQuery {
        let mut query = QuestionQuery::new().with_user_answer(user_id);

        query = match self.active {
            TriState::True => query.with_range(EndTimeBound::AtOrAfter(now)),
            TriState::False => query.with_range(EndTimeBound::Before(now)),
            TriState::Unset => query,
        };

        // "not answered" has no positive form over a one-to-many relation.
        query = match self.has_answer {
            TriState::True => query.with_equals(Equality::AnsweredBy(user_id)),
            TriState::False => {
                query.with_exclusion(Predicate::Equals(Equality::AnsweredBy(user_id)))
            }
            TriState::Unset => query,
        };

        match &self.title {
            Some(title) => query.with_substring_match(title.clone()),
            None => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    fn form(active: Option<&str>, has_answer: Option<&str>, title: Option<&str>) -> QuestionFilterForm {
        QuestionFilterForm {
            active: active.map(str::to_owned),
            has_answer: has_answer.map(str::to_owned),
            title: title.map(str::to_owned),
        }
    }

    #[test]
    fn should_parse_tri_state_values() {
        assert_eq!(TriState::parse(Some("true")), Ok(TriState::True));
        assert_eq!(TriState::parse(Some("false")), Ok(TriState::False));
        assert_eq!(TriState::parse(Some("")), Ok(TriState::Unset));
        assert_eq!(TriState::parse(None), Ok(TriState::Unset));
        assert!(TriState::parse(Some("maybe")).is_err());
    }

    #[test]
    fn should_collect_errors_for_each_bad_flag() {
        let errors = form(Some("yes"), Some("1"), None).validate().unwrap_err();
        assert!(errors.get("active").is_some());
        assert!(errors.get("has_answer").is_some());
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn should_reject_oversized_title() {
        let long = "t".repeat(MAX_TITLE_LEN + 1);
        let errors = form(None, None, Some(&long)).validate().unwrap_err();
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn should_only_attach_user_answer_when_nothing_set() {
        let user = UserId::new();
        let query = QuestionFilter::default().to_query(user, now());

        assert!(query.inclusions().is_empty());
        assert!(query.exclusions().is_empty());
        assert_eq!(query.user_answer(), Some(user));
    }

    #[test]
    fn should_translate_every_flag() {
        let user = UserId::new();
        let instant = now();
        let filter = form(Some("false"), Some("false"), Some(" Colour "))
            .validate()
            .unwrap();

        let query = filter.to_query(user, instant);

        assert_eq!(
            query.inclusions(),
            [
                Predicate::Range(EndTimeBound::Before(instant)),
                Predicate::TitleContains("Colour".to_owned()),
            ]
        );
        assert_eq!(
            query.exclusions(),
            [Predicate::Equals(Equality::AnsweredBy(user))]
        );
    }

    #[test]
    fn should_include_answered_questions_as_positive_filter() {
        let user = UserId::new();
        let instant = now();
        let filter = form(Some("true"), Some("true"), None).validate().unwrap();

        let query = filter.to_query(user, instant);

        assert_eq!(
            query.inclusions(),
            [
                Predicate::Range(EndTimeBound::AtOrAfter(instant)),
                Predicate::Equals(Equality::AnsweredBy(user)),
            ]
        );
        assert!(query.exclusions().is_empty());
    }
}
