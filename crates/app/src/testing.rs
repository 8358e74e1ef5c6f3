//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::id::{QuestionId, UserId};
use questionnaire_domain::query::QuestionQuery;
use questionnaire_domain::question::Question;
use questionnaire_domain::session::{Session, SessionToken};
use questionnaire_domain::time::Timestamp;
use questionnaire_domain::user::User;

use crate::ports::{AnswerRepository, QuestionRepository, SessionRepository, UserRepository};

#[derive(Default)]
struct Inner {
    questions: Mutex<Vec<Question>>,
    answers: Mutex<Vec<Answer>>,
    users: Mutex<Vec<User>>,
    sessions: Mutex<HashMap<String, Session>>,
    calls: AtomicUsize,
}

/// One shared in-memory database; clones see the same data.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore(Arc<Inner>);

impl InMemoryStore {
    /// Number of repository calls made so far, across every port.
    pub(crate) fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn answers(&self) -> Vec<Answer> {
        self.0.answers.lock().unwrap().clone()
    }

    pub(crate) fn insert_question(&self, question: Question) {
        self.0.questions.lock().unwrap().push(question);
    }

    pub(crate) fn session_count(&self) -> usize {
        self.0.sessions.lock().unwrap().len()
    }

    pub(crate) fn insert_session(&self, session: Session) {
        self.0
            .sessions
            .lock()
            .unwrap()
            .insert(session.token.as_str().to_owned(), session);
    }

    fn track(&self) {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl QuestionRepository for InMemoryStore {
    fn create(
        &self,
        question: Question,
    ) -> impl Future<Output = Result<Question, QuestionnaireError>> + Send {
        self.track();
        self.insert_question(question.clone());
        async { Ok(question) }
    }

    fn get_by_id(
        &self,
        id: QuestionId,
    ) -> impl Future<Output = Result<Option<Question>, QuestionnaireError>> + Send {
        self.track();
        let questions = self.0.questions.lock().unwrap();
        let result = questions.iter().find(|q| q.id == id).cloned();
        async { Ok(result) }
    }

    fn find(
        &self,
        query: &QuestionQuery,
    ) -> impl Future<Output = Result<Vec<(Question, Option<Answer>)>, QuestionnaireError>> + Send
    {
        self.track();
        let questions = self.0.questions.lock().unwrap();
        let answers = self.0.answers.lock().unwrap();
        let mut result: Vec<(Question, Option<Answer>)> = questions
            .iter()
            .filter(|q| query.matches(q, &answers))
            .map(|q| {
                let own = query.user_answer().and_then(|user_id| {
                    answers
                        .iter()
                        .find(|a| a.question_id == q.id && a.user_id == user_id)
                        .cloned()
                });
                (q.clone(), own)
            })
            .collect();
        result.sort_by(|(a, _), (b, _)| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        async { Ok(result) }
    }
}

impl AnswerRepository for InMemoryStore {
    fn find_by_user_and_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> impl Future<Output = Result<Option<Answer>, QuestionnaireError>> + Send {
        self.track();
        let answers = self.0.answers.lock().unwrap();
        let result = answers
            .iter()
            .find(|a| a.user_id == user_id && a.question_id == question_id)
            .cloned();
        async { Ok(result) }
    }

    fn upsert(
        &self,
        answer: Answer,
    ) -> impl Future<Output = Result<Answer, QuestionnaireError>> + Send {
        self.track();
        let mut answers = self.0.answers.lock().unwrap();
        let stored = match answers
            .iter_mut()
            .find(|a| a.user_id == answer.user_id && a.question_id == answer.question_id)
        {
            Some(existing) => {
                existing.revise(answer.content, answer.updated_at);
                existing.clone()
            }
            None => {
                answers.push(answer.clone());
                answer
            }
        };
        async { Ok(stored) }
    }
}

impl UserRepository for InMemoryStore {
    fn create(&self, user: User) -> impl Future<Output = Result<User, QuestionnaireError>> + Send {
        self.track();
        self.0.users.lock().unwrap().push(user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, QuestionnaireError>> + Send {
        self.track();
        let users = self.0.users.lock().unwrap();
        let result = users.iter().find(|u| u.id == id).cloned();
        async { Ok(result) }
    }

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, QuestionnaireError>> + Send {
        self.track();
        let users = self.0.users.lock().unwrap();
        let result = users.iter().find(|u| u.username == username).cloned();
        async { Ok(result) }
    }
}

impl SessionRepository for InMemoryStore {
    fn create(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, QuestionnaireError>> + Send {
        self.track();
        self.insert_session(session.clone());
        async { Ok(session) }
    }

    fn get(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Option<Session>, QuestionnaireError>> + Send {
        self.track();
        let sessions = self.0.sessions.lock().unwrap();
        let result = sessions.get(token.as_str()).cloned();
        async { Ok(result) }
    }

    fn delete(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<(), QuestionnaireError>> + Send {
        self.track();
        self.0.sessions.lock().unwrap().remove(token.as_str());
        async { Ok(()) }
    }

    fn delete_expired(
        &self,
        now: Timestamp,
    ) -> impl Future<Output = Result<u64, QuestionnaireError>> + Send {
        self.track();
        let mut sessions = self.0.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        let removed = (before - sessions.len()) as u64;
        async move { Ok(removed) }
    }
}
