//! Stub repositories and state for router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Duration;

use questionnaire_app::password::CredentialHasher;
use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_app::services::answer_service::AnswerService;
use questionnaire_app::services::auth_service::AuthService;
use questionnaire_app::services::question_service::QuestionService;
use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::id::{QuestionId, UserId};
use questionnaire_domain::query::QuestionQuery;
use questionnaire_domain::question::Question;
use questionnaire_domain::session::{Session, SessionToken};
use questionnaire_domain::time::Timestamp;
use questionnaire_domain::user::User;

use crate::state::{AppState, CookieSettings};

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    answers: Vec<Answer>,
    users: Vec<User>,
    sessions: HashMap<String, Session>,
}

/// Shared stub store; every clone sees the same tables.
#[derive(Clone, Default)]
pub(crate) struct StubStore {
    tables: Arc<Mutex<Tables>>,
    calls: Arc<AtomicUsize>,
}

impl StubStore {
    /// Question and answer repository calls made so far.
    pub(crate) fn data_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn answers(&self) -> Vec<Answer> {
        self.tables.lock().unwrap().answers.clone()
    }

    pub(crate) fn add_question(&self, question: Question) {
        self.tables.lock().unwrap().questions.push(question);
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl QuestionRepository for StubStore {
    async fn create(&self, question: Question) -> Result<Question, QuestionnaireError> {
        self.track();
        self.add_question(question.clone());
        Ok(question)
    }

    async fn get_by_id(&self, id: QuestionId) -> Result<Option<Question>, QuestionnaireError> {
        self.track();
        let tables = self.tables.lock().unwrap();
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn find(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<(Question, Option<Answer>)>, QuestionnaireError> {
        self.track();
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<_> = tables
            .questions
            .iter()
            .filter(|q| query.matches(q, &tables.answers))
            .map(|q| {
                let answer = query.user_answer().and_then(|user_id| {
                    tables
                        .answers
                        .iter()
                        .find(|a| a.question_id == q.id && a.user_id == user_id)
                        .cloned()
                });
                (q.clone(), answer)
            })
            .collect();
        rows.sort_by(|(a, _), (b, _)| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

impl AnswerRepository for StubStore {
    async fn find_by_user_and_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<Answer>, QuestionnaireError> {
        self.track();
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .answers
            .iter()
            .find(|a| a.user_id == user_id && a.question_id == question_id)
            .cloned())
    }

    async fn upsert(&self, answer: Answer) -> Result<Answer, QuestionnaireError> {
        self.track();
        let mut tables = self.tables.lock().unwrap();
        tables
            .answers
            .retain(|a| !(a.user_id == answer.user_id && a.question_id == answer.question_id));
        tables.answers.push(answer.clone());
        Ok(answer)
    }
}

impl UserRepository for StubStore {
    async fn create(&self, user: User) -> Result<User, QuestionnaireError> {
        self.tables.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, QuestionnaireError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, QuestionnaireError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

impl SessionRepository for StubStore {
    async fn create(&self, session: Session) -> Result<Session, QuestionnaireError> {
        self.tables
            .lock()
            .unwrap()
            .sessions
            .insert(session.token.as_str().to_owned(), session.clone());
        Ok(session)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, QuestionnaireError> {
        Ok(self.tables.lock().unwrap().sessions.get(token.as_str()).cloned())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), QuestionnaireError> {
        self.tables.lock().unwrap().sessions.remove(token.as_str());
        Ok(())
    }

    async fn delete_expired(&self, now: Timestamp) -> Result<u64, QuestionnaireError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}

pub(crate) type StubState = AppState<StubStore, StubStore, StubStore, StubStore>;

/// State over one stub store, with users `alice` and `bob` (password `secret`).
pub(crate) async fn stub_state(store: &StubStore) -> StubState {
    let hasher = CredentialHasher::with_costs(8, 1, 1).unwrap();
    let auth = AuthService::new(store.clone(), store.clone(), hasher, Duration::hours(1));
    auth.create_user("alice", "secret").await.unwrap();
    auth.create_user("bob", "secret").await.unwrap();

    AppState::new(
        auth,
        AnswerService::new(store.clone(), store.clone()),
        QuestionService::new(store.clone()),
        CookieSettings::default(),
    )
}
