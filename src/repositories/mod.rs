//! Gateway traits over the remote tabular store, one per entity.
//!
//! Handlers and services only ever see these traits. Each operation is an
//! atomic intent (upsert, insert-if-absent, set-reconcile) so uniqueness and
//! consistency live behind the interface, not in call-site read-then-write
//! sequences. Two backends exist: `supabase` (PostgREST) and `memory`.

pub(crate) mod assignments;
pub(crate) mod attendance;
pub(crate) mod backlogs;
pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod exams;
pub(crate) mod memory;
pub(crate) mod registrations;
pub(crate) mod results;
pub(crate) mod subjects;
pub(crate) mod supabase;
pub(crate) mod users;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub(crate) use assignments::AssignmentStore;
pub(crate) use attendance::AttendanceStore;
pub(crate) use backlogs::BacklogStore;
pub(crate) use courses::CourseStore;
pub(crate) use enrollments::EnrollmentStore;
pub(crate) use exams::ExamStore;
pub(crate) use registrations::RegistrationStore;
pub(crate) use results::ResultStore;
pub(crate) use subjects::SubjectStore;
pub(crate) use users::UserStore;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A store-level uniqueness guarantee refused the write.
    #[error("{0}")]
    AlreadyExists(String),
    /// Error reported by the hosted store's query layer, message passed through.
    #[error("{message}")]
    Remote { code: Option<String>, message: String },
    #[error("store unreachable: {0}")]
    Transport(String),
    #[error("malformed store response: {0}")]
    Decode(String),
}

pub(crate) type StoreResult<T> = Result<T, StoreError>;

/// Result of an atomic insert-if-absent intent.
#[derive(Debug)]
pub(crate) enum InsertOutcome<T> {
    Created(T),
    AlreadyExists,
}

impl<T> InsertOutcome<T> {
    pub(crate) fn created(&self) -> bool {
        matches!(self, InsertOutcome::Created(_))
    }
}

#[async_trait]
pub(crate) trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

/// Handle bundling every entity gateway behind one cloneable value.
#[derive(Clone)]
pub(crate) struct Datastore {
    subjects: Arc<dyn SubjectStore>,
    courses: Arc<dyn CourseStore>,
    assignments: Arc<dyn AssignmentStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    exams: Arc<dyn ExamStore>,
    results: Arc<dyn ResultStore>,
    backlogs: Arc<dyn BacklogStore>,
    registrations: Arc<dyn RegistrationStore>,
    users: Arc<dyn UserStore>,
    attendance: Arc<dyn AttendanceStore>,
    health: Arc<dyn StoreHealth>,
}

impl Datastore {
    pub(crate) fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: SubjectStore
            + CourseStore
            + AssignmentStore
            + EnrollmentStore
            + ExamStore
            + ResultStore
            + BacklogStore
            + RegistrationStore
            + UserStore
            + AttendanceStore
            + StoreHealth
            + 'static,
    {
        Self {
            subjects: backend.clone(),
            courses: backend.clone(),
            assignments: backend.clone(),
            enrollments: backend.clone(),
            exams: backend.clone(),
            results: backend.clone(),
            backlogs: backend.clone(),
            registrations: backend.clone(),
            users: backend.clone(),
            attendance: backend.clone(),
            health: backend,
        }
    }

    pub(crate) fn subjects(&self) -> &dyn SubjectStore {
        self.subjects.as_ref()
    }

    pub(crate) fn courses(&self) -> &dyn CourseStore {
        self.courses.as_ref()
    }

    pub(crate) fn assignments(&self) -> &dyn AssignmentStore {
        self.assignments.as_ref()
    }

    pub(crate) fn enrollments(&self) -> &dyn EnrollmentStore {
        self.enrollments.as_ref()
    }

    pub(crate) fn exams(&self) -> &dyn ExamStore {
        self.exams.as_ref()
    }

    pub(crate) fn results(&self) -> &dyn ResultStore {
        self.results.as_ref()
    }

    pub(crate) fn backlogs(&self) -> &dyn BacklogStore {
        self.backlogs.as_ref()
    }

    pub(crate) fn registrations(&self) -> &dyn RegistrationStore {
        self.registrations.as_ref()
    }

    pub(crate) fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub(crate) fn attendance(&self) -> &dyn AttendanceStore {
        self.attendance.as_ref()
    }

    pub(crate) async fn ping(&self) -> StoreResult<()> {
        self.health.ping().await
    }
}
