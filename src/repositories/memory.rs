//! In-memory backend. Drives the test suite and doubles as a scratch runtime
//! store (`STORE_BACKEND=memory`) when no hosted project is configured.
//!
//! All tables live behind one lock, so every intent is atomic by
//! construction. Semantics mirror the PostgREST backend, including which
//! writes count as unique violations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::db::models::{
    AttendanceMark, BacklogRecord, Course, Exam, ExamRegistration, ExamResult, ProfessorCourse,
    StudentCourse, Subject, User,
};
use crate::db::types::{Grade, RegistrationStatus, UserRole};
use crate::repositories::assignments::{AssignmentChanges, NewAssignment};
use crate::repositories::backlogs::BacklogEdit;
use crate::repositories::courses::{CourseChanges, NewCourse};
use crate::repositories::enrollments::NewEnrollment;
use crate::repositories::exams::{ExamChanges, NewExam};
use crate::repositories::registrations::{NewRegistration, RegistrationFilter, SubjectLists};
use crate::repositories::results::{ResultFilter, ResultUpsert};
use crate::repositories::{
    AssignmentStore, AttendanceStore, BacklogStore, CourseStore, EnrollmentStore, ExamStore,
    InsertOutcome, RegistrationStore, ResultStore, StoreError, StoreHealth, StoreResult,
    SubjectStore, UserStore,
};

const ATTENDANCE_FEED_CAPACITY: usize = 256;

struct RoleDetail {
    role: UserRole,
    user_id: String,
    details: serde_json::Value,
}

#[derive(Default)]
struct Tables {
    subjects: Vec<Subject>,
    courses: Vec<Course>,
    assignments: Vec<ProfessorCourse>,
    enrollments: Vec<StudentCourse>,
    exams: Vec<Exam>,
    results: Vec<ExamResult>,
    backlogs: Vec<BacklogRecord>,
    registrations: Vec<ExamRegistration>,
    users: Vec<User>,
    role_details: Vec<RoleDetail>,
    attendance: Vec<AttendanceMark>,
    next_id: i64,
}

impl Tables {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub(crate) struct MemoryStore {
    tables: RwLock<Tables>,
    attendance_feed: broadcast::Sender<AttendanceMark>,
}

impl MemoryStore {
    pub(crate) fn new() -> Arc<Self> {
        let (attendance_feed, _) = broadcast::channel(ATTENDANCE_FEED_CAPACITY);
        Arc::new(Self { tables: RwLock::new(Tables::default()), attendance_feed })
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Curriculum rows have no write intent of their own; tests seed them
    /// directly.
    pub(crate) async fn seed_subject(&self, subject_id: i64, name: &str, semester: i32) {
        let mut tables = self.tables.write().await;
        tables.subjects.push(Subject { subject_id, name: name.to_string(), semester });
    }

    pub(crate) async fn seed_user(
        &self,
        id: &str,
        email: &str,
        password: &str,
        role: UserRole,
        details: Option<serde_json::Value>,
    ) {
        let mut tables = self.tables.write().await;
        tables.users.push(User {
            id: id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
        if let Some(details) = details {
            tables.role_details.push(RoleDetail { role, user_id: id.to_string(), details });
        }
    }
}

#[async_trait]
impl SubjectStore for MemoryStore {
    async fn exists(&self, subject_id: i64, semester: i32) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .subjects
            .iter()
            .any(|subject| subject.subject_id == subject_id && subject.semester == semester))
    }

    async fn exists_anywhere(&self, subject_id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.iter().any(|subject| subject.subject_id == subject_id))
    }

    async fn list_for_semester(&self, semester: i32) -> StoreResult<Vec<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.iter().filter(|subject| subject.semester == semester).cloned().collect())
    }

    async fn fetch_by_ids(&self, subject_ids: &[i64]) -> StoreResult<Vec<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subjects
            .iter()
            .filter(|subject| subject_ids.contains(&subject.subject_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Course>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.clone())
    }

    async fn create(&self, course: NewCourse<'_>) -> StoreResult<Course> {
        let mut tables = self.tables.write().await;
        let created = Course {
            id: tables.alloc_id(),
            name: course.name.to_string(),
            description: course.description.map(str::to_string),
        };
        tables.courses.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: CourseChanges) -> StoreResult<Course> {
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .iter_mut()
            .find(|course| course.id == id)
            .ok_or(StoreError::NotFound("Course"))?;
        if let Some(name) = changes.name {
            course.name = name;
        }
        if let Some(description) = changes.description {
            course.description = Some(description);
        }
        Ok(course.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|course| course.id != id);
        if tables.courses.len() == before {
            return Err(StoreError::NotFound("Course"));
        }
        Ok(())
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<ProfessorCourse>> {
        let tables = self.tables.read().await;
        Ok(tables.assignments.clone())
    }

    async fn create(&self, assignment: NewAssignment<'_>) -> StoreResult<ProfessorCourse> {
        let mut tables = self.tables.write().await;
        let created = ProfessorCourse {
            id: tables.alloc_id(),
            prof_id: assignment.prof_id.to_string(),
            subject_id: assignment.subject_id,
            semester: assignment.semester,
        };
        tables.assignments.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: AssignmentChanges) -> StoreResult<ProfessorCourse> {
        let mut tables = self.tables.write().await;
        let assignment = tables
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == id)
            .ok_or(StoreError::NotFound("Assignment"))?;
        if let Some(prof_id) = changes.prof_id {
            assignment.prof_id = prof_id;
        }
        if let Some(subject_id) = changes.subject_id {
            assignment.subject_id = subject_id;
        }
        if let Some(semester) = changes.semester {
            assignment.semester = semester;
        }
        Ok(assignment.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.assignments.len();
        tables.assignments.retain(|assignment| assignment.id != id);
        if tables.assignments.len() == before {
            return Err(StoreError::NotFound("Assignment"));
        }
        Ok(())
    }

    async fn subject_ids_for_professor(&self, prof_id: &str) -> StoreResult<Vec<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assignments
            .iter()
            .filter(|assignment| assignment.prof_id == prof_id)
            .map(|assignment| assignment.subject_id)
            .collect())
    }

    async fn is_assigned(
        &self,
        prof_id: &str,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.assignments.iter().any(|assignment| {
            assignment.prof_id == prof_id
                && assignment.subject_id == subject_id
                && assignment.semester == semester
        }))
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<StudentCourse>> {
        let tables = self.tables.read().await;
        Ok(tables.enrollments.clone())
    }

    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<StudentCourse>> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|record| record.reg_no == reg_no && record.semester == semester)
            .cloned())
    }

    async fn insert_if_absent(
        &self,
        enrollment: NewEnrollment<'_>,
    ) -> StoreResult<InsertOutcome<StudentCourse>> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.enrollments.iter().any(|record| {
            record.reg_no == enrollment.reg_no && record.semester == enrollment.semester
        });
        if duplicate {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let created = StudentCourse {
            id: tables.alloc_id(),
            reg_no: enrollment.reg_no.to_string(),
            semester: enrollment.semester,
            subject_ids: enrollment.subject_ids.to_vec(),
        };
        tables.enrollments.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn set_subjects(&self, id: i64, subject_ids: &[i64]) -> StoreResult<StudentCourse> {
        let mut tables = self.tables.write().await;
        let record = tables
            .enrollments
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound("Enrollment"))?;
        record.subject_ids = subject_ids.to_vec();
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.enrollments.len();
        tables.enrollments.retain(|record| record.id != id);
        if tables.enrollments.len() == before {
            return Err(StoreError::NotFound("Enrollment"));
        }
        Ok(())
    }

    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|record| record.semester == semester && record.subject_ids.contains(&subject_id))
            .map(|record| record.reg_no.clone())
            .collect())
    }
}

#[async_trait]
impl ExamStore for MemoryStore {
    async fn insert_if_absent(&self, exam: NewExam<'_>) -> StoreResult<InsertOutcome<Exam>> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.exams.iter().any(|record| {
            record.subject_id == exam.subject_id
                && record.exam_type == exam.exam_type
                && record.semester == exam.semester
        });
        if duplicate {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let created = Exam {
            id: tables.alloc_id(),
            subject_id: exam.subject_id,
            prof_id: exam.prof_id.to_string(),
            exam_type: exam.exam_type,
            semester: exam.semester,
            max_marks: exam.max_marks,
            exam_date: exam.exam_date.to_string(),
        };
        tables.exams.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn list(&self) -> StoreResult<Vec<Exam>> {
        let tables = self.tables.read().await;
        Ok(tables.exams.clone())
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Exam>> {
        let tables = self.tables.read().await;
        Ok(tables.exams.iter().find(|record| record.id == id).cloned())
    }

    async fn update(&self, id: i64, changes: ExamChanges) -> StoreResult<Exam> {
        let mut tables = self.tables.write().await;
        let exam = tables
            .exams
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound("Exam"))?;
        if let Some(prof_id) = changes.prof_id {
            exam.prof_id = prof_id;
        }
        if let Some(exam_type) = changes.exam_type {
            exam.exam_type = exam_type;
        }
        if let Some(max_marks) = changes.max_marks {
            exam.max_marks = max_marks;
        }
        if let Some(exam_date) = changes.exam_date {
            exam.exam_date = exam_date;
        }
        Ok(exam.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.exams.len();
        tables.exams.retain(|record| record.id != id);
        if tables.exams.len() == before {
            return Err(StoreError::NotFound("Exam"));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn find_grade(&self, subject_id: i64, reg_no: &str) -> StoreResult<Option<Grade>> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .find(|record| record.subject_id == subject_id && record.reg_no == reg_no)
            .map(|record| record.grade))
    }

    async fn upsert(&self, result: ResultUpsert<'_>) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let row = ExamResult {
            subject_id: result.subject_id,
            prof_id: result.prof_id.to_string(),
            reg_no: result.reg_no.to_string(),
            midsem_marks: result.midsem_marks,
            endsem_marks: result.endsem_marks,
            classtest_marks: result.classtest_marks,
            grade: result.grade,
        };
        match tables
            .results
            .iter_mut()
            .find(|record| record.subject_id == row.subject_id && record.reg_no == row.reg_no)
        {
            Some(existing) => *existing = row,
            None => tables.results.push(row),
        }
        Ok(())
    }

    async fn list(&self, filter: ResultFilter<'_>) -> StoreResult<Vec<ExamResult>> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .filter(|record| filter.reg_no.map_or(true, |reg_no| record.reg_no == reg_no))
            .filter(|record| filter.subject_id.map_or(true, |id| record.subject_id == id))
            .cloned()
            .collect())
    }

    async fn list_for_student_in(
        &self,
        reg_no: &str,
        subject_ids: &[i64],
    ) -> StoreResult<Vec<ExamResult>> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .filter(|record| record.reg_no == reg_no && subject_ids.contains(&record.subject_id))
            .cloned()
            .collect())
    }

    async fn failed_subject_ids(&self, reg_no: &str, among: &[i64]) -> StoreResult<Vec<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .filter(|record| {
                record.reg_no == reg_no
                    && record.grade.is_fail()
                    && among.contains(&record.subject_id)
            })
            .map(|record| record.subject_id)
            .collect())
    }

    async fn delete(&self, subject_id: i64, reg_no: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.results.len();
        tables
            .results
            .retain(|record| !(record.subject_id == subject_id && record.reg_no == reg_no));
        if tables.results.len() == before {
            return Err(StoreError::NotFound("Result"));
        }
        Ok(())
    }
}

#[async_trait]
impl BacklogStore for MemoryStore {
    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<BacklogRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .backlogs
            .iter()
            .find(|record| record.reg_no == reg_no && record.semester == semester)
            .cloned())
    }

    async fn reconcile(
        &self,
        reg_no: &str,
        semester: i32,
        edit: BacklogEdit,
    ) -> StoreResult<Vec<i64>> {
        let mut tables = self.tables.write().await;
        let position = tables
            .backlogs
            .iter()
            .position(|record| record.reg_no == reg_no && record.semester == semester);
        match edit {
            BacklogEdit::Add(subject_id) => match position {
                Some(index) => {
                    let record = &mut tables.backlogs[index];
                    if !record.subject_ids.contains(&subject_id) {
                        record.subject_ids.push(subject_id);
                    }
                    Ok(record.subject_ids.clone())
                }
                None => {
                    tables.backlogs.push(BacklogRecord {
                        reg_no: reg_no.to_string(),
                        semester,
                        subject_ids: vec![subject_id],
                    });
                    Ok(vec![subject_id])
                }
            },
            BacklogEdit::Remove(subject_id) => match position {
                Some(index) => {
                    let record = &mut tables.backlogs[index];
                    record.subject_ids.retain(|id| *id != subject_id);
                    let remaining = record.subject_ids.clone();
                    if remaining.is_empty() {
                        tables.backlogs.remove(index);
                    }
                    Ok(remaining)
                }
                None => Ok(Vec::new()),
            },
        }
    }

    async fn replace(
        &self,
        reg_no: &str,
        semester: i32,
        subject_ids: &[i64],
    ) -> StoreResult<Vec<i64>> {
        let mut tables = self.tables.write().await;
        tables
            .backlogs
            .retain(|record| !(record.reg_no == reg_no && record.semester == semester));
        if !subject_ids.is_empty() {
            tables.backlogs.push(BacklogRecord {
                reg_no: reg_no.to_string(),
                semester,
                subject_ids: subject_ids.to_vec(),
            });
        }
        Ok(subject_ids.to_vec())
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        registration: NewRegistration<'_>,
    ) -> StoreResult<InsertOutcome<ExamRegistration>> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.registrations.iter().any(|record| {
            record.reg_no == registration.reg_no && record.semester == registration.semester
        });
        if duplicate {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let created = ExamRegistration {
            id: tables.alloc_id(),
            reg_no: registration.reg_no.to_string(),
            semester: registration.semester,
            subjects: registration.subjects.to_vec(),
            elective_subjects: registration.elective_subjects.to_vec(),
            backlog_subjects: registration.backlog_subjects.to_vec(),
            registration_date: registration.registration_date.to_string(),
            status: registration.status,
        };
        tables.registrations.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn find(&self, id: i64) -> StoreResult<Option<ExamRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables.registrations.iter().find(|record| record.id == id).cloned())
    }

    async fn find_for_student(
        &self,
        reg_no: &str,
        semester: i32,
    ) -> StoreResult<Option<ExamRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .find(|record| record.reg_no == reg_no && record.semester == semester)
            .cloned())
    }

    async fn search(&self, filter: RegistrationFilter<'_>) -> StoreResult<Vec<ExamRegistration>> {
        let tables = self.tables.read().await;
        let mut found: Vec<ExamRegistration> = tables
            .registrations
            .iter()
            .filter(|record| filter.reg_no.map_or(true, |reg_no| record.reg_no == reg_no))
            .filter(|record| filter.semester.map_or(true, |semester| record.semester == semester))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.registration_date.cmp(&a.registration_date).then(b.id.cmp(&a.id))
        });
        Ok(found)
    }

    async fn set_subject_lists(
        &self,
        id: i64,
        lists: SubjectLists,
    ) -> StoreResult<ExamRegistration> {
        let mut tables = self.tables.write().await;
        let record = tables
            .registrations
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound("Registration"))?;
        record.subjects = lists.subjects;
        record.elective_subjects = lists.elective_subjects;
        record.backlog_subjects = lists.backlog_subjects;
        Ok(record.clone())
    }

    async fn set_status(
        &self,
        id: i64,
        status: RegistrationStatus,
    ) -> StoreResult<ExamRegistration> {
        let mut tables = self.tables.write().await;
        let record = tables
            .registrations
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound("Registration"))?;
        record.status = status;
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.registrations.len();
        tables.registrations.retain(|record| record.id != id);
        if tables.registrations.len() == before {
            return Err(StoreError::NotFound("Registration"));
        }
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let removed = tables.registrations.len() as u64;
        tables.registrations.clear();
        Ok(removed)
    }

    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|record| record.semester == semester && record.subjects.contains(&subject_id))
            .map(|record| record.reg_no.clone())
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }

    async fn role_details(
        &self,
        role: UserRole,
        user_id: &str,
    ) -> StoreResult<Option<serde_json::Value>> {
        let tables = self.tables.read().await;
        Ok(tables
            .role_details
            .iter()
            .find(|detail| detail.role == role && detail.user_id == user_id)
            .map(|detail| detail.details.clone()))
    }

    async fn set_password(&self, user_id: &str, stored: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or(StoreError::NotFound("User"))?;
        user.password = stored.to_string();
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn record(
        &self,
        reg_no: &str,
        subject_id: i64,
        attendance_count: i32,
    ) -> StoreResult<AttendanceMark> {
        let mut tables = self.tables.write().await;
        let row = AttendanceMark { reg_no: reg_no.to_string(), subject_id, attendance_count };
        match tables
            .attendance
            .iter_mut()
            .find(|mark| mark.reg_no == reg_no && mark.subject_id == subject_id)
        {
            Some(existing) => *existing = row.clone(),
            None => tables.attendance.push(row.clone()),
        }
        let _ = self.attendance_feed.send(row.clone());
        Ok(row)
    }

    fn changes(&self) -> broadcast::Receiver<AttendanceMark> {
        self.attendance_feed.subscribe()
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
