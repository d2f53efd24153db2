//! PostgREST-backed implementation of the gateway traits.
//!
//! Every intent maps onto one PostgREST request. Uniqueness is the store's:
//! conditional inserts rely on unique indexes over (reg_no, semester) for
//! enrollments/registrations and (subject_id, exam_type, semester) for exams;
//! a violation surfaces as code 23505 and is mapped to `AlreadyExists`.

use async_trait::async_trait;
use postgrest::Postgrest;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::core::config::Settings;
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

/// Postgres unique-violation SQLSTATE as surfaced in PostgREST error bodies.
const UNIQUE_VIOLATION: &str = "23505";

const ATTENDANCE_FEED_CAPACITY: usize = 256;

pub(crate) struct SupabaseStore {
    client: Postgrest,
    attendance_feed: broadcast::Sender<AttendanceMark>,
}

impl SupabaseStore {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let store = settings.store();
        let client = Postgrest::new(store.rest_endpoint())
            .insert_header("apikey", store.supabase_key.clone())
            .insert_header("Authorization", format!("Bearer {}", store.supabase_key));
        let (attendance_feed, _) = broadcast::channel(ATTENDANCE_FEED_CAPACITY);
        Self { client, attendance_feed }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
    code: Option<String>,
}

fn remote_error(status: reqwest::StatusCode, body: &str) -> StoreError {
    let parsed: RemoteErrorBody = serde_json::from_str(body)
        .unwrap_or(RemoteErrorBody { message: None, code: None });
    let message = parsed.message.unwrap_or_else(|| format!("store returned {status}"));
    if parsed.code.as_deref() == Some(UNIQUE_VIOLATION) {
        StoreError::AlreadyExists(message)
    } else {
        StoreError::Remote { code: parsed.code, message }
    }
}

/// Run a builder to completion and decode the row array PostgREST returns
/// (writes carry `Prefer: return=representation`, so this covers both).
async fn rows<T: DeserializeOwned>(builder: postgrest::Builder) -> StoreResult<Vec<T>> {
    let response =
        builder.execute().await.map_err(|err| StoreError::Transport(err.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|err| StoreError::Transport(err.to_string()))?;

    if !status.is_success() {
        return Err(remote_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))
}

async fn first_row<T: DeserializeOwned>(builder: postgrest::Builder) -> StoreResult<Option<T>> {
    Ok(rows::<T>(builder).await?.into_iter().next())
}

/// Like `first_row` for writes where the representation must exist.
async fn written_row<T: DeserializeOwned>(
    builder: postgrest::Builder,
    entity: &'static str,
) -> StoreResult<T> {
    first_row(builder).await?.ok_or(StoreError::NotFound(entity))
}

fn id_strings(ids: &[i64]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[derive(Debug, Deserialize)]
struct SubjectIdRow {
    subject_id: i64,
}

#[derive(Debug, Deserialize)]
struct GradeRow {
    grade: Grade,
}

#[async_trait]
impl SubjectStore for SupabaseStore {
    async fn exists(&self, subject_id: i64, semester: i32) -> StoreResult<bool> {
        let found: Vec<SubjectIdRow> = rows(
            self.client
                .from("subjects")
                .select("subject_id")
                .eq("subject_id", subject_id.to_string())
                .eq("semester", semester.to_string())
                .limit(1),
        )
        .await?;
        Ok(!found.is_empty())
    }

    async fn exists_anywhere(&self, subject_id: i64) -> StoreResult<bool> {
        let found: Vec<SubjectIdRow> = rows(
            self.client
                .from("subjects")
                .select("subject_id")
                .eq("subject_id", subject_id.to_string())
                .limit(1),
        )
        .await?;
        Ok(!found.is_empty())
    }

    async fn list_for_semester(&self, semester: i32) -> StoreResult<Vec<Subject>> {
        rows(
            self.client
                .from("subjects")
                .select("subject_id,name,semester")
                .eq("semester", semester.to_string()),
        )
        .await
    }

    async fn fetch_by_ids(&self, subject_ids: &[i64]) -> StoreResult<Vec<Subject>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        rows(
            self.client
                .from("subjects")
                .select("subject_id,name,semester")
                .in_("subject_id", id_strings(subject_ids)),
        )
        .await
    }
}

#[async_trait]
impl CourseStore for SupabaseStore {
    async fn list(&self) -> StoreResult<Vec<Course>> {
        rows(self.client.from("courses").select("*").order("id.asc")).await
    }

    async fn create(&self, course: NewCourse<'_>) -> StoreResult<Course> {
        let body = serde_json::json!({
            "name": course.name,
            "description": course.description,
        });
        written_row(self.client.from("courses").insert(body.to_string()), "Course").await
    }

    async fn update(&self, id: i64, changes: CourseChanges) -> StoreResult<Course> {
        let mut patch = serde_json::Map::new();
        if let Some(name) = changes.name {
            patch.insert("name".to_string(), name.into());
        }
        if let Some(description) = changes.description {
            patch.insert("description".to_string(), description.into());
        }
        written_row(
            self.client
                .from("courses")
                .update(serde_json::Value::Object(patch).to_string())
                .eq("id", id.to_string()),
            "Course",
        )
        .await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("courses").delete().eq("id", id.to_string())).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Course"));
        }
        Ok(())
    }
}

#[async_trait]
impl AssignmentStore for SupabaseStore {
    async fn list(&self) -> StoreResult<Vec<ProfessorCourse>> {
        rows(self.client.from("professor_course").select("*").order("id.asc")).await
    }

    async fn create(&self, assignment: NewAssignment<'_>) -> StoreResult<ProfessorCourse> {
        let body = serde_json::json!({
            "prof_id": assignment.prof_id,
            "subject_id": assignment.subject_id,
            "semester": assignment.semester,
        });
        written_row(self.client.from("professor_course").insert(body.to_string()), "Assignment")
            .await
    }

    async fn update(&self, id: i64, changes: AssignmentChanges) -> StoreResult<ProfessorCourse> {
        let mut patch = serde_json::Map::new();
        if let Some(prof_id) = changes.prof_id {
            patch.insert("prof_id".to_string(), prof_id.into());
        }
        if let Some(subject_id) = changes.subject_id {
            patch.insert("subject_id".to_string(), subject_id.into());
        }
        if let Some(semester) = changes.semester {
            patch.insert("semester".to_string(), semester.into());
        }
        written_row(
            self.client
                .from("professor_course")
                .update(serde_json::Value::Object(patch).to_string())
                .eq("id", id.to_string()),
            "Assignment",
        )
        .await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("professor_course").delete().eq("id", id.to_string())).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Assignment"));
        }
        Ok(())
    }

    async fn subject_ids_for_professor(&self, prof_id: &str) -> StoreResult<Vec<i64>> {
        let found: Vec<SubjectIdRow> = rows(
            self.client.from("professor_course").select("subject_id").eq("prof_id", prof_id),
        )
        .await?;
        Ok(found.into_iter().map(|row| row.subject_id).collect())
    }

    async fn is_assigned(
        &self,
        prof_id: &str,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<bool> {
        let found: Vec<SubjectIdRow> = rows(
            self.client
                .from("professor_course")
                .select("subject_id")
                .eq("prof_id", prof_id)
                .eq("subject_id", subject_id.to_string())
                .eq("semester", semester.to_string())
                .limit(1),
        )
        .await?;
        Ok(!found.is_empty())
    }
}

#[async_trait]
impl EnrollmentStore for SupabaseStore {
    async fn list(&self) -> StoreResult<Vec<StudentCourse>> {
        rows(self.client.from("student_course").select("*").order("id.asc")).await
    }

    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<StudentCourse>> {
        first_row(
            self.client
                .from("student_course")
                .select("*")
                .eq("reg_no", reg_no)
                .eq("semester", semester.to_string())
                .limit(1),
        )
        .await
    }

    async fn insert_if_absent(
        &self,
        enrollment: NewEnrollment<'_>,
    ) -> StoreResult<InsertOutcome<StudentCourse>> {
        let body = serde_json::json!({
            "reg_no": enrollment.reg_no,
            "semester": enrollment.semester,
            "subject_ids": enrollment.subject_ids,
        });
        match written_row(self.client.from("student_course").insert(body.to_string()), "Enrollment")
            .await
        {
            Ok(created) => Ok(InsertOutcome::Created(created)),
            Err(StoreError::AlreadyExists(_)) => Ok(InsertOutcome::AlreadyExists),
            Err(err) => Err(err),
        }
    }

    async fn set_subjects(&self, id: i64, subject_ids: &[i64]) -> StoreResult<StudentCourse> {
        let body = serde_json::json!({ "subject_ids": subject_ids });
        written_row(
            self.client.from("student_course").update(body.to_string()).eq("id", id.to_string()),
            "Enrollment",
        )
        .await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("student_course").delete().eq("id", id.to_string())).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Enrollment"));
        }
        Ok(())
    }

    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>> {
        // Array membership is filtered here rather than in the store; one
        // semester's enrollments are small.
        let enrolled: Vec<StudentCourse> = rows(
            self.client.from("student_course").select("*").eq("semester", semester.to_string()),
        )
        .await?;
        Ok(enrolled
            .into_iter()
            .filter(|record| record.subject_ids.contains(&subject_id))
            .map(|record| record.reg_no)
            .collect())
    }
}

#[async_trait]
impl ExamStore for SupabaseStore {
    async fn insert_if_absent(&self, exam: NewExam<'_>) -> StoreResult<InsertOutcome<Exam>> {
        let body = serde_json::json!({
            "subject_id": exam.subject_id,
            "prof_id": exam.prof_id,
            "exam_type": exam.exam_type,
            "semester": exam.semester,
            "max_marks": exam.max_marks,
            "exam_date": exam.exam_date,
        });
        match written_row(self.client.from("exams").insert(body.to_string()), "Exam").await {
            Ok(created) => Ok(InsertOutcome::Created(created)),
            Err(StoreError::AlreadyExists(_)) => Ok(InsertOutcome::AlreadyExists),
            Err(err) => Err(err),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Exam>> {
        rows(self.client.from("exams").select("*").order("id.asc")).await
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Exam>> {
        first_row(self.client.from("exams").select("*").eq("id", id.to_string()).limit(1)).await
    }

    async fn update(&self, id: i64, changes: ExamChanges) -> StoreResult<Exam> {
        let mut patch = serde_json::Map::new();
        if let Some(prof_id) = changes.prof_id {
            patch.insert("prof_id".to_string(), prof_id.into());
        }
        if let Some(exam_type) = changes.exam_type {
            patch.insert(
                "exam_type".to_string(),
                serde_json::to_value(exam_type)
                    .map_err(|err| StoreError::Decode(err.to_string()))?,
            );
        }
        if let Some(max_marks) = changes.max_marks {
            patch.insert("max_marks".to_string(), max_marks.into());
        }
        if let Some(exam_date) = changes.exam_date {
            patch.insert("exam_date".to_string(), exam_date.into());
        }
        written_row(
            self.client
                .from("exams")
                .update(serde_json::Value::Object(patch).to_string())
                .eq("id", id.to_string()),
            "Exam",
        )
        .await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("exams").delete().eq("id", id.to_string())).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Exam"));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for SupabaseStore {
    async fn find_grade(&self, subject_id: i64, reg_no: &str) -> StoreResult<Option<Grade>> {
        let found: Vec<GradeRow> = rows(
            self.client
                .from("exam_results")
                .select("grade")
                .eq("subject_id", subject_id.to_string())
                .eq("reg_no", reg_no)
                .limit(1),
        )
        .await?;
        Ok(found.into_iter().next().map(|row| row.grade))
    }

    async fn upsert(&self, result: ResultUpsert<'_>) -> StoreResult<()> {
        let body = serde_json::json!({
            "subject_id": result.subject_id,
            "prof_id": result.prof_id,
            "reg_no": result.reg_no,
            "midsem_marks": result.midsem_marks,
            "endsem_marks": result.endsem_marks,
            "classtest_marks": result.classtest_marks,
            "grade": result.grade,
        });
        let _: Vec<ExamResult> = rows(
            self.client
                .from("exam_results")
                .upsert(body.to_string())
                .on_conflict("subject_id,reg_no"),
        )
        .await?;
        Ok(())
    }

    async fn list(&self, filter: ResultFilter<'_>) -> StoreResult<Vec<ExamResult>> {
        let mut builder = self.client.from("exam_results").select("*");
        if let Some(reg_no) = filter.reg_no {
            builder = builder.eq("reg_no", reg_no);
        }
        if let Some(subject_id) = filter.subject_id {
            builder = builder.eq("subject_id", subject_id.to_string());
        }
        rows(builder).await
    }

    async fn list_for_student_in(
        &self,
        reg_no: &str,
        subject_ids: &[i64],
    ) -> StoreResult<Vec<ExamResult>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        rows(
            self.client
                .from("exam_results")
                .select("*")
                .eq("reg_no", reg_no)
                .in_("subject_id", id_strings(subject_ids)),
        )
        .await
    }

    async fn failed_subject_ids(&self, reg_no: &str, among: &[i64]) -> StoreResult<Vec<i64>> {
        if among.is_empty() {
            return Ok(Vec::new());
        }
        let failed: Vec<SubjectIdRow> = rows(
            self.client
                .from("exam_results")
                .select("subject_id")
                .eq("reg_no", reg_no)
                .eq("grade", Grade::F.as_str())
                .in_("subject_id", id_strings(among)),
        )
        .await?;
        Ok(failed.into_iter().map(|row| row.subject_id).collect())
    }

    async fn delete(&self, subject_id: i64, reg_no: &str) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> = rows(
            self.client
                .from("exam_results")
                .delete()
                .eq("subject_id", subject_id.to_string())
                .eq("reg_no", reg_no),
        )
        .await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Result"));
        }
        Ok(())
    }
}

#[async_trait]
impl BacklogStore for SupabaseStore {
    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<BacklogRecord>> {
        first_row(
            self.client
                .from("backlog")
                .select("*")
                .eq("reg_no", reg_no)
                .eq("semester", semester.to_string())
                .limit(1),
        )
        .await
    }

    async fn reconcile(
        &self,
        reg_no: &str,
        semester: i32,
        edit: BacklogEdit,
    ) -> StoreResult<Vec<i64>> {
        let current = BacklogStore::find(self, reg_no, semester).await?;
        match edit {
            BacklogEdit::Add(subject_id) => match current {
                Some(record) => {
                    if record.subject_ids.contains(&subject_id) {
                        return Ok(record.subject_ids);
                    }
                    let mut subject_ids = record.subject_ids;
                    subject_ids.push(subject_id);
                    self.write_backlog_set(reg_no, semester, &subject_ids).await?;
                    Ok(subject_ids)
                }
                None => {
                    let body = serde_json::json!({
                        "reg_no": reg_no,
                        "semester": semester,
                        "subject_ids": [subject_id],
                    });
                    let inserted: Result<BacklogRecord, StoreError> =
                        written_row(self.client.from("backlog").insert(body.to_string()), "Backlog")
                            .await;
                    match inserted {
                        Ok(record) => Ok(record.subject_ids),
                        // Lost a create race; fold into the record that won.
                        Err(StoreError::AlreadyExists(_)) => {
                            let record = BacklogStore::find(self, reg_no, semester)
                                .await?
                                .ok_or(StoreError::NotFound("Backlog"))?;
                            if record.subject_ids.contains(&subject_id) {
                                return Ok(record.subject_ids);
                            }
                            let mut subject_ids = record.subject_ids;
                            subject_ids.push(subject_id);
                            self.write_backlog_set(reg_no, semester, &subject_ids).await?;
                            Ok(subject_ids)
                        }
                        Err(err) => Err(err),
                    }
                }
            },
            BacklogEdit::Remove(subject_id) => match current {
                Some(record) => {
                    let subject_ids: Vec<i64> =
                        record.subject_ids.into_iter().filter(|id| *id != subject_id).collect();
                    if subject_ids.is_empty() {
                        self.delete_backlog(reg_no, semester).await?;
                    } else {
                        self.write_backlog_set(reg_no, semester, &subject_ids).await?;
                    }
                    Ok(subject_ids)
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
        if subject_ids.is_empty() {
            self.delete_backlog(reg_no, semester).await?;
            return Ok(Vec::new());
        }
        let body = serde_json::json!({
            "reg_no": reg_no,
            "semester": semester,
            "subject_ids": subject_ids,
        });
        let _: Vec<BacklogRecord> = rows(
            self.client.from("backlog").upsert(body.to_string()).on_conflict("reg_no,semester"),
        )
        .await?;
        Ok(subject_ids.to_vec())
    }
}

impl SupabaseStore {
    async fn write_backlog_set(
        &self,
        reg_no: &str,
        semester: i32,
        subject_ids: &[i64],
    ) -> StoreResult<()> {
        let body = serde_json::json!({ "subject_ids": subject_ids });
        let _: Vec<BacklogRecord> = rows(
            self.client
                .from("backlog")
                .update(body.to_string())
                .eq("reg_no", reg_no)
                .eq("semester", semester.to_string()),
        )
        .await?;
        Ok(())
    }

    async fn delete_backlog(&self, reg_no: &str, semester: i32) -> StoreResult<()> {
        let _: Vec<serde_json::Value> = rows(
            self.client
                .from("backlog")
                .delete()
                .eq("reg_no", reg_no)
                .eq("semester", semester.to_string()),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for SupabaseStore {
    async fn insert_if_absent(
        &self,
        registration: NewRegistration<'_>,
    ) -> StoreResult<InsertOutcome<ExamRegistration>> {
        let body = serde_json::json!({
            "reg_no": registration.reg_no,
            "semester": registration.semester,
            "subjects": registration.subjects,
            "elective_subjects": registration.elective_subjects,
            "backlog_subjects": registration.backlog_subjects,
            "registration_date": registration.registration_date,
            "status": registration.status,
        });
        match written_row(
            self.client.from("exam_registrations").insert(body.to_string()),
            "Registration",
        )
        .await
        {
            Ok(created) => Ok(InsertOutcome::Created(created)),
            Err(StoreError::AlreadyExists(_)) => Ok(InsertOutcome::AlreadyExists),
            Err(err) => Err(err),
        }
    }

    async fn find(&self, id: i64) -> StoreResult<Option<ExamRegistration>> {
        first_row(
            self.client.from("exam_registrations").select("*").eq("id", id.to_string()).limit(1),
        )
        .await
    }

    async fn find_for_student(
        &self,
        reg_no: &str,
        semester: i32,
    ) -> StoreResult<Option<ExamRegistration>> {
        first_row(
            self.client
                .from("exam_registrations")
                .select("*")
                .eq("reg_no", reg_no)
                .eq("semester", semester.to_string())
                .limit(1),
        )
        .await
    }

    async fn search(&self, filter: RegistrationFilter<'_>) -> StoreResult<Vec<ExamRegistration>> {
        let mut builder =
            self.client.from("exam_registrations").select("*").order("registration_date.desc");
        if let Some(reg_no) = filter.reg_no {
            builder = builder.eq("reg_no", reg_no);
        }
        if let Some(semester) = filter.semester {
            builder = builder.eq("semester", semester.to_string());
        }
        rows(builder).await
    }

    async fn set_subject_lists(
        &self,
        id: i64,
        lists: SubjectLists,
    ) -> StoreResult<ExamRegistration> {
        let body = serde_json::json!({
            "subjects": lists.subjects,
            "elective_subjects": lists.elective_subjects,
            "backlog_subjects": lists.backlog_subjects,
        });
        written_row(
            self.client
                .from("exam_registrations")
                .update(body.to_string())
                .eq("id", id.to_string()),
            "Registration",
        )
        .await
    }

    async fn set_status(
        &self,
        id: i64,
        status: RegistrationStatus,
    ) -> StoreResult<ExamRegistration> {
        let body = serde_json::json!({ "status": status });
        written_row(
            self.client
                .from("exam_registrations")
                .update(body.to_string())
                .eq("id", id.to_string()),
            "Registration",
        )
        .await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("exam_registrations").delete().eq("id", id.to_string())).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound("Registration"));
        }
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        // PostgREST refuses an unfiltered delete; ids start at 1.
        let removed: Vec<serde_json::Value> =
            rows(self.client.from("exam_registrations").delete().neq("id", "0")).await?;
        Ok(removed.len() as u64)
    }

    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>> {
        let registered: Vec<ExamRegistration> = rows(
            self.client
                .from("exam_registrations")
                .select("*")
                .eq("semester", semester.to_string()),
        )
        .await?;
        Ok(registered
            .into_iter()
            .filter(|record| record.subjects.contains(&subject_id))
            .map(|record| record.reg_no)
            .collect())
    }
}

#[async_trait]
impl UserStore for SupabaseStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        first_row(self.client.from("users").select("*").eq("email", email).limit(1)).await
    }

    async fn role_details(
        &self,
        role: UserRole,
        user_id: &str,
    ) -> StoreResult<Option<serde_json::Value>> {
        first_row(self.client.from(role.detail_table()).select("*").eq("id", user_id).limit(1))
            .await
    }

    async fn set_password(&self, user_id: &str, stored: &str) -> StoreResult<()> {
        let body = serde_json::json!({ "password": stored });
        let updated: Vec<serde_json::Value> =
            rows(self.client.from("users").update(body.to_string()).eq("id", user_id)).await?;
        if updated.is_empty() {
            return Err(StoreError::NotFound("User"));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for SupabaseStore {
    async fn record(
        &self,
        reg_no: &str,
        subject_id: i64,
        attendance_count: i32,
    ) -> StoreResult<AttendanceMark> {
        let body = serde_json::json!({
            "reg_no": reg_no,
            "subject_id": subject_id,
            "attendance_count": attendance_count,
        });
        let written: AttendanceMark = written_row(
            self.client
                .from("attendance_mark")
                .upsert(body.to_string())
                .on_conflict("reg_no,subject_id"),
            "Attendance",
        )
        .await?;
        let _ = self.attendance_feed.send(written.clone());
        Ok(written)
    }

    fn changes(&self) -> broadcast::Receiver<AttendanceMark> {
        self.attendance_feed.subscribe()
    }
}

#[async_trait]
impl StoreHealth for SupabaseStore {
    async fn ping(&self) -> StoreResult<()> {
        let _: Vec<SubjectIdRow> =
            rows(self.client.from("subjects").select("subject_id").limit(1)).await?;
        Ok(())
    }
}
