use crate::dto::test_dto::{CreateTestRequest, NewQuestion};
use crate::error::{Error, Result};
use crate::models::class_group::ClassGroup;
use crate::models::identity::Identity;
use crate::models::test::Test;
use crate::repository::{ClassDirectory, TestRepository};
use crate::services::import_service::ImportService;
use crate::utils::time::parse_schedule;
use crate::utils::validation::validate;
use std::mem;
use std::sync::Arc;

/// Raw schedule form fields, kept as entered so nothing is lost when
/// submission fails validation.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub subject: String,
    pub scheduled_date: String,
    pub duration: String,
    pub class_id: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            scheduled_date: String::new(),
            duration: "60".to_string(),
            class_id: String::new(),
        }
    }
}

/// State behind the teacher's "schedule a test" screen: the schedule form,
/// the question entry row, and the questions collected so far.
pub struct AuthoringSession {
    pub teacher: Identity,
    classes: Arc<dyn ClassDirectory>,
    tests: Arc<dyn TestRepository>,
    pub class_list: Vec<ClassGroup>,
    pub form: ScheduleForm,
    pub entry: NewQuestion,
    pub questions: Vec<NewQuestion>,
}

impl AuthoringSession {
    pub fn new(
        teacher: Identity,
        classes: Arc<dyn ClassDirectory>,
        tests: Arc<dyn TestRepository>,
    ) -> Self {
        Self {
            teacher,
            classes,
            tests,
            class_list: Vec::new(),
            form: ScheduleForm::default(),
            entry: NewQuestion::default(),
            questions: Vec::new(),
        }
    }

    /// Fills the class selector.
    pub async fn load_classes(&mut self) -> Result<()> {
        self.class_list = self.classes.list().await?;
        Ok(())
    }

    /// Moves the entry row into the question list and blanks it for the
    /// next question. An invalid entry stays in place for correction.
    pub fn add_question(&mut self) -> Result<()> {
        validate(&self.entry)?;
        self.questions.push(mem::take(&mut self.entry));
        Ok(())
    }

    /// Loads a question document, replacing whatever questions were
    /// already on the form. A bad document changes nothing.
    pub fn load_question_document(&mut self, doc: &str) -> Result<usize> {
        let questions = ImportService::parse_question_document(doc)?;
        let count = questions.len();
        self.questions = questions;
        Ok(count)
    }

    /// Turns the raw form into a create request, or says what is wrong
    /// with it.
    pub fn build_request(&self) -> Result<CreateTestRequest> {
        let subject = self.form.subject.trim();
        if subject.is_empty() {
            return Err(Error::Validation("Subject is required".to_string()));
        }

        let scheduled_at = parse_schedule(&self.form.scheduled_date)
            .map_err(|e| Error::Validation(e.to_string()))?;

        let duration_minutes = self
            .form
            .duration
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::Validation("Duration must be a number of minutes".to_string()))?;

        let class_id = self
            .form
            .class_id
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::Validation("Select a class for the test".to_string()))?;
        if !self.class_list.iter().any(|c| c.id == class_id) {
            return Err(Error::Validation("Select a class for the test".to_string()));
        }

        let request = CreateTestRequest {
            subject: subject.to_string(),
            scheduled_at,
            duration_minutes,
            class_id,
            teacher_id: self.teacher.id,
            questions: self.questions.clone(),
        };
        validate(&request)?;
        Ok(request)
    }

    /// Validates the form and schedules the test. The form and question
    /// list reset only after the server accepts the test; any failure
    /// leaves them exactly as they were.
    pub async fn schedule_test(&mut self) -> Result<Test> {
        let request = self.build_request()?;
        let test = self.tests.create(&request).await?;
        tracing::info!(
            "Scheduled {} test {} for class {}",
            test.subject,
            test.id,
            request.class_id
        );

        self.form = ScheduleForm::default();
        self.entry = NewQuestion::default();
        self.questions.clear();
        Ok(test)
    }
}
