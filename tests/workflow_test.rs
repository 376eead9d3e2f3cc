use std::sync::Arc;

use mocktest_core::dto::test_dto::NewQuestion;
use mocktest_core::error::Error;
use mocktest_core::models::class_group::ClassGroup;
use mocktest_core::models::identity::Identity;
use mocktest_core::models::test::Test;
use mocktest_core::repository::memory::{InMemoryBackend, StudentRecord};
use mocktest_core::session::student::SubmitOutcome;
use mocktest_core::AppState;

const QUESTION_DOCUMENT: &str = r#"{
  "questions": [
    { "question": "SI unit of force?", "choices": ["Newton", "Joule", "Watt", "Pascal"], "correctAnswer": 0, "score": 5 },
    { "question": "Boiling point of water at sea level?", "choices": ["90 C", "95 C", "100 C", "105 C"], "correctAnswer": 2, "score": 10 }
  ]
}"#;

fn seeded_state() -> AppState {
    let backend = InMemoryBackend::new();
    backend.add_class(ClassGroup {
        id: 1,
        department: "CSE".to_string(),
        year: 2,
        section: "A".to_string(),
    });
    backend.add_class(ClassGroup {
        id: 2,
        department: "ECE".to_string(),
        year: 3,
        section: "B".to_string(),
    });
    backend.add_student(StudentRecord {
        id: 11,
        name: "Asha Rao".to_string(),
        reg_num: "CSE-2-001".to_string(),
        class_id: 1,
    });
    backend.add_student(StudentRecord {
        id: 12,
        name: "Vikram Shah".to_string(),
        reg_num: "CSE-2-002".to_string(),
        class_id: 1,
    });
    AppState::new(
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(backend),
    )
}

/// Schedules a three-question Physics test worth 20 marks for class 1.
async fn schedule_physics_test(state: &AppState) -> Test {
    let mut authoring = state.authoring_session(Identity::teacher(7, "Priya Nair"));
    authoring.load_classes().await.expect("load classes");

    authoring.form.subject = "Physics".to_string();
    authoring.form.scheduled_date = "2025-03-10T09:00".to_string();
    authoring.form.duration = "45".to_string();
    authoring.form.class_id = "1".to_string();

    let loaded = authoring
        .load_question_document(QUESTION_DOCUMENT)
        .expect("load document");
    assert_eq!(loaded, 2);

    authoring.entry = NewQuestion {
        question: "2 + 2?".to_string(),
        choices: vec![
            "3".to_string(),
            "4".to_string(),
            "5".to_string(),
            "6".to_string(),
        ],
        correct_answer: 1,
        score: 5,
    };
    authoring.add_question().expect("add question");

    authoring.schedule_test().await.expect("schedule test")
}

#[tokio::test]
async fn schedule_take_and_review_end_to_end() {
    let _ = tracing_subscriber::fmt::try_init();

    let state = seeded_state();
    let test = schedule_physics_test(&state).await;
    assert_eq!(test.status, "ongoing");
    assert_eq!(test.questions.len(), 3);
    assert_eq!(test.total_score(), 20);

    // Asha sees the test on her dashboard and opens it.
    let mut asha = state.student_session(Identity::student(11, "Asha Rao"));
    asha.refresh().await.expect("refresh");
    assert_eq!(asha.tests.len(), 1);
    assert_eq!(asha.ongoing_tests().len(), 1);
    assert!(asha.results.is_empty());

    asha.start_test(test.id).await.expect("start test");
    let question_ids: Vec<i64> = asha
        .active
        .as_ref()
        .expect("active test")
        .test
        .questions
        .iter()
        .map(|q| q.id)
        .collect();

    // Two of three answered: submit asks for confirmation and sends nothing.
    asha.select_answer(question_ids[0], 0).expect("answer q1");
    asha.select_answer(question_ids[1], 1).expect("answer q2");
    let outcome = asha.submit(false).await.expect("partial submit");
    assert!(matches!(outcome, SubmitOutcome::ConfirmationRequired));
    assert_eq!(asha.active.as_ref().expect("still open").answers.len(), 2);

    // She changes her second answer, then confirms the partial submission.
    asha.select_answer(question_ids[1], 2).expect("rethink q2");
    let receipt = match asha.submit(true).await.expect("confirmed submit") {
        SubmitOutcome::Submitted(receipt) => receipt,
        SubmitOutcome::ConfirmationRequired => panic!("expected a scored submission"),
    };
    assert_eq!(receipt.score, 15);
    assert_eq!(receipt.total_score, 20);
    assert!(asha.active.is_none());
    assert_eq!(asha.results.len(), 1);
    assert_eq!(asha.results[0].subject, "Physics");
    assert_eq!(asha.results[0].score, 15);
    assert!(asha.results[0].feedback.is_none());

    // Vikram answers everything correctly.
    let mut vikram = state.student_session(Identity::student(12, "Vikram Shah"));
    vikram.refresh().await.expect("refresh");
    vikram.start_test(test.id).await.expect("start test");
    vikram.select_answer(question_ids[0], 0).expect("answer q1");
    vikram.select_answer(question_ids[1], 2).expect("answer q2");
    vikram.select_answer(question_ids[2], 1).expect("answer q3");
    let receipt = match vikram.submit(false).await.expect("full submit") {
        SubmitOutcome::Submitted(receipt) => receipt,
        SubmitOutcome::ConfirmationRequired => panic!("all questions were answered"),
    };
    assert_eq!(receipt.score, 20);

    // A fresh login cannot submit the same test twice; the backend holds
    // the line even when the session has no memory of the first attempt.
    let mut again = state.student_session(Identity::student(11, "Asha Rao"));
    again.refresh().await.expect("refresh");
    again.start_test(test.id).await.expect("start test");
    let second = again.submit(true).await;
    assert!(matches!(second, Err(Error::DuplicateSubmission)));

    // The teacher reviews the results and leaves Asha feedback.
    let mut review = state.review_session(Identity::teacher(7, "Priya Nair"));
    review.load_tests().await.expect("load tests");
    assert_eq!(review.tests.len(), 1);

    review.select_test(Some(test.id)).await.expect("select test");
    assert_eq!(review.results.len(), 2);
    let asha_row = review
        .results
        .iter()
        .find(|r| r.student_reg_num == "CSE-2-001")
        .expect("asha's row");
    assert_eq!(asha_row.score, 15);
    assert!((asha_row.percentage() - 75.0).abs() < f64::EPSILON);
    assert!(!asha_row.sent);
    let asha_result_id = asha_row.id;
    let asha_submitted_at = asha_row.submitted_at;

    review.open_feedback(asha_result_id).expect("open editor");
    assert_eq!(review.editor.as_ref().expect("editor").draft, "");
    review.set_draft("Revise work and energy");
    review.save_feedback().await.expect("save feedback");

    // The saved feedback survives a refetch, and only feedback changed.
    review.select_test(Some(test.id)).await.expect("reselect");
    let asha_row = review
        .results
        .iter()
        .find(|r| r.id == asha_result_id)
        .expect("asha's row");
    assert_eq!(asha_row.feedback.as_deref(), Some("Revise work and energy"));
    assert!(asha_row.sent);
    assert_eq!(asha_row.score, 15);
    assert_eq!(asha_row.total_score, 20);
    assert_eq!(asha_row.submitted_at, asha_submitted_at);

    // Reopening prefills the saved text; saving again overwrites it.
    review.open_feedback(asha_result_id).expect("reopen editor");
    assert_eq!(
        review.editor.as_ref().expect("editor").draft,
        "Revise work and energy"
    );
    review.set_draft("Good recovery on the second half");
    review.save_feedback().await.expect("overwrite feedback");

    // Asha sees the latest feedback on her side.
    asha.refresh().await.expect("refresh");
    assert_eq!(
        asha.results[0].feedback.as_deref(),
        Some("Good recovery on the second half")
    );
}

#[tokio::test]
async fn newest_test_appears_first() {
    let state = seeded_state();

    let mut authoring = state.authoring_session(Identity::teacher(7, "Priya Nair"));
    authoring.load_classes().await.expect("load classes");
    for (subject, date) in [("Physics", "2025-03-10T09:00"), ("Chemistry", "2025-04-02T11:30")] {
        authoring.form.subject = subject.to_string();
        authoring.form.scheduled_date = date.to_string();
        authoring.form.duration = "30".to_string();
        authoring.form.class_id = "1".to_string();
        authoring.entry = NewQuestion {
            question: "Placeholder?".to_string(),
            choices: vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_answer: 0,
            score: 5,
        };
        authoring.add_question().expect("add question");
        authoring.schedule_test().await.expect("schedule");
    }

    let mut review = state.review_session(Identity::teacher(7, "Priya Nair"));
    review.load_tests().await.expect("load tests");
    let subjects: Vec<&str> = review.tests.iter().map(|t| t.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Chemistry", "Physics"]);

    let mut student = state.student_session(Identity::student(11, "Asha Rao"));
    student.refresh().await.expect("refresh");
    let subjects: Vec<&str> = student.tests.iter().map(|t| t.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Chemistry", "Physics"]);
}

#[tokio::test]
async fn unknown_student_cannot_see_tests() {
    let state = seeded_state();
    let mut session = state.student_session(Identity::student(99, "Nobody"));
    let outcome = session.refresh().await;
    assert!(matches!(outcome, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn empty_submission_scores_zero() {
    let state = seeded_state();
    let test = schedule_physics_test(&state).await;

    let mut student = state.student_session(Identity::student(11, "Asha Rao"));
    student.refresh().await.expect("refresh");
    student.start_test(test.id).await.expect("start test");

    let receipt = match student.submit(true).await.expect("submit") {
        SubmitOutcome::Submitted(receipt) => receipt,
        SubmitOutcome::ConfirmationRequired => panic!("submission was confirmed"),
    };
    assert_eq!(receipt.score, 0);
    assert_eq!(receipt.total_score, 20);
    assert_eq!(student.results[0].score, 0);
}
