//! Integration tests for the student and teacher grade pages over HTTP.

mod helpers;

use std::sync::Arc;

use serde_json::{Value, json};

use campus_client::PortalApi;
use campus_core::ErrorKind;
use campus_core::config::GradingConfig;
use campus_entity::grade::GradeEntry;
use campus_entity::{ClassId, StudentId};
use campus_service::{
    GradeAggregator, PageContext, StudentDashboard, TeacherDashboard, format_score,
    group_by_class,
};

use helpers::{
    BackendState, StubBackend, TestPortal, class_payload, staff_account, student_account,
    token_for,
};

fn school() -> BackendState {
    let mut state = BackendState::default();
    state
        .accounts
        .insert("an".into(), ("pw".into(), student_account("an", 5)));
    state
        .accounts
        .insert("binh".into(), ("pw".into(), staff_account("binh", "teacher")));

    for (id, name) in [(1, "Networks"), (2, "Databases"), (3, "Compilers")] {
        state.classes.insert(id, class_payload(id, name));
        state.enrollments.push((5, id));
    }
    state.broken_classes.push(3);

    state.grades = vec![
        (5, 1, "Attendance".into(), 9.0),
        (5, 1, "mid".into(), 8.0),
        (5, 2, "final".into(), 6.0),
        (5, 2, "bonus".into(), 10.0),
    ];

    state.rosters.insert(
        1,
        vec![
            (5, "Student an".into(), json!(9), json!(""), Value::Null),
            (6, "Student bao".into(), json!(""), json!(""), json!("")),
        ],
    );
    state
}

async fn page(portal: &TestPortal, path: &str, username: &str) -> PageContext {
    let token = token_for(username);
    let user = portal.api.me(&token).await.expect("me");
    PageContext::new(path, token, user)
}

#[tokio::test]
async fn test_student_classes_skip_failed_fetch() -> anyhow::Result<()> {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let ctx = page(&portal, "/student", "an").await;

    let dashboard = StudentDashboard::new(portal.api.clone(), GradeAggregator::default());
    let classes = dashboard.classes(&ctx).await?;

    let names: Vec<&str> = classes.iter().map(|c| c.class_name.as_str()).collect();
    assert_eq!(names, vec!["Networks", "Databases"]);
    Ok(())
}

#[tokio::test]
async fn test_student_grade_rows_per_class() -> anyhow::Result<()> {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let mut ctx = page(&portal, "/student", "an").await;
    let dashboard = StudentDashboard::new(portal.api.clone(), GradeAggregator::default());

    let networks = portal.api.class(ctx.token(), ClassId(1)).await?;
    let rows = dashboard.grades(&mut ctx, &networks).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].class_name, "Networks");
    assert_eq!(rows[0].attendance, "9.00");
    assert_eq!(rows[0].mid, "8.00");
    assert_eq!(rows[0].final_, "-");
    assert_eq!(rows[0].average, "8.40");

    let databases = portal.api.class(ctx.token(), ClassId(2)).await?;
    let rows = dashboard.grades(&mut ctx, &databases).await?;
    assert_eq!(rows[0].average, "6.00");
    assert_eq!(ctx.current_class(), Some(ClassId(2)));
    Ok(())
}

#[tokio::test]
async fn test_all_grades_group_into_two_classes() -> anyhow::Result<()> {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let token = token_for("an");

    let mut records = portal
        .api
        .student_grades(&token, StudentId(5), ClassId(1))
        .await?;
    records.extend(
        portal
            .api
            .student_grades(&token, StudentId(5), ClassId(2))
            .await?,
    );

    let aggregator = GradeAggregator::from_config(&GradingConfig::default());
    let groups = group_by_class(&records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].class_id, ClassId(1));
    assert_eq!(format_score(aggregator.weighted_average(&groups[0])), "8.40");
    assert_eq!(groups[1].class_id, ClassId(2));
    assert_eq!(format_score(aggregator.weighted_average(&groups[1])), "6.00");
    Ok(())
}

#[tokio::test]
async fn test_teacher_submits_and_sees_refetched_roster() -> anyhow::Result<()> {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let mut ctx = page(&portal, "/teacher", "binh").await;
    let dashboard = TeacherDashboard::new(portal.api.clone(), GradeAggregator::default());

    let before = dashboard.class_detail(&mut ctx, ClassId(1)).await?;
    assert_eq!(before.students[0].grades.attendance, Some(9.0));
    assert_eq!(before.students[0].grades.mid, None);
    assert_eq!(before.students[1].grades.r#final, None);

    let entries = vec![
        TeacherDashboard::build_entry(StudentId(5), ClassId(1), "mid", "7")?,
        TeacherDashboard::build_entry(StudentId(5), ClassId(1), "Final", "8")?,
    ];
    let after = dashboard.submit_grades(&mut ctx, ClassId(1), &entries).await?;

    assert_eq!(after.students[0].grades.mid, Some(7.0));
    assert_eq!(after.students[0].grades.r#final, Some(8.0));
    assert_eq!(backend.state.lock().unwrap().saved_batches.len(), 1);

    let rows = dashboard.roster_rows(&after);
    assert_eq!(rows[0].mid, "7.00");
    // 9*0.2 + 7*0.3 + 8*0.5
    assert_eq!(rows[0].average, Some(7.9));
    assert_eq!(rows[1].mid, "-");
    assert_eq!(rows[1].average, None);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_grade_never_sent() {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let mut ctx = page(&portal, "/teacher", "binh").await;
    let dashboard = TeacherDashboard::new(portal.api.clone(), GradeAggregator::default());

    let entry = GradeEntry {
        student_id: StudentId(5),
        class_id: ClassId(1),
        subject: "final".into(),
        score: 10.5,
    };
    let err = dashboard
        .submit_grades(&mut ctx, ClassId(1), &[entry])
        .await
        .expect_err("out of range");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(backend.state.lock().unwrap().saved_batches.is_empty());
}

#[tokio::test]
async fn test_student_cannot_use_teacher_endpoints() {
    let backend = StubBackend::start(school()).await;
    let portal = TestPortal::new(&backend);
    let api: Arc<dyn PortalApi> = portal.api.clone();

    let err = api
        .teacher_class_detail(&token_for("an"), ClassId(1))
        .await
        .expect_err("student");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = api
        .teacher_class_detail(&token_for("binh"), ClassId(9))
        .await
        .expect_err("missing class");
    assert_eq!(err.kind, ErrorKind::NotFound);
}
