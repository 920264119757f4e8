use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use jiff::civil::{date, time};

use super::*;
use crate::models::{
    ExperienceLevel, NotificationPrefs, PaymentTerms, ReplyDeadline, Schedule, TimeRange,
    Weekday, WorkerCount,
};
use crate::params::{BasicsForm, CrewForm, NotifyForm, PaymentForm, ScheduleForm, StepForm};
use crate::store::MemoryKeyValue;

/// Test double for the project-creation collaborator.
struct StubClient {
    fail: AtomicBool,
    submitted: Mutex<Vec<ProjectPayload>>,
}

impl StubClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: AtomicBool::new(false),
            submitted: Mutex::new(Vec::new()),
        })
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn submissions(&self) -> Vec<ProjectPayload> {
        self.submitted.lock().unwrap().clone()
    }
}

impl ProjectClient for StubClient {
    fn create_project(&self, payload: &ProjectPayload) -> crate::Result<SubmissionReceipt> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(WizardError::submission("service unavailable"));
        }
        self.submitted.lock().unwrap().push(payload.clone());
        Ok(SubmissionReceipt { project_id: 42 })
    }
}

async fn test_wizard() -> (Wizard, DraftStore, Arc<StubClient>) {
    let store = DraftStore::new(Arc::new(MemoryKeyValue::new()));
    let client = StubClient::new();
    let wizard = WizardBuilder::new()
        .with_store(store.clone())
        .with_client(client.clone())
        .build()
        .await
        .expect("Failed to build wizard");
    (wizard, store, client)
}

fn basics_form() -> StepForm {
    StepForm::Basics(BasicsForm {
        project_name: "Warehouse crew".to_string(),
        project_address: "12 Harbor Rd".to_string(),
        project_type: "moving".to_string(),
        required_skills: vec!["lifting".to_string(), "forklift".to_string()],
        worker_count: WorkerCount::Count(2),
        work_description: "Unload and stage incoming pallets".to_string(),
        experience_level: Some(ExperienceLevel::Intermediate),
    })
}

fn schedule_form() -> StepForm {
    StepForm::Schedule(ScheduleForm {
        schedule: Schedule::one_time(date(2024, 1, 1), date(2024, 1, 3)).unwrap(),
        hours: Some(TimeRange::new(time(9, 0, 0, 0), time(17, 0, 0, 0)).unwrap()),
    })
}

fn payment_form() -> StepForm {
    StepForm::Payment(PaymentForm {
        payment: PaymentTerms::Hourly { rate: 50.0 },
    })
}

fn crew_form() -> StepForm {
    StepForm::Crew(CrewForm::default())
}

fn notify_form() -> StepForm {
    StepForm::Notify(NotifyForm {
        notifications: NotificationPrefs {
            in_app: true,
            sms: true,
            voice_call: false,
        },
        reply_deadline: ReplyDeadline::OneHour,
    })
}

async fn advance_to_notify(wizard: &mut Wizard) {
    for form in [basics_form(), schedule_form(), payment_form(), crew_form()] {
        wizard.next(form).await.expect("step should advance");
    }
    assert_eq!(wizard.current_step(), WizardStep::Notify);
}

#[tokio::test]
async fn test_fresh_session_starts_at_basics() {
    let (wizard, _store, _client) = test_wizard().await;
    assert_eq!(wizard.current_step(), WizardStep::Basics);
    assert!(wizard.completed_steps().is_empty());
    assert!(!wizard.has_unsaved_work());
}

#[tokio::test]
async fn test_next_merges_and_advances() {
    let (mut wizard, _store, _client) = test_wizard().await;

    let action = wizard.next(basics_form()).await.unwrap();
    assert_eq!(action, NextAction::Advanced(WizardStep::Schedule));
    assert_eq!(wizard.draft().project_name, "Warehouse crew");
    assert_eq!(wizard.draft().required_skills, vec!["lifting", "forklift"]);
    assert!(wizard.completed_steps().contains(&WizardStep::Basics));
    assert!(wizard.has_unsaved_work());

    wizard.next(schedule_form()).await.unwrap();
    // Fields owned by the basics step survive later merges.
    assert_eq!(wizard.draft().project_name, "Warehouse crew");
    assert!(wizard.draft().schedule.is_some());
}

#[tokio::test]
async fn test_next_rejects_form_for_wrong_step() {
    let (mut wizard, _store, _client) = test_wizard().await;

    let err = wizard.next(payment_form()).await.unwrap_err();
    match err {
        WizardError::InvalidInput { field, .. } => assert_eq!(field, "step"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    // Nothing merged, nothing completed.
    assert_eq!(wizard.current_step(), WizardStep::Basics);
    assert!(wizard.draft().payment.is_none());
    assert!(wizard.completed_steps().is_empty());
}

#[tokio::test]
async fn test_validation_failure_leaves_aggregate_untouched() {
    let (mut wizard, _store, _client) = test_wizard().await;

    let invalid = StepForm::Basics(BasicsForm {
        project_name: String::new(),
        ..Default::default()
    });
    assert!(wizard.next(invalid).await.is_err());
    assert_eq!(wizard.current_step(), WizardStep::Basics);
    assert!(wizard.draft().project_name.is_empty());
    assert!(wizard.completed_steps().is_empty());
}

#[tokio::test]
async fn test_back_and_completed_steps_are_monotonic() {
    let (mut wizard, _store, _client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    wizard.next(schedule_form()).await.unwrap();
    assert_eq!(wizard.current_step(), WizardStep::Payment);

    assert_eq!(wizard.back(), BackAction::MovedTo(WizardStep::Schedule));
    assert_eq!(wizard.back(), BackAction::MovedTo(WizardStep::Basics));
    // Navigating backward does not un-complete steps.
    assert!(wizard.completed_steps().contains(&WizardStep::Basics));
    assert!(wizard.completed_steps().contains(&WizardStep::Schedule));

    assert_eq!(wizard.back(), BackAction::ExitRequested);
    assert_eq!(wizard.current_step(), WizardStep::Basics);
}

#[tokio::test]
async fn test_jump_to_rules() {
    let (mut wizard, _store, _client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    wizard.next(schedule_form()).await.unwrap();
    assert_eq!(wizard.current_step(), WizardStep::Payment);

    // Forward jump: no-op.
    assert!(!wizard.jump_to(WizardStep::Notify));
    assert_eq!(wizard.current_step(), WizardStep::Payment);

    // Jump to the current (incomplete) step: no-op.
    assert!(!wizard.jump_to(WizardStep::Payment));

    // Backward jump to a completed step succeeds.
    assert!(wizard.jump_to(WizardStep::Basics));
    assert_eq!(wizard.current_step(), WizardStep::Basics);

    // From here, Schedule is completed but ahead of the cursor: no-op.
    assert!(!wizard.jump_to(WizardStep::Schedule));
}

#[tokio::test]
async fn test_estimate_tracks_payment_configuration() {
    let (mut wizard, _store, _client) = test_wizard().await;
    assert_eq!(wizard.estimate().total, 0.0);

    wizard.next(basics_form()).await.unwrap();
    wizard.next(schedule_form()).await.unwrap();
    assert_eq!(wizard.estimate().total, 0.0);

    wizard.next(payment_form()).await.unwrap();
    // 2 workers x 50/hr x 8 h x 3 days = 2400 base, 2520 with the fee.
    let breakdown = wizard.estimate();
    assert!((breakdown.base_cost - 2400.0).abs() < 1e-9);
    assert!((breakdown.total - 2520.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_submission_success_deletes_draft() {
    let (mut wizard, store, client) = test_wizard().await;
    advance_to_notify(&mut wizard).await;

    let id = wizard.save_draft().await.unwrap();
    assert!(store.load(&id).is_some());

    let action = wizard.next(notify_form()).await.unwrap();
    match action {
        NextAction::Submitted(receipt) => assert_eq!(receipt.project_id, 42),
        other => panic!("Expected submission, got {other:?}"),
    }
    assert!(store.load(&id).is_none());
    assert!(wizard.draft_id().is_none());

    let submissions = client.submissions();
    assert_eq!(submissions.len(), 1);
    let payload = &submissions[0];
    assert_eq!(payload.project_name, "Warehouse crew");
    assert_eq!(payload.required_workers, 2);
    assert_eq!(payload.time_nature, "onetime");
    assert_eq!(payload.payment_type, "hourly");
    assert_eq!(payload.notification_methods, vec!["IN_APP", "SMS"]);
    assert_eq!(payload.required_skills.len(), 2);
    assert_eq!(payload.required_skills[0].skill_id, "lifting");
    assert_eq!(payload.required_skills[0].required_level, 1);
    assert!(payload.required_skills[0].is_mandatory);
    assert!((payload.estimated_total - 2520.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_submission_failure_keeps_state_and_draft() {
    let (mut wizard, store, client) = test_wizard().await;
    advance_to_notify(&mut wizard).await;
    let id = wizard.save_draft().await.unwrap();

    client.set_fail(true);
    let err = wizard.next(notify_form()).await.unwrap_err();
    assert!(matches!(err, WizardError::Submission { .. }));

    // Still on the final step, data intact, draft kept.
    assert_eq!(wizard.current_step(), WizardStep::Notify);
    assert_eq!(wizard.draft().project_name, "Warehouse crew");
    assert!(wizard.draft().reply_deadline.is_some());
    assert!(store.load(&id).is_some());

    // A later retry goes through and cleans up.
    client.set_fail(false);
    let action = wizard.next(notify_form()).await.unwrap();
    assert!(matches!(action, NextAction::Submitted(_)));
    assert!(store.load(&id).is_none());
}

#[tokio::test]
async fn test_resume_from_saved_draft() {
    let (mut wizard, store, client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    wizard.next(schedule_form()).await.unwrap();
    let id = wizard.save_draft().await.unwrap();

    let resumed = WizardBuilder::new()
        .with_store(store)
        .with_client(client)
        .with_draft_id(id.as_str())
        .build()
        .await
        .unwrap();
    assert_eq!(resumed.current_step(), WizardStep::Payment);
    assert_eq!(resumed.draft().project_name, "Warehouse crew");
    assert_eq!(resumed.draft_id(), Some(id.as_str()));
    assert!(resumed.completed_steps().contains(&WizardStep::Schedule));
}

#[tokio::test]
async fn test_resume_missing_draft_falls_back_to_fresh() {
    let store = DraftStore::new(Arc::new(MemoryKeyValue::new()));
    let wizard = WizardBuilder::new()
        .with_store(store)
        .with_client(StubClient::new())
        .with_draft_id("draft-does-not-exist")
        .build()
        .await
        .unwrap();
    assert_eq!(wizard.current_step(), WizardStep::Basics);
    assert!(wizard.draft_id().is_none());
    assert!(!wizard.has_unsaved_work());
}

#[tokio::test]
async fn test_builder_requires_client() {
    let store = DraftStore::new(Arc::new(MemoryKeyValue::new()));
    let result = WizardBuilder::new().with_store(store).build().await;
    assert!(matches!(
        result,
        Err(WizardError::Configuration { .. })
    ));
}

#[tokio::test]
async fn test_discard_deletes_persisted_draft() {
    let (mut wizard, store, _client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    let id = wizard.save_draft().await.unwrap();
    assert!(store.load(&id).is_some());

    wizard.discard().await.unwrap();
    assert!(store.load(&id).is_none());
    assert!(wizard.draft_id().is_none());
}

#[tokio::test]
async fn test_payload_requires_completed_configuration() {
    let draft = crate::models::ProjectDraft {
        project_name: "Named but empty".to_string(),
        project_address: "Somewhere".to_string(),
        project_type: "cleaning".to_string(),
        work_description: "Sweep".to_string(),
        ..Default::default()
    };
    // No schedule yet.
    assert!(ProjectPayload::from_draft(&draft).is_err());
}

#[tokio::test]
async fn test_payload_recurring_working_days() {
    let (mut wizard, _store, client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    wizard
        .next(StepForm::Schedule(ScheduleForm {
            schedule: Schedule::recurring(
                date(2024, 1, 1),
                date(2024, 1, 8),
                [Weekday::Monday, Weekday::Wednesday].into_iter().collect(),
            )
            .unwrap(),
            hours: None,
        }))
        .await
        .unwrap();
    wizard
        .next(StepForm::Payment(PaymentForm {
            payment: PaymentTerms::Daily { rate: 300.0 },
        }))
        .await
        .unwrap();
    wizard.next(crew_form()).await.unwrap();
    wizard.next(notify_form()).await.unwrap();

    let payload = &client.submissions()[0];
    assert_eq!(payload.time_nature, "recurring");
    assert_eq!(
        payload.working_days,
        vec![Weekday::Monday, Weekday::Wednesday]
    );
    assert!(payload.start_time.is_none());
}

#[tokio::test]
async fn test_completed_set_in_snapshot() {
    let (mut wizard, _store, _client) = test_wizard().await;
    wizard.next(basics_form()).await.unwrap();
    let snapshot = wizard.snapshot();
    assert_eq!(snapshot.current_step, WizardStep::Schedule);
    let expected: BTreeSet<WizardStep> = [WizardStep::Basics].into_iter().collect();
    assert_eq!(snapshot.completed_steps, expected);
}
