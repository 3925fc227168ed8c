use super::common::*;
use crate::training::curriculum::{FIRST_SORT, SECOND_SORT};
use crate::training::{
    Curriculum, LevelRating, ScoreKey, SessionId, SkillCategory, TrainingError, TrainingSession,
};

fn complete_sort(session: &mut TrainingSession, exercise: &str) {
    for (item, quadrant) in answers_for(exercise) {
        session
            .attempt_placement(exercise, item, quadrant.key())
            .expect("placement");
    }
}

fn decide(session: &mut TrainingSession, decision: &str, option: &str) -> i32 {
    session.select(decision, option).expect("select");
    session.accept(decision).expect("accept").score
}

#[test]
fn perfect_playthrough_reaches_master_rating() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    complete_sort(&mut session, FIRST_SORT);
    complete_sort(&mut session, SECOND_SORT);
    for (decision, option) in [
        ("advisor_round_1", "stacy"),
        ("advisor_round_2", "andrew"),
        ("advisor_round_3", "smith"),
        ("advisor_round_4", "stacy"),
        ("advisor_round_5", "stacy"),
        ("advisor_round_6", "stacy"),
    ] {
        decide(&mut session, decision, option);
    }

    assert!(session.is_finished());
    let report = session.report();
    assert_eq!(report.total_score, 600);
    assert_eq!(report.total_grade_percent, 100.0);
    assert_eq!(report.level_rating, LevelRating::MasterTechnician);
}

#[test]
fn second_sort_completes_in_thirty_seconds() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    assert!(!session.tick(SECOND_SORT, 12.0).expect("tick"));
    complete_sort(&mut session, SECOND_SORT);

    let exercise = session.exercise(SECOND_SORT).expect("exercise");
    assert!(exercise.is_terminated());
    assert_eq!(exercise.score(), 40);
    assert_eq!(session.registry().read(&ScoreKey::from(SECOND_SORT)), 40);
}

#[test]
fn feedback_panel_adds_the_linked_sort() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    complete_sort(&mut session, FIRST_SORT);

    session.select("advisor_round_1", "stacy").expect("select");
    let accepted = session.accept("advisor_round_1").expect("accept");

    assert_eq!(accepted.score, 60);
    assert_eq!(accepted.feedback_total, 100);
    assert_eq!(accepted.feedback_max, Some(100));
    assert_eq!(
        session.registry().read(&ScoreKey::from("advisor_round_1")),
        60
    );
}

#[test]
fn undecided_rounds_have_no_feedback_max() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    session.select("advisor_round_4", "zara").expect("select");
    let accepted = session.accept("advisor_round_4").expect("accept");
    assert_eq!(accepted.feedback_total, 50);
    assert_eq!(accepted.feedback_max, None);
}

#[test]
fn abandon_resets_every_instance_and_the_registry() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    complete_sort(&mut session, FIRST_SORT);
    session.tick(SECOND_SORT, 45.0).expect("tick");
    decide(&mut session, "advisor_round_3", "smith");
    decide(&mut session, "advisor_round_5", "stacy");
    session.select("advisor_round_6", "zara").expect("select");

    session.abandon().expect("abandon");

    assert!(session.registry().is_empty());
    let report = session.report();
    assert_eq!(report.total_score, 0);
    assert!(report.categories.iter().all(|result| result.score == 0));
    assert!(session
        .exercises()
        .iter()
        .all(|exercise| !exercise.is_terminated() && exercise.score() == 0));
    assert!(session
        .decisions()
        .iter()
        .all(|decision| !decision.is_accepted() && decision.selected().is_none()));

    let second = session.exercise(SECOND_SORT).expect("exercise");
    assert_eq!(second.remaining_seconds(), second.time_budget_seconds());

    decide(&mut session, "advisor_round_3", "zara");
    let teamwork = session.report();
    let teamwork = teamwork
        .category(SkillCategory::Teamwork)
        .expect("teamwork");
    assert_eq!(teamwork.score, 50);
}

#[test]
fn sessions_do_not_share_scores() {
    let mut first = TrainingSession::new(Curriculum::standard()).expect("session");
    let second = TrainingSession::new(Curriculum::standard()).expect("session");

    complete_sort(&mut first, FIRST_SORT);

    assert_eq!(first.report().total_score, 40);
    assert_eq!(second.report().total_score, 0);
}

#[test]
fn unknown_targets_are_not_found() {
    let mut session = TrainingSession::new(Curriculum::standard()).expect("session");
    assert!(matches!(
        session.attempt_placement("priority_sort_9", "task_card_1", "urgent_important"),
        Err(TrainingError::NotFound {
            kind: "exercise",
            ..
        })
    ));
    assert!(matches!(
        session.accept("advisor_round_7"),
        Err(TrainingError::NotFound {
            kind: "decision",
            ..
        })
    ));
}

#[test]
fn curriculum_with_shared_keys_is_rejected() {
    let curriculum = Curriculum::new(
        vec![
            sort_config(30.0, Default::default()),
            sort_config(60.0, Default::default()),
        ],
        Vec::new(),
        Curriculum::standard().report().clone(),
    );
    assert!(matches!(
        TrainingSession::new(curriculum),
        Err(TrainingError::Configuration(_))
    ));
}

#[test]
fn service_reset_keeps_the_session_id() {
    let (service, repository) = build_service();
    let record = service.start().expect("start");
    service
        .place(&record.id, FIRST_SORT, "task_card_1", "urgent_important")
        .expect("place");

    let view = service.reset(&record.id).expect("reset");

    assert_eq!(view.session_id, record.id);
    assert_eq!(service.report(&record.id).expect("report").total_score, 0);
    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&record.id)
        .map(|record| record.session.registry().is_empty());
    assert_eq!(stored, Some(true));
}

#[test]
fn service_reports_missing_sessions() {
    let (service, _) = build_service();
    let missing = SessionId("session-missing".to_string());
    assert!(service.report(&missing).is_err());
    assert!(service.tick(&missing, FIRST_SORT, 1.0).is_err());
}
