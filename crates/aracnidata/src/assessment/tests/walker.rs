use crate::assessment::domain::{AnswerError, AnswerSheet, QuizAnswers, QuizField};
use crate::assessment::questionnaire::Questionnaire;
use crate::assessment::walker::QuestionnaireWalker;

fn answer_everything(walker: &mut QuestionnaireWalker) {
    walker.record_answer(QuizField::DataType, "sensitive").unwrap();
    walker.record_answer(QuizField::Encryption, "none").unwrap();
    walker.record_answer(QuizField::Policies, "outdated").unwrap();
    walker.record_answer(QuizField::TwoFactor, "none").unwrap();
    walker.record_answer(QuizField::Audits, "none").unwrap();
    walker.record_answer(QuizField::IncidentPlan, "basic").unwrap();
}

#[test]
fn standard_questionnaire_has_six_ordered_questions() {
    let questionnaire = Questionnaire::standard();

    assert_eq!(questionnaire.len(), 6);
    for (index, question) in questionnaire.questions().iter().enumerate() {
        assert_eq!(question.id, index + 1);
        assert_eq!(question.field, QuizField::ordered()[index]);
        assert_eq!(question.max_points(), 3);
        assert!(question.option("none").is_some());
    }
    assert_eq!(questionnaire.questions()[0].options.len(), 4);
    assert_eq!(
        questionnaire
            .for_field(QuizField::TwoFactor)
            .map(|question| question.title),
        Some("Autenticación 2FA")
    );
}

#[test]
fn step_pointer_stays_within_bounds() {
    let mut walker = QuestionnaireWalker::standard();
    assert_eq!(walker.current_step(), 1);
    assert!(!walker.retreat());
    assert_eq!(walker.current_step(), 1);

    for expected in 2..=6 {
        assert!(walker.advance());
        assert_eq!(walker.current_step(), expected);
    }
    assert!(walker.is_last_step());
    assert!(!walker.advance());
    assert_eq!(walker.current_step(), 6);

    assert!(walker.retreat());
    assert_eq!(walker.current_step(), 5);
    assert_eq!(walker.active_question().field, QuizField::Audits);
}

#[test]
fn progress_percent_rounds_step_ratio() {
    let mut walker = QuestionnaireWalker::standard();
    assert_eq!(walker.progress_percent(), 17);
    walker.advance();
    assert_eq!(walker.progress_percent(), 33);
    while walker.advance() {}
    assert_eq!(walker.progress_percent(), 100);
}

#[test]
fn recording_overwrites_only_the_target_field() {
    let mut walker = QuestionnaireWalker::standard();
    walker.record_answer(QuizField::Encryption, "basic").unwrap();
    walker.record_answer(QuizField::Encryption, "advanced").unwrap();

    assert_eq!(walker.answers().selected(QuizField::Encryption), Some("advanced"));
    assert_eq!(walker.answers().selected(QuizField::DataType), None);
    assert!(walker.is_step_complete(2));
    assert!(!walker.is_step_complete(1));
    assert!(!walker.can_proceed());
}

#[test]
fn unknown_values_are_rejected() {
    let mut walker = QuestionnaireWalker::standard();

    let error = walker
        .record_answer(QuizField::Audits, "weekly")
        .expect_err("weekly is not an audit option");
    assert_eq!(
        error,
        AnswerError::UnknownOption {
            field: QuizField::Audits,
            value: "weekly".to_string(),
        }
    );
    assert!(walker
        .record_answer(QuizField::TwoFactor, "comprehensive")
        .is_err());
    assert!(!walker.is_step_complete(5));
}

#[test]
fn step_completion_outside_range_is_false() {
    let mut walker = QuestionnaireWalker::standard();
    answer_everything(&mut walker);

    assert!(!walker.is_step_complete(0));
    assert!(!walker.is_step_complete(7));
    assert!((1..=6).all(|step| walker.is_step_complete(step)));
}

#[test]
fn finalize_requires_every_field() {
    let mut walker = QuestionnaireWalker::standard();
    walker.record_answer(QuizField::DataType, "basic").unwrap();

    match walker.finalize() {
        Err(AnswerError::Incomplete { missing }) => {
            assert_eq!(missing.len(), 5);
            assert_eq!(missing[0], QuizField::Encryption);
        }
        other => panic!("expected incomplete answers, got {other:?}"),
    }
    assert!(!walker.all_complete());

    answer_everything(&mut walker);
    assert!(walker.all_complete());
    let answers = walker.finalize().expect("complete answers");
    assert_eq!(answers, super::common::weak_answers());
}

#[test]
fn summary_joins_labels_in_question_order() {
    let summary = super::common::weak_answers().summary();

    assert_eq!(
        summary,
        "Datos sensibles (financieros, médicos); No tengo encriptación implementada; \
         Sí, pero necesitan actualización; No implemento 2FA; No realizo auditorías; \
         Sí, plan básico"
    );
}

#[test]
fn slot_round_trip_uses_front_end_keys() {
    let answers = super::common::weak_answers();
    let raw = answers.to_slot();

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["dataType"], "sensitive");
    assert_eq!(value["twoFA"], "none");
    assert_eq!(value["incidentPlan"], "basic");
    assert_eq!(QuizAnswers::from_slot(Some(raw.as_str())), Some(answers));
}

#[test]
fn malformed_or_missing_slot_means_no_answers() {
    assert_eq!(QuizAnswers::from_slot(None), None);
    assert_eq!(QuizAnswers::from_slot(Some("   ")), None);
    assert_eq!(QuizAnswers::from_slot(Some("{\"dataType\":\"basic\"}")), None);
    assert_eq!(
        QuizAnswers::from_slot(Some(
            r#"{"dataType":"alien","encryption":"none","policies":"none","twoFA":"none","audits":"none","incidentPlan":"none"}"#
        )),
        None
    );
}

#[test]
fn answer_sheet_accepts_partial_json() {
    let sheet: AnswerSheet = serde_json::from_str(r#"{"encryption":"advanced"}"#).unwrap();
    assert_eq!(sheet.missing().len(), 5);
    assert!(sheet.is_answered(QuizField::Encryption));
}
