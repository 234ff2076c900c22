use crate::config::Config;
use crate::device_input::interface::{InputEvent, PickedFile};
use crate::image_classifier::interface::ClassifyError;
use crate::infra_check::core::{
    init, transition, Effect, Event, Model, ModelNotice, ModelSession,
};
use crate::infra_check::tests::fixture::Fixture;
use crate::upload::UploadCandidate;
use std::time::{Duration, Instant};

fn picked(name: &str) -> PickedFile {
    PickedFile {
        name: name.to_string(),
        bytes: vec![1, 2, 3],
    }
}

fn candidate(name: &str) -> UploadCandidate {
    UploadCandidate {
        file_name: name.to_string(),
        bytes: vec![1, 2, 3],
        size_bytes: 3,
        preview_data_uri: None,
    }
}

fn previewing(name: &str) -> Model {
    Model {
        session: ModelSession::Previewing {
            candidate: candidate(name),
        },
        ..Model::default()
    }
}

fn submitting(name: &str) -> Model {
    Model {
        session: ModelSession::Submitting {
            candidate: candidate(name),
        },
        ..Model::default()
    }
}

#[test]
fn init_is_idle_with_subscriptions() {
    let (model, effects) = init();

    assert_eq!(model.session, ModelSession::Idle);
    assert_eq!(model.notice, ModelNotice::Hidden);
    assert!(!model.drop_hint);
    assert_eq!(effects, vec![Effect::SubscribeInput, Effect::SubscribeTick]);
}

#[test]
fn choosing_a_valid_file_starts_previewing() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::FilesPicked(vec![picked("site.png")])),
    );

    assert_eq!(
        model.session,
        ModelSession::Previewing {
            candidate: candidate("site.png")
        }
    );
    assert_eq!(
        effects,
        vec![Effect::EncodePreview {
            file: picked("site.png")
        }]
    );
}

#[test]
fn only_the_first_file_of_a_gesture_counts() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::FilesDropped(vec![
            picked("first.png"),
            picked("second.png"),
        ])),
    );

    assert_eq!(
        model.session,
        ModelSession::Previewing {
            candidate: candidate("first.png")
        }
    );
}

#[test]
fn oversized_file_leaves_the_session_unchanged_and_notifies() {
    let config = Config {
        max_upload_bytes: 2,
        ..Config::default()
    };
    let before = previewing("kept.png");

    let (model, effects) = transition(
        &config,
        before.clone(),
        Event::Input(InputEvent::FilesPicked(vec![picked("huge.png")])),
    );

    assert_eq!(model.session, before.session);
    assert!(effects.is_empty());
    match model.notice {
        ModelNotice::Showing { message, .. } => {
            assert_eq!(message, "File size exceeds 5MB limit");
        }
        ModelNotice::Hidden => panic!("expected a notification"),
    }
}

#[test]
fn empty_gesture_is_ignored() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::FilesPicked(vec![])),
    );

    assert_eq!(model, Model::default());
    assert!(effects.is_empty());
}

#[test]
fn new_selection_replaces_the_candidate_wholesale() {
    let config = Config::default();
    let mut before = previewing("old.png");
    if let ModelSession::Previewing { candidate } = &mut before.session {
        candidate.preview_data_uri = Some("data:image/png;base64,AQID".to_string());
    }

    let (model, effects) = transition(
        &config,
        before,
        Event::Input(InputEvent::FilesPicked(vec![picked("new.png")])),
    );

    assert_eq!(
        model.session,
        ModelSession::Previewing {
            candidate: candidate("new.png")
        }
    );
    assert_eq!(
        effects,
        vec![Effect::EncodePreview {
            file: picked("new.png")
        }]
    );
}

#[test]
fn selection_while_submitting_is_ignored() {
    let config = Config::default();
    let before = submitting("inflight.png");

    let (model, effects) = transition(
        &config,
        before.clone(),
        Event::Input(InputEvent::FilesPicked(vec![picked("late.png")])),
    );

    assert_eq!(model, before);
    assert!(effects.is_empty());
}

#[test]
fn preview_encode_attaches_to_the_matching_candidate() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        previewing("site.png"),
        Event::PreviewEncodeDone {
            file_name: "site.png".to_string(),
            data_uri: "data:image/png;base64,AQID".to_string(),
        },
    );

    assert_eq!(
        model.candidate().unwrap().preview_data_uri,
        Some("data:image/png;base64,AQID".to_string())
    );
    assert!(effects.is_empty());
}

#[test]
fn stale_preview_encode_is_dropped() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        previewing("current.png"),
        Event::PreviewEncodeDone {
            file_name: "replaced.png".to_string(),
            data_uri: "data:image/png;base64,AQID".to_string(),
        },
    );

    assert_eq!(model.candidate().unwrap().preview_data_uri, None);
}

#[test]
fn submit_from_previewing_starts_submitting() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        previewing("site.png"),
        Event::Input(InputEvent::SubmitPressed),
    );

    assert_eq!(
        model.session,
        ModelSession::Submitting {
            candidate: candidate("site.png")
        }
    );
    assert_eq!(
        effects,
        vec![Effect::Classify {
            candidate: candidate("site.png")
        }]
    );
}

#[test]
fn submit_while_submitting_is_a_no_op() {
    let config = Config::default();
    let before = submitting("site.png");

    let (model, effects) = transition(
        &config,
        before.clone(),
        Event::Input(InputEvent::SubmitPressed),
    );

    assert_eq!(model, before);
    assert!(effects.is_empty(), "a duplicate request was issued");
}

#[test]
fn submit_in_idle_is_a_no_op() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::SubmitPressed),
    );

    assert_eq!(model, Model::default());
    assert!(effects.is_empty());
}

#[test]
fn successful_classification_shows_the_result() {
    let config = Config::default();
    let report = Fixture::reference_report();

    let (model, effects) = transition(
        &config,
        submitting("site.png"),
        Event::ClassifyDone(Ok(report.clone())),
    );

    assert_eq!(
        model.session,
        ModelSession::ShowingResult {
            candidate: candidate("site.png"),
            report,
        }
    );
    assert!(effects.is_empty());
}

#[test]
fn service_error_shows_its_exact_message() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        submitting("site.png"),
        Event::ClassifyDone(Err(ClassifyError::Service {
            message: "unsupported format".to_string(),
        })),
    );

    match &model.session {
        ModelSession::ShowingError { message, .. } => assert_eq!(message, "unsupported format"),
        session => panic!("unexpected session: {:?}", session),
    }
    match &model.notice {
        ModelNotice::Showing { message, .. } => assert_eq!(message, "unsupported format"),
        ModelNotice::Hidden => panic!("expected a notification"),
    }
}

#[test]
fn network_failure_message_comes_from_the_transport() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        submitting("site.png"),
        Event::ClassifyDone(Err(ClassifyError::Network {
            message: "connection refused".to_string(),
        })),
    );

    match &model.session {
        ModelSession::ShowingError { message, .. } => assert_eq!(message, "connection refused"),
        session => panic!("unexpected session: {:?}", session),
    }
}

#[test]
fn malformed_response_fails_closed_into_the_error_state() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        submitting("site.png"),
        Event::ClassifyDone(Err(ClassifyError::MalformedResponse {
            reason: "`specific_class` 7 is outside the 4-class label table".to_string(),
        })),
    );

    match &model.session {
        ModelSession::ShowingError { message, .. } => {
            assert!(message.starts_with("malformed classifier response"));
        }
        session => panic!("unexpected session: {:?}", session),
    }
}

#[test]
fn remove_returns_fully_to_idle() {
    let config = Config::default();

    for before in [previewing("site.png"), submitting("site.png")] {
        let (model, effects) =
            transition(&config, before, Event::Input(InputEvent::RemovePressed));

        assert_eq!(model.session, ModelSession::Idle);
        assert_eq!(effects, vec![Effect::ClearFileInput]);
    }
}

#[test]
fn remove_in_idle_is_a_no_op() {
    let config = Config::default();

    let (model, effects) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::RemovePressed),
    );

    assert_eq!(model, Model::default());
    assert!(effects.is_empty());
}

#[test]
fn late_response_after_removal_is_dropped() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        submitting("site.png"),
        Event::Input(InputEvent::RemovePressed),
    );
    assert_eq!(model.session, ModelSession::Idle);

    let (model, effects) = transition(
        &config,
        model,
        Event::ClassifyDone(Ok(Fixture::reference_report())),
    );

    assert_eq!(model.session, ModelSession::Idle);
    assert!(effects.is_empty());
}

#[test]
fn resubmit_is_allowed_after_a_result_or_an_error() {
    let config = Config::default();
    let after_result = Model {
        session: ModelSession::ShowingResult {
            candidate: candidate("site.png"),
            report: Fixture::reference_report(),
        },
        ..Model::default()
    };
    let after_error = Model {
        session: ModelSession::ShowingError {
            candidate: candidate("site.png"),
            message: "unsupported format".to_string(),
        },
        ..Model::default()
    };

    for before in [after_result, after_error] {
        let (model, effects) =
            transition(&config, before, Event::Input(InputEvent::SubmitPressed));

        assert_eq!(
            model.session,
            ModelSession::Submitting {
                candidate: candidate("site.png")
            }
        );
        assert_eq!(
            effects,
            vec![Effect::Classify {
                candidate: candidate("site.png")
            }]
        );
    }
}

#[test]
fn a_new_selection_recovers_from_result_and_error_states() {
    let config = Config::default();
    let after_error = Model {
        session: ModelSession::ShowingError {
            candidate: candidate("old.png"),
            message: "unsupported format".to_string(),
        },
        ..Model::default()
    };

    let (model, _) = transition(
        &config,
        after_error,
        Event::Input(InputEvent::FilesDropped(vec![picked("retry.png")])),
    );

    assert_eq!(
        model.session,
        ModelSession::Previewing {
            candidate: candidate("retry.png")
        }
    );
}

#[test]
fn notice_expires_after_the_timeout() {
    let config = Config::default();
    let shown_at = Instant::now();
    let noticed = Model {
        notice: ModelNotice::Showing {
            message: "File size exceeds 5MB limit".to_string(),
            shown_at,
        },
        ..Model::default()
    };

    let (still_showing, _) = transition(
        &config,
        noticed.clone(),
        Event::Tick(shown_at + config.notice_timeout - Duration::from_millis(1)),
    );
    assert!(matches!(still_showing.notice, ModelNotice::Showing { .. }));

    let (cleared, effects) = transition(
        &config,
        noticed,
        Event::Tick(shown_at + config.notice_timeout + Duration::from_millis(1)),
    );
    assert_eq!(cleared.notice, ModelNotice::Hidden);
    assert!(effects.is_empty());
}

#[test]
fn drag_toggles_the_drop_hint_and_drop_clears_it() {
    let config = Config::default();

    let (model, _) = transition(
        &config,
        Model::default(),
        Event::Input(InputEvent::DragEnter),
    );
    assert!(model.drop_hint);

    let (model, _) = transition(&config, model, Event::Input(InputEvent::DragLeave));
    assert!(!model.drop_hint);

    let (model, _) = transition(
        &config,
        Model {
            drop_hint: true,
            ..Model::default()
        },
        Event::Input(InputEvent::FilesDropped(vec![picked("site.png")])),
    );
    assert!(!model.drop_hint);
}
