//! BDD step definitions for status translation feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use review_watcher::status::parse_status;
use review_watcher::WatcherError;

use crate::world::WatcherWorld;

#[given(expr = "a homework named {string} with status {string}")]
fn a_homework(world: &mut WatcherWorld, name: String, status: String) {
    world.homework = Some(serde_json::json!({
        "id": 1,
        "homework_name": name,
        "status": status,
    }));
}

#[when("the status is translated")]
fn translate(world: &mut WatcherWorld) {
    let homework = world.homework.as_ref().expect("homework not set");
    world.translation_result = Some(parse_status(homework));
}

#[then("the message should be:")]
fn message_is(world: &mut WatcherWorld, step: &Step) {
    let expected = step.docstring.as_ref().expect("message docstring missing");
    let result = world.translation_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), expected.trim());
}

#[then(expr = "translation should fail with unknown status {string}")]
fn translation_fails(world: &mut WatcherWorld, code: String) {
    let result = world.translation_result.as_ref().expect("no result");
    match result {
        Err(WatcherError::UnknownStatus(got)) => assert_eq!(got, &code),
        other => panic!("expected UnknownStatus, got {other:?}"),
    }
}
