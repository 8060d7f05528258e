//! BDD step definitions for response validation feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use review_watcher::payload::check_response;

use crate::world::{error_kind, WatcherWorld};

#[given("a response:")]
fn a_response(world: &mut WatcherWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("response docstring missing");
    world.response = Some(serde_json::from_str(body).expect("response is not JSON"));
}

#[when("the response is validated")]
fn validate(world: &mut WatcherWorld) {
    let response = world.response.as_ref().expect("response not set");
    world.validation_result = Some(
        check_response(response).map(|snapshot| (snapshot.current_date, snapshot.homeworks.len())),
    );
}

#[then(expr = "validation should succeed with {int} homeworks and current date {int}")]
fn validation_succeeds(world: &mut WatcherWorld, homeworks: usize, current_date: i64) {
    let result = world.validation_result.as_ref().expect("no result");
    let (date, count) = result.as_ref().unwrap();
    assert_eq!(*count, homeworks);
    assert_eq!(*date, current_date);
}

#[then(expr = "validation should fail with {string}")]
fn validation_fails(world: &mut WatcherWorld, kind: String) {
    let result = world.validation_result.as_ref().expect("no result");
    match result {
        Err(e) => assert_eq!(error_kind(e), kind, "{e}"),
        Ok(v) => panic!("expected {kind}, got {v:?}"),
    }
}
