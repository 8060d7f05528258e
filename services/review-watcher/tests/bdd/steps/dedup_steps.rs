//! BDD step definitions for duplicate suppression feature

use cucumber::{given, then, when};

use review_watcher::dedup::ChangeFilter;

use crate::world::WatcherWorld;

fn filter(world: &mut WatcherWorld) -> &mut ChangeFilter {
    world.filter.as_mut().expect("change filter not set")
}

fn error_text(count: usize, ch: &str, tail: &str) -> String {
    format!("{}{}", ch.repeat(count), tail)
}

#[given("a change filter")]
fn a_change_filter(world: &mut WatcherWorld) {
    world.filter = Some(ChangeFilter::new(100));
}

#[when(expr = "the notification {string} is delivered")]
fn notification_delivered(world: &mut WatcherWorld, text: String) {
    let filter = filter(world);
    assert!(filter.is_new_notification(&text));
    filter.record_notification(&text);
}

#[then(expr = "the notification {string} should be new")]
fn notification_is_new(world: &mut WatcherWorld, text: String) {
    assert!(filter(world).is_new_notification(&text));
}

#[then(expr = "the notification {string} should not be new")]
fn notification_is_not_new(world: &mut WatcherWorld, text: String) {
    assert!(!filter(world).is_new_notification(&text));
}

#[when(expr = "an error of {int} {string} characters followed by {string} is delivered")]
fn error_delivered(world: &mut WatcherWorld, count: usize, ch: String, tail: String) {
    let text = error_text(count, &ch, &tail);
    let filter = filter(world);
    assert!(filter.is_new_error(&text));
    filter.record_error(&text);
}

#[then(expr = "an error of {int} {string} characters followed by {string} should be new")]
fn error_is_new(world: &mut WatcherWorld, count: usize, ch: String, tail: String) {
    assert!(filter(world).is_new_error(&error_text(count, &ch, &tail)));
}

#[then(expr = "an error of {int} {string} characters followed by {string} should not be new")]
fn error_is_not_new(world: &mut WatcherWorld, count: usize, ch: String, tail: String) {
    assert!(!filter(world).is_new_error(&error_text(count, &ch, &tail)));
}
