//! Error categorization and polling strategy.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::RequestErrorKind;

/// Creates the delay schedule for polling a slow-to-update resource.
///
/// Waits `interval` between attempts and gives up once the accumulated wait
/// would exceed `max_wait`. The first attempt is not delayed and is not part
/// of the schedule, so a zero `max_wait` means a single attempt.
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::Retry`.
pub fn polling_strategy(interval: Duration, max_wait: Duration) -> impl Iterator<Item = Duration> {
    let retries = max_wait
        .as_nanos()
        .checked_div(interval.as_nanos())
        .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
    FixedInterval::new(interval).take(retries)
}

/// Categorizes a `reqwest::Error` into a [`RequestErrorKind`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> RequestErrorKind {
    if error.is_builder() {
        RequestErrorKind::Builder
    } else if error.is_redirect() {
        RequestErrorKind::Redirect
    } else if error.is_status() {
        RequestErrorKind::Status
    } else if error.is_timeout() {
        RequestErrorKind::Timeout
    } else if error.is_connect() {
        RequestErrorKind::Connect
    } else if error.is_request() {
        RequestErrorKind::Request
    } else if error.is_body() {
        RequestErrorKind::Body
    } else if error.is_decode() {
        RequestErrorKind::Decode
    } else {
        RequestErrorKind::Other
    }
}
