#![allow(dead_code)]

// tests/common/mod.rs
pub mod proptest_prelude;

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Validate a Problem Details error response: status, content type,
/// `code`, `detail` substring and `trace_id` parity with `x-trace-id`.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) {
    let status = StatusCode::from_u16(expected_status).expect("valid status code");
    backend_test_support::problem_details::assert_problem_details_from_service_response(
        resp,
        expected_code,
        status,
        Some(expected_detail),
    )
    .await;
}
