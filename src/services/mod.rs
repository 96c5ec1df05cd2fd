/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Spreadsheet import parsing for bulk team registration.
pub mod import_service;
/// Completion notification webhook delivery.
pub mod notification_service;
/// Round progression checks and the forced-advance path.
pub mod progression_service;
/// Quiz and team directory operations.
pub mod quiz_service;
/// Score ledger operations.
pub mod score_service;
/// Pure standings and results aggregation.
pub mod standings;
/// Storage connection supervisor with reconnect backoff.
pub mod storage_supervisor;
