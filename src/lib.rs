// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive client.
//
// Module responsibilities:
// - `models`: Request/response data contracts for the lab API, plus the
//   date-only serde encoding they share.
// - `api`: Encapsulates the HTTP interactions (file upload, demographic
//   post, report generation) and the error taxonomy.
// - `ui`: Implements the terminal command loop and delegates to `api`.
//
// Keeping this separation makes the data contracts and API logic
// testable without a terminal attached.
pub mod api;
pub mod models;
pub mod ui;
