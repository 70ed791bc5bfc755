// Job records: creation of pending export jobs and status polling.
// Status transitions are owned by the export worker, not this service.

pub mod handlers;
pub mod service;
pub mod store;
