//! Request extractors that reject with the API's own error bodies.

mod payload;
mod record_id;

pub use payload::Payload;
pub use record_id::RecordId;
