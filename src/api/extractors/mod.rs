//! Custom request extractors.

mod validated_parts;
mod validated_payload;

pub use validated_parts::{ValidatedPath, ValidatedQuery};
pub use validated_payload::ValidatedPayload;
