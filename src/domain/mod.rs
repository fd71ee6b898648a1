//! Domain layer: event records, interest projections, and pagination.

pub mod event;
pub mod page;

pub use event::{Event, EventDraft, EventDraftInput, EventId, EventPatch, EventPatchInput, EventView};
pub use page::{PageDescriptor, PageQuery, PageWindow};
