pub mod engine;
pub mod filter;
pub mod state;

pub use engine::{GalleryEngine, ReloadReason};
pub use filter::{DateFilter, GalleryItem, SortOrder};
pub use state::{DeleteModal, DeleteRequest, GalleryEvent, GalleryState, LoadTicket, Outcome, ViewState};
