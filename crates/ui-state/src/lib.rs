//! Network-free state primitives for the classifieds client
//!
//! Everything in this crate is plain data plus the operations a UI performs on
//! it. Nothing here talks to the network or to a rendering toolkit, which keeps
//! the pagination, image-ordering and tag rules testable in isolation.

pub mod images;
pub mod modal;
pub mod pagination;
pub mod slider;
pub mod tags;
pub mod viewport;

pub use images::{Direction, ImageEntry, ImageList, ImageSource};
pub use modal::{Key, ModalState};
pub use pagination::{merge_unique, Identified, PageCursor, PageRequest, Paginated};
pub use slider::SliderState;
pub use tags::{TagError, TagSet, MAX_COMBINED_TAG_LENGTH};
pub use viewport::{Breakpoint, Viewport};
