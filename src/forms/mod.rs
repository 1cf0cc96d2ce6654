//! Form state for classified creation and the profile page

mod channel;
mod fields;
mod profile;

pub use channel::*;
pub use fields::*;
pub use profile::*;
