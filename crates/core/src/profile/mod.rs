//! Profile module - identity, career profile and soft authentication.

mod profile_model;

pub use profile_model::{parse_tag_list, UserProfile};
