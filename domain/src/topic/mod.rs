//! Topic domain: the immutable "knowledge capsules" a salon discusses.
//!
//! - [`entities::Topic`]: a discussable unit of content with a category tag
//! - [`entities::TopicId`]: identity of a Topic

pub mod entities;
