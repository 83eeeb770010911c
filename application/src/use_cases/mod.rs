//! Application use cases

pub mod detect_emergence;
pub mod discover_topics;
pub mod fuse_topics;
pub mod run_salon;
pub mod salon_host;
pub mod scan_latent_links;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod testing;
