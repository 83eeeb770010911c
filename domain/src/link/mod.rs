//! Latent link domain: hidden connections between topics of different categories.

pub mod entities;
