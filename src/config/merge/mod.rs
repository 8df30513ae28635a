//! Merge layer: combines sources into an [`InotreeConfig`](super::InotreeConfig).

pub mod service;
