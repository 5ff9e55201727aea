//! UI-facing bindings for the Soul Pixel core.

pub mod api;
