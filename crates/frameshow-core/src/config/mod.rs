//! Configuration management for Frameshow.
//!
//! Client configuration ([`settings::Config`]) is stored as TOML and loaded
//! at startup; [`slideshow::SlideshowSettings`] is what the panel edits and
//! saves to the server.

pub mod settings;
pub mod slideshow;
