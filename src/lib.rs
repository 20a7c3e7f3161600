//! Wellspring - Wellbeing Journaling Decision Pipeline
//!
//! This crate turns raw wellbeing entries into urgency classifications,
//! personalized content recommendations, and conflict-safe multi-device
//! synchronization. Transport, auth, and UI live outside this crate; the
//! application handlers are the exposed seam.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
