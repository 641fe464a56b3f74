//! # krise-worker
//!
//! Cron-driven background tasks. Currently one job: the daily scan that
//! warns households about storage items approaching their expiry date.

pub mod scheduler;

pub use scheduler::WorkerScheduler;
