//! Host platform detection and subprocess helpers.
//!
//! # Architecture
//!
//! This crate isolates the two ambient facilities the resolver depends on:
//! identifying the host operating system family and running one-shot
//! commands whose stdout carries the answer. Nothing here knows about
//! MongoDB or version managers.

pub use error::{Error, Result};

pub mod command;
mod error;
pub mod os;
pub mod path;
