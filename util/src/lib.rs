//! Shared utilities for the essay grader workspace.

pub mod config;
