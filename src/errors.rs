// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: Gives binaries and routes a crate-local path to AppError and AppResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error codes, `AppError`, and the JSON error body live in
//! `notification-hub-core` so every crate in the workspace shares them.

pub use notification_hub_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
