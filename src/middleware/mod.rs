// ABOUTME: HTTP middleware applied to every notification hub route
// ABOUTME: Provides the cross-origin layer used by the server router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cross-origin resource sharing
pub mod cors;

pub use cors::setup_cors;
