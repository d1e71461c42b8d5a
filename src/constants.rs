// ABOUTME: System-wide constants re-exported from the core crate
// ABOUTME: Network defaults, storage defaults, broadcast triggers, and SSE wire names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use notification_hub_core::constants::*;
