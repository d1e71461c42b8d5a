// ABOUTME: Helper modules for notification-hub-cli
// ABOUTME: Fake data generation and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod fake_data;
