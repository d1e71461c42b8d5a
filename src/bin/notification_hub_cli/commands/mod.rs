// ABOUTME: Command modules for notification-hub-cli
// ABOUTME: Direct database generation and HTTP seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod fake;
pub mod seed;
