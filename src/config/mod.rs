// ABOUTME: Configuration module for the insights engine
// ABOUTME: Re-exports the environment-backed EngineConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

/// Environment-based engine configuration
pub mod environment;

pub use environment::EngineConfig;
