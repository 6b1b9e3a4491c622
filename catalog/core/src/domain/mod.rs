// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Catalog domain layer
//!
//! Entities, value objects and repository ports. No I/O lives here.

pub mod config;
pub mod curriculum;
pub mod error;
pub mod offering;
pub mod period;
pub mod program;
pub mod repository;
pub mod subject;
