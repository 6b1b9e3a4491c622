// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Academium Catalog Core
//!
//! Academic catalog backend: subjects, programs, academic periods,
//! curriculum entries and course offerings.
//!
//! # Architecture
//!
//! - **domain**: entities, the period lifecycle, repository ports, errors, configuration
//! - **application**: one use-case service per entity
//! - **infrastructure**: PostgreSQL pool and migrations, repository adapters
//! - **presentation**: axum HTTP surface under `/api/Academium`

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::error::{CatalogError, FieldIssue};
