// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod api;
pub mod error;
pub mod handlers;
pub mod schemas;

pub use api::{app, AppState, API_PREFIX};
pub use error::ApiError;
