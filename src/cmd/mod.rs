// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), resolve, tracker (update, show), push
//! ```

pub mod config;
pub mod push;
pub mod resolve;
pub mod tracker;
