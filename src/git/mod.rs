// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module, used by `ipkeep push`.
//!
//! ```text
//!        Public API
//!   query.rs  cmd.rs  ops.rs  profile.rs
//!        \      |      /
//!         v     v     v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .init/.config
//!    .branch     .add/.commit
//!                .status/.push
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for every write, so credential helpers apply.

pub mod backend;
pub mod cmd;
pub mod ops;
pub mod profile;
pub mod query;
