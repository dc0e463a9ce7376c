//! # Core Application Logic
//!
//! This module contains Commenter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • QueryCache (posts)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    API     │
//!             │  Adapter   │          │  (tRPC     │
//!             │ (ratatui)  │          │   client)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`cache`]: Client-side post list cache with cancel / patch / invalidate
//! - [`comment`]: Draft validation and the optimistic comment
//! - [`session`]: Tri-state session status
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod cache;
pub mod comment;
pub mod config;
pub mod session;
pub mod state;
