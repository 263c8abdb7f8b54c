//! A three-column task board.
//!
//! [`store::TaskStore`] owns the tasks and the edit session,
//! [`presenter::BoardPresenter`] keeps a [`board::RenderTarget`] and a
//! [`dialog::Dialog`] in step with it, and [`ui`] provides terminal versions
//! of both.

pub mod board;
pub mod config;
pub mod dialog;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod seed;
pub mod store;
pub mod task;
pub mod ui;
