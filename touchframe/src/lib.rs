//! A place notation interpreter for Change Ringing.  Place notation is expanded into [`Block`]s of
//! [`Row`]s, which a [`Method`] then rings as plain leads, plain courses or touches.
//!
//! ```
//! use touchframe::{Block, Method, Stage};
//!
//! let plain_bob = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")?
//!     .with_calls(0, "145", "123")?;
//! let mut block = Block::new(Stage::DOUBLES);
//! plain_bob.ring_touch(&mut block, "PPPB PPPB PPPB")?;
//! assert_eq!(block.len(), 120);
//! assert!(block.came_round());
//! # Ok::<(), touchframe::Error>(())
//! ```

#![deny(clippy::all)]

mod bell;
pub mod block;
pub mod call;
mod config;
mod error;
pub mod method;
mod parity;
pub mod place_not;
pub mod row;
mod stage;
mod utils;

// Re-export useful data types into the top level of the crate
pub use bell::Bell;
pub use block::Block;
pub use call::{CallType, LeadType, TouchError};
pub use config::{Config, NonTerminatingMethodError};
pub use error::{Error, Result};
pub use method::{Method, MethodDef};
pub use parity::Parity;
pub use place_not::{NotationError, PlaceNot, PnBlock};
pub use row::{CallMarker, FullRow, InvalidRowError, Row};
pub use stage::{split_method_title, InvalidStageError, SizeMismatchError, Stage};
