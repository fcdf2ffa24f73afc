//! Clock core for the Clockwall multi-clock page.
//!
//! Everything here runs on one thread. Clocks are shared as
//! `Rc<RefCell<Clock>>` between their collection, the heartbeat and
//! renderers, and the heartbeat runs on a tokio `LocalSet`.
//!
//! # Modules
//!
//! - [`observable`] -- Observer registry with synchronous, ordered notify
//! - [`clock`] -- Per-clock state machine (tick, edit, light, format, zone)
//! - [`heartbeat`] -- One-second broadcast timer aligned to second boundaries
//! - [`collection`] -- Ordered clock set with bulk actions and reordering
//! - [`reorder`] -- Swap-style drag-and-drop placement
//! - [`transform`] -- 3x3 affine matrices and hand transforms
//! - [`dial`] -- Hand angles, tick marks and hour labels for analog faces
//! - [`display`] -- Padded text readout for digital faces
//! - [`config`] -- YAML configuration with environment overrides
//! - [`time_source`] -- Wall-clock seam with system and manual sources

pub mod clock;
pub mod collection;
pub mod config;
pub mod dial;
pub mod display;
pub mod heartbeat;
pub mod observable;
pub mod reorder;
pub mod time_source;
pub mod transform;

pub use clock::{Clock, SharedClock};
pub use collection::ClockCollection;
pub use config::{ClockwallConfig, ConfigError};
pub use heartbeat::{Heartbeat, TickSubscriber};
pub use observable::{Observable, Observer};
pub use time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use transform::{AffineCoefficients, Matrix3, Point, TransformError, compute_hand_transform};
