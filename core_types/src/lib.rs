//! # Core Types
//!
//! This crate defines the fundamental types used throughout SlateOS.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Identifiers are typed and cannot be confused.
//! - **Domain values, not handles**: An [`AppId`] or [`NodeId`] carries meaning
//!   (system range, segment prefix) rather than being an opaque token.
//! - **Cheap to copy**: Everything here is `Copy` and fits in a register.
//!
//! ## Key Types
//!
//! - [`AppId`]: Identifier of an application; the value range encodes kind
//! - [`ProcessId`]: Slot-derived identifier of a running application
//! - [`NodeId`]: 64-bit identifier of a remote mesh peer
//! - [`Segment`]: Top-20-bit grouping of a [`NodeId`]
//! - [`Rgb565`]: 16-bit display color

pub mod color;
pub mod geometry;
pub mod ids;

pub use color::Rgb565;
pub use geometry::{Point, Rect};
pub use ids::{AppId, AppKind, NodeId, ProcessId, Segment};
