//! Location authorization.
//!
//! A caller can hold any combination of three relations on a location:
//! owner, member, invited. They are stored in different places and are
//! checked independently; call sites combine them as they need.

pub mod checker;

pub use checker::{LocationAccess, Relations};
