//! Wisp Core - Value model and error types for wisp reactive elements.
//!
//! This crate provides the foundational types shared by the reactive layer and
//! the element layer:
//!
//! - `Value`: Dynamic property values (Boolean, Number, BigInt, String, Url, Date, Json)
//! - `ValueKind`: Runtime kind of a value, used to pick an attribute converter
//! - `number`: JavaScript-compatible number text parsing and formatting
//! - `Error`: Error types for property and attribute operations
//!
//! # Example
//!
//! ```rust
//! use wisp_core::{Value, ValueKind};
//! use wisp_core::number::parse_number;
//!
//! let v = Value::from(parse_number(" 0x10 "));
//! assert_eq!(v, Value::Number(16.0));
//! assert_eq!(v.kind(), ValueKind::Number);
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod number;
mod types;
mod value;

pub use error::{Error, Result};
pub use types::ValueKind;
pub use value::Value;

pub use serde_json::Value as JsonValue;
