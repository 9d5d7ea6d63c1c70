//! Route dispatch
//!
//! A static, immutable route table built once at process start. Lookup is a
//! pure read that distinguishes three failure modes precisely: an unknown
//! path, a known path with a disallowed method, and a path segment that
//! fails to parse as its declared type.

pub mod pattern;
pub mod table;

pub use pattern::{Capture, PathParams, RoutePattern, Segment};
pub use table::{Handler, RequestContext, Route, RouteTable, RouteTableBuilder};
