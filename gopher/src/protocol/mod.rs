// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Everything that speaks Gopher: the [`Location`] of a resource, the [`fetch`]
//! request/response exchange over TCP, and the [`parse`] step that turns raw lines into
//! a [`ParsedPage`].

// Attach.
pub mod errors;
pub mod location;
pub mod response_parser;
pub mod transport;

// Re-export.
pub use errors::*;
pub use location::*;
pub use response_parser::*;
pub use transport::*;
