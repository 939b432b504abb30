//! Core types and the lecture-resolution pipeline for Hörsaal.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend plugs in through [`store::LectureStore`]; the web layer
//! consumes the [`resolve::ResolvedView`] produced by [`resolve::Resolver`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod codec;
pub mod error;
pub mod fuse;
pub mod lecture;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
