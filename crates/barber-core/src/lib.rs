//! Core types and trait definitions for the barbershop booking service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::BarbershopStore`]; the HTTP layer
//! depends only on that trait.

// Native `async fn` in traits; the store trait spells out `Send` futures
// explicitly where it matters.
#![allow(async_fn_in_trait)]

pub mod appointment;
pub mod client;
pub mod cpf;
pub mod error;
pub mod input;
pub mod report;
pub mod schedule;
pub mod service;
pub mod staff;
pub mod store;

pub use cpf::Cpf;
pub use error::{Error, Result, StoreError};
pub use schedule::Slot;
