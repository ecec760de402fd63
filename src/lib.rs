//! MCP server for Taipei City public parking.
//!
//! Exposes lot lookup by district, keyword search, single-lot status and
//! per-area real-time availability as tools over JSON-RPC 2.0 stdio
//! transport, compatible with any MCP-aware AI agent.
//!
//! The [`parking`] module is usable on its own: a [`parking::QueryEngine`]
//! over any [`parking::ParkingSource`].

pub mod config;
pub mod handlers;
pub mod parking;
pub mod protocol;
pub mod server;
pub mod state;
pub mod tools;

pub mod schema;
