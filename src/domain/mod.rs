//! Domain layer: orders, prices, before-submit checks, gateways and the
//! ports the application layer talks through.

pub mod command;
pub mod events;
pub mod gateway;
pub mod money;
pub mod order;
pub mod ports;
pub mod validation;
