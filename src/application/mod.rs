//! Application layer: the checkout submission coordinator and the order
//! pipeline that drives payment gateways.

pub mod coordinator;
pub mod manual_gateway;
pub mod orders;
pub mod registry;
