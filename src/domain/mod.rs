//! Domain layer: order snapshots, request value objects and the pure logic
//! that maps one onto the other, plus the ports to external collaborators.

pub mod address;
pub mod birth_date;
pub mod line_items;
pub mod money;
pub mod order;
pub mod order_state;
pub mod payment_method;
pub mod ports;
pub mod request;
pub mod transaction;
