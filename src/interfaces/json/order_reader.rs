use crate::domain::order::Order;
use crate::error::Result;
use std::io::Read;

/// Reads an order snapshot exported by the order system as JSON.
pub struct OrderReader<R: Read> {
    source: R,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Order> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
