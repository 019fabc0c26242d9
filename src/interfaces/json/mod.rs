pub mod order_reader;
pub mod writer;
