use crate::domain::command::OrderCommand;
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads order commands from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths.
pub struct OrderCommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderCommandReader<R> {
    /// Creates a new `OrderCommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes commands, one `Result` per row.
    pub fn commands(self) -> impl Iterator<Item = Result<OrderCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
