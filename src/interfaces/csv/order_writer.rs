use crate::domain::order::Order;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OrderRow<'a> {
    order: u64,
    status: String,
    gateway: &'a str,
    initial: String,
    total: String,
    transactions: usize,
    notes: usize,
}

impl<'a> From<&'a Order> for OrderRow<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            order: order.id,
            status: order.status.to_string(),
            gateway: order.payment_gateway(),
            initial: order.initial_price.to_string(),
            total: order.total_price.to_string(),
            transactions: order.transactions().len(),
            notes: order.notes().len(),
        }
    }
}

/// Writes a summary line per order as CSV.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_orders(&mut self, orders: impl IntoIterator<Item = Order>) -> Result<()> {
        for order in orders {
            self.writer.serialize(OrderRow::from(&order))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
