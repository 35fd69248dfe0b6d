use std::fs::File;
use std::io::Error;
use std::path::Path;

const HEADER: [&str; 8] = [
    "type", "order", "plan_free", "initial", "total", "gateway", "coupon", "student",
];

/// One pending order per row, alternating between free and priced enrollments.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let initial = if i % 2 == 0 { "0" } else { "19.99" };
        wtr.write_record([
            "pending",
            &i.to_string(),
            "false",
            initial,
            "19.99",
            "manual",
            "",
            &(i % 50 + 1).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Pending orders followed by a renewal for each of them.
pub fn generate_billing_csv(path: &Path, orders: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for i in 1..=orders {
        wtr.write_record([
            "pending",
            &i.to_string(),
            "false",
            "10",
            "10",
            "manual",
            "",
            &(i % 50 + 1).to_string(),
        ])?;
    }
    for i in 1..=orders {
        wtr.write_record(["recurring", &i.to_string(), "", "", "", "", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
