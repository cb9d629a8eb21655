use domain::summary::DetailRow;
use std::io::Write;

/// Write the summary detail rows as CSV, header included
pub fn write_detail_csv<W: Write>(rows: &[DetailRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        wtr.write_record([
            "device_id",
            "brand",
            "model",
            "capacity",
            "color",
            "grade",
            "status",
            "quantity",
            "scanned_at",
        ])?;
    }

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn detail_csv(rows: &[DetailRow]) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();
    write_detail_csv(rows, &mut buffer)?;
    Ok(buffer)
}
