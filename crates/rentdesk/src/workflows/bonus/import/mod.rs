mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::LineItem;

/// Failure reading a line item export. Unusable cells are not errors; they
/// become zero quantities or prices.
#[derive(Debug, thiserror::Error)]
pub enum LineItemImportError {
    #[error("failed to read line item export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid line item CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads the product selection of a quote from a `product_id,name,quantity,unit_price` CSV.
pub struct LineItemImporter;

impl LineItemImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LineItem>, LineItemImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LineItem>, LineItemImportError> {
        Ok(parser::parse_line_items(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::bonus::domain::selection_total;
    use std::io::Cursor;

    #[test]
    fn importer_reads_quantities_and_prices() {
        let csv = "product_id,name,quantity,unit_price\n\
p-1,Drill rental,2,600000\n\
p-2,Blade service,1,\"500 000\"\n";
        let items = LineItemImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id.as_deref(), Some("p-1"));
        assert_eq!(items[1].unit_price, 500_000);
        assert_eq!(selection_total(&items), 1_700_000);
    }

    #[test]
    fn blank_and_garbage_cells_become_zero_and_decimals_round() {
        let csv = "product_id,name,quantity,unit_price\n\
p-1,,,\n\
p-2,Bits,three,-40\n\
p-3,Case,4,12.50\n";
        let items = LineItemImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(items.len(), 3);
        assert!(items[0].name.is_none());
        assert_eq!(items[0].quantity, 0);
        assert_eq!(items[0].unit_price, 0);
        assert_eq!(items[1].quantity, 0);
        assert_eq!(items[1].unit_price, 0);
        assert_eq!(items[2].quantity, 4);
        assert_eq!(items[2].unit_price, 13);
    }

    #[test]
    fn decimal_prices_count_toward_the_total() {
        let csv = "product_id,name,quantity,unit_price\n\
p-1,Case,4,250000.50\n";
        let items = LineItemImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(items[0].unit_price, 250_001);
        assert_eq!(selection_total(&items), 1_000_004);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = LineItemImporter::from_path("/nonexistent/rentdesk/items.csv")
            .expect_err("file does not exist");
        assert!(matches!(err, LineItemImportError::Io(_)));
    }
}
