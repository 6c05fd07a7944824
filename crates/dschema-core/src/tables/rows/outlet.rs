//! Outlet list rows.

use super::{DataRow, RowOutcome, RowParser};
use crate::models::{DraftDocument, DschemaConfig, Outlet};

pub struct OutletListParser;

impl RowParser for OutletListParser {
    fn parse_row(
        &mut self,
        row: &DataRow<'_>,
        draft: &mut DraftDocument,
        _config: &DschemaConfig,
    ) -> RowOutcome {
        match (row.fields.get("ID OUTLET"), row.fields.get("NAMA OUTLET")) {
            (Some(id), Some(name)) => {
                draft.outlets.push(Outlet {
                    partner_id: id.to_string(),
                    name: name.to_string(),
                });
                RowOutcome::Applied
            }
            _ => RowOutcome::Skipped,
        }
    }
}
