// MainStreet - app/leads.rs
//
// Lead delivery seam. The contact modal produces a Lead; a LeadSink
// takes it from there. The in-tree sink only writes the payload to the
// log; a real deployment plugs a CRM or notification client in behind
// the same trait.

use crate::core::contact::Lead;
use crate::util::error::LeadError;
use tracing::info;

/// Accepts captured leads and reports success or failure back to the
/// modal for display.
pub trait LeadSink {
    fn deliver(&mut self, lead: &Lead) -> Result<(), LeadError>;
}

/// Writes each lead to the application log as one JSON line.
#[derive(Debug, Default)]
pub struct LogLeadSink;

impl LeadSink for LogLeadSink {
    fn deliver(&mut self, lead: &Lead) -> Result<(), LeadError> {
        let payload =
            serde_json::to_string(lead).map_err(|source| LeadError::Serialize { source })?;
        info!("lead captured: {payload}");
        Ok(())
    }
}
