use crate::domain::model::{LeadReport, ResolvedAddress};
use crate::utils::error::Result;

/// Geocoding collaborator. The engine only consumes its output.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, query: &str) -> Result<ResolvedAddress>;

    /// A failed lookup is not an error for the calculator, only a missing origin.
    fn resolve_or_absent(&self, query: &str) -> Option<ResolvedAddress> {
        match self.resolve(query) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                tracing::warn!(
                    "Address lookup for '{}' failed, continuing without travel costs: {}",
                    query,
                    e
                );
                None
            }
        }
    }
}

/// Lead submission capability. Nothing in `core` calls it.
pub trait LeadSink {
    fn submit_lead(&mut self, report: &LeadReport) -> Result<()>;
}
