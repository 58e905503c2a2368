// Adapters layer: concrete implementations of the domain ports.

use crate::domain::model::{AddressComponents, GeoPoint, LeadReport, ResolvedAddress};
use crate::domain::ports::{AddressResolver, LeadSink};
use crate::utils::error::{CalcError, Result};
use std::io::Write;

/// Resolves queries that already are coordinates, written as
/// `"latitude,longitude"`. Used when the form did the geocoding upstream.
#[derive(Debug, Clone, Default)]
pub struct CoordinateResolver {
    components: AddressComponents,
}

impl CoordinateResolver {
    pub fn new(components: AddressComponents) -> Self {
        Self { components }
    }
}

impl AddressResolver for CoordinateResolver {
    fn resolve(&self, query: &str) -> Result<ResolvedAddress> {
        let unparsable = || CalcError::AddressResolution {
            message: format!("expected \"latitude,longitude\", got '{}'", query),
        };

        let (lat, lon) = query.split_once(',').ok_or_else(unparsable)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| unparsable())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| unparsable())?;

        Ok(ResolvedAddress {
            location: GeoPoint::new(latitude, longitude)?,
            components: self.components.clone(),
        })
    }
}

/// Writes each lead as one JSON line.
pub struct JsonLeadWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLeadWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LeadSink for JsonLeadWriter<W> {
    fn submit_lead(&mut self, report: &LeadReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
