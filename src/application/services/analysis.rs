//! Enclosure analysis service
//!
//! Resolves a species request against the catalog and lists every enclosure
//! that can take the whole group.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{try_allocate, AllocationGroup, Catalog, DomainError, ViableEnclosure};

/// Outcome of one query: either an error or the viable enclosures, never both.
///
/// Serializes to the public document shape
/// `{"erro": ..., "recintosViaveis": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    #[serde(rename = "erro", serialize_with = "serialize_error")]
    pub error: Option<DomainError>,
    #[serde(rename = "recintosViaveis")]
    pub viable_enclosures: Vec<ViableEnclosure>,
}

impl QueryResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Viable enclosures rendered as `Recinto {id} (espaço livre: {free} total: {total})`.
    pub fn descriptors(&self) -> Vec<String> {
        self.viable_enclosures.iter().map(ToString::to_string).collect()
    }

    pub fn to_json(&self) -> ApplicationResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize query result".into(),
            source: Box::new(e),
        })
    }
}

impl From<Result<Vec<ViableEnclosure>, DomainError>> for QueryResult {
    fn from(result: Result<Vec<ViableEnclosure>, DomainError>) -> Self {
        match result {
            Ok(viable_enclosures) => Self {
                error: None,
                viable_enclosures,
            },
            Err(error) => Self {
                error: Some(error),
                viable_enclosures: Vec::new(),
            },
        }
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<DomainError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.collect_str(e),
        None => serializer.serialize_none(),
    }
}

/// Service answering "where can this group live?" queries.
pub struct AnalysisService {
    catalog: Arc<Catalog>,
}

impl AnalysisService {
    /// Create a new analysis service over a catalog snapshot.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one query. Rejections are reported in the result, not as `Err`.
    pub fn analyze(&self, species: &str, quantity: i64) -> QueryResult {
        let result = self.find_viable(species, quantity);
        if let Err(e) = &result {
            info!("analyze {species} x{quantity}: {e}");
        }
        result.into()
    }

    /// Same as [`analyze`](Self::analyze) for a quantity still in textual form.
    /// Anything that is not an integer is an invalid quantity.
    pub fn analyze_raw(&self, species: &str, quantity: &str) -> QueryResult {
        match quantity.trim().parse::<i64>() {
            Ok(n) => self.analyze(species, n),
            Err(_) => {
                debug!("analyze_raw: non-numeric quantity {quantity:?}");
                QueryResult::from(Err(DomainError::InvalidQuantity))
            }
        }
    }

    /// Viable enclosures for `quantity` individuals of `species`, ascending by id.
    #[instrument(skip(self))]
    pub fn find_viable(
        &self,
        species: &str,
        quantity: i64,
    ) -> Result<Vec<ViableEnclosure>, DomainError> {
        let quantity = self.validate(species, quantity)?;

        let record = self
            .catalog
            .find_species(species)
            .ok_or(DomainError::InvalidAnimal)?;
        let group = AllocationGroup::new(record, quantity);
        debug!(
            "find_viable: {} x{} (size {}, biomes {:?})",
            record.species,
            group.len(),
            record.size,
            record.biomes
        );

        let mut viable: Vec<ViableEnclosure> = self
            .catalog
            .enclosures()
            .iter()
            .filter_map(|enclosure| try_allocate(&group, enclosure))
            .map(|placed| ViableEnclosure::from(&placed))
            .collect();

        if viable.is_empty() {
            return Err(DomainError::NoViableEnclosure);
        }
        viable.sort_by_key(|v| v.id);
        debug!("find_viable: {} viable enclosure(s)", viable.len());
        Ok(viable)
    }

    /// Only a non-positive quantity (or a blank name) is invalid. A group too
    /// large to count in `u32` can never fit, since every member takes space.
    fn validate(&self, species: &str, quantity: i64) -> Result<u32, DomainError> {
        if species.trim().is_empty() || quantity <= 0 {
            return Err(DomainError::InvalidQuantity);
        }
        u32::try_from(quantity).map_err(|_| DomainError::NoViableEnclosure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AnalysisService {
        AnalysisService::new(Arc::new(Catalog::default_zoo()))
    }

    #[test]
    fn given_blank_species_when_validating_then_invalid_quantity() {
        assert_eq!(service().validate("  ", 1), Err(DomainError::InvalidQuantity));
    }

    #[test]
    fn given_large_positive_quantity_when_validating_then_accepted() {
        assert_eq!(service().validate("MACACO", 2000), Ok(2000));
        assert_eq!(
            service().validate("MACACO", i64::from(u32::MAX) + 1),
            Err(DomainError::NoViableEnclosure)
        );
    }

    #[test]
    fn given_success_when_serialized_then_error_is_null() {
        let result = service().analyze("LEAO", 1);
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert!(json["erro"].is_null());
        assert_eq!(
            json["recintosViaveis"][0],
            "Recinto 1 (espaço livre: 4 total: 10)"
        );
    }

    #[test]
    fn given_rejection_when_serialized_then_carries_message() {
        let result = service().analyze("UNICORNIO", 1);
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["erro"], "Animal inválido");
        assert_eq!(json["recintosViaveis"].as_array().map(Vec::len), Some(0));
    }
}
