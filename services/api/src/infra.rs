use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use waterfront::error::AppError;
use waterfront::neighborhood::{DesignatedPortArea, HouseholdTableLoader, NeighborhoodProfile};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) reference: Arc<ReferenceData>,
}

/// Read-only panels loaded once at start-up.
#[derive(Debug, Clone)]
pub(crate) struct ReferenceData {
    pub(crate) neighborhood: NeighborhoodProfile,
    pub(crate) site: DesignatedPortArea,
}

pub(crate) fn load_neighborhood(
    households_csv: Option<&Path>,
) -> Result<NeighborhoodProfile, AppError> {
    match households_csv {
        Some(path) => {
            let bands = HouseholdTableLoader::from_path(path)?;
            info!(path = %path.display(), bands = bands.len(), "loaded household table");
            Ok(NeighborhoodProfile::east_boston_with_bands(bands))
        }
        None => Ok(NeighborhoodProfile::east_boston()?),
    }
}

pub(crate) fn load_reference_data(households_csv: Option<&Path>) -> Result<ReferenceData, AppError> {
    Ok(ReferenceData {
        neighborhood: load_neighborhood(households_csv)?,
        site: DesignatedPortArea::east_boston(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_profile_loads_without_override() {
        let reference = load_reference_data(None).expect("embedded data loads");
        assert_eq!(reference.neighborhood.bands.len(), 4);
        assert_eq!(reference.site.acres, 33.0);
    }

    #[test]
    fn missing_override_file_is_a_reference_error() {
        let error = load_neighborhood(Some(Path::new("./no-such-households.csv")))
            .expect_err("missing file");
        assert!(matches!(error, AppError::Reference(_)));
    }
}
