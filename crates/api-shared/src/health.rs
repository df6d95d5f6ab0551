use crate::dto::HealthRes;

/// Simple health service shared by the API surfaces.
///
/// Provides a standardised way to check that the tarot service is up.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Tarot service is alive".into(),
        }
    }
}
