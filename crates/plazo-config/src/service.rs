//! Deadline service: one entry point for request-type and custom deadlines.

use std::sync::Arc;

use plazo_core::calendars::Calendar;
use plazo_core::strategies::{
    BusinessDaysCalculator, CalendarDaysCalculator, DeadlineBreakdown, DeadlineCalculator,
    HoursCalculator, Strategy,
};
use plazo_core::types::Suspension;
use plazo_core::{CalculationParams, TermUnit, Timestamp};

use crate::catalog::RequestType;
use crate::error::{ConfigResult, Validate};
use crate::settings::EngineSettings;

/// A deadline to compute.
///
/// Built either from a catalog category (basic mode) or from explicit
/// parameters (advanced mode).
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineRequest {
    request_type: Option<RequestType>,
    params: CalculationParams,
}

impl DeadlineRequest {
    /// Request for a catalog category submitted at `created_at`.
    pub fn for_type(request_type: RequestType, created_at: Timestamp, double_term: bool) -> Self {
        Self {
            request_type: Some(request_type),
            params: request_type.params(created_at, double_term),
        }
    }

    /// Request with explicit parameters.
    pub fn custom(params: CalculationParams) -> Self {
        Self {
            request_type: None,
            params,
        }
    }

    /// Request from a loosely-typed JSON record.
    ///
    /// See [`CalculationParams::from_json`] for the accepted keys.
    pub fn from_json(value: &serde_json::Value) -> ConfigResult<Self> {
        Ok(Self::custom(CalculationParams::from_json(value)?))
    }

    /// Replaces the suspension list.
    pub fn with_suspensions(mut self, suspensions: Vec<Suspension>) -> Self {
        self.params.suspensions = suspensions;
        self
    }

    /// Overrides end-of-day snapping.
    pub fn with_end_of_day(mut self, approximate: bool) -> Self {
        self.params.approximate_end_of_day = Some(approximate);
        self
    }

    /// Category, when built from the catalog.
    pub fn request_type(&self) -> Option<RequestType> {
        self.request_type
    }

    /// The calculation parameters.
    pub fn params(&self) -> &CalculationParams {
        &self.params
    }
}

/// Computes deadlines with a calendar and strategies built once from
/// [`EngineSettings`].
///
/// The service is immutable after construction and can be shared across
/// threads.
#[derive(Clone)]
pub struct DeadlineService {
    settings: EngineSettings,
    calendar: Arc<dyn Calendar>,
    hours: Strategy,
    calendar_days: Strategy,
    business_days: Strategy,
}

impl std::fmt::Debug for DeadlineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineService")
            .field("calendar", &self.calendar.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl DeadlineService {
    /// Builds the service.
    ///
    /// # Errors
    ///
    /// Fails if the settings are invalid or the calendar cannot be built.
    pub fn new(settings: EngineSettings) -> ConfigResult<Self> {
        settings.validate_or_error()?;
        let calendar = settings.build_calendar()?;
        Self::with_calendar(settings, calendar)
    }

    /// Builds the service around an already-built calendar, ignoring the
    /// calendar fields of `settings`.
    pub fn with_calendar(
        settings: EngineSettings,
        calendar: Arc<dyn Calendar>,
    ) -> ConfigResult<Self> {
        let overlap = settings.overlap;

        let hours = Strategy::Hours(HoursCalculator::new().with_overlap_policy(overlap.hours));
        let calendar_days = Strategy::CalendarDays(
            CalendarDaysCalculator::new().with_overlap_policy(overlap.calendar_days),
        );
        let business_days = Strategy::BusinessDays(
            BusinessDaysCalculator::new(calendar.clone())
                .with_working_hours(settings.working_hours()?)
                .with_overlap_policy(overlap.business_days),
        );

        tracing::info!(calendar = calendar.name(), "deadline service ready");

        Ok(Self {
            settings,
            calendar,
            hours,
            calendar_days,
            business_days,
        })
    }

    /// The settings the service was built from.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The business calendar in use.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The configured strategy for a unit.
    pub fn strategy_for(&self, unit: TermUnit) -> &Strategy {
        match unit {
            TermUnit::Hours => &self.hours,
            TermUnit::CalendarDays => &self.calendar_days,
            TermUnit::BusinessDays => &self.business_days,
        }
    }

    /// Computes the deadline for a request.
    pub fn calculate(&self, request: &DeadlineRequest) -> ConfigResult<Timestamp> {
        Ok(self.calculate_breakdown(request)?.deadline)
    }

    /// Computes the deadline with the effect of each suspension.
    pub fn calculate_breakdown(&self, request: &DeadlineRequest) -> ConfigResult<DeadlineBreakdown> {
        let params = request.params();
        let breakdown = self.strategy_for(params.unit).calculate_breakdown(params)?;

        tracing::debug!(
            request_type = request.request_type().map(|t| t.id()),
            unit = %params.unit,
            deadline = %breakdown.deadline,
            applied = breakdown.applied.len(),
            discarded = breakdown.discarded.len(),
            "deadline calculated"
        );
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use plazo_core::calendars::WeekendCalendar;
    use plazo_core::suspensions::OverlapPolicy;
    use serde_json::json;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn service() -> DeadlineService {
        DeadlineService::new(EngineSettings::default()).unwrap()
    }

    #[test]
    fn test_request_types() {
        let service = service();
        let created = ts("2024-01-15 10:00:00");

        let cases = [
            (RequestType::PeticionGeneral, "2024-02-05 23:59:59"),
            (RequestType::InformeCongresistas, "2024-01-20 23:59:59"),
            (RequestType::SaludRiesgoVital, "2024-01-16 10:00:00"),
            (RequestType::SaludRiesgoSimple, "2024-01-18 10:00:00"),
        ];
        for (request_type, expected) in cases {
            let request = DeadlineRequest::for_type(request_type, created, false);
            assert_eq!(
                service.calculate(&request).unwrap().to_string(),
                expected,
                "{request_type}"
            );
        }
    }

    #[test]
    fn test_double_term_request() {
        let request =
            DeadlineRequest::for_type(RequestType::Consulta, ts("2024-01-15 10:00:00"), true);
        assert_eq!(
            service().calculate(&request).unwrap(),
            ts("2024-04-11 23:59:59")
        );
    }

    #[test]
    fn test_suspensions_and_end_of_day_override() {
        let request =
            DeadlineRequest::for_type(RequestType::Reclamo, ts("2024-01-15 10:00:00"), false)
                .with_suspensions(vec![Suspension::new(
                    ts("2024-01-18 14:00:00"),
                    ts("2024-01-19 15:00:00"),
                )])
                .with_end_of_day(false);
        // An extension always lands at end of day; the override only skips
        // the final snap.
        assert_eq!(
            service().calculate(&request).unwrap(),
            ts("2024-02-06 23:59:59")
        );
    }

    #[test]
    fn test_custom_json_request() {
        let request = DeadlineRequest::from_json(&json!({
            "created_at": "2024-01-15 10:00:00",
            "strategy": "business_days",
            "base_days": 5,
            "approximate_end_of_day": false
        }))
        .unwrap();
        assert_eq!(request.request_type(), None);
        assert_eq!(
            service().calculate(&request).unwrap(),
            ts("2024-01-22 10:00:00")
        );

        let err = DeadlineRequest::from_json(&json!({"created_at": "2024-01-15"})).unwrap_err();
        assert!(matches!(err, ConfigError::Engine(_)));
    }

    #[test]
    fn test_overlap_settings_reach_strategies() {
        let mut settings = EngineSettings::default();
        settings.overlap.business_days = OverlapPolicy::ShiftStart;
        let service = DeadlineService::new(settings).unwrap();

        assert_eq!(
            service
                .strategy_for(TermUnit::BusinessDays)
                .overlap_policy(),
            OverlapPolicy::ShiftStart
        );
        assert_eq!(
            service.strategy_for(TermUnit::Hours).unit(),
            TermUnit::Hours
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = EngineSettings::default().with_jurisdiction("XX");
        assert!(matches!(
            DeadlineService::new(settings),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_with_calendar() {
        let service =
            DeadlineService::with_calendar(EngineSettings::default(), Arc::new(WeekendCalendar))
                .unwrap();
        // Christmas counts as a business day without holidays.
        let request =
            DeadlineRequest::for_type(RequestType::CopiaHistoriaClinica, ts("2024-12-23 09:00:00"), false);
        assert_eq!(
            service.calculate(&request).unwrap(),
            ts("2024-12-26 23:59:59")
        );
        assert!(format!("{service:?}").contains("Weekend Only"));
    }

    #[test]
    fn test_service_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeadlineService>();
    }
}
