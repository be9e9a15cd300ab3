//! Catalog of request categories and their statutory terms.
//!
//! Terms follow Colombian law for petitions, complaints, claims, suggestions
//! and reports (PQRSD): Law 1755 of 2015 for general petitions, Law 5 of 1992
//! for congressional requests and Law 1712 of 2014 for public information.
//! Health claims use the hour-based terms of the national health authority.

use std::fmt;
use std::str::FromStr;

use plazo_core::{CalculationParams, TermUnit, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A statutory term: an amount and the unit it is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Nominal amount.
    pub amount: u32,
    /// Counting unit.
    pub unit: TermUnit,
}

impl Term {
    const fn business_days(amount: u32) -> Self {
        Self {
            amount,
            unit: TermUnit::BusinessDays,
        }
    }

    const fn calendar_days(amount: u32) -> Self {
        Self {
            amount,
            unit: TermUnit::CalendarDays,
        }
    }

    const fn hours(amount: u32) -> Self {
        Self {
            amount,
            unit: TermUnit::Hours,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TermUnit::Hours => "hours",
            TermUnit::CalendarDays => "calendar days",
            TermUnit::BusinessDays => "business days",
        };
        write!(f, "{} {}", self.amount, unit)
    }
}

/// Request categories with a statutory response term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Report requested by members of Congress.
    InformeCongresistas,
    /// General petition.
    PeticionGeneral,
    /// Petition between public authorities.
    PeticionAutoridades,
    /// Consultation on matters within the entity's competence.
    Consulta,
    /// Access to public information.
    InformacionPublica,
    /// Copy of a clinical history.
    CopiaHistoriaClinica,
    /// Claim.
    Reclamo,
    /// Complaint about a public servant.
    Queja,
    /// Health claim, simple risk.
    SaludRiesgoSimple,
    /// Health claim, prioritized risk.
    SaludRiesgoPriorizado,
    /// Health claim, vital risk.
    SaludRiesgoVital,
    /// Report of an alleged irregularity.
    Denuncia,
    /// Suggestion.
    Sugerencia,
    /// Commendation.
    Felicitacion,
}

impl RequestType {
    /// Every category, in catalog order.
    pub const ALL: [RequestType; 14] = [
        RequestType::InformeCongresistas,
        RequestType::PeticionGeneral,
        RequestType::PeticionAutoridades,
        RequestType::Consulta,
        RequestType::InformacionPublica,
        RequestType::CopiaHistoriaClinica,
        RequestType::Reclamo,
        RequestType::Queja,
        RequestType::SaludRiesgoSimple,
        RequestType::SaludRiesgoPriorizado,
        RequestType::SaludRiesgoVital,
        RequestType::Denuncia,
        RequestType::Sugerencia,
        RequestType::Felicitacion,
    ];

    /// Stable identifier (`snake_case`).
    pub fn id(&self) -> &'static str {
        match self {
            RequestType::InformeCongresistas => "informe_congresistas",
            RequestType::PeticionGeneral => "peticion_general",
            RequestType::PeticionAutoridades => "peticion_autoridades",
            RequestType::Consulta => "consulta",
            RequestType::InformacionPublica => "informacion_publica",
            RequestType::CopiaHistoriaClinica => "copia_historia_clinica",
            RequestType::Reclamo => "reclamo",
            RequestType::Queja => "queja",
            RequestType::SaludRiesgoSimple => "salud_riesgo_simple",
            RequestType::SaludRiesgoPriorizado => "salud_riesgo_priorizado",
            RequestType::SaludRiesgoVital => "salud_riesgo_vital",
            RequestType::Denuncia => "denuncia",
            RequestType::Sugerencia => "sugerencia",
            RequestType::Felicitacion => "felicitacion",
        }
    }

    /// Display name, in Spanish.
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestType::InformeCongresistas => "Petición de informe (Congresistas)",
            RequestType::PeticionGeneral => "Petición general",
            RequestType::PeticionAutoridades => "Petición entre autoridades",
            RequestType::Consulta => "Consulta",
            RequestType::InformacionPublica => "Solicitud de información pública",
            RequestType::CopiaHistoriaClinica => "Copia de historia clínica",
            RequestType::Reclamo => "Reclamo",
            RequestType::Queja => "Queja",
            RequestType::SaludRiesgoSimple => "Reclamo en salud, riesgo simple",
            RequestType::SaludRiesgoPriorizado => "Reclamo en salud, riesgo priorizado",
            RequestType::SaludRiesgoVital => "Reclamo en salud, riesgo vital",
            RequestType::Denuncia => "Denuncia",
            RequestType::Sugerencia => "Sugerencia",
            RequestType::Felicitacion => "Felicitación",
        }
    }

    /// Short description, in Spanish.
    pub fn description(&self) -> &'static str {
        match self {
            RequestType::InformeCongresistas => {
                "Informes solicitados por congresistas (Ley 5 de 1992, art. 258)."
            }
            RequestType::PeticionGeneral => {
                "Solicitudes respetuosas de interés general o particular."
            }
            RequestType::PeticionAutoridades => {
                "Información o documentos solicitados entre entidades públicas."
            }
            RequestType::Consulta => "Concepto sobre materias a cargo de la entidad.",
            RequestType::InformacionPublica => {
                "Acceso a documentos o datos públicos no reservados."
            }
            RequestType::CopiaHistoriaClinica => {
                "Copias de historia clínica o resultados de exámenes."
            }
            RequestType::Reclamo => {
                "Solución exigida por la prestación indebida de un servicio."
            }
            RequestType::Queja => "Inconformidad con la conducta de un servidor público.",
            RequestType::SaludRiesgoSimple => {
                "Casos de salud sin riesgo vital inmediato, como citas o medicamentos pendientes."
            }
            RequestType::SaludRiesgoPriorizado => "Casos de salud que requieren atención urgente.",
            RequestType::SaludRiesgoVital => {
                "Casos de salud que comprometen la vida o la integridad del paciente."
            }
            RequestType::Denuncia => {
                "Presunta irregularidad para investigación disciplinaria, penal o administrativa."
            }
            RequestType::Sugerencia => "Propuesta para mejorar la gestión de la entidad.",
            RequestType::Felicitacion => "Satisfacción con los servicios prestados.",
        }
    }

    /// Statutory term.
    pub fn term(&self) -> Term {
        match self {
            RequestType::InformeCongresistas => Term::calendar_days(5),
            RequestType::PeticionGeneral => Term::business_days(15),
            RequestType::PeticionAutoridades => Term::business_days(10),
            RequestType::Consulta => Term::business_days(30),
            RequestType::InformacionPublica => Term::business_days(10),
            RequestType::CopiaHistoriaClinica => Term::business_days(3),
            RequestType::Reclamo
            | RequestType::Queja
            | RequestType::Denuncia
            | RequestType::Sugerencia
            | RequestType::Felicitacion => Term::business_days(15),
            RequestType::SaludRiesgoSimple => Term::hours(72),
            RequestType::SaludRiesgoPriorizado => Term::hours(48),
            RequestType::SaludRiesgoVital => Term::hours(24),
        }
    }

    /// Calculation parameters for a request of this type.
    pub fn params(&self, created_at: Timestamp, double_term: bool) -> CalculationParams {
        let term = self.term();
        CalculationParams::new(created_at, term.amount, term.unit).with_double_term(double_term)
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RequestType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        RequestType::ALL
            .into_iter()
            .find(|t| t.id() == needle)
            .ok_or_else(|| ConfigError::UnknownRequestType { id: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_round_trips_ids() {
        for t in RequestType::ALL {
            assert_eq!(t.id().parse::<RequestType>().unwrap(), t);
        }
        assert_eq!(
            " Reclamo ".parse::<RequestType>().unwrap(),
            RequestType::Reclamo
        );
    }

    #[test]
    fn test_unknown_type() {
        assert!(matches!(
            "tutela".parse::<RequestType>(),
            Err(ConfigError::UnknownRequestType { ref id }) if id == "tutela"
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = RequestType::ALL.iter().map(RequestType::id).collect();
        assert_eq!(ids.len(), RequestType::ALL.len());
    }

    #[test]
    fn test_terms() {
        assert_eq!(
            RequestType::InformeCongresistas.term(),
            Term::calendar_days(5)
        );
        assert_eq!(RequestType::Consulta.term(), Term::business_days(30));
        assert_eq!(RequestType::CopiaHistoriaClinica.term(), Term::business_days(3));
        assert_eq!(RequestType::SaludRiesgoVital.term(), Term::hours(24));
        assert_eq!(RequestType::SaludRiesgoSimple.term().to_string(), "72 hours");

        let fifteen = RequestType::ALL
            .iter()
            .filter(|t| t.term() == Term::business_days(15))
            .count();
        assert_eq!(fifteen, 6);
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&RequestType::SaludRiesgoPriorizado).unwrap();
        assert_eq!(json, "\"salud_riesgo_priorizado\"");
    }

    #[test]
    fn test_params_carry_term_and_double_flag() {
        let created = Timestamp::parse("2024-01-15 10:00:00").unwrap();
        let params = RequestType::Reclamo.params(created, true);
        assert_eq!(params.unit, TermUnit::BusinessDays);
        assert_eq!(params.base_amount, 15);
        assert_eq!(params.effective_amount(), 30);
    }
}
