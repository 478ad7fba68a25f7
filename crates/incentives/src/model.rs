//! Incentives API payloads (`GET /api/v1/incentives`).

use serde::{Deserialize, Serialize};

/// How an incentive pays out. Unknown API values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Rebate,
    TaxCredit,
    PosRebate,
    AssistanceProgram,
    AccountCredit,
    PerformanceRebate,
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Rebate => "rebate",
            PaymentMethod::TaxCredit => "tax_credit",
            PaymentMethod::PosRebate => "pos_rebate",
            PaymentMethod::AssistanceProgram => "assistance_program",
            PaymentMethod::AccountCredit => "account_credit",
            PaymentMethod::PerformanceRebate => "performance_rebate",
            PaymentMethod::Other(s) => s.as_str(),
        }
    }

    /// Chip text on incentive cards.
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Rebate => "Rebate".to_string(),
            PaymentMethod::TaxCredit => "Tax credit".to_string(),
            PaymentMethod::PosRebate => "Upfront discount".to_string(),
            PaymentMethod::AssistanceProgram => "Assistance program".to_string(),
            PaymentMethod::AccountCredit => "Account credit".to_string(),
            PaymentMethod::PerformanceRebate => "Performance rebate".to_string(),
            PaymentMethod::Other(s) => s.replace('_', " "),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "rebate" => PaymentMethod::Rebate,
            "tax_credit" => PaymentMethod::TaxCredit,
            "pos_rebate" => PaymentMethod::PosRebate,
            "assistance_program" => PaymentMethod::AssistanceProgram,
            "account_credit" => PaymentMethod::AccountCredit,
            "performance_rebate" => PaymentMethod::PerformanceRebate,
            _ => PaymentMethod::Other(s),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(m: PaymentMethod) -> Self {
        m.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OwnerStatus {
    Homeowner,
    Renter,
    Other(String),
}

impl From<String> for OwnerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "homeowner" => OwnerStatus::Homeowner,
            "renter" => OwnerStatus::Renter,
            _ => OwnerStatus::Other(s),
        }
    }
}

impl From<OwnerStatus> for String {
    fn from(s: OwnerStatus) -> Self {
        match s {
            OwnerStatus::Homeowner => "homeowner".to_string(),
            OwnerStatus::Renter => "renter".to_string(),
            OwnerStatus::Other(s) => s,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountType {
    DollarAmount,
    Percent,
    DollarsPerUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(rename = "type")]
    pub kind: AmountType,
    pub number: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Es => "ES",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizableString {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
}

impl LocalizableString {
    /// Text in `lang`, falling back to English.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Es => self.es.as_deref().unwrap_or(&self.en),
            Language::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    pub id: String,
    pub program: String,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub items: Vec<String>,
    pub amount: Amount,
    #[serde(default)]
    pub owner_status: Vec<OwnerStatus>,
    pub short_description: LocalizableString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_geo_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_income: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info_url: Option<LocalizableString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

impl Incentive {
    /// Income-qualified programs carry a low-income eligibility marker.
    pub fn is_income_qualified(&self) -> bool {
        self.low_income
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentivesMetadata {
    pub last_updated: String,
    pub total_incentives: u64,
    pub total_states: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncentivesResponse {
    #[serde(default)]
    pub incentives: Vec<Incentive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IncentivesMetadata>,
}

impl IncentivesResponse {
    /// Number of programs returned; drives the density tint.
    pub fn count(&self) -> usize {
        self.incentives.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_response() -> IncentivesResponse {
        serde_json::from_value(json!({
            "incentives": [
                {
                    "id": "CA-1",
                    "program": "ca_CaliforniaEnergySmartHomes",
                    "payment_methods": ["rebate"],
                    "items": [
                        "other_heat_pump",
                        "heat_pump_water_heater",
                        "electric_stove",
                        "heat_pump_clothes_dryer",
                        "non_heat_pump_clothes_dryer"
                    ],
                    "amount": {"type": "dollar_amount", "number": 4250},
                    "owner_status": ["homeowner"],
                    "short_description": {
                        "en": "$4,250 rebate for installing heat pump space heating.",
                        "es": "Reembolso de $4,250 por instalar calefacción con bomba de calor."
                    },
                    "start_date": "2024-01-01",
                    "end_date": "2024-12-31",
                    "eligible_geo_group": "ca-energy-smart-homes-territories"
                },
                {
                    "id": "CA-7",
                    "program": "ca_SolarOnMultifamily",
                    "payment_methods": ["tax_credit", "low_interest_loan"],
                    "items": ["rooftop_solar_installation"],
                    "amount": {"type": "percent", "number": 0.3, "maximum": 7500},
                    "short_description": {"en": "30% of solar installation costs."},
                    "low_income": "ca-care",
                    "more_info_url": {"en": "https://example.org/solar"}
                },
                {
                    "id": "CA-9",
                    "program": "ca_MysteryProgram",
                    "items": ["hovercraft"],
                    "amount": {"type": "dollars_per_unit", "number": 100, "unit": "ton"},
                    "short_description": {"en": "Unclassified item."}
                }
            ]
        }))
        .expect("sample response")
    }

    #[test]
    fn decodes_api_payload_without_metadata() {
        let resp = sample_response();
        assert_eq!(resp.incentives.len(), 3);
        assert!(resp.metadata.is_none());
        assert_eq!(resp.incentives[0].payment_methods, vec![PaymentMethod::Rebate]);
        assert_eq!(resp.incentives[0].amount.kind, AmountType::DollarAmount);
        assert_eq!(resp.incentives[2].amount.unit.as_deref(), Some("ton"));
    }

    #[test]
    fn unknown_payment_methods_survive() {
        let resp = sample_response();
        let methods = &resp.incentives[1].payment_methods;
        assert_eq!(methods[1], PaymentMethod::Other("low_interest_loan".to_string()));
        assert_eq!(methods[1].label(), "low interest loan");
        assert_eq!(
            serde_json::to_value(methods).expect("encode"),
            json!(["tax_credit", "low_interest_loan"])
        );
    }

    #[test]
    fn localized_text_falls_back_to_english() {
        let resp = sample_response();
        let first = &resp.incentives[0].short_description;
        assert!(first.get(Language::Es).starts_with("Reembolso"));
        let second = &resp.incentives[1].short_description;
        assert_eq!(second.get(Language::Es), "30% of solar installation costs.");
    }

    #[test]
    fn income_qualified_needs_marker() {
        let resp = sample_response();
        assert!(!resp.incentives[0].is_income_qualified());
        assert!(resp.incentives[1].is_income_qualified());
    }

    #[test]
    fn decodes_metadata_when_present() {
        let resp: IncentivesResponse = serde_json::from_value(json!({
            "incentives": [],
            "metadata": {"last_updated": "2024-03-15T12:00:00Z", "total_incentives": 157, "total_states": 50}
        }))
        .expect("decode");
        assert_eq!(resp.metadata.map(|m| m.total_incentives), Some(157));
    }
}
