//! Detail panel for the selected region: its incentives and the category
//! filter over them.

use incentives::{
    ApiError, CategoryFilter, Incentive, IncentivesResponse, Language, NO_MATCH_MESSAGE,
};
use regions::SelectedRegion;
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::Effect;

pub const INCOME_QUALIFIED: &str = "Income Qualified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveCard {
    pub chips: Vec<String>,
    pub headline: String,
    pub subheadline: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_chip: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info_url: Option<String>,
}

impl IncentiveCard {
    pub fn new(incentive: &Incentive, lang: Language) -> Self {
        Self {
            chips: incentive.payment_methods.iter().map(|m| m.label()).collect(),
            headline: incentive.program.clone(),
            subheadline: incentive.eligible_geo_group.clone().unwrap_or_default(),
            body: incentive.short_description.get(lang).to_string(),
            warning_chip: incentive.is_income_qualified().then_some(INCOME_QUALIFIED),
            more_info_url: incentive
                .more_info_url
                .as_ref()
                .map(|u| u.get(lang).to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the page needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub title: String,
    pub subtitle: String,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub language: &'static str,
    pub filter_summary: String,
    pub options: Vec<FilterOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    pub cards: Vec<IncentiveCard>,
}

#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    region: Option<SelectedRegion>,
    next_request: u64,
    in_flight: Option<u64>,
    status: Option<SidebarStatus>,
    incentives: Vec<Incentive>,
    filter: CategoryFilter,
    language: Language,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.region.is_some()
    }

    pub fn region(&self) -> Option<&SelectedRegion> {
        self.region.as_ref()
    }

    pub fn status(&self) -> Option<&SidebarStatus> {
        self.status.as_ref()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut CategoryFilter {
        &mut self.filter
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Shows `region` and asks for its state's incentives. Counties use their
    /// parent state.
    pub fn open(&mut self, region: &SelectedRegion) -> Option<Effect> {
        self.region = Some(region.clone());
        self.incentives.clear();
        self.filter = CategoryFilter::new();

        let Some(state) = region.abbreviation else {
            warn!(region = %region.name, "no state abbreviation, skipping incentives");
            self.in_flight = None;
            self.status = Some(SidebarStatus::Failed(format!(
                "No incentives available for {}",
                region.state_name
            )));
            return None;
        };

        self.next_request += 1;
        let request_id = self.next_request;
        self.in_flight = Some(request_id);
        self.status = Some(SidebarStatus::Loading);
        debug!(request_id, state, kind = ?region.kind, "requesting incentives");
        Some(Effect::FetchIncentives {
            request_id,
            state: state.to_string(),
        })
    }

    pub fn close(&mut self) {
        self.region = None;
        self.in_flight = None;
        self.status = None;
        self.incentives.clear();
        self.filter = CategoryFilter::new();
    }

    /// Applies a fetch result. Results for anything but the latest request
    /// are dropped; returns whether this one was used.
    pub fn receive(
        &mut self,
        request_id: u64,
        result: Result<IncentivesResponse, ApiError>,
    ) -> bool {
        if self.in_flight != Some(request_id) {
            debug!(request_id, "dropping stale incentives response");
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(resp) => {
                self.filter = CategoryFilter::for_incentives(&resp.incentives);
                self.incentives = resp.incentives;
                self.status = Some(SidebarStatus::Ready);
            }
            Err(err) => {
                warn!(request_id, %err, "incentives fetch failed");
                self.incentives.clear();
                self.filter = CategoryFilter::for_incentives(&[]);
                self.status = Some(SidebarStatus::Failed(err.to_string()));
            }
        }
        true
    }

    pub fn view(&self) -> Option<SidebarView> {
        let region = self.region.as_ref()?;
        let title = region.name.clone();
        let loading = self.status == Some(SidebarStatus::Loading);
        let ready = self.status == Some(SidebarStatus::Ready);
        let cards: Vec<IncentiveCard> = self
            .filter
            .apply(&self.incentives)
            .into_iter()
            .map(|i| IncentiveCard::new(i, self.language))
            .collect();
        let warning = if loading { None } else { self.filter.warning() };
        let empty_message =
            (ready && warning.is_none() && cards.is_empty()).then_some(NO_MATCH_MESSAGE);

        Some(SidebarView {
            subtitle: format!("Details about {title}"),
            title,
            loading,
            error: match &self.status {
                Some(SidebarStatus::Failed(msg)) => Some(msg.clone()),
                _ => None,
            },
            language: self.language.code(),
            filter_summary: self.filter.summary_label(),
            options: self
                .filter
                .options()
                .iter()
                .copied()
                .map(|label| FilterOption {
                    label,
                    selected: self.filter.is_selected(label),
                })
                .collect(),
            warning,
            empty_message,
            cards,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use foundation::FeatureId;
    use incentives::NO_FILTER_WARNING;
    use pretty_assertions::assert_eq;
    use regions::RegionKind;
    use serde_json::json;

    pub(crate) fn response() -> IncentivesResponse {
        serde_json::from_value(json!({
            "incentives": [
                {
                    "id": "TX-1",
                    "program": "Austin Energy Heat Pump Rebate",
                    "payment_methods": ["rebate", "pos_rebate"],
                    "items": ["ducted_heat_pump", "ductless_heat_pump"],
                    "amount": {"type": "dollar_amount", "number": 1500},
                    "short_description": {
                        "en": "Up to $1,500 for a qualifying heat pump.",
                        "es": "Hasta $1,500 por una bomba de calor."
                    },
                    "eligible_geo_group": "austin-energy",
                    "low_income": "tx-austin-cap",
                    "more_info_url": {"en": "https://example.org/en", "es": "https://example.org/es"}
                },
                {
                    "id": "TX-2",
                    "program": "Federal EV Credit",
                    "payment_methods": ["tax_credit"],
                    "items": ["new_electric_vehicle"],
                    "amount": {"type": "dollar_amount", "number": 7500},
                    "short_description": {"en": "Tax credit for a new EV."}
                }
            ]
        }))
        .expect("response")
    }

    fn travis() -> SelectedRegion {
        SelectedRegion {
            id: FeatureId::new(3),
            kind: RegionKind::County,
            name: "Travis".to_string(),
            state_name: "Texas".to_string(),
            abbreviation: Some("TX"),
        }
    }

    fn fetch_id(effect: Option<Effect>) -> u64 {
        match effect {
            Some(Effect::FetchIncentives { request_id, .. }) => request_id,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn county_fetches_parent_state() {
        let mut sb = Sidebar::new();
        let effect = sb.open(&travis());
        assert_eq!(
            effect,
            Some(Effect::FetchIncentives {
                request_id: 1,
                state: "TX".to_string()
            })
        );
        let view = sb.view().expect("open");
        assert_eq!(view.title, "Travis");
        assert_eq!(view.subtitle, "Details about Travis");
        assert!(view.loading);
        assert_eq!(view.warning, None);
    }

    #[test]
    fn cards_follow_filter_and_language() {
        let mut sb = Sidebar::new();
        let id = fetch_id(sb.open(&travis()));
        assert!(sb.receive(id, Ok(response())));

        let view = sb.view().expect("open");
        assert_eq!(view.filter_summary, "2 options selected");
        assert_eq!(view.cards.len(), 2);
        let card = &view.cards[0];
        assert_eq!(card.chips, vec!["Rebate", "Upfront discount"]);
        assert_eq!(card.headline, "Austin Energy Heat Pump Rebate");
        assert_eq!(card.subheadline, "austin-energy");
        assert_eq!(card.warning_chip, Some("Income Qualified"));
        assert_eq!(view.cards[1].subheadline, "");
        assert_eq!(view.cards[1].warning_chip, None);

        sb.set_language(Language::Es);
        sb.filter_mut().toggle("Electric transportation");
        let view = sb.view().expect("open");
        assert_eq!(view.language, "ES");
        assert_eq!(view.filter_summary, "1 option selected");
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].body, "Hasta $1,500 por una bomba de calor.");
        assert_eq!(
            view.cards[0].more_info_url.as_deref(),
            Some("https://example.org/es")
        );
    }

    #[test]
    fn no_categories_selected_shows_warning_only() {
        let mut sb = Sidebar::new();
        let id = fetch_id(sb.open(&travis()));
        sb.receive(id, Ok(response()));
        sb.filter_mut().clear_all();
        let view = sb.view().expect("open");
        assert!(view.cards.is_empty());
        assert_eq!(view.warning, Some(NO_FILTER_WARNING));
        assert_eq!(view.empty_message, None);
        assert_eq!(view.filter_summary, "Select options");
    }

    #[test]
    fn empty_result_lists_all_categories() {
        let mut sb = Sidebar::new();
        let id = fetch_id(sb.open(&travis()));
        sb.receive(id, Ok(IncentivesResponse::default()));
        let view = sb.view().expect("open");
        assert_eq!(view.options.len(), 10);
        assert!(view.options.iter().all(|o| o.selected));
        assert_eq!(view.empty_message, Some(NO_MATCH_MESSAGE));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut sb = Sidebar::new();
        let first = fetch_id(sb.open(&travis()));
        let second = fetch_id(sb.open(&travis()));
        assert_ne!(first, second);
        assert!(!sb.receive(first, Ok(response())));
        assert_eq!(sb.status(), Some(&SidebarStatus::Loading));
        assert!(sb.receive(second, Err(ApiError::Transport("offline".to_string()))));
        let view = sb.view().expect("open");
        assert_eq!(view.error.as_deref(), Some("request failed: offline"));
        assert!(view.cards.is_empty());
    }

    #[test]
    fn close_hides_panel() {
        let mut sb = Sidebar::new();
        let id = fetch_id(sb.open(&travis()));
        sb.close();
        assert!(sb.view().is_none());
        assert!(!sb.receive(id, Ok(response())));
    }
}
