//! User-facing incentive categories and the API item keys they cover.

use std::collections::BTreeSet;

use crate::model::Incentive;

pub const INCENTIVE_CATEGORIES: [(&str, &[&str]); 10] = [
    (
        "Clothes dryer",
        &["heat_pump_clothes_dryer", "non_heat_pump_clothes_dryer"],
    ),
    ("Cooking stove/range", &["electric_stove"]),
    (
        "Electric transportation",
        &[
            "ebike",
            "electric_vehicle_charger",
            "new_electric_vehicle",
            "new_plugin_hybrid_vehicle",
            "used_electric_vehicle",
            "used_plugin_hybrid_vehicle",
        ],
    ),
    (
        "Electrical panel & wiring",
        &["electric_panel", "electric_wiring", "electric_service_upgrades"],
    ),
    (
        "Heating, ventilation & cooling",
        &[
            "air_to_water_heat_pump",
            "central_air_conditioner",
            "ducted_heat_pump",
            "ductless_heat_pump",
            "electric_thermal_storage_and_slab",
            "evaporative_cooler",
            "geothermal_heating_installation",
            "smart_thermostat",
            "whole_house_fan",
            "integrated_heat_pump_controls",
            "other_heat_pump",
        ],
    ),
    (
        "Water heater",
        &[
            "heat_pump_water_heater",
            "non_heat_pump_water_heater",
            "solar_water_heater",
        ],
    ),
    (
        "Weatherization & efficiency",
        &[
            "attic_or_roof_insulation",
            "basement_insulation",
            "cool_roof",
            "crawlspace_insulation",
            "floor_insulation",
            "wall_insulation",
            "other_insulation",
            "air_sealing",
            "door_replacement",
            "duct_replacement",
            "duct_sealing",
            "window_replacement",
            "solar_screen_films",
            "other_weatherization",
            "efficiency_rebates",
            "energy_audit",
        ],
    ),
    ("Battery storage", &["battery_storage_installation"]),
    ("Lawn Care", &["electric_outdoor_equipment"]),
    ("Solar", &["rooftop_solar_installation"]),
];

/// Category an API item key belongs to, by exact key match.
pub fn category_for_item(item: &str) -> Option<&'static str> {
    INCENTIVE_CATEGORIES
        .iter()
        .find(|(_, items)| items.contains(&item))
        .map(|(category, _)| *category)
}

/// All category names in table order.
pub fn all_category_names() -> Vec<&'static str> {
    INCENTIVE_CATEGORIES.iter().map(|(name, _)| *name).collect()
}

/// Categories covered by any item of any incentive, sorted.
pub fn categories_present(incentives: &[Incentive]) -> BTreeSet<&'static str> {
    incentives
        .iter()
        .flat_map(|i| i.items.iter())
        .filter_map(|item| category_for_item(item))
        .collect()
}

pub fn incentive_in_categories(incentive: &Incentive, categories: &[&str]) -> bool {
    incentive
        .items
        .iter()
        .filter_map(|item| category_for_item(item))
        .any(|c| categories.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::sample_response;

    #[test]
    fn maps_items_to_categories() {
        assert_eq!(category_for_item("ebike"), Some("Electric transportation"));
        assert_eq!(category_for_item("smart_thermostat"), Some("Heating, ventilation & cooling"));
        assert_eq!(category_for_item("hovercraft"), None);
    }

    #[test]
    fn items_belong_to_one_category() {
        let mut seen = std::collections::HashSet::new();
        for (_, items) in INCENTIVE_CATEGORIES {
            for item in items {
                assert!(seen.insert(*item), "duplicate item {item}");
            }
        }
    }

    #[test]
    fn collects_sorted_categories_from_items() {
        let resp = sample_response();
        let got: Vec<&str> = categories_present(&resp.incentives).into_iter().collect();
        assert_eq!(
            got,
            vec![
                "Clothes dryer",
                "Cooking stove/range",
                "Heating, ventilation & cooling",
                "Solar",
                "Water heater",
            ]
        );
    }

    #[test]
    fn all_names_keep_table_order() {
        let names = all_category_names();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Clothes dryer");
        assert_eq!(names[9], "Solar");
    }
}
