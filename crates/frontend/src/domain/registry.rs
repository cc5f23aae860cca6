//! The master-data collections known to the console: navigation, page
//! dispatch by route key and foreign-key candidate lookup.

use crate::domain::a001_bank::ui::list::BankList;
use crate::domain::a002_state::ui::list::StateList;
use crate::domain::a003_city::ui::list::CityList;
use crate::domain::a004_location::ui::list::LocationList;
use crate::domain::a005_datacenter::ui::list::DatacenterList;
use crate::domain::a006_asset_category::ui::list::AssetCategoryList;
use crate::domain::a007_asset_type::ui::list::AssetTypeList;
use crate::domain::a008_cost_category::ui::list::CostCategoryList;
use crate::domain::a009_cost_type::ui::list::CostTypeList;
use crate::domain::a010_cost_item::ui::list::CostItemList;
use crate::domain::a011_vendor_type::ui::list::VendorTypeList;
use crate::domain::a012_vendor::ui::list::VendorList;
use crate::domain::a013_payee::ui::list::PayeeList;
use crate::domain::a014_payment_detail::ui::list::PaymentDetailList;
use crate::domain::a015_managed_project::ui::list::ManagedProjectList;
use crate::domain::a016_site_code_generator::ui::list::SiteCodeGeneratorList;
use crate::shared::master_data::query_cache::QueryCache;
use crate::shared::master_data::resolver::ReferenceOption;
use crate::shared::master_data::{ApiError, MasterDataModule};
use crate::shared::services::AppServices;
use contracts::domain::common::{AggregateRoot, CollectionSpec};
use contracts::domain::{
    a001_bank, a002_state, a003_city, a004_location, a005_datacenter, a006_asset_category,
    a007_asset_type, a008_cost_category, a009_cost_type, a010_cost_item, a011_vendor_type,
    a012_vendor, a013_payee, a014_payment_detail, a015_managed_project, a016_site_code_generator,
};
use contracts::shared::metadata::FieldMetadata;
use leptos::prelude::*;

pub struct NavGroup {
    pub label: &'static str,
    pub icon: &'static str,
    pub collections: &'static [&'static CollectionSpec],
}

pub const NAV_GROUPS: &[NavGroup] = &[
    NavGroup {
        label: "Geography",
        icon: "map",
        collections: &[
            &a002_state::aggregate::COLLECTION,
            &a003_city::aggregate::COLLECTION,
            &a004_location::aggregate::COLLECTION,
            &a005_datacenter::aggregate::COLLECTION,
        ],
    },
    NavGroup {
        label: "Assets",
        icon: "box",
        collections: &[
            &a006_asset_category::aggregate::COLLECTION,
            &a007_asset_type::aggregate::COLLECTION,
        ],
    },
    NavGroup {
        label: "Costs",
        icon: "receipt",
        collections: &[
            &a008_cost_category::aggregate::COLLECTION,
            &a009_cost_type::aggregate::COLLECTION,
            &a010_cost_item::aggregate::COLLECTION,
        ],
    },
    NavGroup {
        label: "Vendors & Payments",
        icon: "truck",
        collections: &[
            &a011_vendor_type::aggregate::COLLECTION,
            &a012_vendor::aggregate::COLLECTION,
            &a013_payee::aggregate::COLLECTION,
            &a014_payment_detail::aggregate::COLLECTION,
            &a001_bank::aggregate::COLLECTION,
        ],
    },
    NavGroup {
        label: "Projects",
        icon: "briefcase",
        collections: &[
            &a015_managed_project::aggregate::COLLECTION,
            &a016_site_code_generator::aggregate::COLLECTION,
        ],
    },
];

/// Every collection with its field metadata, in module order
pub const CATALOGUE: &[(&CollectionSpec, &[FieldMetadata])] = &[
    (&a001_bank::aggregate::COLLECTION, a001_bank::aggregate::FIELDS),
    (&a002_state::aggregate::COLLECTION, a002_state::aggregate::FIELDS),
    (&a003_city::aggregate::COLLECTION, a003_city::aggregate::FIELDS),
    (&a004_location::aggregate::COLLECTION, a004_location::aggregate::FIELDS),
    (&a005_datacenter::aggregate::COLLECTION, a005_datacenter::aggregate::FIELDS),
    (&a006_asset_category::aggregate::COLLECTION, a006_asset_category::aggregate::FIELDS),
    (&a007_asset_type::aggregate::COLLECTION, a007_asset_type::aggregate::FIELDS),
    (&a008_cost_category::aggregate::COLLECTION, a008_cost_category::aggregate::FIELDS),
    (&a009_cost_type::aggregate::COLLECTION, a009_cost_type::aggregate::FIELDS),
    (&a010_cost_item::aggregate::COLLECTION, a010_cost_item::aggregate::FIELDS),
    (&a011_vendor_type::aggregate::COLLECTION, a011_vendor_type::aggregate::FIELDS),
    (&a012_vendor::aggregate::COLLECTION, a012_vendor::aggregate::FIELDS),
    (&a013_payee::aggregate::COLLECTION, a013_payee::aggregate::FIELDS),
    (&a014_payment_detail::aggregate::COLLECTION, a014_payment_detail::aggregate::FIELDS),
    (&a015_managed_project::aggregate::COLLECTION, a015_managed_project::aggregate::FIELDS),
    (
        &a016_site_code_generator::aggregate::COLLECTION,
        a016_site_code_generator::aggregate::FIELDS,
    ),
];

pub fn find_collection(key: &str) -> Option<&'static CollectionSpec> {
    CATALOGUE
        .iter()
        .map(|(collection, _)| *collection)
        .find(|c| c.key == key)
}

/// Rows carry display names of the records they reference, so a change to
/// the referenced collection invalidates the referencing one too
pub fn link_references(cache: &QueryCache) {
    for (collection, fields) in CATALOGUE {
        for target in fields.iter().filter_map(|f| f.referenced_aggregate()) {
            cache.link(target, collection.key);
        }
    }
}

/// Page of the collection behind a route key
pub fn collection_page(key: &str, services: AppServices) -> Option<AnyView> {
    let view = match key {
        "banks" => view! { <BankList services=services /> }.into_any(),
        "states" => view! { <StateList services=services /> }.into_any(),
        "cities" => view! { <CityList services=services /> }.into_any(),
        "locations" => view! { <LocationList services=services /> }.into_any(),
        "datacenters" => view! { <DatacenterList services=services /> }.into_any(),
        "asset-categories" => view! { <AssetCategoryList services=services /> }.into_any(),
        "asset-types" => view! { <AssetTypeList services=services /> }.into_any(),
        "cost-categories" => view! { <CostCategoryList services=services /> }.into_any(),
        "cost-types" => view! { <CostTypeList services=services /> }.into_any(),
        "cost-items" => view! { <CostItemList services=services /> }.into_any(),
        "vendor-types" => view! { <VendorTypeList services=services /> }.into_any(),
        "vendors" => view! { <VendorList services=services /> }.into_any(),
        "payees" => view! { <PayeeList services=services /> }.into_any(),
        "payment-details" => view! { <PaymentDetailList services=services /> }.into_any(),
        "managed-projects" => view! { <ManagedProjectList services=services /> }.into_any(),
        "site-code-generators" => view! { <SiteCodeGeneratorList services=services /> }.into_any(),
        _ => return None,
    };
    Some(view)
}

async fn options_of<E: AggregateRoot>(
    services: &AppServices,
    term: &str,
    selected_id: Option<i64>,
) -> Result<Vec<ReferenceOption>, ApiError> {
    MasterDataModule::<E>::new(services)
        .resolver()
        .options(term, selected_id)
        .await
}

/// Combobox candidates of the collection `key`, keeping `selected_id` present
pub async fn reference_options(
    services: &AppServices,
    key: &str,
    term: &str,
    selected_id: Option<i64>,
) -> Result<Vec<ReferenceOption>, ApiError> {
    use contracts::domain::a001_bank::aggregate::Bank;
    use contracts::domain::a002_state::aggregate::State;
    use contracts::domain::a003_city::aggregate::City;
    use contracts::domain::a004_location::aggregate::Location;
    use contracts::domain::a005_datacenter::aggregate::Datacenter;
    use contracts::domain::a006_asset_category::aggregate::AssetCategory;
    use contracts::domain::a007_asset_type::aggregate::AssetType;
    use contracts::domain::a008_cost_category::aggregate::CostCategory;
    use contracts::domain::a009_cost_type::aggregate::CostType;
    use contracts::domain::a010_cost_item::aggregate::CostItem;
    use contracts::domain::a011_vendor_type::aggregate::VendorType;
    use contracts::domain::a012_vendor::aggregate::Vendor;
    use contracts::domain::a013_payee::aggregate::Payee;
    use contracts::domain::a014_payment_detail::aggregate::PaymentDetail;
    use contracts::domain::a015_managed_project::aggregate::ManagedProject;
    use contracts::domain::a016_site_code_generator::aggregate::SiteCodeGenerator;

    match key {
        "banks" => options_of::<Bank>(services, term, selected_id).await,
        "states" => options_of::<State>(services, term, selected_id).await,
        "cities" => options_of::<City>(services, term, selected_id).await,
        "locations" => options_of::<Location>(services, term, selected_id).await,
        "datacenters" => options_of::<Datacenter>(services, term, selected_id).await,
        "asset-categories" => options_of::<AssetCategory>(services, term, selected_id).await,
        "asset-types" => options_of::<AssetType>(services, term, selected_id).await,
        "cost-categories" => options_of::<CostCategory>(services, term, selected_id).await,
        "cost-types" => options_of::<CostType>(services, term, selected_id).await,
        "cost-items" => options_of::<CostItem>(services, term, selected_id).await,
        "vendor-types" => options_of::<VendorType>(services, term, selected_id).await,
        "vendors" => options_of::<Vendor>(services, term, selected_id).await,
        "payees" => options_of::<Payee>(services, term, selected_id).await,
        "payment-details" => options_of::<PaymentDetail>(services, term, selected_id).await,
        "managed-projects" => options_of::<ManagedProject>(services, term, selected_id).await,
        "site-code-generators" => {
            options_of::<SiteCodeGenerator>(services, term, selected_id).await
        }
        other => {
            log::error!("no combobox source registered for '{}'", other);
            Err(ApiError::NotFound(format!("Unknown collection '{}'", other)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = CATALOGUE.iter().map(|(c, _)| c.key).collect();
        assert_eq!(keys.len(), CATALOGUE.len());
    }

    #[test]
    fn test_navigation_lists_every_collection_once() {
        let mut listed: Vec<&str> = NAV_GROUPS
            .iter()
            .flat_map(|g| g.collections.iter().map(|c| c.key))
            .collect();
        listed.sort_unstable();
        let mut all: Vec<&str> = CATALOGUE.iter().map(|(c, _)| c.key).collect();
        all.sort_unstable();
        assert_eq!(listed, all);
    }

    #[test]
    fn test_every_reference_points_to_a_known_collection() {
        for (collection, fields) in CATALOGUE {
            for field in fields.iter() {
                if let Some(target) = field.referenced_aggregate() {
                    assert!(
                        find_collection(target).is_some(),
                        "{}.{} references unknown '{}'",
                        collection.key,
                        field.name,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn test_renaming_a_state_refreshes_cities() {
        use crate::shared::master_data::query_cache::{QueryKey, QueryKind};

        let cache = QueryCache::new();
        link_references(&cache);
        let cities = QueryKey::new("cities", QueryKind::List, "page=0");
        let banks = QueryKey::new("banks", QueryKind::List, "page=0");
        cache.insert_at(cities.clone(), 0, 1_u32);
        cache.insert_at(banks.clone(), 0, 1_u32);

        cache.invalidate("states");

        assert_eq!(cache.get::<u32>(&cities), None);
        assert_eq!(cache.get::<u32>(&banks), Some(1));
    }

    #[test]
    fn test_find_collection() {
        assert_eq!(find_collection("cost-items").map(|c| c.base_path), Some("/api/cost-items"));
        assert!(find_collection("organizations").is_none());
    }
}
