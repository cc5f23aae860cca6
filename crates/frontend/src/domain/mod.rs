pub mod a001_bank;
pub mod a002_state;
pub mod a003_city;
pub mod a004_location;
pub mod a005_datacenter;
pub mod a006_asset_category;
pub mod a007_asset_type;
pub mod a008_cost_category;
pub mod a009_cost_type;
pub mod a010_cost_item;
pub mod a011_vendor_type;
pub mod a012_vendor;
pub mod a013_payee;
pub mod a014_payment_detail;
pub mod a015_managed_project;
pub mod a016_site_code_generator;
pub mod registry;
