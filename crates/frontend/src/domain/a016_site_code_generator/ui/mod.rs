pub mod list;
pub mod site_code;
