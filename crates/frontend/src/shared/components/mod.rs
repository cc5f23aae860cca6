pub mod bulk_upload_dialog;
pub mod delete_dialog;
pub mod drawer;
pub mod entity_form;
pub mod foreign_key_combobox;
pub mod master_data_page;
pub mod pagination_controls;

pub use master_data_page::MasterDataPage;
