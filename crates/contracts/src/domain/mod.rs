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
pub mod common;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::FormData;
    use crate::shared::metadata::FieldType;

    /// Every optional free-text field of `F`, set to blank input, must be left
    /// out of the payload; a real value must reach it under the field's name.
    fn check_optional_text<F: FormData>() -> usize {
        let optional_text = F::field_metadata().iter().filter(|field| {
            field.visible_in_form()
                && field.is_optional()
                && matches!(
                    field.field_type,
                    FieldType::Text | FieldType::LongText | FieldType::Date | FieldType::Enum
                )
        });
        let mut checked = 0;
        for field in optional_text {
            let mut form = F::default();
            form.set_value(field.name, "   ");
            form.normalize();
            let payload = serde_json::to_value(&form).unwrap();
            assert!(
                payload.get(field.name).is_none(),
                "{}: blank {} was sent as {:?}",
                std::any::type_name::<F>(),
                field.name,
                payload.get(field.name)
            );

            let mut form = F::default();
            form.set_value(field.name, "X1");
            form.normalize();
            let payload = serde_json::to_value(&form).unwrap();
            assert_eq!(
                payload.get(field.name).and_then(|v| v.as_str()),
                Some("X1"),
                "{}: {} lost its value",
                std::any::type_name::<F>(),
                field.name
            );
            checked += 1;
        }
        checked
    }

    #[test]
    fn test_blank_optional_text_is_never_sent() {
        let counts = [
            check_optional_text::<a001_bank::aggregate::BankForm>(),
            check_optional_text::<a002_state::aggregate::StateForm>(),
            check_optional_text::<a003_city::aggregate::CityForm>(),
            check_optional_text::<a004_location::aggregate::LocationForm>(),
            check_optional_text::<a005_datacenter::aggregate::DatacenterForm>(),
            check_optional_text::<a006_asset_category::aggregate::AssetCategoryForm>(),
            check_optional_text::<a007_asset_type::aggregate::AssetTypeForm>(),
            check_optional_text::<a008_cost_category::aggregate::CostCategoryForm>(),
            check_optional_text::<a009_cost_type::aggregate::CostTypeForm>(),
            check_optional_text::<a010_cost_item::aggregate::CostItemForm>(),
            check_optional_text::<a011_vendor_type::aggregate::VendorTypeForm>(),
            check_optional_text::<a012_vendor::aggregate::VendorForm>(),
            check_optional_text::<a013_payee::aggregate::PayeeForm>(),
            check_optional_text::<a014_payment_detail::aggregate::PaymentDetailForm>(),
            check_optional_text::<a015_managed_project::aggregate::ManagedProjectForm>(),
            check_optional_text::<a016_site_code_generator::aggregate::SiteCodeGeneratorForm>(),
        ];
        // a field dropped from the metadata would silently shrink the check
        assert_eq!(counts.iter().sum::<usize>(), 21);
    }
}
