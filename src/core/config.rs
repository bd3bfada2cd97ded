use serde::{Deserialize, Serialize};

/// Effective validation behavior for one top-level call.
///
/// The defaults reproduce the historical (lenient) behavior; every flag can be
/// flipped per schema through its `validation` block or per call through
/// caller options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationSettings {
    pub replace_values: bool,
    pub all_properties_are_nullable_by_default: bool,
    pub treat_empty_strings_like_undefined_values: bool,
    pub objects_can_have_any_additional_properties_by_default: bool,
    pub remove_unrecognized_properties_from_objects: bool,
    pub remove_null_values_from_objects: bool,
    pub allow_numbers_to_be_strings: bool,
    pub allow_number_formats_with_no_equivalent_representation_in_javascript: bool,
    pub allow_integer_values_which_may_be_parsed_incorrectly: bool,
    pub strict_date_parsing: bool,
    pub allow_string_representations_of_booleans: bool,
    pub allow_strings_to_have_unreliable_date_format: bool,
    pub improved_error_messages: bool,
    pub throw_errors_when_schema_is_invalid: bool,
    pub allow_schemas_with_invalid_types_and_treat_them_like_refs: bool,
    pub request_body_can_have_two_contradictory_schemas: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            replace_values: true,
            all_properties_are_nullable_by_default: true,
            treat_empty_strings_like_undefined_values: true,
            objects_can_have_any_additional_properties_by_default: true,
            remove_unrecognized_properties_from_objects: false,
            remove_null_values_from_objects: false,
            allow_numbers_to_be_strings: true,
            allow_number_formats_with_no_equivalent_representation_in_javascript: true,
            allow_integer_values_which_may_be_parsed_incorrectly: true,
            strict_date_parsing: false,
            allow_string_representations_of_booleans: true,
            allow_strings_to_have_unreliable_date_format: true,
            improved_error_messages: false,
            throw_errors_when_schema_is_invalid: false,
            allow_schemas_with_invalid_types_and_treat_them_like_refs: true,
            request_body_can_have_two_contradictory_schemas: true,
        }
    }
}

/// Partial settings: a schema's `validation` block or caller-supplied options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_properties_are_nullable_by_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treat_empty_strings_like_undefined_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects_can_have_any_additional_properties_by_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_unrecognized_properties_from_objects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_null_values_from_objects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_numbers_to_be_strings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_number_formats_with_no_equivalent_representation_in_javascript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_integer_values_which_may_be_parsed_incorrectly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_date_parsing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_string_representations_of_booleans: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_strings_to_have_unreliable_date_format: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_error_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throw_errors_when_schema_is_invalid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_schemas_with_invalid_types_and_treat_them_like_refs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body_can_have_two_contradictory_schemas: Option<bool>,
}

macro_rules! apply_overrides {
    ($settings:expr, $overrides:expr, $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                $settings.$field = value;
            }
        )*
    };
}

impl ValidationSettings {
    /// Merges, in increasing priority: defaults, the schema's `validation`
    /// block, then caller options.
    pub fn resolve(schema: Option<&SettingsOverrides>, options: Option<&SettingsOverrides>) -> Self {
        let mut settings = Self::default();
        for overrides in [schema, options].into_iter().flatten() {
            settings.apply(overrides);
        }
        settings
    }

    pub fn apply(&mut self, overrides: &SettingsOverrides) {
        apply_overrides!(
            self,
            overrides,
            replace_values,
            all_properties_are_nullable_by_default,
            treat_empty_strings_like_undefined_values,
            objects_can_have_any_additional_properties_by_default,
            remove_unrecognized_properties_from_objects,
            remove_null_values_from_objects,
            allow_numbers_to_be_strings,
            allow_number_formats_with_no_equivalent_representation_in_javascript,
            allow_integer_values_which_may_be_parsed_incorrectly,
            strict_date_parsing,
            allow_string_representations_of_booleans,
            allow_strings_to_have_unreliable_date_format,
            improved_error_messages,
            throw_errors_when_schema_is_invalid,
            allow_schemas_with_invalid_types_and_treat_them_like_refs,
            request_body_can_have_two_contradictory_schemas,
        );
    }

    /// Settings with every legacy-compatibility behavior switched off.
    pub fn strict() -> Self {
        Self {
            replace_values: true,
            all_properties_are_nullable_by_default: false,
            treat_empty_strings_like_undefined_values: false,
            objects_can_have_any_additional_properties_by_default: false,
            remove_unrecognized_properties_from_objects: false,
            remove_null_values_from_objects: false,
            allow_numbers_to_be_strings: false,
            allow_number_formats_with_no_equivalent_representation_in_javascript: false,
            allow_integer_values_which_may_be_parsed_incorrectly: false,
            strict_date_parsing: true,
            allow_string_representations_of_booleans: false,
            allow_strings_to_have_unreliable_date_format: false,
            improved_error_messages: true,
            throw_errors_when_schema_is_invalid: true,
            allow_schemas_with_invalid_types_and_treat_them_like_refs: false,
            request_body_can_have_two_contradictory_schemas: false,
        }
    }

    pub fn with_improved_error_messages(mut self, enabled: bool) -> Self {
        self.improved_error_messages = enabled;
        self
    }

    pub fn with_throw_errors_when_schema_is_invalid(mut self, enabled: bool) -> Self {
        self.throw_errors_when_schema_is_invalid = enabled;
        self
    }

    pub fn with_replace_values(mut self, enabled: bool) -> Self {
        self.replace_values = enabled;
        self
    }
}

impl SettingsOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn improved_error_messages(mut self, enabled: bool) -> Self {
        self.improved_error_messages = Some(enabled);
        self
    }

    pub fn throw_errors_when_schema_is_invalid(mut self, enabled: bool) -> Self {
        self.throw_errors_when_schema_is_invalid = Some(enabled);
        self
    }

    pub fn replace_values(mut self, enabled: bool) -> Self {
        self.replace_values = Some(enabled);
        self
    }

    pub fn strict_date_parsing(mut self, enabled: bool) -> Self {
        self.strict_date_parsing = Some(enabled);
        self
    }

    pub fn all_properties_are_nullable_by_default(mut self, enabled: bool) -> Self {
        self.all_properties_are_nullable_by_default = Some(enabled);
        self
    }

    pub fn remove_unrecognized_properties_from_objects(mut self, enabled: bool) -> Self {
        self.remove_unrecognized_properties_from_objects = Some(enabled);
        self
    }

    pub fn remove_null_values_from_objects(mut self, enabled: bool) -> Self {
        self.remove_null_values_from_objects = Some(enabled);
        self
    }

    pub fn objects_can_have_any_additional_properties_by_default(mut self, enabled: bool) -> Self {
        self.objects_can_have_any_additional_properties_by_default = Some(enabled);
        self
    }

    pub fn allow_integer_values_which_may_be_parsed_incorrectly(mut self, enabled: bool) -> Self {
        self.allow_integer_values_which_may_be_parsed_incorrectly = Some(enabled);
        self
    }

    pub fn allow_schemas_with_invalid_types_and_treat_them_like_refs(
        mut self,
        enabled: bool,
    ) -> Self {
        self.allow_schemas_with_invalid_types_and_treat_them_like_refs = Some(enabled);
        self
    }

    pub fn request_body_can_have_two_contradictory_schemas(mut self, enabled: bool) -> Self {
        self.request_body_can_have_two_contradictory_schemas = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_legacy_compatible() {
        let settings = ValidationSettings::default();
        assert!(settings.replace_values);
        assert!(settings.allow_numbers_to_be_strings);
        assert!(!settings.improved_error_messages);
        assert!(!settings.throw_errors_when_schema_is_invalid);
        assert!(!settings.strict_date_parsing);
    }

    #[test]
    fn test_caller_options_override_schema_block() {
        let schema_block = SettingsOverrides::new()
            .improved_error_messages(true)
            .strict_date_parsing(true);
        let options = SettingsOverrides::new().improved_error_messages(false);

        let settings = ValidationSettings::resolve(Some(&schema_block), Some(&options));
        assert!(!settings.improved_error_messages);
        assert!(settings.strict_date_parsing);
        assert!(settings.replace_values);
    }

    #[test]
    fn test_overrides_deserialize_from_camel_case() {
        let overrides: SettingsOverrides = serde_json::from_value(json!({
            "removeNullValuesFromObjects": true,
            "allowNumbersToBeStrings": false
        }))
        .unwrap();

        let settings = ValidationSettings::resolve(Some(&overrides), None);
        assert!(settings.remove_null_values_from_objects);
        assert!(!settings.allow_numbers_to_be_strings);
    }

    #[test]
    fn test_strict_flips_legacy_behaviors() {
        let settings = ValidationSettings::strict();
        assert!(settings.throw_errors_when_schema_is_invalid);
        assert!(!settings.allow_schemas_with_invalid_types_and_treat_them_like_refs);
    }
}
