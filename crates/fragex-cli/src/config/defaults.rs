use super::models::PropertyKind;

pub struct DefaultsConfig {
    pub truncation_order: usize,
    pub include_lower_orders: bool,
    pub keep_zero_terms: bool,
    pub property: PropertyKind,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            truncation_order: 2,
            include_lower_orders: false,
            keep_zero_terms: false,
            property: PropertyKind::Electrons,
        }
    }
}
