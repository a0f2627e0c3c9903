use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Ceilings on the combinatorial search performed by the intersection finder and the
/// term builder. `None` leaves the corresponding dimension unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExpansionLimits {
    /// Maximum number of members intersected to reach one subset.
    pub max_depth: Option<usize>,
    /// Maximum number of distinct subsets recorded by a single search.
    pub max_subsets: Option<usize>,
}

impl ExpansionLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(max_depth: Option<usize>, max_subsets: Option<usize>) -> Self {
        Self {
            max_depth,
            max_subsets,
        }
    }
}

/// What to do with k-mers whose inclusion-exclusion contributions cancel to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZeroCoefficientPolicy {
    /// Leave them out of the expression; they need not be evaluated.
    #[default]
    Drop,
    /// Keep them with a coefficient of zero, for auditing.
    Retain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionConfig {
    pub truncation_order: usize,
    pub include_lower_orders: bool,
    pub limits: ExpansionLimits,
    pub zero_policy: ZeroCoefficientPolicy,
}

#[derive(Default)]
pub struct ExpansionConfigBuilder {
    truncation_order: Option<usize>,
    include_lower_orders: Option<bool>,
    max_depth: Option<usize>,
    max_subsets: Option<usize>,
    zero_policy: Option<ZeroCoefficientPolicy>,
}

impl ExpansionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncation_order(mut self, order: usize) -> Self {
        self.truncation_order = Some(order);
        self
    }
    pub fn include_lower_orders(mut self, include: bool) -> Self {
        self.include_lower_orders = Some(include);
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
    pub fn max_subsets(mut self, count: usize) -> Self {
        self.max_subsets = Some(count);
        self
    }
    pub fn zero_policy(mut self, policy: ZeroCoefficientPolicy) -> Self {
        self.zero_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<ExpansionConfig, ConfigError> {
        let truncation_order = self
            .truncation_order
            .ok_or(ConfigError::MissingParameter("truncation_order"))?;
        if truncation_order == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "truncation_order",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_depth",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        if self.max_subsets == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_subsets",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        Ok(ExpansionConfig {
            truncation_order,
            include_lower_orders: self.include_lower_orders.unwrap_or(false),
            limits: ExpansionLimits::new(self.max_depth, self.max_subsets),
            zero_policy: self.zero_policy.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_a_truncation_order() {
        let result = ExpansionConfigBuilder::new().build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("truncation_order")
        );
    }

    #[test]
    fn build_fills_optional_fields_with_defaults() {
        let config = ExpansionConfigBuilder::new()
            .truncation_order(2)
            .build()
            .unwrap();
        assert_eq!(config.truncation_order, 2);
        assert!(!config.include_lower_orders);
        assert_eq!(config.limits, ExpansionLimits::unbounded());
        assert_eq!(config.zero_policy, ZeroCoefficientPolicy::Drop);
    }

    #[test]
    fn build_carries_every_explicit_setting() {
        let config = ExpansionConfigBuilder::new()
            .truncation_order(3)
            .include_lower_orders(true)
            .max_depth(4)
            .max_subsets(1000)
            .zero_policy(ZeroCoefficientPolicy::Retain)
            .build()
            .unwrap();
        assert!(config.include_lower_orders);
        assert_eq!(config.limits, ExpansionLimits::new(Some(4), Some(1000)));
        assert_eq!(config.zero_policy, ZeroCoefficientPolicy::Retain);
    }

    #[test]
    fn zero_valued_parameters_are_rejected() {
        let zero_order = ExpansionConfigBuilder::new().truncation_order(0).build();
        assert!(matches!(
            zero_order,
            Err(ConfigError::InvalidParameter {
                name: "truncation_order",
                ..
            })
        ));

        let zero_depth = ExpansionConfigBuilder::new()
            .truncation_order(1)
            .max_depth(0)
            .build();
        assert!(matches!(
            zero_depth,
            Err(ConfigError::InvalidParameter {
                name: "max_depth",
                ..
            })
        ));

        let zero_subsets = ExpansionConfigBuilder::new()
            .truncation_order(1)
            .max_subsets(0)
            .build();
        assert!(matches!(
            zero_subsets,
            Err(ConfigError::InvalidParameter {
                name: "max_subsets",
                ..
            })
        ));
    }
}
