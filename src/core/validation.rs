//! Configuration validation support.

use crate::core::{AutoScalingGroup, Configuration};
use crate::error::{GroupViolation, ValidationError};

/// Trait for configuration validation.
///
/// Validation is a predicate over an existing value: it never builds or
/// rewrites anything, and it reports only the first violation found.
///
/// # Examples
///
/// ```rust
/// use scaleout_config::core::{AutoScalingGroup, Configuration, Validate};
/// use scaleout_config::error::ValidationError;
///
/// let mut config = Configuration::default();
/// assert_eq!(config.validate(), Err(ValidationError::EmptyEventName));
///
/// config.event_name = "blackfriday".to_string();
/// config
///     .auto_scaling_groups
///     .push(AutoScalingGroup::new("backend-asg", 30, "sa-east-1"));
/// assert!(config.validate().is_ok());
/// ```
pub trait Validate {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for Configuration {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.event_name.is_empty() {
            return Err(ValidationError::EmptyEventName);
        }
        if self.auto_scaling_groups.is_empty() {
            return Err(ValidationError::EmptyAutoScalingGroups);
        }
        for (index, group) in self.auto_scaling_groups.iter().enumerate() {
            validate_auto_scaling_group(group)
                .map_err(|violation| ValidationError::invalid_group(index, violation))?;
        }
        Ok(())
    }
}

/// Checks a single group: `Name` first, then `Growth`.
pub(crate) fn validate_auto_scaling_group(group: &AutoScalingGroup) -> Result<(), GroupViolation> {
    if group.name.is_empty() {
        return Err(GroupViolation::EmptyName);
    }
    if group.growth <= 0 {
        return Err(GroupViolation::NonPositiveGrowth(group.growth));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use proptest::prelude::*;

    fn backend() -> AutoScalingGroup {
        AutoScalingGroup::new("backend-asg", 30, "sa-east-1").with_profile("default")
    }

    #[test]
    fn test_invalid_configuration_progression() {
        let mut config = Configuration::default();
        assert_eq!(config.validate(), Err(ValidationError::EmptyEventName));

        config.event_name = "Blackfriday".to_string();
        assert_eq!(config.validate(), Err(ValidationError::EmptyAutoScalingGroups));

        config.auto_scaling_groups.push(backend());
        assert_eq!(config.validate(), Ok(()));

        config.auto_scaling_groups.push(AutoScalingGroup {
            name: String::new(),
            growth: 30,
            region: "sa-east-1".to_string(),
            profile: "default".to_string(),
        });
        assert_eq!(
            config.validate(),
            Err(ValidationError::invalid_group(1, GroupViolation::EmptyName))
        );

        let last = config.auto_scaling_groups.last_mut().unwrap();
        last.name = "group".to_string();
        last.growth = 0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::invalid_group(1, GroupViolation::NonPositiveGrowth(0)))
        );

        config.auto_scaling_groups.last_mut().unwrap().growth = -1;
        assert_eq!(
            config.validate(),
            Err(ValidationError::invalid_group(1, GroupViolation::NonPositiveGrowth(-1)))
        );
    }

    #[test]
    fn test_event_name_checked_before_groups() {
        let config = Configuration {
            event_name: String::new(),
            auto_scaling_groups: vec![AutoScalingGroup::default()],
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyEventName);
        assert_eq!(err.stage(), Stage::ValidateConfiguration);
    }

    #[test]
    fn test_first_failing_group_wins() {
        let config = Configuration {
            event_name: "launch".to_string(),
            auto_scaling_groups: vec![
                backend(),
                AutoScalingGroup::new("", 0, "sa-east-1"),
                AutoScalingGroup::new("", -5, "sa-east-1"),
            ],
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::invalid_group(1, GroupViolation::EmptyName))
        );
    }

    #[test]
    fn test_name_checked_before_growth() {
        let group = AutoScalingGroup::new("", 0, "sa-east-1");
        assert_eq!(
            validate_auto_scaling_group(&group),
            Err(GroupViolation::EmptyName)
        );
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let config = Configuration {
            event_name: "launch".to_string(),
            auto_scaling_groups: vec![backend(), backend()],
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_growth_messages_match_for_zero_and_negative() {
        let zero = ValidationError::invalid_group(0, GroupViolation::NonPositiveGrowth(0));
        let negative = ValidationError::invalid_group(0, GroupViolation::NonPositiveGrowth(-9));
        assert_eq!(zero.to_string(), negative.to_string());
    }

    proptest! {
        #[test]
        fn prop_positive_growth_is_valid(growth in 1i64..=i64::MAX) {
            let group = AutoScalingGroup::new("api", growth, "us-east-1");
            prop_assert!(validate_auto_scaling_group(&group).is_ok());
        }

        #[test]
        fn prop_non_positive_growth_is_rejected(growth in i64::MIN..=0i64) {
            let group = AutoScalingGroup::new("api", growth, "us-east-1");
            prop_assert_eq!(
                validate_auto_scaling_group(&group),
                Err(GroupViolation::NonPositiveGrowth(growth))
            );
        }
    }
}
