// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses MEALWAVE_* variables over component defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::cache::CacheConfig;
use anyhow::{Context, Result};
use mealwave_core::constants::env_config;
use mealwave_intelligence::IntelligenceConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default)]
pub struct MealwaveConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Wave model, threshold and planner settings
    pub intelligence: IntelligenceConfig,
    /// Threshold store settings
    pub cache: CacheConfig,
}

impl MealwaveConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not parse or the resulting
    /// configuration fails validation
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            environment: Environment::from_str_or_default(
                &env::var("ENVIRONMENT").unwrap_or_default(),
            ),
            ..Self::default()
        };
        config.apply_planner_overrides()?;
        config.apply_threshold_overrides()?;
        config.apply_cache_overrides()?;
        config.validate()?;

        info!(
            environment = %config.environment,
            pre_sleep_buffer_hours = config.intelligence.planner.pre_sleep_buffer_hours,
            single_meal_ceiling_kcal = config.intelligence.planner.single_meal_ceiling_kcal,
            cache_max_entries = config.cache.max_entries,
            "Configuration loaded from environment"
        );
        Ok(config)
    }

    fn apply_planner_overrides(&mut self) -> Result<()> {
        let planner = &mut self.intelligence.planner;
        override_from_env(
            env_config::PRE_SLEEP_BUFFER_HOURS,
            &mut planner.pre_sleep_buffer_hours,
        )?;
        override_from_env(
            env_config::FAT_BURN_WINDOW_MIN,
            &mut planner.fat_burn_window_min,
        )?;
        override_from_env(
            env_config::SINGLE_MEAL_CEILING_KCAL,
            &mut planner.single_meal_ceiling_kcal,
        )?;
        override_from_env(
            env_config::FORCE_SPLIT_GAP_HOURS,
            &mut planner.force_split_gap_hours,
        )?;
        override_from_env(
            env_config::CIRCADIAN_PEAK_HOUR,
            &mut self.intelligence.wave.circadian.peak_hour,
        )
    }

    fn apply_threshold_overrides(&mut self) -> Result<()> {
        let ttl = &mut self.intelligence.thresholds.ttl;
        override_from_env(env_config::THRESHOLD_BASE_TTL_HOURS, &mut ttl.base_hours)?;
        override_from_env(env_config::THRESHOLD_MAX_TTL_HOURS, &mut ttl.max_hours)
    }

    fn apply_cache_overrides(&mut self) -> Result<()> {
        override_from_env(env_config::CACHE_MAX_ENTRIES, &mut self.cache.max_entries)?;
        if let Some(hours) = parse_env::<u64>(env_config::CACHE_RETENTION_HOURS)? {
            self.cache.retention = Duration::from_secs(hours * 3600);
        }
        if let Some(secs) = parse_env::<u64>(env_config::CACHE_CLEANUP_INTERVAL_SECS)? {
            self.cache.cleanup_interval = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Validate the component settings and the cache retention
    ///
    /// # Errors
    ///
    /// Returns an error if any component is inconsistent, or if cached
    /// threshold sets would be evicted before their adaptive TTL runs out
    pub fn validate(&self) -> Result<()> {
        self.intelligence
            .validate()
            .context("Invalid intelligence configuration")?;
        let max_ttl_secs = self.intelligence.thresholds.ttl.max_hours * 3600.0;
        if self.cache.retention.as_secs_f64() < max_ttl_secs {
            anyhow::bail!(
                "Cache retention ({}s) must cover the maximum threshold TTL ({max_ttl_secs}s)",
                self.cache.retention.as_secs()
            );
        }
        Ok(())
    }
}

/// Parse an environment variable, `None` when unset or blank
fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {key} value: {raw}"))?;
            debug!(key, raw = %raw, "Applied environment override");
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

fn override_from_env<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    if let Some(value) = parse_env(key)? {
        *target = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_default_config_validates() {
        assert!(MealwaveConfig::default().validate().is_ok());
    }
}
