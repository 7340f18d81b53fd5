/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Route configuration: which patterns map to which driver and child-router
//! targets for one router instance. Loaded from json5 files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::WILDCARD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read route configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse route configuration: {0}")]
    Parse(#[from] json5::Error),
}

/// Per-router route table configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    pub id: String,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One route entry: the patterns it serves and the targets serving them.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub patterns: Vec<String>,
    pub targets: Vec<TargetConfig>,
}

/// A configured execution target, either a locally bound driver or a child
/// router, referenced by id.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TargetConfig {
    Driver { id: String },
    Router { id: String },
}

impl RouterConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(contents)?)
    }

    /// Patterns of every route whose targets name `driver_id` (or the
    /// wildcard driver id).
    pub fn driver_patterns(&self, driver_id: &str) -> Vec<String> {
        self.target_patterns(|target| match target {
            TargetConfig::Driver { id } => id == driver_id || id == WILDCARD,
            TargetConfig::Router { .. } => false,
        })
    }

    /// Patterns of every route whose targets name the child router
    /// `router_id`.
    pub fn router_patterns(&self, router_id: &str) -> Vec<String> {
        self.target_patterns(|target| match target {
            TargetConfig::Router { id } => id == router_id,
            TargetConfig::Driver { .. } => false,
        })
    }

    fn target_patterns(&self, matches: impl Fn(&TargetConfig) -> bool) -> Vec<String> {
        let mut patterns: Vec<String> = Vec::new();
        for route in &self.routes {
            if route.targets.iter().any(&matches) {
                for pattern in &route.patterns {
                    if !patterns.contains(pattern) {
                        patterns.push(pattern.clone());
                    }
                }
            }
        }
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::RouterConfig;

    const CONFIG: &str = r#"
    {
        id: "gateway",
        routes: [
            {
                patterns: ["Sources.*", "Definitions.*"],
                targets: [
                    { type: "driver", id: "sqlite-main" },
                    { type: "router", id: "warehouse" },
                ],
            },
            {
                patterns: ["Blobs.*"],
                targets: [{ type: "driver", id: "filesystem" }],
            },
        ],
    }
    "#;

    #[test]
    fn parses_json5_route_tables() {
        let config = RouterConfig::parse(CONFIG).expect("config should parse");
        assert_eq!(config.id, "gateway");
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn driver_patterns_collect_matching_routes_only() {
        let config = RouterConfig::parse(CONFIG).expect("config should parse");

        let sqlite = config.driver_patterns("sqlite-main");
        assert_eq!(sqlite, vec!["Sources.*".to_string(), "Definitions.*".to_string()]);

        let filesystem = config.driver_patterns("filesystem");
        assert_eq!(filesystem, vec!["Blobs.*".to_string()]);

        assert!(config.driver_patterns("unknown").is_empty());
    }

    #[test]
    fn router_patterns_collect_matching_routes_only() {
        let config = RouterConfig::parse(CONFIG).expect("config should parse");
        assert_eq!(
            config.router_patterns("warehouse"),
            vec!["Sources.*".to_string(), "Definitions.*".to_string()]
        );
        assert!(config.router_patterns("unknown").is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let invalid = r#"{ id: "gateway", unexpected: true }"#;
        assert!(RouterConfig::parse(invalid).is_err());
    }
}
