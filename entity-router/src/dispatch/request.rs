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

use uuid::Uuid;

/// One routed operation: a name for tracing, a correlation id, and the
/// operation-specific queries (uuids, query strings, delete targets).
///
/// The correlation id is caller-supplied or generated exactly once at
/// construction, before any target is attempted, and is immutable for the
/// lifetime of the external call; every nested or delegated invocation
/// carries it unchanged.
#[derive(Clone, Debug)]
pub struct RouteRequest {
    pub name: &'static str,
    pub id: String,
    pub queries: Vec<String>,
}

impl RouteRequest {
    pub fn new(name: &'static str, id: Option<String>, queries: Vec<String>) -> Self {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        Self { name, id, queries }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteRequest;

    #[test]
    fn generates_an_id_only_when_absent() {
        let supplied = RouteRequest::new("Read", Some("caller-id".to_string()), vec![]);
        assert_eq!(supplied.id, "caller-id");

        let generated = RouteRequest::new("Read", None, vec![]);
        assert!(!generated.id.is_empty());

        let other = RouteRequest::new("Read", None, vec![]);
        assert_ne!(generated.id, other.id);
    }
}
