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

//! The uniform response envelope returned from every dispatch.

use std::time::Duration;

/// Outcome classification of a single per-target result item.
///
/// `RouteNotConfigured` marks the no-route condition and is distinct from a
/// route that existed but returned nothing (`NotFound`/`Empty`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultKind {
    Ok,
    NotFound,
    Empty,
    BadRequest,
    RouteNotConfigured,
    InternalError,
}

impl ResultKind {
    /// Kinds that mark the producing target as failed.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            ResultKind::BadRequest | ResultKind::RouteNotConfigured | ResultKind::InternalError
        )
    }
}

/// One result item from one target, retaining which target produced it and
/// for which request query.
#[derive(Clone, Debug)]
pub struct RouteResult<T> {
    pub source: String,
    pub request: String,
    pub kind: ResultKind,
    pub content: Option<T>,
    pub message: Option<String>,
}

impl<T> RouteResult<T> {
    pub fn new(
        source: impl Into<String>,
        request: impl Into<String>,
        kind: ResultKind,
        content: Option<T>,
    ) -> Self {
        Self {
            source: source.into(),
            request: request.into(),
            kind,
            content,
            message: None,
        }
    }

    pub fn ok(source: impl Into<String>, request: impl Into<String>, content: T) -> Self {
        Self::new(source, request, ResultKind::Ok, Some(content))
    }

    pub fn not_found(source: impl Into<String>, request: impl Into<String>) -> Self {
        Self::new(source, request, ResultKind::NotFound, None)
    }

    pub fn empty(source: impl Into<String>, request: impl Into<String>) -> Self {
        Self::new(source, request, ResultKind::Empty, None)
    }

    pub fn bad_request(source: impl Into<String>, request: impl Into<String>) -> Self {
        Self::new(source, request, ResultKind::BadRequest, None)
    }

    pub fn route_not_configured(source: impl Into<String>, request: impl Into<String>) -> Self {
        Self::new(source, request, ResultKind::RouteNotConfigured, None)
    }

    pub fn internal_error(
        source: impl Into<String>,
        request: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut result = Self::new(source, request, ResultKind::InternalError, None);
        result.message = Some(message.into());
        result
    }

    /// Re-types a content-less result (failure detail carried across
    /// differently-typed envelopes).
    pub(crate) fn recast<U>(self) -> RouteResult<U> {
        RouteResult {
            source: self.source,
            request: self.request,
            kind: self.kind,
            content: None,
            message: self.message,
        }
    }
}

/// Kind of a deferred follow-up obligation attached to a response.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OptionKind {
    Publish,
    Empty,
}

/// A deferred follow-up obligation: further action the dispatching layer must
/// perform after the primary result, best-effort.
#[derive(Clone, Debug)]
pub struct RouteOption<T> {
    pub kind: OptionKind,
    pub request: String,
    pub argument: Option<T>,
}

impl<T> RouteOption<T> {
    pub fn new(kind: OptionKind, request: impl Into<String>, argument: Option<T>) -> Self {
        Self {
            kind,
            request: request.into(),
            argument,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RouteOption<U> {
        RouteOption {
            kind: self.kind,
            request: self.request,
            argument: self.argument.map(f),
        }
    }
}

/// Ordered result items plus dispatch-side timing and deferred options.
///
/// The duration spans the dispatch only, never time spent waiting for a
/// caller outside the router.
#[derive(Debug)]
pub struct RouteResponse<T> {
    pub results: Vec<RouteResult<T>>,
    pub duration: Duration,
    pub options: Vec<RouteOption<T>>,
}

impl<T> RouteResponse<T> {
    pub fn new(results: Vec<RouteResult<T>>, duration: Duration) -> Self {
        Self {
            results,
            duration,
            options: Vec::new(),
        }
    }

    pub fn with_options(
        results: Vec<RouteResult<T>>,
        duration: Duration,
        options: Vec<RouteOption<T>>,
    ) -> Self {
        Self {
            results,
            duration,
            options,
        }
    }

    /// Builds a response of `Ok` results from one source.
    pub fn ok_array(
        source: &str,
        request: &str,
        contents: impl IntoIterator<Item = T>,
        duration: Duration,
    ) -> Self {
        let results = contents
            .into_iter()
            .map(|content| RouteResult::ok(source, request, content))
            .collect();
        Self::new(results, duration)
    }

    /// True when results are present and none marks its target as failed.
    pub fn success(&self) -> bool {
        !self.results.is_empty() && !self.results.iter().any(|r| r.kind.is_error())
    }

    /// True when any result carries the no-route indication.
    pub fn not_routed(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.kind == ResultKind::RouteNotConfigured)
    }

    /// Contents of the `Ok` results, in envelope order.
    pub fn contents(&self) -> Vec<&T> {
        self.results
            .iter()
            .filter(|r| r.kind == ResultKind::Ok)
            .filter_map(|r| r.content.as_ref())
            .collect()
    }

    /// Consumes the envelope, returning the `Ok` contents in order.
    pub fn into_contents(self) -> Vec<T> {
        self.results
            .into_iter()
            .filter(|r| r.kind == ResultKind::Ok)
            .filter_map(|r| r.content)
            .collect()
    }

    /// Per-target failure detail.
    pub fn failures(&self) -> Vec<&RouteResult<T>> {
        self.results.iter().filter(|r| r.kind.is_error()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ResultKind, RouteResponse, RouteResult};
    use std::time::Duration;

    #[test]
    fn empty_results_are_not_success() {
        let response: RouteResponse<String> = RouteResponse::new(vec![], Duration::ZERO);
        assert!(!response.success());
    }

    #[test]
    fn not_found_results_do_not_fail_the_envelope() {
        let response: RouteResponse<String> = RouteResponse::new(
            vec![RouteResult::not_found("driver-a", "uuid-1")],
            Duration::ZERO,
        );
        assert!(response.success());
        assert!(!response.not_routed());
    }

    #[test]
    fn no_route_is_distinguishable_from_zero_results() {
        let response: RouteResponse<String> = RouteResponse::new(
            vec![RouteResult::route_not_configured("router-a", "uuid-1")],
            Duration::ZERO,
        );
        assert!(!response.success());
        assert!(response.not_routed());
    }

    #[test]
    fn one_failed_target_fails_the_envelope_but_detail_is_retained() {
        let response = RouteResponse::new(
            vec![
                RouteResult::ok("driver-a", "uuid-1", "entity".to_string()),
                RouteResult::internal_error("driver-b", "uuid-1", "disk full"),
            ],
            Duration::ZERO,
        );

        assert!(!response.success());
        let failures = response.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source, "driver-b");
        assert_eq!(failures[0].kind, ResultKind::InternalError);
        assert_eq!(response.contents().len(), 1);
    }
}
