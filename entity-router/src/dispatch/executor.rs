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

//! Target execution engine.
//!
//! Runs one request against the resolved target list under the capability's
//! fan-out policy, measuring the dispatch with a single stopwatch and folding
//! per-target failures into the envelope without aborting siblings. Driver
//! and router invocations are supplied as closures so the engine never
//! inspects capability types itself.

use std::collections::HashSet;
use std::future::Future;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::dispatch::request::RouteRequest;
use crate::dispatch::response::{ResultKind, RouteOption, RouteResponse, RouteResult};
use crate::observability::events;
use crate::routing::{DriverTarget, FanOutPolicy, RouterTarget, Target};
use crate::subscriptions::EntityConsumer;

const COMPONENT: &str = "executor";

/// Builds the no-route response: one `RouteNotConfigured` result per query,
/// or a single one keyed by the request id when the request carried none.
fn no_route<T>(router_id: &str, request: &RouteRequest) -> Vec<RouteResult<T>> {
    if request.queries.is_empty() {
        vec![RouteResult::route_not_configured(router_id, &request.id)]
    } else {
        request
            .queries
            .iter()
            .map(|query| RouteResult::route_not_configured(router_id, query))
            .collect()
    }
}

fn fold<T>(
    results: &mut Vec<RouteResult<T>>,
    options: &mut Vec<RouteOption<T>>,
    response: RouteResponse<T>,
) {
    results.extend(response.results);
    options.extend(response.options);
}

/// De-duplicates `Ok` results by the caller-supplied identity key, keeping
/// the first occurrence. Non-`Ok` results are always retained.
fn dedup_results<T>(results: &mut Vec<RouteResult<T>>, key: fn(&T) -> &str) {
    let mut seen: HashSet<String> = HashSet::new();
    results.retain(|result| match &result.content {
        Some(content) => seen.insert(key(content).to_string()),
        None => true,
    });
}

/// De-duplicates options by `(kind, request)`.
fn dedup_options<T>(options: &mut Vec<RouteOption<T>>) {
    let mut seen: HashSet<String> = HashSet::new();
    options.retain(|option| seen.insert(format!("{:?}:{}", option.kind, option.request)));
}

/// Runs the ordered fallback chain over child routers: sequential attempts,
/// first non-failed response wins; when none succeeds every attempt's
/// failure detail is retained.
async fn run_fallback_chain<T, RF, RFut>(
    router_id: &str,
    request: &RouteRequest,
    routers: Vec<RouterTarget>,
    router_fn: RF,
) -> (Vec<RouteResult<T>>, Vec<RouteOption<T>>)
where
    RF: Fn(RouterTarget) -> RFut,
    RFut: Future<Output = RouteResponse<T>>,
{
    let mut failed_results = Vec::new();
    let mut failed_options = Vec::new();

    for target in routers {
        let target_id = target.id.clone();
        let target_pattern = target.pattern.clone();
        let response = router_fn(target).await;
        if response.success() {
            return (response.results, response.options);
        }
        warn!(
            event = events::TARGET_FALLBACK_NEXT,
            component = COMPONENT,
            router_id,
            correlation_id = %request.id,
            operation = request.name,
            target = %target_id,
            pattern = %target_pattern,
            "child router failed, trying next in chain"
        );
        fold(&mut failed_results, &mut failed_options, response);
    }

    (failed_results, failed_options)
}

/// Runs `request` against `targets` under `policy`.
///
/// Local drivers are invoked with `driver_fn` (concurrently for `Merge`/`All`,
/// sequentially for `First`); child routers are invoked with `router_fn` as an
/// ordered fallback chain. `dedup_key` supplies the identity used to merge
/// read fan-out results.
pub(crate) async fn run<D, T, DF, RF, DFut, RFut>(
    router_id: &str,
    request: &RouteRequest,
    policy: FanOutPolicy,
    targets: Vec<Target<D>>,
    dedup_key: Option<fn(&T) -> &str>,
    driver_fn: DF,
    router_fn: RF,
) -> RouteResponse<T>
where
    D: ?Sized,
    DF: Fn(DriverTarget<D>) -> DFut,
    RF: Fn(RouterTarget) -> RFut,
    DFut: Future<Output = RouteResponse<T>>,
    RFut: Future<Output = RouteResponse<T>>,
{
    let started = Instant::now();
    debug!(
        event = events::DISPATCH_START,
        component = COMPONENT,
        router_id,
        correlation_id = %request.id,
        operation = request.name,
        "request received"
    );

    if targets.is_empty() {
        warn!(
            event = events::DISPATCH_NO_ROUTE,
            component = COMPONENT,
            router_id,
            correlation_id = %request.id,
            operation = request.name,
            "no local driver bound and no child router reachable"
        );
        return RouteResponse::new(no_route(router_id, request), started.elapsed());
    }

    let mut drivers = Vec::new();
    let mut routers = Vec::new();
    for target in targets {
        match target {
            Target::Driver(driver) => drivers.push(driver),
            Target::Router(router) => routers.push(router),
        }
    }

    let mut results = Vec::new();
    let mut options = Vec::new();

    if !drivers.is_empty() {
        match policy {
            FanOutPolicy::First => {
                let mut failed_results = Vec::new();
                let mut failed_options = Vec::new();
                let mut succeeded = false;
                for target in drivers {
                    let target_id = target.id.clone();
                    let response = driver_fn(target).await;
                    // A driver only wins when it produced content; a clean
                    // not-found falls through to the next redundant backend.
                    if response.success()
                        && response.results.iter().any(|r| r.kind == ResultKind::Ok)
                    {
                        results = response.results;
                        options = response.options;
                        succeeded = true;
                        break;
                    }
                    if !response.success() {
                        warn!(
                            event = events::TARGET_FAILED,
                            component = COMPONENT,
                            router_id,
                            correlation_id = %request.id,
                            operation = request.name,
                            target = %target_id,
                            "driver target failed"
                        );
                    }
                    fold(&mut failed_results, &mut failed_options, response);
                }
                if !succeeded {
                    results = failed_results;
                    options = failed_options;
                }
            }
            FanOutPolicy::Merge | FanOutPolicy::All => {
                let target_ids: Vec<String> = drivers.iter().map(|d| d.id.clone()).collect();
                let responses = join_all(drivers.into_iter().map(&driver_fn)).await;
                for (target_id, response) in target_ids.into_iter().zip(responses) {
                    if !response.success() {
                        warn!(
                            event = events::TARGET_FAILED,
                            component = COMPONENT,
                            router_id,
                            correlation_id = %request.id,
                            operation = request.name,
                            target = %target_id,
                            "driver target failed"
                        );
                    }
                    fold(&mut results, &mut options, response);
                }
            }
        }
    } else {
        let (chain_results, chain_options) =
            run_fallback_chain(router_id, request, routers, router_fn).await;
        results = chain_results;
        options = chain_options;
    }

    if policy == FanOutPolicy::Merge {
        if let Some(key) = dedup_key {
            dedup_results(&mut results, key);
        }
    }
    dedup_options(&mut options);

    let response = RouteResponse::with_options(results, started.elapsed(), options);
    let completion_event = if response.success() {
        events::DISPATCH_OK
    } else {
        events::DISPATCH_FAILED
    };
    let duration_ms = response.duration.as_millis() as u64;
    debug!(
        event = completion_event,
        component = COMPONENT,
        router_id,
        correlation_id = %request.id,
        operation = request.name,
        duration_ms,
        "request completed"
    );
    response
}

/// Subscribe-shaped execution: collects one consumer per driver target (or
/// the first child router that yields one) and merges them into a single
/// consumer kept open until dropped or cancelled.
pub(crate) async fn subscribe<D, T, DF, RF, DFut, RFut>(
    router_id: &str,
    request: &RouteRequest,
    targets: Vec<Target<D>>,
    driver_fn: DF,
    router_fn: RF,
) -> RouteResponse<EntityConsumer<T>>
where
    D: ?Sized,
    T: Send + 'static,
    DF: Fn(DriverTarget<D>) -> DFut,
    RF: Fn(RouterTarget) -> RFut,
    DFut: Future<Output = RouteResponse<EntityConsumer<T>>>,
    RFut: Future<Output = RouteResponse<EntityConsumer<T>>>,
{
    let started = Instant::now();

    if targets.is_empty() {
        warn!(
            event = events::DISPATCH_NO_ROUTE,
            component = COMPONENT,
            router_id,
            correlation_id = %request.id,
            operation = request.name,
            "no local driver bound and no child router reachable"
        );
        return RouteResponse::new(no_route(router_id, request), started.elapsed());
    }

    let mut drivers = Vec::new();
    let mut routers = Vec::new();
    for target in targets {
        match target {
            Target::Driver(driver) => drivers.push(driver),
            Target::Router(router) => routers.push(router),
        }
    }

    let mut consumers = Vec::new();
    let mut failures: Vec<RouteResult<EntityConsumer<T>>> = Vec::new();

    if !drivers.is_empty() {
        let target_ids: Vec<String> = drivers.iter().map(|d| d.id.clone()).collect();
        let responses = join_all(drivers.into_iter().map(&driver_fn)).await;
        for (target_id, response) in target_ids.into_iter().zip(responses) {
            if response.success() {
                consumers.extend(response.into_contents());
            } else {
                warn!(
                    event = events::TARGET_FAILED,
                    component = COMPONENT,
                    router_id,
                    correlation_id = %request.id,
                    operation = request.name,
                    target = %target_id,
                    "driver subscription failed"
                );
                failures.extend(response.results);
            }
        }
    } else {
        let (chain_results, _) = run_fallback_chain(router_id, request, routers, router_fn).await;
        let mut chain_ok = Vec::new();
        for result in chain_results {
            if result.kind.is_error() {
                failures.push(result);
            } else {
                chain_ok.push(result);
            }
        }
        consumers.extend(chain_ok.into_iter().filter_map(|r| r.content));
    }

    let mut results = failures;
    if !consumers.is_empty() {
        let consumer = if consumers.len() == 1 {
            consumers.remove(0)
        } else {
            EntityConsumer::merge(consumers)
        };
        results = vec![RouteResult::ok(router_id, &request.id, consumer)];
    }

    RouteResponse::new(results, started.elapsed())
}
