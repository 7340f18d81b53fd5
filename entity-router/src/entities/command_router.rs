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

//! Command-family router: routed command execution.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::dispatch::executor;
use crate::dispatch::{RouteRequest, RouteResponse};
use crate::entities::drivers::{CommandResponse, CommandRunDriver};
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, EntityFamily, Operation, RouterTarget};

const RUN_OPERATION: &str = "Run";

/// Routes command runs to whichever driver claims the command capability.
#[derive(Clone)]
pub struct CommandRouter {
    router: Router,
}

impl CommandRouter {
    pub(crate) fn new(router: Router) -> Self {
        Self { router }
    }

    /// Runs a command. Write-shaped: every matching local driver must accept.
    pub async fn run(
        &self,
        command_id: String,
        parameters: Vec<(String, String)>,
        request_id: Option<String>,
    ) -> RouteResponse<CommandResponse> {
        self.clone()
            .run_boxed(command_id, parameters, request_id)
            .await
    }

    fn run_boxed(
        self,
        command_id: String,
        parameters: Vec<(String, String)>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<CommandResponse>> {
        async move {
            let request = RouteRequest::new(RUN_OPERATION, request_id, vec![command_id.clone()]);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Commands, Operation::Run));
            let targets = self
                .router
                .resolve_targets::<dyn CommandRunDriver>(binding.pattern);

            let driver_fn = {
                let command_id = command_id.clone();
                let parameters = parameters.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn CommandRunDriver>| {
                    let command_id = command_id.clone();
                    let parameters = parameters.clone();
                    let id = id.clone();
                    async move { target.driver.run(&command_id, &parameters, &id).await }
                }
            };
            let router_fn = {
                let command_id = command_id;
                let parameters = parameters;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target.router.commands().run_boxed(
                        command_id.clone(),
                        parameters.clone(),
                        Some(id.clone()),
                    )
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }
}
