// Copyright 2025 The Shelf Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Declarative route groups.
//!
//! A [`RouteGroup`] collects [`RouteDefinition`]s for one resource and, on
//! [`RouteGroup::build`], derives two artifacts from the same definitions:
//! a live axum [`Router`] mounted under the versioned prefix and an OpenAPI
//! [`Fragment`] keyed by the unversioned canonical paths. Building is
//! fail-fast: a malformed path or unroutable method rejects the whole group
//! before anything is mounted.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use super::document::Fragment;
use super::method::Method;
use super::operation::{build_operation, ApiMeta};
use super::path;

/// Errors detected while building a route group. Any one of these rejects
/// the whole group; no routes are mounted partially.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route path '{path}' in group '{group}' must start with '/'")]
    InvalidPath { group: String, path: String },

    #[error("method {method} on '{path}' in group '{group}' cannot be dispatched")]
    UnsupportedMethod {
        group: String,
        method: Method,
        path: String,
    },
}

type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A type-erased request middleware, the moral equivalent of an axum
/// `middleware::from_fn` closure that can be stored in a route definition.
#[derive(Clone)]
pub struct Middleware(Arc<dyn Fn(Request, Next) -> BoxFuture + Send + Sync + 'static>);

impl Middleware {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(move |req, next| Box::pin(f(req, next))))
    }

    fn layer_onto(&self, router: MethodRouter) -> MethodRouter {
        let mw = self.clone();
        router.layer(middleware::from_fn(move |req: Request, next: Next| {
            (mw.0)(req, next)
        }))
    }
}

type BindFn = Box<dyn FnOnce(MethodFilter) -> MethodRouter + Send>;

/// One route: an HTTP method, a relative path in `:param` syntax, the axum
/// handler, optional middleware, and optional API metadata.
pub struct RouteDefinition {
    method: Method,
    path: String,
    bind: BindFn,
    middleware: Vec<Middleware>,
    api: ApiMeta,
}

impl RouteDefinition {
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method,
            path: path.into(),
            bind: Box::new(move |filter| on(filter, handler)),
            middleware: Vec::new(),
            api: ApiMeta::default(),
        }
    }

    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::Get, path, handler)
    }

    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::Post, path, handler)
    }

    pub fn put<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::Put, path, handler)
    }

    pub fn patch<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::Patch, path, handler)
    }

    pub fn delete<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::Delete, path, handler)
    }

    /// Append a middleware. Middleware run in declaration order, before the
    /// handler, and only for this route.
    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.middleware.push(mw);
        self
    }

    /// Attach API metadata. Affects only the derived document.
    pub fn api(mut self, meta: ApiMeta) -> Self {
        self.api = meta;
        self
    }
}

/// Builder for a versioned group of routes sharing a base path and tag.
pub struct RouteGroup {
    label: String,
    version: Option<u32>,
    base_path: String,
    tag: Option<String>,
    routes: Vec<RouteDefinition>,
}

impl RouteGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            version: None,
            base_path: String::new(),
            tag: None,
            routes: Vec::new(),
        }
    }

    /// Mount the group under `/v{version}`. Without a version the group is
    /// mounted at its base path directly.
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Default tag applied to operations that declare none of their own.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    /// Derive the router and the document fragment from the definitions.
    ///
    /// For a duplicate path and method pair the first definition keeps the
    /// dispatch binding while the later one overwrites the documented
    /// operation; both events are logged at debug level.
    pub fn build(self) -> Result<BuiltGroup, RouteError> {
        let mount_prefix = path::mount_path(self.version, &self.base_path);

        let mut method_routers: IndexMap<String, MethodRouter> = IndexMap::new();
        let mut bound: Vec<(String, Method)> = Vec::new();
        let mut fragment = Fragment::new(&self.label);

        for route in self.routes {
            if !route.path.starts_with('/') {
                return Err(RouteError::InvalidPath {
                    group: self.label.clone(),
                    path: route.path,
                });
            }
            let filter = route.method.dispatch_filter().ok_or_else(|| {
                RouteError::UnsupportedMethod {
                    group: self.label.clone(),
                    method: route.method,
                    path: route.path.clone(),
                }
            })?;

            let dispatch_path = path::join(&mount_prefix, &route.path);
            let api_path = path::to_api_path(&self.base_path, &route.path);

            if bound.contains(&(dispatch_path.clone(), route.method)) {
                debug!(
                    "group '{}': duplicate {} {} keeps the first handler",
                    self.label, route.method, dispatch_path
                );
            } else {
                let mut method_router = (route.bind)(filter);
                for mw in route.middleware.iter().rev() {
                    method_router = mw.layer_onto(method_router);
                }
                match method_routers.shift_remove(&dispatch_path) {
                    Some(existing) => {
                        method_routers.insert(dispatch_path.clone(), existing.merge(method_router));
                    }
                    None => {
                        method_routers.insert(dispatch_path.clone(), method_router);
                    }
                }
                bound.push((dispatch_path, route.method));
            }

            let operation = build_operation(&route.api, self.tag.as_deref());
            let methods = fragment.paths.entry(api_path.clone()).or_default();
            if methods.insert(route.method, operation).is_some() {
                debug!(
                    "group '{}': operation for {} {} overwritten by a later definition",
                    self.label, route.method, api_path
                );
            }
            for (name, schema) in route.api.components {
                fragment.schemas.insert(name, schema);
            }
        }

        let mut router = Router::new();
        for (dispatch_path, method_router) in method_routers {
            router = router.route(&dispatch_path, method_router);
        }

        Ok(BuiltGroup {
            label: fragment.label.clone(),
            mount_prefix,
            router,
            fragment,
        })
    }
}

/// The two artifacts derived from one group: the mounted router and the
/// document fragment. The fragment's path keys never include the version
/// prefix.
pub struct BuiltGroup {
    label: String,
    mount_prefix: String,
    router: Router,
    fragment: Fragment,
}

impl BuiltGroup {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Merge this group's routes into an application router.
    pub fn attach(&self, app: Router) -> Router {
        app.merge(self.router.clone())
    }
}
