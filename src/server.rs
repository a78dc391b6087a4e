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

use anyhow::Result;
use axum::http::{self, header, HeaderValue};
use axum::{routing::get, Extension, Router};
use log::{info, warn};
use std::path::PathBuf;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api::middleware::WriteAccess;
use crate::config::{load_config_file, ShelfServerConfig};
use crate::routing::{self, DocumentInfo, Fragment};
use crate::store::BookStore;

pub struct ShelfServer {
    config: ShelfServerConfig,
    config_file_path: Option<String>,
}

impl ShelfServer {
    /// Create a new ShelfServer from a configuration file
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let config = load_config_file(&config_path)?;
        Ok(Self {
            config,
            config_file_path: Some(config_path.to_string_lossy().to_string()),
        })
    }

    /// Create a ShelfServer from an in-memory configuration
    pub fn from_config(config: ShelfServerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            config_file_path: None,
        })
    }

    pub fn config(&self) -> &ShelfServerConfig {
        &self.config
    }

    /// Build the application router with a freshly seeded store.
    pub fn build_app(&self) -> Result<Router> {
        self.build_app_with_store(BookStore::with_seed_data())
    }

    /// Build the application router around the given store.
    ///
    /// Route groups are built first; their fragments are aggregated into the
    /// OpenAPI document before the routers are mounted, so the served
    /// document and the live routes always come from the same definitions.
    pub fn build_app_with_store(&self, store: BookStore) -> Result<Router> {
        let groups = vec![api::v1::books().build()?];

        let fragments: Vec<Fragment> = groups.iter().map(|g| g.fragment().clone()).collect();
        let server_url = match &self.config.app.public_url {
            Some(url) => url.clone(),
            None => format!(
                "http://{}:{}",
                self.config.server.host, self.config.server.port
            ),
        };
        let doc_info = DocumentInfo::new(&self.config.app.name, &self.config.app.version)
            .server_url(&server_url);
        let openapi = routing::merge(&doc_info, &fragments);

        let mut app = Router::new().route("/health", get(api::handlers::health_check));
        for group in &groups {
            app = group.attach(app);
        }

        let app = app
            .merge(
                SwaggerUi::new(self.config.docs.path.clone()).url("/openapi.json", openapi),
            )
            .fallback(api::handlers::not_found)
            .layer(Extension(store))
            .layer(Extension(WriteAccess {
                enabled: !self.config.server.read_only,
            }))
            .layer(self.cors_layer()?)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ));

        Ok(app)
    }

    fn cors_layer(&self) -> Result<CorsLayer> {
        if self.config.cors.allowed_origins.is_empty() {
            return Ok(CorsLayer::permissive());
        }
        let origins = self
            .config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{origin}': {e}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::PATCH,
                http::Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
    }

    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Shelf Server");
        if let Some(config_file) = &self.config_file_path {
            println!("  Config file: {config_file}");
        }
        println!("  API Port: {}", self.config.server.port);
        println!(
            "  Log level: {}",
            std::env::var("RUST_LOG").unwrap_or_else(|_| self.config.server.log_level.clone())
        );
        info!("Initializing Shelf Server");

        if self.config.server.read_only {
            warn!("Server is in READ-ONLY mode.");
            warn!("Books cannot be created, updated, or deleted via the API.");
        }

        let app = self.build_app()?;

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        info!("Starting web API on {addr}");
        info!("API v1 available at http://{addr}/v1/");
        info!(
            "API documentation available at http://{addr}{}/",
            self.config.docs.path
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;

        info!("Shelf Server stopped");
        Ok(())
    }
}
