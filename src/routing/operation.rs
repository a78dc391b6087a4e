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

//! API metadata carried by a route definition and its translation into an
//! OpenAPI operation object.
//!
//! `build_operation` is a pure transformation: absent summary/description
//! become empty strings, tags fall back to the group tag, parameters are
//! normalized through [`ParamSpec`] defaulting, and a missing response map
//! becomes a single `200: Success` entry. The request body, when present,
//! is passed through verbatim.

use indexmap::IndexMap;
use utoipa::openapi::path::{Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBody;
use utoipa::openapi::response::{Response, ResponsesBuilder};
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::security::SecurityRequirement;
use utoipa::openapi::{RefOr, Required};

/// Location of a request parameter. Defaults to the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    Header,
    Cookie,
}

impl ParamLocation {
    fn parameter_in(self) -> ParameterIn {
        match self {
            ParamLocation::Query => ParameterIn::Query,
            ParamLocation::Path => ParameterIn::Path,
            ParamLocation::Header => ParameterIn::Header,
            ParamLocation::Cookie => ParameterIn::Cookie,
        }
    }
}

/// Author-supplied parameter description with defaulting rules: location
/// `query`, not required, empty description, string schema.
#[derive(Clone)]
pub struct ParamSpec {
    name: String,
    location: ParamLocation,
    required: bool,
    description: String,
    schema: Option<RefOr<Schema>>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::default(),
            required: false,
            description: String::new(),
            schema: None,
        }
    }

    /// Shorthand for a parameter taken from the request path.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name).location(ParamLocation::Path)
    }

    pub fn location(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<RefOr<Schema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    fn into_parameter(self) -> Parameter {
        let schema = self.schema.unwrap_or_else(default_parameter_schema);
        ParameterBuilder::new()
            .name(self.name)
            .parameter_in(self.location.parameter_in())
            .required(if self.required {
                Required::True
            } else {
                Required::False
            })
            .description(Some(self.description))
            .schema(Some(schema))
            .build()
    }
}

fn default_parameter_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(SchemaType::String).build(),
    ))
}

/// Optional structured API metadata attached to a route definition.
///
/// Everything here only affects the derived API description, never request
/// dispatch.
#[derive(Clone, Default)]
pub struct ApiMeta {
    pub(crate) summary: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) parameters: Vec<ParamSpec>,
    pub(crate) request_body: Option<RequestBody>,
    pub(crate) responses: IndexMap<String, Response>,
    pub(crate) security: Option<Vec<SecurityRequirement>>,
    pub(crate) components: IndexMap<String, RefOr<Schema>>,
}

impl ApiMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append a parameter; declaration order is preserved in the operation.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.parameters.push(param);
        self
    }

    /// Attach a request body. It is emitted verbatim, without structural
    /// validation.
    pub fn request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Document a response for the given status code string.
    pub fn response(mut self, status: impl Into<String>, response: Response) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    /// Add a security requirement; emitted only when at least one is set.
    pub fn security(mut self, requirement: SecurityRequirement) -> Self {
        self.security.get_or_insert_with(Vec::new).push(requirement);
        self
    }

    /// Register a named component schema. Accepts the `(name, schema)` pair
    /// produced by `utoipa::ToSchema::schema()`. A later entry for the same
    /// name overwrites the earlier one.
    pub fn component(mut self, schema: (&str, RefOr<Schema>)) -> Self {
        self.components.insert(schema.0.to_string(), schema.1);
        self
    }
}

/// Build the API-description operation for one route.
///
/// `group_tag` is the tag fallback when the route declares none.
pub fn build_operation(meta: &ApiMeta, group_tag: Option<&str>) -> Operation {
    let tags = if meta.tags.is_empty() {
        group_tag.map(|t| vec![t.to_string()]).unwrap_or_default()
    } else {
        meta.tags.clone()
    };

    let responses = if meta.responses.is_empty() {
        ResponsesBuilder::new()
            .response("200", Response::new("Success"))
            .build()
    } else {
        meta.responses
            .iter()
            .fold(ResponsesBuilder::new(), |builder, (status, response)| {
                builder.response(status.clone(), response.clone())
            })
            .build()
    };

    let parameters: Vec<Parameter> = meta
        .parameters
        .iter()
        .map(|p| p.clone().into_parameter())
        .collect();

    let mut operation = OperationBuilder::new().build();
    operation.summary = Some(meta.summary.clone().unwrap_or_default());
    operation.description = Some(meta.description.clone().unwrap_or_default());
    operation.tags = Some(tags);
    operation.parameters = if parameters.is_empty() {
        None
    } else {
        Some(parameters)
    };
    operation.request_body = meta.request_body.clone();
    operation.responses = responses;
    operation.security = meta.security.clone();
    operation
}
