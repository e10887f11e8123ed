//! async-graphql extensions: request telemetry and production error masking.

use std::{
    sync::{Arc, OnceLock},
    time::Instant,
};

use async_graphql::{
    extensions::{
        Extension, ExtensionContext, ExtensionFactory, NextExecute, NextParseQuery,
        NextRequest, NextResolve, NextSubscribe, NextValidation, ResolveInfo,
    },
    parser::types::{DocumentOperations, ExecutableDocument, OperationType},
    Response, ServerError, ServerResult, ValidationResult, Value, Variables,
};
use futures_util::{stream::BoxStream, StreamExt};
use tracing::{field::Empty, Instrument};
use tracker_telemetry::{
    add_span_event,
    constants::{
        ANONYMOUS_OPERATION, ATTR_GRAPHQL_FIELD_NAME, ATTR_GRAPHQL_OPERATION_NAME,
        ATTR_GRAPHQL_OPERATION_TYPE, ATTR_GRAPHQL_TYPE_NAME,
    },
    record_span_attributes,
};
use uuid::Uuid;

use crate::{context::RequestContext, metrics::GatewayMetrics};

/// Message that replaces hidden execution errors
pub const MASKED_ERROR_MESSAGE: &str = "Unexpected error.";

const UNKNOWN_OPERATION: &str = "unknown";
const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Operation picked out of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
struct OperationInfo {
    ty: &'static str,
    name: String,
}

impl OperationInfo {
    fn unknown() -> Self {
        Self {
            ty: UNKNOWN_OPERATION,
            name: ANONYMOUS_OPERATION.to_string(),
        }
    }

    /// The operation `requested` by name, or the document's only operation.
    /// Several operations and no name is `unknown`; execution rejects it.
    fn select(document: &ExecutableDocument, requested: Option<&str>) -> Self {
        match &document.operations {
            DocumentOperations::Single(op) => Self {
                ty: operation_type(op.node.ty),
                name: requested.unwrap_or(ANONYMOUS_OPERATION).to_string(),
            },
            DocumentOperations::Multiple(ops) => {
                let found = match requested {
                    Some(name) => ops.iter().find(|(n, _)| n.as_str() == name),
                    None if ops.len() == 1 => ops.iter().next(),
                    None => None,
                };
                found
                    .map(|(name, op)| Self {
                        ty: operation_type(op.node.ty),
                        name: name.to_string(),
                    })
                    .unwrap_or_else(Self::unknown)
            }
        }
    }
}

fn operation_type(ty: OperationType) -> &'static str {
    match ty {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}

/// Spans and metrics for every GraphQL request
pub struct Telemetry {
    metrics: GatewayMetrics,
}

impl Telemetry {
    pub fn new(metrics: GatewayMetrics) -> Self {
        Self { metrics }
    }
}

impl ExtensionFactory for Telemetry {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(TelemetryExtension {
            metrics: self.metrics,
            document: OnceLock::new(),
            operation: OnceLock::new(),
        })
    }
}

struct TelemetryExtension {
    metrics: GatewayMetrics,
    document: OnceLock<Option<ExecutableDocument>>,
    operation: OnceLock<OperationInfo>,
}

impl TelemetryExtension {
    fn operation(&self) -> OperationInfo {
        self.operation
            .get()
            .cloned()
            .unwrap_or_else(OperationInfo::unknown)
    }
}

fn error_code(error: &ServerError) -> &str {
    error
        .extensions
        .as_ref()
        .and_then(|extensions| extensions.get("code"))
        .and_then(|code| match code {
            Value::String(code) => Some(code.as_str()),
            Value::Enum(code) => Some(code.as_str()),
            _ => None,
        })
        .unwrap_or(UNKNOWN_ERROR_CODE)
}

#[async_trait::async_trait]
impl Extension for TelemetryExtension {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let span = tracing::info_span!("graphql.parse");
        let result = next.run(ctx, query, variables).instrument(span).await;

        // keep the document so execute can resolve the operation by name
        let _ = self.document.set(result.as_ref().ok().cloned());

        result
    }

    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        let span = tracing::info_span!("graphql.validate");
        next.run(ctx).instrument(span).await
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let request = ctx.data_opt::<RequestContext>();
        let request_id = request.map(|r| r.request_id).unwrap_or_else(Uuid::new_v4);
        let start = request.map(|r| r.start).unwrap_or_else(Instant::now);

        let operation = match self.document.get() {
            Some(Some(document)) => OperationInfo::select(document, operation_name),
            _ => OperationInfo::unknown(),
        };
        let _ = self.operation.set(operation.clone());

        let span = tracing::info_span!(
            "graphql.execute",
            "request.id" = %request_id,
            "graphql.operation.type" = Empty,
            "graphql.operation.name" = Empty,
            "graphql.errors.count" = Empty,
            "graphql.request.duration_ms" = Empty,
        );
        record_span_attributes(
            &span,
            &[
                (ATTR_GRAPHQL_OPERATION_TYPE, operation.ty),
                (ATTR_GRAPHQL_OPERATION_NAME, operation.name.as_str()),
            ],
        );

        let response = next.run(ctx, operation_name).instrument(span.clone()).await;
        let duration = start.elapsed();

        self.metrics
            .record_request(operation.ty, &operation.name, response.errors.is_empty());
        self.metrics
            .record_request_duration(duration, operation.ty, &operation.name);
        for error in &response.errors {
            self.metrics
                .record_error(error_code(error), operation.ty, &operation.name);
        }

        span.record("graphql.errors.count", response.errors.len());
        span.record("graphql.request.duration_ms", duration.as_millis() as u64);

        response
    }

    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        // only root fields are resolvers of their own; nested fields just read
        // from their parent object. Root `__schema`/`__type` arrive without the
        // introspection flag, only their children carry it.
        if info.is_for_introspection
            || info.name.starts_with("__")
            || info.path_node.parent.is_some()
        {
            return next.run(ctx, info).await;
        }

        let field_name = info.name.to_string();
        let type_name = info.parent_type.to_string();
        let resolver_name = format!("{}.{}", type_name, field_name);
        let operation = self.operation();

        let span = tracing::info_span!(
            "graphql.resolver",
            "resolver.name" = %resolver_name,
            "graphql.field.name" = Empty,
            "graphql.type.name" = Empty,
            "graphql.operation.type" = Empty,
            "graphql.operation.name" = Empty,
        );
        record_span_attributes(
            &span,
            &[
                (ATTR_GRAPHQL_FIELD_NAME, field_name.as_str()),
                (ATTR_GRAPHQL_TYPE_NAME, type_name.as_str()),
                (ATTR_GRAPHQL_OPERATION_TYPE, operation.ty),
                (ATTR_GRAPHQL_OPERATION_NAME, operation.name.as_str()),
            ],
        );

        let start = Instant::now();
        let result = next.run(ctx, info).instrument(span.clone()).await;
        self.metrics
            .record_resolver_duration(start.elapsed(), &field_name, &type_name);

        match &result {
            Ok(_) => span.in_scope(|| {
                add_span_event(
                    "resolver.completed",
                    &[
                        ("resolver.name", resolver_name.as_str()),
                        ("resolver.success", "true"),
                    ],
                )
            }),
            Err(e) => {
                span.in_scope(|| {
                    add_span_event(
                        "resolver.error",
                        &[
                            ("resolver.name", resolver_name.as_str()),
                            ("error.message", e.message.as_str()),
                        ],
                    )
                });
                self.metrics
                    .record_error(&resolver_name, operation.ty, &operation.name);
            }
        }

        result
    }
}

/// Replaces the message of execution errors that carry no extensions, so
/// internal failures are not leaked to clients. Applies to single responses
/// and to every response of a subscription stream. Parse and validation
/// errors have no path and pass through.
pub struct MaskErrors;

impl ExtensionFactory for MaskErrors {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(MaskErrorsExtension)
    }
}

struct MaskErrorsExtension;

fn mask(response: &mut Response) {
    for error in &mut response.errors {
        if !error.path.is_empty() && error.extensions.is_none() {
            error.message = MASKED_ERROR_MESSAGE.to_string();
        }
    }
}

#[async_trait::async_trait]
impl Extension for MaskErrorsExtension {
    async fn request(&self, ctx: &ExtensionContext<'_>, next: NextRequest<'_>) -> Response {
        let mut response = next.run(ctx).await;
        mask(&mut response);
        response
    }

    fn subscribe<'s>(
        &self,
        ctx: &ExtensionContext<'_>,
        stream: BoxStream<'s, Response>,
        next: NextSubscribe<'_>,
    ) -> BoxStream<'s, Response> {
        next.run(ctx, stream)
            .map(|mut response| {
                mask(&mut response);
                response
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::parser::parse_query;

    use super::*;

    fn select(query: &str, requested: Option<&str>) -> OperationInfo {
        let document = parse_query(query).unwrap();
        OperationInfo::select(&document, requested)
    }

    #[test]
    fn anonymous_operation() {
        assert_eq!(
            select("{ wallets { totalCount } }", None),
            OperationInfo {
                ty: "query",
                name: "anonymous".to_string()
            }
        );
    }

    #[test]
    fn named_operation_by_request() {
        let query = r#"
            query Wallets { wallets { totalCount } }
            mutation Sync { syncAllWallets { totalWallets } }
        "#;

        assert_eq!(
            select(query, Some("Sync")),
            OperationInfo {
                ty: "mutation",
                name: "Sync".to_string()
            }
        );
        assert_eq!(select(query, Some("Missing")), OperationInfo::unknown());
        assert_eq!(select(query, None), OperationInfo::unknown());
    }

    #[test]
    fn single_named_operation() {
        let info = select("mutation AddWallet { removeWallet(address: \"0x1\", chain: BASE) }", None);
        assert_eq!(info.ty, "mutation");
        assert_eq!(info.name, "AddWallet");
    }

    #[test]
    fn masks_only_path_errors_without_extensions() {
        let mut execution = ServerError::new("db exploded", None);
        execution.path = vec![async_graphql::PathSegment::Field("wallet".to_string())];

        let mut coded = execution.clone();
        let mut extensions = async_graphql::ErrorExtensionValues::default();
        extensions.set("code", "BAD_USER_INPUT".to_string());
        coded.extensions = Some(extensions);

        let parse = ServerError::new("Unexpected end of input", None);

        let mut response = Response::from_errors(vec![execution, coded, parse]);
        mask(&mut response);

        assert_eq!(response.errors[0].message, MASKED_ERROR_MESSAGE);
        assert_eq!(response.errors[1].message, "db exploded");
        assert_eq!(response.errors[2].message, "Unexpected end of input");
    }

    #[test]
    fn error_code_defaults_to_unknown() {
        let mut error = ServerError::new("boom", None);
        assert_eq!(error_code(&error), "UNKNOWN_ERROR");

        let mut extensions = async_graphql::ErrorExtensionValues::default();
        extensions.set("code", "FORBIDDEN".to_string());
        error.extensions = Some(extensions);
        assert_eq!(error_code(&error), "FORBIDDEN");
    }
}
