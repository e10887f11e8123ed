use async_graphql::Schema;

use crate::{
    extension::{MaskErrors, Telemetry},
    metrics::GatewayMetrics,
    resolvers::{Mutation, Query, Subscription},
};

pub mod scalars;
pub mod types;

pub type GatewaySchema = Schema<Query, Mutation, Subscription>;

/// Build the schema with telemetry, hiding execution error messages when
/// `masked_errors` is set.
pub fn build_schema(metrics: GatewayMetrics, masked_errors: bool) -> GatewaySchema {
    let mut builder =
        Schema::build(Query, Mutation, Subscription).extension(Telemetry::new(metrics));

    if masked_errors {
        builder = builder.extension(MaskErrors);
    }

    builder.finish()
}
