//! Attribute keys following the OpenTelemetry semantic conventions, plus the
//! `crypto.*` keys used across tracker services.

// Service
pub const ATTR_SERVICE_NAME: &str = "service.name";
pub const ATTR_SERVICE_VERSION: &str = "service.version";
pub const ATTR_SERVICE_INSTANCE_ID: &str = "service.instance.id";

// Deployment
pub const ATTR_DEPLOYMENT_ENVIRONMENT_NAME: &str = "deployment.environment.name";

// Host
pub const ATTR_HOST_NAME: &str = "host.name";

// GraphQL
pub const ATTR_GRAPHQL_OPERATION_NAME: &str = "graphql.operation.name";
pub const ATTR_GRAPHQL_OPERATION_TYPE: &str = "graphql.operation.type";
pub const ATTR_GRAPHQL_FIELD_NAME: &str = "graphql.field.name";
pub const ATTR_GRAPHQL_TYPE_NAME: &str = "graphql.type.name";

// Crypto tracker
pub const ATTR_WALLET_ADDRESS: &str = "crypto.wallet.address";
pub const ATTR_WALLET_CHAIN: &str = "crypto.wallet.chain";
pub const ATTR_TRANSACTION_HASH: &str = "crypto.transaction.hash";
pub const ATTR_BLOCK_NUMBER: &str = "crypto.block.number";

/// Operation name recorded when a GraphQL document has none
pub const ANONYMOUS_OPERATION: &str = "anonymous";
