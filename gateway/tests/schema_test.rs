use async_graphql::{EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use futures_util::StreamExt;
use gateway::{
    build_schema,
    extension::{MaskErrors, Telemetry, MASKED_ERROR_MESSAGE},
    resolvers::NOT_IMPLEMENTED,
    GatewayMetrics, GatewaySchema,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};

fn schema() -> GatewaySchema {
    build_schema(GatewayMetrics::new(), false)
}

async fn data(schema: &GatewaySchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

#[tokio::test]
async fn wallet_placeholder_satisfies_schema() {
    let data = data(
        &schema(),
        r#"{
            wallet(address: "0xd2674dA94285660c9b2353131bef2d8211369A4B", chain: POLYGON) {
                id address chain label isActive lastSyncedAt createdAt updatedAt totalValueUSD
                balance {
                    totalValueUSD
                    native { balance balanceFormatted valueUSD token { symbol decimals contractAddress } }
                    tokens { balance }
                }
                tokens { balance }
                nfts { id }
                transactions(limit: 5) { totalCount edges { cursor } }
            }
        }"#,
    )
    .await;

    let wallet = &data["wallet"];
    assert_eq!(wallet["id"], "1");
    assert_eq!(wallet["address"], "0x...");
    assert_eq!(wallet["chain"], "ETHEREUM");
    assert_eq!(wallet["label"], Value::Null);
    assert_eq!(wallet["isActive"], true);
    assert_eq!(wallet["lastSyncedAt"], Value::Null);
    assert!(wallet["createdAt"].is_string());
    assert_eq!(wallet["totalValueUSD"], 0.0);
    assert_eq!(wallet["balance"]["native"]["balance"], "0");
    assert_eq!(wallet["balance"]["native"]["token"]["symbol"], "ETH");
    assert_eq!(wallet["balance"]["native"]["token"]["decimals"], 18);
    assert_eq!(wallet["balance"]["tokens"], json!([]));
    assert_eq!(wallet["transactions"]["totalCount"], 0);
}

#[tokio::test]
async fn connections_are_empty() {
    let data = data(
        &schema(),
        r#"{
            wallets(chains: [BASE, ARBITRUM], limit: 10) {
                totalCount edges { cursor }
                pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
            }
            transactions(walletAddress: "0x1", chain: BSC) { totalCount edges { cursor } }
        }"#,
    )
    .await;

    assert_eq!(
        data["wallets"],
        json!({
            "totalCount": 0,
            "edges": [],
            "pageInfo": {
                "hasNextPage": false,
                "hasPreviousPage": false,
                "startCursor": null,
                "endCursor": null
            }
        })
    );
    assert_eq!(data["transactions"], json!({ "totalCount": 0, "edges": [] }));
}

#[tokio::test]
async fn portfolio_is_zeroed() {
    let data = data(
        &schema(),
        r#"{
            portfolio(walletAddresses: ["0x1", "0x2"]) {
                wallets { id }
                totalValueUSD totalValueChange24h totalValueChange24hPercent
                chainBreakdown { chain }
                tokenBreakdown { totalBalance }
                performanceMetrics {
                    totalReturn totalReturnPercent
                    bestPerformer { percentage }
                    worstPerformer { percentage }
                }
            }
        }"#,
    )
    .await;

    assert_eq!(
        data["portfolio"],
        json!({
            "wallets": [],
            "totalValueUSD": 0.0,
            "totalValueChange24h": 0.0,
            "totalValueChange24hPercent": 0.0,
            "chainBreakdown": [],
            "tokenBreakdown": [],
            "performanceMetrics": {
                "totalReturn": 0.0,
                "totalReturnPercent": 0.0,
                "bestPerformer": null,
                "worstPerformer": null
            }
        })
    );
}

#[tokio::test]
async fn lists_are_empty_and_lookups_null() {
    let data = data(
        &schema(),
        r#"{
            portfolioHistory(
                walletAddresses: ["0x1"],
                from: "2024-01-01T00:00:00Z",
                to: "2024-02-01T00:00:00Z",
                interval: DAY_1
            ) { totalValueUSD }
            token(id: "eth") { symbol }
            tokens(chain: ETHEREUM, search: "usd", limit: 5) { symbol }
            tokenPrice(tokenId: "eth", currency: EUR) { priceUSD }
            tokenPriceHistory(
                tokenId: "eth",
                from: "2024-01-01T00:00:00Z",
                to: "2024-01-02T00:00:00Z",
                interval: MINUTE_15
            ) { priceUSD }
            defiPositions(walletAddress: "0x1") { netValueUSD }
        }"#,
    )
    .await;

    assert_eq!(
        data,
        json!({
            "portfolioHistory": [],
            "token": null,
            "tokens": [],
            "tokenPrice": null,
            "tokenPriceHistory": [],
            "defiPositions": []
        })
    );
}

#[tokio::test]
async fn mutations_return_placeholders() {
    let data = data(
        &schema(),
        r#"mutation {
            addWallet(input: { address: "0xabc", chain: OPTIMISM, label: "Main" }) {
                id address chain label isActive lastSyncedAt
            }
            updateWallet(address: "0xabc", chain: OPTIMISM, input: { isActive: false }) { id isActive }
            removeWallet(address: "0xabc", chain: OPTIMISM)
            syncWallet(address: "0xabc", chain: OPTIMISM) {
                success message transactionsSynced lastSyncedBlock
            }
            syncAllWallets { totalWallets successCount failureCount results { success } }
        }"#,
    )
    .await;

    assert_eq!(
        data["addWallet"],
        json!({
            "id": "1",
            "address": "0x...",
            "chain": "ETHEREUM",
            "label": null,
            "isActive": true,
            "lastSyncedAt": null
        })
    );
    assert_eq!(data["updateWallet"], json!({ "id": "1", "isActive": true }));
    assert_eq!(data["removeWallet"], true);
    assert_eq!(
        data["syncWallet"],
        json!({
            "success": true,
            "message": "Sync started",
            "transactionsSynced": 0,
            "lastSyncedBlock": "0"
        })
    );
    assert_eq!(
        data["syncAllWallets"],
        json!({ "totalWallets": 0, "successCount": 0, "failureCount": 0, "results": [] })
    );
}

#[tokio::test]
async fn subscriptions_are_rejected() {
    let schema = schema();
    let subscriptions = [
        r#"subscription { priceUpdates(tokenIds: ["1"]) { priceUSD } }"#,
        r#"subscription { walletActivity(address: "0x1", chain: ETHEREUM) { __typename } }"#,
        r#"subscription { portfolioValueChanged(walletAddresses: ["0x1"]) { totalValueUSD } }"#,
    ];

    for subscription in subscriptions {
        let mut stream = schema.execute_stream(subscription);
        let response = stream.next().await.unwrap();

        assert_eq!(response.errors.len(), 1, "{subscription}");
        assert_eq!(response.errors[0].message, NOT_IMPLEMENTED);
    }
}

#[tokio::test]
async fn sdl_keeps_schema_spelling() {
    let sdl = schema().sdl();

    for expected in [
        "totalValueUSD: Float!",
        "priceUSD: Float!",
        "gasFeeUSD: Float!",
        "netValueUSD: Float!",
        "type NFT ",
        "type NFTCollection ",
        "union WalletEvent",
        "scalar BigInt",
        "scalar JSON",
        "MINUTE_5",
        "MONTH_1",
        "CONTRACT_CALL",
        "LIQUIDITY_POOL",
    ] {
        assert!(sdl.contains(expected), "missing `{expected}`");
    }
}

struct FailingQuery;

#[Object]
impl FailingQuery {
    async fn broken(&self) -> async_graphql::Result<i32> {
        Err("connection refused".into())
    }

    async fn coded(&self) -> async_graphql::Result<i32> {
        Err(async_graphql::Error::new("wallet not found")
            .extend_with(|_, e| e.set("code", "NOT_FOUND")))
    }
}

fn failing_schema(masked: bool) -> Schema<FailingQuery, EmptyMutation, EmptySubscription> {
    let mut builder = Schema::build(FailingQuery, EmptyMutation, EmptySubscription)
        .extension(Telemetry::new(GatewayMetrics::new()));
    if masked {
        builder = builder.extension(MaskErrors);
    }
    builder.finish()
}

#[tokio::test]
async fn production_masks_unexpected_errors() {
    let schema = failing_schema(true);

    let response = schema.execute("{ broken }").await;
    assert_eq!(response.errors[0].message, MASKED_ERROR_MESSAGE);

    let response = schema.execute("{ coded }").await;
    assert_eq!(response.errors[0].message, "wallet not found");

    let response = schema.execute("{ broken").await;
    assert_ne!(response.errors[0].message, MASKED_ERROR_MESSAGE);
}

#[tokio::test]
async fn development_shows_error_messages() {
    let response = failing_schema(false).execute("{ broken }").await;
    assert_eq!(response.errors[0].message, "connection refused");
}

#[test]
fn telemetry_records_request_and_error_metrics() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let schema = failing_schema(false);
            schema.execute("query Broken { broken }").await;
            schema.execute("query Coded { coded }").await;
        })
    });

    let output = handle.render();
    assert!(output.contains("graphql_requests_total{"), "{output}");
    assert!(output.contains("operation_name=\"Broken\""), "{output}");
    assert!(output.contains("success=\"false\""), "{output}");
    assert!(output.contains("error_type=\"UNKNOWN_ERROR\""), "{output}");
    assert!(output.contains("error_type=\"NOT_FOUND\""), "{output}");
    assert!(output.contains("graphql_resolver_duration_seconds"), "{output}");
    assert!(output.contains("field_name=\"broken\""), "{output}");
    assert!(output.contains("crypto_tracker_graphql_operations_total"), "{output}");
}

#[tokio::test]
async fn production_masks_subscription_errors() {
    let schema = build_schema(GatewayMetrics::new(), true);
    let mut stream =
        schema.execute_stream(r#"subscription { priceUpdates(tokenIds: ["1"]) { priceUSD } }"#);
    let response = stream.next().await.unwrap();

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, MASKED_ERROR_MESSAGE);
}

fn render_metrics(schema: &GatewaySchema, query: &str) -> String {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let response = schema.execute(query).await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
        })
    });

    handle.render()
}

#[test]
fn introspection_is_not_timed_as_a_resolver() {
    let output = render_metrics(
        &schema(),
        "{ __schema { queryType { name } } __type(name: \"Wallet\") { name } __typename }",
    );

    assert!(output.contains("graphql_requests_total"), "{output}");
    assert!(!output.contains("graphql_resolver_duration_seconds"), "{output}");
}

#[test]
fn only_root_fields_are_timed() {
    let output = render_metrics(
        &schema(),
        r#"{
            wallet(address: "0x1", chain: ETHEREUM) {
                id
                balance { native { balance token { symbol } } }
                transactions { totalCount }
            }
        }"#,
    );

    assert!(output.contains("field_name=\"wallet\""), "{output}");
    for nested in ["id", "balance", "native", "token", "symbol", "transactions", "totalCount"] {
        assert!(
            !output.contains(&format!("field_name=\"{nested}\"")),
            "`{nested}` was timed: {output}"
        );
    }
}
