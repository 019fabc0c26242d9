use paynl_checkout::domain::ports::{GatewayClient, GatewayClientBox, IpResolver, IpResolverBox};
use paynl_checkout::infrastructure::in_memory::InMemoryGateway;
use paynl_checkout::infrastructure::ip::StaticIpResolver;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let gateway: GatewayClientBox = Box::new(InMemoryGateway::new());
    let resolver: IpResolverBox = Box::new(StaticIpResolver::new(Some(
        "192.0.2.1".parse().unwrap(),
    )));

    // Verify Send + Sync by spawning tasks
    let gateway_handle = tokio::spawn(async move {
        gateway.capture("EX-1", dec!(10.00)).await.unwrap();
        gateway.void("EX-1").await.is_ok()
    });
    let resolver_handle = tokio::spawn(async move { resolver.resolve() });

    assert!(gateway_handle.await.unwrap());
    assert_eq!(
        resolver_handle.await.unwrap(),
        Some("192.0.2.1".parse().unwrap())
    );
}
