//! Tests to verify that all public types are Send + Sync as required.

use mcp_toolgen_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_domain_types_are_send_sync() {
    assert_send_sync::<ToolName>();
    assert_send_sync::<ToolSchema>();
    assert_send_sync::<SchemaFragment>();
    assert_send_sync::<PropertySchema>();
    assert_send_sync::<ToolResponseEnvelope>();
}

#[test]
fn test_config_types_are_send_sync() {
    assert_send_sync::<ClientConfig>();
    assert_send_sync::<CodegenConfig>();
    assert_send_sync::<TransportType>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
    assert_send_sync::<ToolFailure>();
}
