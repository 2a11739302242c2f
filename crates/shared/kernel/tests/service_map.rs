use ohub_kernel::service::{HandlerError, Service, ServiceMap};
use serde_json::{Map, Value, json};
use std::sync::Arc;

struct SuppliesService;

ohub_kernel::service_handlers! {
    SuppliesService {
        "confirmReceive" => confirm_receive,
        "getById" => get_by_id,
    }
}

impl SuppliesService {
    async fn confirm_receive(&self, payload: Map<String, Value>) -> Result<Value, HandlerError> {
        Ok(json!({"received": payload.get("id").cloned().unwrap_or(Value::Null)}))
    }

    async fn get_by_id(&self, _payload: Map<String, Value>) -> Result<Value, HandlerError> {
        Err(HandlerError::coded("SUPPLY_NOT_FOUND", "no such supply"))
    }
}

#[tokio::test]
async fn manifest_lists_registry_facing_names() {
    let map = ServiceMap::builder().register("SuppliesService", Arc::new(SuppliesService)).build();
    let service = map.resolve("SUPPLY", "SuppliesService").unwrap();
    assert_eq!(service.handlers(), &["confirmReceive", "getById"]);
}

#[tokio::test]
async fn invocation_routes_by_handler_name() {
    let service = SuppliesService;

    let mut payload = Map::new();
    payload.insert("id".to_owned(), json!("S1"));
    let data = service.invoke("confirmReceive", payload).await.unwrap();
    assert_eq!(data, json!({"received": "S1"}));

    let err = service.invoke("getById", Map::new()).await.unwrap_err();
    assert_eq!(err.code.as_deref(), Some("SUPPLY_NOT_FOUND"));
}
