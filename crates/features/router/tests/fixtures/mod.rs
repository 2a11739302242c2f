//! Shared wiring for router integration tests: a small supply-chain catalogue,
//! one live service with an invocation counter, and a map-backed status reader.

use ohub_domain::config::RouterConfig;
use ohub_kernel::service::{HandlerError, ServiceMap};
use ohub_kernel::status::{StatusLookup, StatusReadError, StatusReader, StatusReaderMap};
use ohub_kernel::store::MemoryRegistry;
use ohub_registry::RegistryService;
use ohub_router::Router;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct SuppliesService {
    pub calls: Arc<AtomicUsize>,
}

ohub_kernel::service_handlers! {
    SuppliesService {
        "confirmReceive" => confirm_receive,
        "getById" => get_by_id,
        "postDocument" => post_document,
        "breakDown" => break_down,
    }
}

impl SuppliesService {
    async fn confirm_receive(&self, payload: Map<String, Value>) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "received": payload.get("id").cloned().unwrap_or(Value::Null) }))
    }

    async fn get_by_id(&self, payload: Map<String, Value>) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match payload.get("id") {
            Some(Value::String(id)) if id == "S404" => Err(HandlerError::coded(
                "SUPPLY_NOT_FOUND",
                "no supply with that id",
            )
            .with_details(json!({ "id": id }))),
            other => Ok(json!({ "supply": other.cloned().unwrap_or(Value::Null) })),
        }
    }

    async fn post_document(&self, _payload: Map<String, Value>) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "posted": true }))
    }

    async fn break_down(&self, _payload: Map<String, Value>) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HandlerError::new("storage layer exploded"))
    }
}

pub struct MapReader {
    statuses: HashMap<String, Option<String>>,
}

#[async_trait::async_trait]
impl StatusReader for MapReader {
    async fn find_status(&self, id: &str) -> Result<StatusLookup, StatusReadError> {
        Ok(self
            .statuses
            .get(id)
            .map_or(StatusLookup::Missing, |status| StatusLookup::Found { status: status.clone() }))
    }

    async fn probe(&self) -> Result<(), StatusReadError> {
        Ok(())
    }
}

fn catalogue() -> Value {
    json!([
        {
            "code": "SUPPLY",
            "name": "Supply",
            "domainGrouping": "SCM",
            "entityName": "Supply",
            "serviceKey": "SuppliesService",
            "statusEntityName": "Supply",
            "statusFieldName": "status",
            "actions": [
                {
                    "code": "CONFIRM_RECEIVE",
                    "handlerName": "confirmReceive",
                    "actionType": "COMMAND",
                    "name": "Confirm receive",
                    "allowedFromStatuses": ["ORDERED"],
                },
                {
                    "code": "GET_BY_ID",
                    "handlerName": "getById",
                    "actionType": "QUERY",
                    "name": "Get by id",
                },
                {
                    "code": "POST_DOCUMENT",
                    "handlerName": "postDocument",
                    "actionType": "COMMAND",
                    "name": "Post document",
                    "enabledForAgents": false,
                    "requiredRole": "CFO",
                },
                {
                    "code": "BREAK_DOWN",
                    "handlerName": "breakDown",
                    "actionType": "COMMAND",
                    "name": "Break down",
                },
                {
                    "code": "AUDIT_TRAIL",
                    "handlerName": "auditTrail",
                    "actionType": "QUERY",
                    "name": "Audit trail",
                },
            ],
        },
        {
            "code": "CURRENCY",
            "name": "Currency",
            "domainGrouping": "FINANCE",
            "actions": [
                {
                    "code": "GET_RATE",
                    "handlerName": "getRate",
                    "actionType": "QUERY",
                    "name": "Get rate",
                },
            ],
        },
        {
            "code": "WAREHOUSE",
            "name": "Warehouse",
            "domainGrouping": "SCM",
            "serviceKey": "WarehouseService",
            "actions": [
                {
                    "code": "MOVE_STOCK",
                    "handlerName": "moveStock",
                    "actionType": "COMMAND",
                    "name": "Move stock",
                },
            ],
        },
        {
            "code": "INVOICE",
            "name": "Invoice",
            "domainGrouping": "FINANCE",
            "serviceKey": "SuppliesService",
            "statusEntityName": "FinancialDocument",
            "statusFieldName": "status",
            "actions": [
                {
                    "code": "POST",
                    "handlerName": "postDocument",
                    "actionType": "COMMAND",
                    "name": "Post",
                    "allowedFromStatuses": ["DRAFT"],
                },
            ],
        },
        {
            "code": "LEGACY_ORDER",
            "name": "Legacy order",
            "domainGrouping": "SCM",
            "isActive": false,
            "serviceKey": "SuppliesService",
            "actions": [
                {
                    "code": "GET_BY_ID",
                    "handlerName": "getById",
                    "actionType": "QUERY",
                    "name": "Get by id",
                },
            ],
        },
    ])
}

pub fn wired() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));

    let store = MemoryRegistry::from_json(&catalogue().to_string()).unwrap();
    let registry = RegistryService::new(Arc::new(store));

    let services = ServiceMap::builder()
        .register("SuppliesService", Arc::new(SuppliesService { calls: Arc::clone(&calls) }))
        .declare("WarehouseService")
        .build();

    let statuses = HashMap::from([
        ("S1".to_owned(), Some("ORDERED".to_owned())),
        ("S2".to_owned(), Some("RECEIVED".to_owned())),
        ("S3".to_owned(), None),
        ("S404".to_owned(), Some("ORDERED".to_owned())),
    ]);
    let status_readers =
        StatusReaderMap::builder().register("Supply", Arc::new(MapReader { statuses })).build();

    (Router::new(registry, services, status_readers, RouterConfig::default()), calls)
}

pub fn payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
