use ohub_domain::envelope::ErrorBody;
use ohub_kernel::service::{HandlerError, ServiceMap};
use ohub_kernel::status::{StatusLookup, StatusReadError, StatusReader, StatusReaderMap};
use ohub_kernel::store::MemoryRegistry;
use ohub_registry::RegistryService;
use ohub_validate::{ValidationError, Validator};
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
    async fn confirm_receive(&self, _payload: Map<String, Value>) -> Result<Value, HandlerError> {
        Ok(Value::Null)
    }

    async fn get_by_id(&self, _payload: Map<String, Value>) -> Result<Value, HandlerError> {
        Ok(Value::Null)
    }
}

struct HealthyReader;

#[async_trait::async_trait]
impl StatusReader for HealthyReader {
    async fn find_status(&self, _id: &str) -> Result<StatusLookup, StatusReadError> {
        Ok(StatusLookup::Found { status: Some("ORDERED".to_owned()) })
    }

    async fn probe(&self) -> Result<(), StatusReadError> {
        Ok(())
    }
}

struct BrokenFieldReader;

#[async_trait::async_trait]
impl StatusReader for BrokenFieldReader {
    async fn find_status(&self, _id: &str) -> Result<StatusLookup, StatusReadError> {
        Err(StatusReadError::new("column `status` does not exist"))
    }

    async fn probe(&self) -> Result<(), StatusReadError> {
        Err(StatusReadError::new("column `status` does not exist"))
    }
}

fn validator(catalogue: Value, services: ServiceMap, readers: StatusReaderMap) -> Validator {
    let store = MemoryRegistry::from_json(&catalogue.to_string()).unwrap();
    Validator::new(RegistryService::new(Arc::new(store)), services, readers)
}

fn supply_object(actions: Value) -> Value {
    json!({
        "code": "SUPPLY",
        "name": "Supply",
        "domainGrouping": "SCM",
        "serviceKey": "SuppliesService",
        "statusEntityName": "Supply",
        "statusFieldName": "status",
        "actions": actions,
    })
}

fn confirm_receive(handler_name: &str) -> Value {
    json!({
        "code": "CONFIRM_RECEIVE",
        "handlerName": handler_name,
        "actionType": "COMMAND",
        "name": "Confirm receive",
    })
}

fn bound_services() -> ServiceMap {
    ServiceMap::builder().register("SuppliesService", Arc::new(SuppliesService)).build()
}

fn bound_readers() -> StatusReaderMap {
    StatusReaderMap::builder().register("Supply", Arc::new(HealthyReader)).build()
}

#[tokio::test]
async fn clean_catalogue_passes_both_modes() {
    let catalogue = json!([supply_object(json!([confirm_receive("confirmReceive")]))]);
    let validator = validator(catalogue, bound_services(), bound_readers());

    assert!(validator.validate_all().await.is_ok());
    assert!(validator.validate_report().await.is_ok());
}

#[tokio::test]
async fn unknown_service_key_fails_before_action_checks() {
    // The handler name is also wrong; the service miss must win.
    let mut object = supply_object(json!([confirm_receive("renamedHandler")]));
    object["serviceKey"] = json!("GhostService");
    let validator = validator(json!([object]), bound_services(), bound_readers());

    let err = validator.validate_all().await.unwrap_err();
    assert_eq!(err.code(), "SERVICE_NOT_FOUND");
}

#[tokio::test]
async fn declared_but_unbound_service_is_its_own_failure() {
    let services = ServiceMap::builder().declare("SuppliesService").build();
    let catalogue = json!([supply_object(json!([confirm_receive("confirmReceive")]))]);
    let validator = validator(catalogue, services, bound_readers());

    let err = validator.validate_all().await.unwrap_err();
    assert_eq!(err.code(), "SERVICE_INSTANCE_NOT_FOUND");
}

#[tokio::test]
async fn handler_drift_is_reported_with_full_binding_details() {
    let catalogue = json!([supply_object(json!([confirm_receive("renamedHandler")]))]);
    let validator = validator(catalogue, bound_services(), bound_readers());

    let err = validator.validate_all().await.unwrap_err();
    assert_eq!(err.code(), "HANDLER_NOT_FOUND");
    // Same details shape the router produces for the same drift.
    assert_eq!(
        err.details(),
        json!({
            "objectCode": "SUPPLY",
            "actionCode": "CONFIRM_RECEIVE",
            "handlerName": "renamedHandler",
            "serviceKey": "SuppliesService",
        })
    );
}

#[tokio::test]
async fn empty_handler_name_is_rejected() {
    let catalogue = json!([supply_object(json!([confirm_receive("  ")]))]);
    let validator = validator(catalogue, bound_services(), bound_readers());

    let err = validator.validate_all().await.unwrap_err();
    assert_eq!(err.code(), "HANDLER_EMPTY");
}

#[tokio::test]
async fn status_pass_distinguishes_unmapped_unbound_and_broken() {
    let catalogue = json!([supply_object(json!([confirm_receive("confirmReceive")]))]);

    let unmapped = StatusReaderMap::builder().build();
    let err = validator(catalogue.clone(), bound_services(), unmapped)
        .validate_all()
        .await
        .unwrap_err();
    assert_eq!(err.code(), "STATUS_REPO_NOT_MAPPED");

    let declared = StatusReaderMap::builder().declare("Supply").build();
    let err = validator(catalogue.clone(), bound_services(), declared)
        .validate_all()
        .await
        .unwrap_err();
    assert_eq!(err.code(), "STATUS_REPO_INVALID");

    let broken = StatusReaderMap::builder().register("Supply", Arc::new(BrokenFieldReader)).build();
    let err = validator(catalogue, bound_services(), broken).validate_all().await.unwrap_err();
    assert_eq!(err.code(), "STATUS_FIELD_INVALID");
    assert_eq!(err.details()["statusFieldName"], json!("status"));
}

#[tokio::test]
async fn report_lists_every_drifted_action_of_one_object() {
    let catalogue = json!([supply_object(json!([
        {
            "code": "CONFIRM_RECEIVE",
            "handlerName": "renamedOne",
            "actionType": "COMMAND",
            "name": "Confirm receive",
        },
        {
            "code": "GET_BY_ID",
            "handlerName": "renamedTwo",
            "actionType": "QUERY",
            "name": "Get by id",
        },
    ]))]);
    let validator = validator(catalogue, bound_services(), bound_readers());

    let err = validator.validate_report().await.unwrap_err();
    let ValidationError::RegistryInvalid { findings } = err else {
        panic!("expected the aggregate variant");
    };

    // One finding per broken action, not one per object.
    assert_eq!(findings.len(), 2);
    let handlers: Vec<&Value> =
        findings.iter().filter_map(|f| f.details.as_ref().map(|d| &d["handlerName"])).collect();
    assert_eq!(handlers, [&json!("renamedOne"), &json!("renamedTwo")]);
}

#[tokio::test]
async fn report_mode_aggregates_every_finding() {
    let catalogue = json!([
        supply_object(json!([confirm_receive("renamedHandler")])),
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
                    "handlerName": "",
                    "actionType": "COMMAND",
                    "name": "Post",
                },
            ],
        },
    ]);
    let validator = validator(catalogue, bound_services(), bound_readers());

    let err = validator.validate_report().await.unwrap_err();
    assert_eq!(err.code(), "REGISTRY_INVALID");

    let ValidationError::RegistryInvalid { findings } = err else {
        panic!("expected the aggregate variant");
    };
    let codes: Vec<&str> = findings.iter().map(|f| f.code.as_str()).collect();
    // INVOICE sorts before SUPPLY; binding findings come before status ones.
    assert_eq!(codes, ["HANDLER_EMPTY", "HANDLER_NOT_FOUND", "STATUS_REPO_NOT_MAPPED"]);

    let envelope = ErrorBody::from(&ValidationError::RegistryInvalid { findings });
    assert_eq!(envelope.code, "REGISTRY_INVALID");
}
