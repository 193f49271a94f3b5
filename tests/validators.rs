// ABOUTME: Tests for remote ID validation classification.
// ABOUTME: Named fault reasons map onto the container error taxonomy; others pass through.

use async_trait::async_trait;
use tether::api::{ApiError, ApiFault, ContainerOps, FaultDetail, reason};
use tether::containers::{self, Container, ContainerError, Containers, Register};

/// ContainerOps double whose validator always answers with `fault`.
struct ValidatorApi {
    fault: Option<ApiFault>,
}

fn fault(code: u16, reason: &str) -> ApiFault {
    ApiFault {
        method: "GET".to_string(),
        url: "http://api.example.com/validators/containers/id".to_string(),
        code,
        message: "error".to_string(),
        errors: vec![FaultDetail {
            reason: reason.to_string(),
            message: "validation".to_string(),
        }],
    }
}

#[async_trait]
impl ContainerOps for ValidatorApi {
    async fn deploy_container(
        &self,
        _project_id: &str,
        _source: &str,
        _container: &Container,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn validate_container_id(
        &self,
        _project_id: &str,
        _container_id: &str,
    ) -> Result<(), ApiError> {
        match &self.fault {
            Some(fault) => Err(ApiError::Fault(fault.clone())),
            None => Ok(()),
        }
    }

    async fn list_containers(&self, _project_id: &str) -> Result<Containers, ApiError> {
        Ok(Containers::new())
    }

    async fn container_state(
        &self,
        _project_id: &str,
        _container_id: &str,
    ) -> Result<String, ApiError> {
        Ok("on".to_string())
    }

    async fn restart_container(
        &self,
        _project_id: &str,
        _container_id: &str,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn drop_container(
        &self,
        _project_id: &str,
        _container_id: &str,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn container_registry(&self) -> Result<Vec<Register>, ApiError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn valid_and_unused_id_passes() {
    let api = ValidatorApi { fault: None };

    containers::validate(&api, "myproject", "web").await.unwrap();
}

#[tokio::test]
async fn invalid_container_id_is_classified() {
    let api = ValidatorApi {
        fault: Some(fault(404, reason::INVALID_CONTAINER_ID)),
    };

    assert!(matches!(
        containers::validate(&api, "myproject", "web").await,
        Err(ContainerError::InvalidId)
    ));
}

#[tokio::test]
async fn existing_container_id_is_classified() {
    let api = ValidatorApi {
        fault: Some(fault(404, reason::CONTAINER_ALREADY_EXISTS)),
    };

    assert!(matches!(
        containers::validate(&api, "myproject", "web").await,
        Err(ContainerError::AlreadyExists)
    ));
}

#[tokio::test]
async fn unrecognized_fault_passes_through() {
    let api = ValidatorApi {
        fault: Some(fault(400, "somethingElse")),
    };

    match containers::validate(&api, "myproject", "web").await {
        Err(ContainerError::Api(ApiError::Fault(f))) => assert_eq!(f.code, 400),
        other => panic!("expected the raw fault, got {other:?}"),
    }
}
