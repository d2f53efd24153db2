use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod admin;
pub(crate) mod attendance;
pub(crate) mod auth;
pub(crate) mod erp;
pub(crate) mod exam;
pub(crate) mod professor;
pub(crate) mod result;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

/// Plain success envelope: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub(crate) struct DataResponse<T> {
    pub(crate) data: T,
}
