pub(crate) mod admin;
pub(crate) mod attendance;
pub(crate) mod auth;
pub(crate) mod erp;
pub(crate) mod errors;
pub(crate) mod exams;
pub(crate) mod handlers;
pub(crate) mod professors;
pub(crate) mod results;
pub(crate) mod router;
pub(crate) mod validation;
