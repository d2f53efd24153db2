pub(crate) mod backlog;
pub(crate) mod eligibility;
pub(crate) mod registration;
pub(crate) mod results;
pub(crate) mod subject_sets;
