//! Application services for employee and task record keeping.

mod records;

pub use records::{
    CreateEmployeeRequest, CreateTaskRequest, TrackerService, TrackerServiceError,
    TrackerServiceResult, UpdateEmployeeRequest, UpdateTaskRequest,
};
