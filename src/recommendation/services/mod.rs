//! Application services for workload reporting and recommendations.

mod report;

pub use report::{
    BusyEmployee, ImportantTaskReport, ImportantTaskView, RecommendationService,
    RecommendationServiceError, RecommendationServiceResult,
};
