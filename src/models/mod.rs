pub mod container;
pub mod response;

pub use container::{ContainerRecord, ContainerStatus, DisplayValue, StatusIndicator};
pub use response::{ActionResponse, ContainerAction, ErrorBody, ListResponse};
