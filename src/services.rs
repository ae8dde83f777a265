pub mod alerts;
pub mod category_service;
pub mod movement_service;
pub mod product_service;
pub mod report_service;

pub use alerts::{StockAlerts, TracingStockAlerts};
pub use category_service::CategoryService;
pub use movement_service::MovementService;
pub use product_service::{ProductService, ProductUpdate};
pub use report_service::ReportService;
