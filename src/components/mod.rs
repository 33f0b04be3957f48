mod container_table;
mod header;
mod help_modal;
mod log_modal;
mod notice_modal;
mod status_bar;

pub use container_table::ContainerTable;
pub use header::Header;
pub use help_modal::HelpModal;
pub use log_modal::LogModal;
pub use notice_modal::NoticeModal;
pub use status_bar::StatusBar;
