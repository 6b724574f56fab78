pub mod progress_bar;
pub mod scan_input;
pub mod status_bar;
pub mod toast;
