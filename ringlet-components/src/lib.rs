//! Components built on ringlet-ui.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ringlet_components::circular_progressbar::{CircularProgressbar, CircularProgressbarArgs};
//! use ringlet_ui::{ComponentHost, ManualScheduler};
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let args = CircularProgressbarArgs::new(75.0)
//!     .class_name("download")
//!     .class_for_percentage(|p| if p >= 100.0 { "done".into() } else { String::new() });
//!
//! let mut host = ComponentHost::new(CircularProgressbar::new(args, scheduler));
//! let tree = host.mount().unwrap();
//! assert!(tree.to_svg_string().contains("CircularProgressbar-path"));
//! ```

pub mod circular_progressbar;
