//! ringlet-ui provides the host-side building blocks for ringlet components.
//!
//! # Element Trees
//!
//! Components render into an [`Element`] tree, a renderer-agnostic description
//! of SVG shapes. Hosts can inspect it, compare it, or serialize it:
//!
//! ```
//! use ringlet_ui::{Element, Tag};
//!
//! let tree = Element::new(Tag::Svg)
//!     .attr("class", "Badge")
//!     .child(Element::new(Tag::Text).text("42"));
//!
//! let markup = tree.to_svg_string();
//! assert!(markup.contains("42"));
//! ```
//!
//! # Scheduling
//!
//! Deferred work goes through the [`Scheduler`] trait, which mirrors the
//! timeout and animation-frame primitives of a UI event loop. Use
//! [`ManualScheduler`] when the host drives its own loop (and in tests), or
//! `TokioScheduler` to run callbacks on a tokio runtime.
//!
//! # Lifecycle
//!
//! A [`Component`] exposes `on_mount`, `on_update`, `on_unmount` and `render`.
//! [`ComponentHost`] calls them in a valid order and reports misuse as
//! [`LifecycleError`].

pub mod component;
pub mod element;
pub mod logging;
mod number;
pub mod scheduler;

pub use component::{Component, ComponentHost, LifecycleError, LifecyclePhase};
pub use element::{AttributeValue, Element, RenderError, Tag};
pub use number::format_number;
#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;
pub use scheduler::{FRAME_INTERVAL, ManualScheduler, Scheduler, Task, TaskHandle};
