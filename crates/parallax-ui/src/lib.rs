//! Parallax UI: scoped components mounted onto a page, on top of
//! `parallax-engine`.
//!
//! A page is a `.mkml` document. Components are registered against marker
//! attributes; only those whose marker appears in the page are loaded, and
//! each node naming one through `scope` gets its own instance.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use parallax_ui::Application;
//!
//! Application::new()
//!     .title("Portfolio")
//!     .run(include_str!("page/index.mkml"))?;
//! ```
//!
//! # Custom components
//!
//! Implement [`component::Component`] and register it with a selector:
//!
//! ```rust,ignore
//! use parallax_ui::prelude::*;
//!
//! struct Clock;
//!
//! impl Component for Clock {
//!     fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
//!         ctx.request_frames();
//!     }
//! }
//!
//! let registry = ComponentRegistry::new().register(
//!     Selector::attribute("data-clock"),
//!     || Ok(Rc::new(|_: &Node| Box::new(Clock) as Box<dyn Component>) as ComponentFactory),
//!     "Clock",
//! );
//! Application::new().registry(registry).run(page)?;
//! ```

pub mod app;
pub mod component;
pub mod components;
pub mod event;
pub mod registry;
pub mod runtime;
pub mod scene;
pub mod scroll;

pub use app::Application;

/// Everything needed to write and register a component.
pub mod prelude {
    pub use std::rc::Rc;

    pub use crate::component::{CanvasRef, Component, ComponentFactory, MountCtx};
    pub use crate::components::default_registry;
    pub use crate::event::{PageEvent, PageEventKind};
    pub use crate::registry::{ComponentMap, ComponentRegistry, MountError};
    pub use crate::runtime::PageRuntime;
    pub use crate::scene::SceneConfig;
    pub use crate::Application;

    pub use parallax_engine::time::FrameTime;
    pub use parallax_mkml::{Node, Selector};
}
