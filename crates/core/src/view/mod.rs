//! View lifecycle, frame scheduling and event wiring

pub mod camera;
pub mod events;
pub mod host;
pub mod labels;
pub mod scheduler;
pub mod space_view;

pub use camera::{Camera, Viewport};
pub use events::{AppEvent, EventDispatcher, ListenerId};
pub use host::{HostState, ViewHost};
pub use labels::{ToggleLabel, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
pub use scheduler::{FrameClock, ManualScheduler, TickHandle, TickScheduler};
pub use space_view::{SpaceView, ViewContext, ViewMode};
