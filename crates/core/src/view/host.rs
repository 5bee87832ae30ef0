//! Host-side wiring of scene data, view, scheduler and event listeners

use crate::scene::SceneData;
use crate::view::events::{AppEvent, EventDispatcher, ListenerId};
use crate::view::scheduler::{ManualScheduler, TickScheduler};
use crate::view::space_view::{SpaceView, ViewMode};

/// State every listener can reach while an event is dispatched
#[derive(Debug)]
pub struct HostState<S> {
    pub data: SceneData,
    pub view: SpaceView,
    pub scheduler: S,
}

/// Owns the application state and the listeners that react to it
///
/// Listeners get `&mut HostState` rather than capturing shared handles, so
/// the view is reached without global state or interior mutability.
#[derive(Debug)]
pub struct ViewHost<S: TickScheduler> {
    pub state: HostState<S>,
    dispatcher: EventDispatcher<HostState<S>, AppEvent>,
}

impl<S: TickScheduler + 'static> ViewHost<S> {
    /// Host with no listeners; call [`attach_view`](Self::attach_view) to let
    /// the view follow events.
    #[must_use]
    pub fn new(data: SceneData, view: SpaceView, scheduler: S) -> Self {
        Self {
            state: HostState {
                data,
                view,
                scheduler,
            },
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Subscribe the space view to application events.
    ///
    /// Listeners subscribed earlier (e.g. the 2D map) run first.
    pub fn attach_view(&mut self) -> ListenerId {
        self.dispatcher
            .subscribe(|state: &mut HostState<S>, event: &AppEvent| {
                state.view.handle_event(event, &state.data);
            })
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut HostState<S>, &AppEvent) + 'static,
    {
        self.dispatcher.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Dispatch `event` to every listener; returns how many ran.
    pub fn emit(&mut self, event: &AppEvent) -> usize {
        self.dispatcher.dispatch(&mut self.state, event)
    }

    /// Replace the scene data and announce it.
    pub fn update_triangles(&mut self, data: SceneData) -> usize {
        self.state.data = data;
        self.emit(&AppEvent::TrianglesUpdated)
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> usize {
        self.emit(&AppEvent::LanguageChanged(language.into()))
    }

    /// Toggle control clicked
    pub fn toggle(&mut self) -> ViewMode {
        let HostState {
            data,
            view,
            scheduler,
        } = &mut self.state;
        view.toggle(data, scheduler)
    }

    #[must_use]
    pub fn view(&self) -> &SpaceView {
        &self.state.view
    }
}

impl ViewHost<ManualScheduler> {
    /// Deliver every due tick at the nominal frame rate; returns how many ran.
    pub fn pump_frame(&mut self) -> usize {
        self.pump_frame_scaled(1.0)
    }

    pub fn pump_frame_scaled(&mut self, dt_scale: f64) -> usize {
        let HostState {
            view, scheduler, ..
        } = &mut self.state;
        let due = scheduler.due();
        for &handle in &due {
            view.on_frame_scaled(handle, scheduler, dt_scale);
        }
        due.len()
    }
}
