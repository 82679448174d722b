//! Host state for the demo binary: one mounted control plus the parent
//! side of the protocol (the committed value and the disabled flag).

use crossterm::event::Event;
use tokio::time::Instant;

use crate::controller::{Effect, MultiSelect};
use crate::events::{Action, EventHandler};
use crate::model::Identifier;
use crate::pointer::{InteractionRegistry, PointerRegistry};
use crate::query::{ParamValue, Params};

/// Parameter marking the parent context as unusable.
const DISABLED_MARKER: &str = "disabled";

pub struct App {
    pub control: MultiSelect,
    pub pointers: PointerRegistry,
    pub interactions: InteractionRegistry,
    /// Last message shown in the status line
    pub status: String,
    pub should_quit: bool,
    /// Parameters supplied while enabled
    enabled_params: Option<Params>,
}

impl App {
    pub fn new(control: MultiSelect) -> Self {
        let enabled_params = control.props().params.clone();
        Self {
            control,
            pointers: PointerRegistry::new(),
            interactions: InteractionRegistry::new(),
            status: String::new(),
            should_quit: false,
            enabled_params,
        }
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        self.control.mount(&self.pointers)
    }

    /// Parent side of a commit: store the value and pass it back down.
    pub fn on_commit(&mut self, ids: Vec<Identifier>) -> Vec<Effect> {
        let joined: Vec<&str> = ids.iter().map(Identifier::as_str).collect();
        self.status = format!("onChange([{}])", joined.join(", "));

        let mut props = self.control.props().clone();
        props.value = Some(ids);
        self.control.set_props(props)
    }

    /// Simulate the parent context becoming empty (disabled) or usable again.
    pub fn toggle_disabled(&mut self) -> Vec<Effect> {
        let mut props = self.control.props().clone();
        props.disabled = !props.disabled;
        props.params = if props.disabled {
            let mut params = self.enabled_params.clone().unwrap_or_default();
            params.insert(DISABLED_MARKER.to_string(), ParamValue::Bool(true));
            Some(params)
        } else {
            self.enabled_params.clone().or_else(|| Some(Params::new()))
        };
        self.status = if props.disabled { "disabled" } else { "enabled" }.to_string();
        self.control.set_props(props)
    }

    /// Route a terminal event to the host or the control.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Vec<Effect> {
        let action =
            EventHandler::handle_event(&self.control, &self.interactions, &self.pointers, event);

        match action {
            Action::Quit => {
                self.should_quit = true;
                vec![]
            }
            Action::ToggleDisabled => self.toggle_disabled(),
            Action::None => vec![],
            action => self.control.apply(action, now),
        }
    }
}
