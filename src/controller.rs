//! The multi-select state machine.
//!
//! `MultiSelect` performs no I/O. Every operation returns the `Effect`s the
//! host must carry out: remote requests to perform (their outcome comes
//! back through `on_response`) and commits to hand to the parent.
//!
//! ```text
//! Closed --toggle_open--> Open --toggle_open (commit)------> Closed
//!                              --pointer_down_outside------> Closed
//! ```
//!
//! `loading` (a request in flight) and `disabled` (owned by the parent) are
//! orthogonal to open/closed.

use std::mem;

use tokio::time::Instant;

use crate::debounce::Debouncer;
use crate::error::FetchError;
use crate::events::Action;
use crate::log;
use crate::model::{order_candidates, Identifier, Item};
use crate::picker::Picker;
use crate::pointer::{Bounds, ListenerGuard, ListenerId, PointerRegistry};
use crate::query::{resolve_endpoint, Params, QueryParams, SearchTerm};
use crate::selection::SelectionState;

/// Configuration supplied by the hosting parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Externally held selection; source of truth while not editing
    pub value: Option<Vec<Identifier>>,
    /// Direct resource path, used when no filter is named
    pub target: Option<String>,
    /// Named filter resource
    pub filter: Option<String>,
    /// Extra query parameters
    pub params: Option<Params>,
    pub disabled: bool,
    /// Visual only: hide row numbers
    pub hide_ids: bool,
    /// Commit on every toggle as well as on close
    pub change_on_select: bool,
}

impl Props {
    pub fn endpoint(&self) -> Option<String> {
        resolve_endpoint(self.filter.as_deref(), self.target.as_deref())
    }
}

pub type RequestId = u64;

/// Bumped whenever the parent's context invalidates earlier lookups.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// Resolve details for exactly these ids
    Hydrate { ids: Vec<Identifier> },
    /// Populate the candidate list
    Candidates,
}

/// A remote lookup the host must perform.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: RequestId,
    pub generation: Generation,
    pub kind: RequestKind,
    pub path: String,
    pub query: QueryParams,
}

/// Outcome of a `Request`, fed back through `MultiSelect::on_response`.
#[derive(Debug)]
pub struct Response {
    pub request: Request,
    pub result: Result<Vec<Item>, FetchError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(Request),
    /// Hand this selection to the parent's change callback
    Commit(Vec<Identifier>),
}

pub struct MultiSelect {
    props: Props,
    selection: SelectionState,
    candidates: Vec<Item>,
    search_text: String,
    search: Debouncer<String>,
    is_open: bool,
    fetching: bool,
    hydrating: usize,
    highlighted: usize,
    next_request_id: RequestId,
    generation: Generation,
    listener: Option<ListenerGuard>,
}

impl MultiSelect {
    pub fn new(props: Props) -> Self {
        Self::with_debouncer(props, Debouncer::default())
    }

    pub fn with_debouncer(props: Props, search: Debouncer<String>) -> Self {
        Self {
            props,
            selection: SelectionState::new(),
            candidates: vec![],
            search_text: String::new(),
            search,
            is_open: false,
            fetching: false,
            hydrating: 0,
            highlighted: 0,
            next_request_id: 0,
            generation: 0,
            listener: None,
        }
    }

    // === Accessors ===

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[Identifier] {
        self.selection.ids()
    }

    pub fn selected_details(&self) -> &[Item] {
        self.selection.details()
    }

    pub fn candidates(&self) -> &[Item] {
        &self.candidates
    }

    /// Whether a candidate renders as checked.
    pub fn is_checked(&self, id: &Identifier) -> bool {
        self.selection.contains(id)
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// A candidate fetch or a hydration is in flight.
    pub fn is_loading(&self) -> bool {
        self.fetching || self.hydrating > 0
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(ListenerGuard::id)
    }

    /// When the pending search input becomes due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    // === Lifecycle ===

    /// Register the outside-click listener and hydrate from `props.value`.
    pub fn mount(&mut self, pointers: &PointerRegistry) -> Vec<Effect> {
        self.listener = Some(pointers.register(Bounds::default()));
        self.hydrate()
    }

    /// Release the outside-click listener and drop pending search input.
    pub fn unmount(&mut self) {
        self.listener = None;
        self.search.cancel();
    }

    /// Record the on-screen region treated as "inside" the control.
    pub fn set_bounds(&self, bounds: Bounds) {
        if let Some(listener) = &self.listener {
            listener.set_bounds(bounds);
        }
    }

    /// Replace the props, reacting to a change of the filter parameters.
    pub fn set_props(&mut self, props: Props) -> Vec<Effect> {
        let previous = mem::replace(&mut self.props, props);

        if self.props.params.is_none() || self.props.params == previous.params {
            return vec![];
        }

        if self.props.disabled {
            log::log_event("params changed, control disabled: clearing selection");
            self.generation += 1;
            self.selection = SelectionState::new();
            self.candidates.clear();
            self.highlighted = 0;
            return vec![];
        }

        log::log_event("params changed: re-hydrating and re-fetching");
        let mut effects = self.hydrate();
        effects.extend(self.fetch(None));
        effects
    }

    // === Remote lookups ===

    /// Resolve `props.value` into display details. No-op if it is empty.
    pub fn hydrate(&mut self) -> Vec<Effect> {
        let ids = match &self.props.value {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ => return vec![],
        };
        let Some(path) = self.props.endpoint() else {
            log::log_event("hydrate skipped: no target or filter configured");
            return vec![];
        };

        self.hydrating += 1;
        let query = QueryParams::for_hydrate(&ids, self.props.params.as_ref());
        vec![self.request(RequestKind::Hydrate { ids }, path, query)]
    }

    /// Fetch candidates. Dropped while another candidate fetch is in flight.
    pub fn fetch(&mut self, term: Option<SearchTerm>) -> Vec<Effect> {
        if self.fetching {
            log::log_event(&format!("fetch dropped, one already in flight (term: {:?})", term));
            return vec![];
        }
        let Some(path) = self.props.endpoint() else {
            log::log_event("fetch skipped: no target or filter configured");
            return vec![];
        };

        self.fetching = true;
        let query = QueryParams::for_search(term.as_ref(), self.props.params.as_ref());
        vec![self.request(RequestKind::Candidates, path, query)]
    }

    fn request(&mut self, kind: RequestKind, path: String, query: QueryParams) -> Effect {
        let id = self.next_request_id;
        self.next_request_id += 1;
        Effect::Request(Request {
            id,
            generation: self.generation,
            kind,
            path,
            query,
        })
    }

    /// Apply the outcome of a request issued earlier.
    ///
    /// Failures only clear the loading state; everything else stays as it
    /// was last successfully loaded. Payloads from before a disable are
    /// discarded.
    pub fn on_response(&mut self, response: Response) {
        let Response { request, result } = response;
        let stale = request.generation != self.generation;

        match request.kind {
            RequestKind::Hydrate { ids } => {
                self.hydrating = self.hydrating.saturating_sub(1);
                match result {
                    Ok(_) if stale => {
                        log::log_event(&format!("hydrate #{} discarded: context changed", request.id))
                    }
                    Ok(items) => self.selection = SelectionState::hydrated(ids, items),
                    Err(e) => log::log_event(&format!("hydrate #{} failed: {}", request.id, e)),
                }
            }
            RequestKind::Candidates => {
                self.fetching = false;
                match result {
                    Ok(_) if stale => {
                        log::log_event(&format!("fetch #{} discarded: context changed", request.id))
                    }
                    Ok(items) => {
                        self.candidates = order_candidates(items);
                        self.selection = self.selection.pruned_to(&self.candidates);
                        self.clamp_highlight();
                    }
                    Err(e) => log::log_event(&format!("fetch #{} failed: {}", request.id, e)),
                }
            }
        }
    }

    // === Search ===

    /// Record new search input; the fetch runs once input goes quiet.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search_text = text.into();
        self.search.push(self.search_text.clone(), now);
    }

    /// Fire the debounced search if its window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let Some(text) = self.search.poll(now) else {
            return vec![];
        };

        match SearchTerm::parse(&text) {
            Some(term) => self.fetch(Some(term)),
            None => {
                self.search_text.clear();
                self.fetch(None)
            }
        }
    }

    /// Clear an active search and fetch the unfiltered list.
    fn reset_search(&mut self) -> Vec<Effect> {
        self.search.cancel();
        if self.search_text.is_empty() {
            return vec![];
        }
        self.search_text.clear();
        self.fetch(None)
    }

    // === Interaction ===

    /// Add or remove an item from the selection.
    pub fn toggle(&mut self, id: &Identifier, name: &str) -> Vec<Effect> {
        self.selection = self.selection.toggled(id, name);

        let mut effects = self.reset_search();
        if self.props.change_on_select {
            effects.push(Effect::Commit(self.selection.ids().to_vec()));
        }
        effects
    }

    /// Toggle the candidate at `index` in display order.
    pub fn toggle_at(&mut self, index: usize) -> Vec<Effect> {
        match self.candidates.get(index) {
            Some(item) => {
                let Item { id, name } = item.clone();
                self.highlighted = index;
                self.toggle(&id, &name)
            }
            None => vec![],
        }
    }

    /// Open, or close and commit. Closing leaves the search as typed.
    pub fn toggle_open(&mut self) -> Vec<Effect> {
        if self.is_open {
            self.is_open = false;
            return vec![Effect::Commit(self.selection.ids().to_vec())];
        }

        if self.props.disabled {
            return vec![];
        }

        self.is_open = true;
        if self.candidates.is_empty() {
            self.fetch(None)
        } else {
            vec![]
        }
    }

    /// Pointer went down outside the control's bounds.
    pub fn pointer_down_outside(&mut self) -> Vec<Effect> {
        if !self.is_open {
            return vec![];
        }

        let mut effects = self.reset_search();
        self.is_open = false;

        let external = self.props.value.as_deref();
        let both_empty = external.is_none_or(|ids| ids.is_empty()) && self.selection.is_empty();
        let unchanged = external == Some(self.selection.ids());
        if !both_empty && !unchanged {
            effects.push(Effect::Commit(self.selection.ids().to_vec()));
        }
        effects
    }

    /// Apply a user action. Host-level actions yield no effects.
    pub fn apply(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        match action {
            Action::ToggleOpen => self.toggle_open(),
            Action::ToggleItem(index) => self.toggle_at(index),
            Action::ToggleHighlighted => {
                if self.is_open {
                    self.toggle_at(self.highlighted)
                } else {
                    vec![]
                }
            }
            Action::HighlightNext => {
                self.select_next();
                vec![]
            }
            Action::HighlightPrev => {
                self.select_prev();
                vec![]
            }
            Action::SearchChar(c) => {
                let mut text = self.search_text.clone();
                text.push(c);
                self.search_input(text, now);
                vec![]
            }
            Action::SearchBackspace => {
                let mut text = self.search_text.clone();
                if text.pop().is_some() {
                    self.search_input(text, now);
                }
                vec![]
            }
            Action::SearchClear => {
                if !self.search_text.is_empty() {
                    self.search_input(String::new(), now);
                }
                vec![]
            }
            Action::OutsideClick => self.pointer_down_outside(),
            Action::Quit | Action::ToggleDisabled | Action::None => vec![],
        }
    }

    fn clamp_highlight(&mut self) {
        if self.highlighted >= self.candidates.len() {
            self.highlighted = self.candidates.len().saturating_sub(1);
        }
    }
}

impl Picker for MultiSelect {
    type Item = Item;

    fn items(&self) -> &[Item] {
        &self.candidates
    }

    fn selected_index(&self) -> usize {
        self.highlighted
    }

    fn set_selected_index(&mut self, index: usize) {
        self.highlighted = index;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::EMPTY_VALUE;
    use crate::query::ParamValue;

    fn id(s: &str) -> Identifier {
        Identifier::from(s)
    }

    fn props() -> Props {
        Props {
            target: Some("v1/cities".to_string()),
            ..Default::default()
        }
    }

    fn requests(effects: &[Effect]) -> Vec<&Request> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Request(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn commits(effects: &[Effect]) -> Vec<Vec<Identifier>> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Commit(ids) => Some(ids.clone()),
                _ => None,
            })
            .collect()
    }

    fn respond(control: &mut MultiSelect, effects: Vec<Effect>, items: Vec<Item>) {
        for effect in effects {
            if let Effect::Request(request) = effect {
                control.on_response(Response {
                    request,
                    result: Ok(items.clone()),
                });
            }
        }
    }

    fn fail(control: &mut MultiSelect, effects: Vec<Effect>) {
        for effect in effects {
            if let Effect::Request(request) = effect {
                control.on_response(Response {
                    request,
                    result: Err(FetchError::Status(500)),
                });
            }
        }
    }

    fn scenario_items() -> Vec<Item> {
        vec![
            Item::new("3", "C"),
            Item::new("1", "A"),
            Item::new(EMPTY_VALUE, "-"),
        ]
    }

    /// Open and load `items` into a control that has no candidates yet.
    fn open_with(control: &mut MultiSelect, items: Vec<Item>) {
        let effects = control.toggle_open();
        respond(control, effects, items);
    }

    #[test]
    fn test_mount_hydrates_from_value() {
        let pointers = PointerRegistry::new();
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1"), id("3")]),
            ..props()
        });

        let effects = control.mount(&pointers);
        assert_eq!(pointers.len(), 1);
        let reqs = requests(&effects);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].kind, RequestKind::Hydrate { ids: vec![id("1"), id("3")] });
        assert_eq!(reqs[0].query.get("q[id][in]"), Some("1,3"));
        assert!(control.is_loading());

        respond(&mut control, effects, scenario_items());
        assert!(!control.is_loading());
        assert_eq!(control.selected_ids(), &[id("1"), id("3")]);
        let names: Vec<_> = control.selected_details().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_mount_without_value_does_not_hydrate() {
        let pointers = PointerRegistry::new();
        let mut control = MultiSelect::new(Props {
            value: Some(vec![]),
            ..props()
        });
        assert!(control.mount(&pointers).is_empty());

        control.unmount();
        assert!(pointers.is_empty());
    }

    #[test]
    fn test_drop_releases_listener() {
        let pointers = PointerRegistry::new();
        {
            let mut control = MultiSelect::new(props());
            control.mount(&pointers);
            assert_eq!(pointers.len(), 1);
        }
        assert!(pointers.is_empty());
    }

    #[test]
    fn test_hydrate_failure_keeps_state() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        let effects = control.hydrate();
        fail(&mut control, effects);
        assert!(!control.is_loading());
        assert!(control.selection().is_empty());
    }

    #[test]
    fn test_scenario_hydrate_then_open() {
        let pointers = PointerRegistry::new();
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1"), id("3")]),
            ..props()
        });
        let effects = control.mount(&pointers);
        respond(&mut control, effects, scenario_items());

        open_with(&mut control, scenario_items());
        let order: Vec<_> = control.candidates().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec![EMPTY_VALUE, "1", "3"]);
        assert_eq!(control.selected_ids(), &[id("1"), id("3")]);
        assert!(control.is_checked(&id("1")));
        assert!(!control.is_checked(&id(EMPTY_VALUE)));
    }

    #[test]
    fn test_open_fetches_only_when_empty() {
        let mut control = MultiSelect::new(props());
        let effects = control.toggle_open();
        assert_eq!(requests(&effects).len(), 1);
        assert_eq!(requests(&effects)[0].query.get("fields"), Some("id,name"));
        respond(&mut control, effects, vec![Item::new("1", "A")]);

        let close = control.toggle_open();
        assert!(requests(&close).is_empty());
        assert!(control.toggle_open().is_empty());
        assert!(control.is_open());
    }

    #[test]
    fn test_disabled_control_does_not_open() {
        let mut control = MultiSelect::new(Props {
            disabled: true,
            ..props()
        });
        assert!(control.toggle_open().is_empty());
        assert!(!control.is_open());
    }

    #[test]
    fn test_single_flight_drops_second_fetch() {
        let mut control = MultiSelect::new(props());
        let first = control.fetch(None);
        assert_eq!(requests(&first).len(), 1);
        assert!(control.fetch(Some(SearchTerm::NameLike("x".into()))).is_empty());

        respond(&mut control, first, vec![]);
        assert!(!control.is_fetching());
        assert_eq!(requests(&control.fetch(None)).len(), 1);
    }

    #[test]
    fn test_hydration_does_not_release_fetch_guard() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        let hydrate = control.hydrate();
        let _fetch = control.fetch(None);
        respond(&mut control, hydrate, vec![Item::new("1", "A")]);

        assert!(control.is_fetching());
        assert!(control.fetch(None).is_empty());
    }

    #[test]
    fn test_prune_on_fetch() {
        let mut control = MultiSelect::new(props());
        open_with(
            &mut control,
            vec![Item::new("1", "A"), Item::new("2", "B"), Item::new("3", "C")],
        );
        control.toggle_at(0);
        control.toggle_at(1);
        control.toggle_at(2);

        let effects = control.fetch(None);
        respond(&mut control, effects, vec![Item::new("3", "C"), Item::new("1", "A")]);
        assert_eq!(control.selected_ids(), &[id("1"), id("3")]);
        assert_eq!(control.selected_details().len(), 2);
    }

    #[test]
    fn test_fetch_failure_keeps_candidates() {
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![Item::new("1", "A")]);
        control.toggle_at(0);

        let effects = control.fetch(None);
        fail(&mut control, effects);
        assert!(!control.is_loading());
        assert_eq!(control.candidates().len(), 1);
        assert_eq!(control.selected_ids(), &[id("1")]);
    }

    #[test]
    fn test_commit_on_close() {
        let mut control = MultiSelect::new(props());
        open_with(
            &mut control,
            vec![Item::new("1", "A"), Item::new("2", "B"), Item::new("3", "C")],
        );

        let mut all = control.toggle(&id("3"), "C");
        all.extend(control.toggle(&id("1"), "A"));
        assert!(commits(&all).is_empty());

        all.extend(control.toggle_open());
        assert_eq!(commits(&all), vec![vec![id("3"), id("1")]]);
        assert!(!control.is_open());
    }

    #[test]
    fn test_close_keeps_search_and_issues_no_fetch() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![Item::new("1", "Alpha"), Item::new("2", "Beta")]);
        control.toggle_at(1);

        control.search_input("alp", start);
        let search = control.tick(start + Duration::from_millis(300));
        respond(&mut control, search, vec![Item::new("1", "Alpha"), Item::new("2", "Beta")]);

        let effects = control.toggle_open();
        assert_eq!(effects, vec![Effect::Commit(vec![id("2")])]);
        assert_eq!(control.search_text(), "alp");
        assert_eq!(control.selected_ids(), &[id("2")]);
    }

    #[test]
    fn test_close_commits_even_when_unchanged() {
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![]);
        assert_eq!(commits(&control.toggle_open()), vec![Vec::<Identifier>::new()]);
    }

    #[test]
    fn test_change_on_select_commits_every_toggle() {
        let mut control = MultiSelect::new(Props {
            change_on_select: true,
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A"), Item::new("2", "B")]);

        assert_eq!(commits(&control.toggle_at(0)), vec![vec![id("1")]]);
        assert_eq!(commits(&control.toggle_at(1)), vec![vec![id("1"), id("2")]]);
        assert_eq!(commits(&control.toggle_open()), vec![vec![id("1"), id("2")]]);
    }

    #[test]
    fn test_toggle_clears_active_search() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![Item::new("1", "Alpha"), Item::new("2", "Beta")]);

        control.search_input("alp", start);
        let search = control.tick(start + Duration::from_millis(300));
        assert_eq!(requests(&search)[0].query.get("q[name][like]"), Some("alp"));
        respond(&mut control, search, vec![Item::new("1", "Alpha")]);

        let effects = control.toggle_at(0);
        assert_eq!(control.search_text(), "");
        let reqs = requests(&effects);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].query.get("q[name][like]"), None);

        respond(&mut control, effects, vec![Item::new("1", "Alpha"), Item::new("2", "Beta")]);
        assert_eq!(control.candidates().len(), 2);
        assert_eq!(control.selected_ids(), &[id("1")]);
    }

    #[test]
    fn test_search_debounce_collapses_burst() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![Item::new("1", "A")]);

        for (i, text) in ["a", "ab", "abc"].iter().enumerate() {
            let at = start + Duration::from_millis(i as u64 * 100);
            control.search_input(*text, at);
            assert!(control.tick(at).is_empty());
        }

        assert!(control.tick(start + Duration::from_millis(400)).is_empty());
        let effects = control.tick(start + Duration::from_millis(450));
        let reqs = requests(&effects);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].query.get("q[name][like]"), Some("abc"));
        assert!(control.tick(start + Duration::from_millis(900)).is_empty());
    }

    #[test]
    fn test_search_by_id_prefix() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        control.search_input("  #42 ", start);
        let effects = control.tick(start + Duration::from_millis(250));
        assert_eq!(requests(&effects)[0].query.get("q[id][equal]"), Some("42"));
    }

    #[test]
    fn test_whitespace_search_clears_and_fetches_unfiltered() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        control.search_input("   ", start);
        let effects = control.tick(start + Duration::from_millis(250));

        assert_eq!(control.search_text(), "");
        let reqs = requests(&effects);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].query.pairs().len(), 1);
    }

    #[test]
    fn test_outside_click_unchanged_does_not_commit() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A"), Item::new("2", "B")]);
        control.toggle_at(0);
        control.toggle_at(0);
        control.toggle_at(0);
        assert_eq!(control.selected_ids(), &[id("1")]);

        assert!(commits(&control.pointer_down_outside()).is_empty());
        assert!(!control.is_open());
    }

    #[test]
    fn test_outside_click_changed_commits() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A"), Item::new("2", "B")]);
        control.toggle_at(1);

        assert_eq!(commits(&control.pointer_down_outside()), vec![vec![id("2")]]);
    }

    #[test]
    fn test_outside_click_absent_and_empty_are_equal() {
        let mut control = MultiSelect::new(Props {
            value: None,
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A")]);
        assert!(commits(&control.pointer_down_outside()).is_empty());

        let mut control = MultiSelect::new(Props {
            value: Some(vec![]),
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A")]);
        assert!(commits(&control.pointer_down_outside()).is_empty());
    }

    #[test]
    fn test_outside_click_deselecting_all_commits_empty() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        let effects = control.hydrate();
        respond(&mut control, effects, vec![Item::new("1", "A")]);
        open_with(&mut control, vec![Item::new("1", "A")]);
        control.toggle_at(0);

        assert_eq!(commits(&control.pointer_down_outside()), vec![Vec::<Identifier>::new()]);
    }

    #[test]
    fn test_outside_click_clears_search_and_refetches() {
        let start = Instant::now();
        let mut control = MultiSelect::new(props());
        open_with(&mut control, vec![Item::new("1", "A")]);
        control.search_input("zzz", start);

        let effects = control.pointer_down_outside();
        assert_eq!(control.search_text(), "");
        assert_eq!(requests(&effects).len(), 1);
        assert!(control.search_deadline().is_none());
    }

    #[test]
    fn test_outside_click_when_closed_is_ignored() {
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            ..props()
        });
        assert!(control.pointer_down_outside().is_empty());
    }

    #[test]
    fn test_params_change_disabled_clears_everything() {
        let mut params = Params::new();
        params.insert("country".into(), ParamValue::from("1"));
        let mut control = MultiSelect::new(Props {
            params: Some(params.clone()),
            ..props()
        });
        open_with(&mut control, vec![Item::new("1", "A"), Item::new("2", "B")]);
        control.toggle_at(0);

        params.insert("country".into(), ParamValue::from("2"));
        let effects = control.set_props(Props {
            params: Some(params),
            disabled: true,
            ..props()
        });

        assert!(effects.is_empty());
        assert!(control.selected_ids().is_empty());
        assert!(control.selected_details().is_empty());
        assert!(control.candidates().is_empty());
    }

    #[test]
    fn test_late_responses_after_disable_are_discarded() {
        let pointers = PointerRegistry::new();
        let mut params = Params::new();
        params.insert("country".into(), ParamValue::from("1"));
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            params: Some(params.clone()),
            ..props()
        });
        let hydrate = control.mount(&pointers);
        let fetch = control.fetch(None);

        params.insert("country".into(), ParamValue::from("2"));
        control.set_props(Props {
            value: Some(vec![id("1")]),
            params: Some(params),
            disabled: true,
            ..props()
        });

        respond(&mut control, hydrate, vec![Item::new("1", "A")]);
        respond(&mut control, fetch, vec![Item::new("1", "A"), Item::new("2", "B")]);

        assert!(control.selected_ids().is_empty());
        assert!(control.selected_details().is_empty());
        assert!(control.candidates().is_empty());
        assert!(!control.is_loading());
    }

    #[test]
    fn test_params_change_enabled_rehydrates_and_refetches() {
        let mut params = Params::new();
        params.insert("country".into(), ParamValue::from(vec!["1", "2"]));
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("7")]),
            params: Some(Params::new()),
            ..props()
        });

        let effects = control.set_props(Props {
            value: Some(vec![id("7")]),
            params: Some(params),
            ..props()
        });
        let reqs = requests(&effects);
        assert_eq!(reqs.len(), 2);
        assert!(matches!(reqs[0].kind, RequestKind::Hydrate { .. }));
        assert_eq!(reqs[0].query.get("country"), Some("1,2"));
        assert_eq!(reqs[1].kind, RequestKind::Candidates);
        assert_eq!(reqs[1].query.get("country"), Some("1,2"));
    }

    #[test]
    fn test_params_unchanged_or_absent_is_noop() {
        let mut params = Params::new();
        params.insert("a".into(), ParamValue::from("1"));
        let mut control = MultiSelect::new(Props {
            value: Some(vec![id("1")]),
            params: Some(params.clone()),
            ..props()
        });

        assert!(control
            .set_props(Props {
                value: Some(vec![id("1")]),
                params: Some(params),
                hide_ids: true,
                ..props()
            })
            .is_empty());
        assert!(control.props().hide_ids);

        assert!(control.set_props(props()).is_empty());
    }

    #[test]
    fn test_filter_endpoint() {
        let mut control = MultiSelect::new(Props {
            filter: Some("cities".to_string()),
            ..props()
        });
        let effects = control.fetch(None);
        assert_eq!(requests(&effects)[0].path, "v1/statistic-light-filters/cities");
    }

    #[test]
    fn test_no_endpoint_issues_nothing() {
        let mut control = MultiSelect::new(Props::default());
        assert!(control.fetch(None).is_empty());
        assert!(!control.is_loading());
    }

    #[test]
    fn test_apply_keyboard_actions() {
        let now = Instant::now();
        let mut control = MultiSelect::new(props());
        let effects = control.apply(Action::ToggleOpen, now);
        respond(&mut control, effects, vec![Item::new("1", "A"), Item::new("2", "B")]);

        control.apply(Action::HighlightNext, now);
        control.apply(Action::ToggleHighlighted, now);
        assert_eq!(control.selected_ids(), &[id("2")]);

        control.apply(Action::SearchChar('x'), now);
        control.apply(Action::SearchChar('y'), now);
        control.apply(Action::SearchBackspace, now);
        assert_eq!(control.search_text(), "x");
    }
}
