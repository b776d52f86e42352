//! `PlumbingEngine`: the mutable, composed plumbing network.
//!
//! Grounded line-by-line on
//! `examples/original_source/topside/plumbing/plumbing_engine.py`'s
//! `PlumbingEngine` class. The biggest structural departure is the
//! `FailurePolicy` enum standing in for the original's `fail_silently`
//! boolean, and `StableGraph`/`IndexMap`/`IndexSet` standing in for a
//! dynamically-typed multigraph and a hand-rolled error set.

use indexmap::{IndexMap, IndexSet};

use ps_components::{ComponentNodeId, NodeBody, PlumbingComponent};
use ps_core::convergence::{all_converged, CONVERGENCE_WINDOW};
use ps_core::flatten::{flatten, Arg};
use ps_core::units::{
    fc_to_teq, micros_to_s, s_to_micros, teq_to_fc, ATM, DEFAULT_RESOLUTION_SCALE,
    DEFAULT_TIME_RESOLUTION_MICROS, FC_MAX, MIN_TIME_RES_MICROS, TEQ_MIN_MICROS,
};

use crate::error::{BadInputError, EngineStepError, FailurePolicy, InvalidEngineError, ValidationError};
use crate::graph::PlumbingGraph;

/// Binds a component's internal node ids to global node names.
pub type Mapping = IndexMap<ComponentNodeId, String>;

/// A query result that is a single value when exactly one name was asked
/// for and a map otherwise (spec §6, "Scalar-vs-map return").
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOrMap<T> {
    Scalar(T),
    Map(IndexMap<String, T>),
}

/// `solve`'s return shape: the last snapshot when no `return_resolution`
/// was given, or the full history when one was.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Last(IndexMap<String, f64>),
    History(Vec<IndexMap<String, f64>>),
}

#[derive(Debug, Clone)]
pub struct PlumbingEngine {
    graph: PlumbingGraph,
    bodies: IndexMap<String, NodeBody>,
    component_dict: IndexMap<String, PlumbingComponent>,
    mapping: IndexMap<String, Mapping>,
    fixed_pressures: IndexSet<String>,
    time_res: u64,
    time: u64,
    error_set: IndexSet<ValidationError>,

    initial_components: IndexMap<String, PlumbingComponent>,
    initial_mapping: IndexMap<String, Mapping>,
    initial_pressure: IndexMap<String, (f64, bool)>,
    initial_state: IndexMap<String, String>,
}

impl Default for PlumbingEngine {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlumbingEngine {
    /// A genuinely empty engine: no nodes, no edges, no components. `atm`
    /// is not special-cased here; it only enters the graph once some
    /// component's mapping actually wires up to it (see `ensure_body`).
    fn empty() -> Self {
        Self {
            graph: PlumbingGraph::new(),
            bodies: IndexMap::new(),
            component_dict: IndexMap::new(),
            mapping: IndexMap::new(),
            fixed_pressures: IndexSet::new(),
            time_res: DEFAULT_TIME_RESOLUTION_MICROS,
            time: 0,
            error_set: IndexSet::new(),
            initial_components: IndexMap::new(),
            initial_mapping: IndexMap::new(),
            initial_pressure: IndexMap::new(),
            initial_state: IndexMap::new(),
        }
    }

    /// Builds a fresh engine from PDL-shaped construction inputs (spec
    /// §4.2). Equivalent to `empty().load_graph(...)`.
    pub fn new(
        components: IndexMap<String, PlumbingComponent>,
        mapping: IndexMap<String, Mapping>,
        initial_pressures: IndexMap<String, (f64, bool)>,
        initial_states: IndexMap<String, String>,
    ) -> Result<Self, BadInputError> {
        let mut engine = Self::empty();
        engine.load_graph(components, mapping, initial_pressures, initial_states)?;
        Ok(engine)
    }

    /// Replaces the engine's entire contents. Per-component faults
    /// accumulate in `error_set`; an `initial_pressures` entry whose node
    /// no component ever introduces is a hard error.
    pub fn load_graph(
        &mut self,
        components: IndexMap<String, PlumbingComponent>,
        mapping: IndexMap<String, Mapping>,
        initial_pressures: IndexMap<String, (f64, bool)>,
        initial_states: IndexMap<String, String>,
    ) -> Result<(), BadInputError> {
        *self = Self::empty();
        self.initial_components = components.clone();
        self.initial_mapping = mapping.clone();
        self.initial_pressure = initial_pressures.clone();
        self.initial_state = initial_states.clone();

        let mut introduced: IndexSet<String> = IndexSet::new();

        for (name, component) in components {
            if !component.is_valid() {
                self.error_set
                    .insert(ValidationError::invalid_component(&name));
                continue;
            }
            let Some(submap) = mapping.get(&name) else {
                self.error_set
                    .insert(ValidationError::invalid_component_name(&name));
                continue;
            };
            let Some(state) = initial_states.get(&name) else {
                self.error_set
                    .insert(ValidationError::invalid_component_name(&name));
                continue;
            };

            for target in submap.values() {
                introduced.insert(target.clone());
            }
            let node_pressures: IndexMap<String, (f64, bool)> = submap
                .values()
                .filter_map(|target| initial_pressures.get(target).map(|p| (target.clone(), *p)))
                .collect();

            self.add_component_internal(
                component,
                submap.clone(),
                state.clone(),
                node_pressures,
                FailurePolicy::Accumulate,
            )
            .expect("FailurePolicy::Accumulate never raises");
        }

        for node in initial_pressures.keys() {
            if !introduced.contains(node) {
                return Err(BadInputError::UnintroducedPressureNode(node.clone()));
            }
        }

        Ok(())
    }

    /// Restores `time`, pressures, and states from the retained construction
    /// inputs. With `reset_component`, also re-inserts components that were
    /// removed since load and removes components that were added since.
    pub fn reset(&mut self, reset_component: bool) -> Result<(), BadInputError> {
        self.time = 0;
        self.error_set.clear();

        let initial_pressure = self.initial_pressure.clone();
        let initial_state = self.initial_state.clone();
        let initial_components = self.initial_components.clone();
        let initial_mapping = self.initial_mapping.clone();

        if reset_component {
            // Snapshot keys before mutating component_dict (spec §9 Open
            // Question: "a reimplementation should snapshot keys first").
            let current_names: Vec<String> = self.component_dict.keys().cloned().collect();
            for name in current_names {
                if !initial_components.contains_key(&name) {
                    self.remove_component(&name)?;
                }
            }

            let missing: Vec<String> = initial_components
                .keys()
                .filter(|name| !self.component_dict.contains_key(*name))
                .cloned()
                .collect();
            for name in missing {
                let component = initial_components[&name].clone();
                let submap = initial_mapping.get(&name).cloned().unwrap_or_default();
                let state = initial_state.get(&name).cloned().unwrap_or_default();
                let node_pressures: IndexMap<String, (f64, bool)> = submap
                    .values()
                    .filter_map(|target| initial_pressure.get(target).map(|p| (target.clone(), *p)))
                    .collect();
                self.add_component_internal(
                    component,
                    submap,
                    state,
                    node_pressures,
                    FailurePolicy::Accumulate,
                )?;
            }
        }

        for (name, state) in &initial_state {
            if self.component_dict.contains_key(name) {
                self.apply_state(name, state, FailurePolicy::Accumulate)?;
            }
        }
        for (node, (pressure, fixed)) in &initial_pressure {
            if self.graph.has_node(node) {
                self.set_pressure_internal(node, *pressure, *fixed, FailurePolicy::Accumulate)?;
            }
        }

        Ok(())
    }

    /// Inserts `component`, wires its edges through `submap`, applies
    /// `state_id`, and seeds `node_pressures`. Always raises on a malformed
    /// mapping or state (host-facing; construction uses the internal,
    /// fail-silent variant).
    pub fn add_component(
        &mut self,
        component: PlumbingComponent,
        submap: Mapping,
        state_id: String,
        node_pressures: IndexMap<String, (f64, bool)>,
    ) -> Result<(), BadInputError> {
        self.add_component_internal(
            component,
            submap,
            state_id,
            node_pressures,
            FailurePolicy::Raise,
        )
    }

    fn add_component_internal(
        &mut self,
        component: PlumbingComponent,
        submap: Mapping,
        state_id: String,
        node_pressures: IndexMap<String, (f64, bool)>,
        policy: FailurePolicy,
    ) -> Result<(), BadInputError> {
        let name = component.name().to_string();
        self.component_dict.insert(name.clone(), component.clone());
        self.mapping.insert(name.clone(), submap.clone());

        for key in component.edge_keys() {
            let (src, dst) = component
                .edge_endpoints(key)
                .expect("edge_keys() only yields keys present on this component");
            let global_key = format!("{name}.{key}");
            match (submap.get(src), submap.get(dst)) {
                (Some(g_src), Some(g_dst)) => {
                    self.graph.add_edge(&global_key, g_src, g_dst, 0.0);
                    self.ensure_body(g_src);
                    self.ensure_body(g_dst);
                }
                _ => {
                    let missing = if submap.get(src).is_none() {
                        src.to_string()
                    } else {
                        dst.to_string()
                    };
                    match policy {
                        FailurePolicy::Accumulate => {
                            self.error_set
                                .insert(ValidationError::invalid_component_node(&name, &missing));
                        }
                        FailurePolicy::Raise => return Err(BadInputError::UnknownNode(missing)),
                    }
                }
            }
        }

        self.apply_state(&name, &state_id, policy)?;

        for (node, (pressure, fixed)) in node_pressures {
            self.set_pressure_internal(&node, pressure, fixed, policy)?;
        }

        self.recompute_time_res_for(&name);
        Ok(())
    }

    /// Creates a body for `node` on first reference. `atm` is special-cased
    /// to a fixed zero-pressure body the moment anything wires up to it,
    /// rather than existing unconditionally from construction.
    fn ensure_body(&mut self, node: &str) {
        if node == ATM {
            self.bodies
                .entry(node.to_string())
                .or_insert_with(|| NodeBody::new(0.0, true));
            self.fixed_pressures.insert(node.to_string());
        } else {
            self.bodies
                .entry(node.to_string())
                .or_insert_with(|| NodeBody::new(0.0, false));
        }
    }

    /// Sets a component's active state, bulk-updating its edges' FC in the
    /// live graph. Host-facing; always raises.
    pub fn set_component_state(&mut self, name: &str, state: &str) -> Result<(), BadInputError> {
        self.apply_state(name, state, FailurePolicy::Raise)
    }

    fn apply_state(
        &mut self,
        name: &str,
        state: &str,
        policy: FailurePolicy,
    ) -> Result<(), BadInputError> {
        let Some(component) = self.component_dict.get(name) else {
            return match policy {
                FailurePolicy::Raise => Err(BadInputError::UnknownComponent(name.to_string())),
                FailurePolicy::Accumulate => {
                    self.error_set
                        .insert(ValidationError::invalid_component_name(name));
                    Ok(())
                }
            };
        };

        let Some(fc_map) = component.fc_map(state).cloned() else {
            return match policy {
                FailurePolicy::Raise => Err(BadInputError::UnknownState {
                    component: name.to_string(),
                    state: state.to_string(),
                }),
                FailurePolicy::Accumulate => {
                    self.error_set
                        .insert(ValidationError::invalid_component_state(name, state));
                    Ok(())
                }
            };
        };

        for (edge, fc) in &fc_map {
            let key = format!("{name}.{edge}");
            self.graph.set_fc(&key, *fc);
        }

        let stored = self
            .component_dict
            .get_mut(name)
            .expect("looked up above under the same key");
        stored
            .set_current_state(state)
            .expect("state's existence was already confirmed via fc_map");

        Ok(())
    }

    /// Removes every edge keyed `"<name>.*"`, any node left without
    /// neighbors, and cascades error-set cleanup, then recomputes
    /// `time_res` over the remaining components.
    pub fn remove_component(&mut self, name: &str) -> Result<(), BadInputError> {
        if !self.component_dict.contains_key(name) {
            return Err(BadInputError::UnknownComponent(name.to_string()));
        }

        let prefix = format!("{name}.");
        let touched: Vec<String> = self.graph.node_names().map(str::to_string).collect();
        self.graph.remove_edges_with_prefix(&prefix);
        for node in touched {
            if self.graph.remove_node_if_isolated(&node) {
                self.bodies.shift_remove(&node);
                self.fixed_pressures.shift_remove(&node);
            }
        }

        self.component_dict.shift_remove(name);
        self.mapping.shift_remove(name);

        self.error_set.retain(|e| !e.mentions_component(name));
        let remaining: IndexSet<String> = self.graph.node_names().map(str::to_string).collect();
        self.error_set.retain(|e| match &e.node_name {
            Some(node) => remaining.contains(node),
            None => true,
        });

        self.recompute_time_res_from_scratch();
        Ok(())
    }

    /// Swaps the FC of a 2-edge component's two edges; refused for any
    /// other edge count.
    pub fn reverse_orientation(&mut self, name: &str) -> Result<(), BadInputError> {
        let component = self
            .component_dict
            .get(name)
            .ok_or_else(|| BadInputError::UnknownComponent(name.to_string()))?;
        let keys: Vec<String> = component.edge_keys().map(str::to_string).collect();
        if keys.len() != 2 {
            return Err(BadInputError::NotTwoEdges {
                name: name.to_string(),
                count: keys.len(),
            });
        }

        let key_a = format!("{name}.{}", keys[0]);
        let key_b = format!("{name}.{}", keys[1]);
        if let (Some(fc_a), Some(fc_b)) = (self.graph.fc(&key_a), self.graph.fc(&key_b)) {
            self.graph.set_fc(&key_a, fc_b);
            self.graph.set_fc(&key_b, fc_a);
        }
        Ok(())
    }

    /// Writes a node's pressure and fixed flag. Host-facing; always raises.
    pub fn set_pressure(&mut self, node: &str, pressure: f64, fixed: bool) -> Result<(), BadInputError> {
        self.set_pressure_internal(node, pressure, fixed, FailurePolicy::Raise)
    }

    fn set_pressure_internal(
        &mut self,
        node: &str,
        pressure: f64,
        fixed: bool,
        policy: FailurePolicy,
    ) -> Result<(), BadInputError> {
        if !pressure.is_finite() || pressure < 0.0 {
            return match policy {
                FailurePolicy::Raise => Err(BadInputError::InvalidPressure { value: pressure }),
                FailurePolicy::Accumulate => {
                    self.error_set
                        .insert(ValidationError::invalid_node_pressure(node));
                    Ok(())
                }
            };
        }
        if node == ATM && pressure != 0.0 {
            return match policy {
                FailurePolicy::Raise => Err(BadInputError::NonZeroAtmPressure { value: pressure }),
                FailurePolicy::Accumulate => {
                    self.error_set
                        .insert(ValidationError::invalid_node_pressure(node));
                    Ok(())
                }
            };
        }
        if !self.graph.has_node(node) {
            return match policy {
                FailurePolicy::Raise => Err(BadInputError::UnknownNode(node.to_string())),
                FailurePolicy::Accumulate => {
                    self.error_set
                        .insert(ValidationError::invalid_node_pressure(node));
                    Ok(())
                }
            };
        }

        let body = self
            .bodies
            .entry(node.to_string())
            .or_insert_with(|| NodeBody::new(0.0, false));
        body.set(pressure, fixed);
        if fixed {
            self.fixed_pressures.insert(node.to_string());
        } else {
            self.fixed_pressures.shift_remove(node);
        }
        Ok(())
    }

    /// Rebinds one or more edges' equilibration time, in seconds, across
    /// one or more states. `teq` below `TEQ_MIN` is rejected.
    pub fn set_teq(
        &mut self,
        name: &str,
        which_edge: IndexMap<String, IndexMap<String, f64>>,
    ) -> Result<(), BadInputError> {
        if !self.component_dict.contains_key(name) {
            return Err(BadInputError::UnknownComponent(name.to_string()));
        }

        for (state, edges) in &which_edge {
            for (edge, teq_seconds) in edges {
                let teq_micros = s_to_micros(*teq_seconds);
                if teq_micros < TEQ_MIN_MICROS {
                    return Err(BadInputError::TeqTooSmall {
                        min: TEQ_MIN_MICROS,
                        got: teq_micros,
                    });
                }
                let fc = teq_to_fc(teq_micros);

                let component = self
                    .component_dict
                    .get_mut(name)
                    .expect("checked contains_key above");
                let is_current = component.current_state() == state.as_str();
                component
                    .set_fc(state, edge, fc)
                    .map_err(|_| BadInputError::UnknownEdge {
                        component: name.to_string(),
                        edge: edge.clone(),
                    })?;

                if is_current {
                    let key = format!("{name}.{edge}");
                    self.graph.set_fc(&key, fc);
                }
            }
        }

        self.recompute_time_res_from_scratch();
        Ok(())
    }

    fn max_sub_open_fc(component: &PlumbingComponent) -> Option<f64> {
        component
            .state_names()
            .filter_map(|state| component.fc_map(state))
            .flat_map(|map| map.values())
            .filter(|fc| fc.is_finite() && **fc < FC_MAX)
            .copied()
            .fold(None, |acc, fc| Some(acc.map_or(fc, |a: f64| a.max(fc))))
    }

    fn time_res_candidate(max_fc: f64) -> u64 {
        ((fc_to_teq(max_fc) as f64 / DEFAULT_RESOLUTION_SCALE) as u64).max(MIN_TIME_RES_MICROS)
    }

    /// Shrinks `time_res` to accommodate `name`'s fastest (non fully-open)
    /// edge, never growing it.
    fn recompute_time_res_for(&mut self, name: &str) {
        let Some(component) = self.component_dict.get(name) else {
            return;
        };
        if let Some(max_fc) = Self::max_sub_open_fc(component) {
            self.time_res = self.time_res.min(Self::time_res_candidate(max_fc));
        }
    }

    /// Recomputes `time_res` over every currently-loaded component, used
    /// after a component is removed or a `teq` is rebound.
    fn recompute_time_res_from_scratch(&mut self) {
        let mut time_res = DEFAULT_TIME_RESOLUTION_MICROS;
        for component in self.component_dict.values() {
            if let Some(max_fc) = Self::max_sub_open_fc(component) {
                time_res = time_res.min(Self::time_res_candidate(max_fc));
            }
        }
        self.time_res = time_res.max(MIN_TIME_RES_MICROS);
    }

    fn ensure_steppable(&self) -> Result<(), InvalidEngineError> {
        if self.graph.is_empty() {
            return Err(InvalidEngineError::EmptyGraph);
        }
        if !self.error_set.is_empty() {
            return Err(InvalidEngineError::HasValidationErrors(self.error_set.len()));
        }
        Ok(())
    }

    /// Advances the simulation by exactly `timestep_micros` (defaulting to
    /// `time_res`), integrating in synchronous-Euler sub-steps of
    /// `time_res`. Returns the post-integration pressure of every node.
    pub fn step(&mut self, timestep_micros: Option<u64>) -> Result<IndexMap<String, f64>, EngineStepError> {
        self.ensure_steppable()?;

        let timestep = timestep_micros.unwrap_or(self.time_res);
        if timestep < MIN_TIME_RES_MICROS {
            return Err(BadInputError::TimestepTooSmall {
                min: MIN_TIME_RES_MICROS,
                got: timestep,
            }
            .into());
        }
        if timestep < self.time_res {
            self.time_res = timestep;
        }

        let mut remaining = timestep;
        while remaining > 0 {
            let sub = remaining.min(self.time_res);
            self.sub_step(sub);
            self.time += sub;
            remaining -= sub;
        }

        Ok(self.pressures_snapshot())
    }

    fn sub_step(&mut self, dt_micros: u64) {
        let dt = micros_to_s(dt_micros);
        let names: Vec<String> = self.graph.node_names().map(str::to_string).collect();
        let mut next: Vec<(String, f64)> = Vec::with_capacity(names.len());

        for n in &names {
            if n == ATM || self.fixed_pressures.contains(n) {
                continue;
            }
            let p = self.bodies.get(n).map(NodeBody::pressure).unwrap_or(0.0);
            let mut dp = 0.0;

            for (target, fc) in self.graph.out_edges(n) {
                let p_target = self.bodies.get(&target).map(NodeBody::pressure).unwrap_or(0.0);
                if p > p_target {
                    dp -= fc * (p - p_target);
                }
            }
            for (source, fc) in self.graph.in_edges(n) {
                let p_source = self.bodies.get(&source).map(NodeBody::pressure).unwrap_or(0.0);
                if p < p_source {
                    dp += fc * (p_source - p);
                }
            }

            next.push((n.clone(), p + dp * dt));
        }

        for (n, new_pressure) in next {
            if let Some(body) = self.bodies.get_mut(&n) {
                body.set_pressure(new_pressure);
            }
        }
    }

    /// Drives `step` until pressures converge over a trailing window or
    /// `max_time_s` elapses. Convergence: every node's maximum absolute
    /// pressure change across the window, divided by the window's elapsed
    /// time, is below `min_delta_pa_per_s`.
    pub fn solve(
        &mut self,
        min_delta_pa_per_s: f64,
        max_time_s: f64,
        return_resolution_micros: Option<u64>,
    ) -> Result<SolveOutcome, EngineStepError> {
        self.ensure_steppable()?;

        let timestep = return_resolution_micros.unwrap_or(self.time_res);
        let node_order: Vec<String> = self.graph.node_names().map(str::to_string).collect();
        let start_time = self.time;

        let mut history: Vec<IndexMap<String, f64>> = Vec::new();
        let mut window: Vec<(u64, Vec<f64>)> = Vec::new();

        loop {
            let snapshot = self.step(Some(timestep))?;
            let ordered: Vec<f64> = node_order.iter().map(|n| snapshot[n.as_str()]).collect();
            history.push(snapshot);
            window.push((self.time, ordered));
            if window.len() > CONVERGENCE_WINDOW {
                window.remove(0);
            }

            if all_converged(&window, min_delta_pa_per_s) {
                break;
            }

            if micros_to_s(self.time - start_time) >= max_time_s {
                break;
            }
        }

        if return_resolution_micros.is_some() {
            Ok(SolveOutcome::History(history))
        } else {
            Ok(SolveOutcome::Last(
                history.pop().expect("the loop always steps at least once"),
            ))
        }
    }

    fn pressures_snapshot(&self) -> IndexMap<String, f64> {
        self.graph
            .node_names()
            .map(|n| (n.to_string(), self.bodies.get(n).map(NodeBody::pressure).unwrap_or(0.0)))
            .collect()
    }

    pub fn current_state(&self, names: &[String]) -> ScalarOrMap<String> {
        match flatten(names) {
            Arg::All => ScalarOrMap::Map(
                self.component_dict
                    .iter()
                    .map(|(n, c)| (n.clone(), c.current_state().to_string()))
                    .collect(),
            ),
            Arg::One(name) => ScalarOrMap::Scalar(
                self.component_dict
                    .get(&name)
                    .map(|c| c.current_state().to_string())
                    .unwrap_or_default(),
            ),
            Arg::Many(names) => ScalarOrMap::Map(
                names
                    .into_iter()
                    .filter_map(|n| {
                        self.component_dict
                            .get(&n)
                            .map(|c| (n, c.current_state().to_string()))
                    })
                    .collect(),
            ),
        }
    }

    pub fn current_pressures(&self, names: &[String]) -> ScalarOrMap<f64> {
        match flatten(names) {
            Arg::All => ScalarOrMap::Map(self.pressures_snapshot()),
            Arg::One(name) => {
                ScalarOrMap::Scalar(self.bodies.get(&name).map(NodeBody::pressure).unwrap_or(0.0))
            }
            Arg::Many(names) => ScalarOrMap::Map(
                names
                    .into_iter()
                    .map(|n| {
                        let p = self.bodies.get(&n).map(NodeBody::pressure).unwrap_or(0.0);
                        (n, p)
                    })
                    .collect(),
            ),
        }
    }

    fn expand_fc_key(&self, key: &str) -> Vec<String> {
        match self.component_dict.get(key) {
            Some(component) => component
                .edge_keys()
                .map(|edge| format!("{key}.{edge}"))
                .collect(),
            None => vec![key.to_string()],
        }
    }

    /// Accepts either a bare component name (expands to all its edges) or
    /// a full `"<component>.<edge>"` edge key.
    pub fn current_fc(&self, keys: &[String]) -> ScalarOrMap<f64> {
        match flatten(keys) {
            Arg::All => ScalarOrMap::Map(
                self.graph
                    .edge_keys()
                    .filter_map(|k| self.graph.fc(k).map(|fc| (k.to_string(), fc)))
                    .collect(),
            ),
            Arg::One(key) => {
                let expanded = self.expand_fc_key(&key);
                if expanded.len() == 1 {
                    ScalarOrMap::Scalar(self.graph.fc(&expanded[0]).unwrap_or(0.0))
                } else {
                    ScalarOrMap::Map(
                        expanded
                            .into_iter()
                            .filter_map(|k| self.graph.fc(&k).map(|fc| (k, fc)))
                            .collect(),
                    )
                }
            }
            Arg::Many(keys) => ScalarOrMap::Map(
                keys.iter()
                    .flat_map(|k| self.expand_fc_key(k))
                    .filter_map(|k| self.graph.fc(&k).map(|fc| (k, fc)))
                    .collect(),
            ),
        }
    }

    pub fn list_toggles(&self) -> Vec<String> {
        self.component_dict
            .iter()
            .filter(|(_, c)| c.has_multiple_states())
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn nodes(&self) -> Vec<String> {
        self.graph.node_names().map(str::to_string).collect()
    }

    pub fn edges(&self) -> Vec<String> {
        self.graph.edge_keys().map(str::to_string).collect()
    }

    pub fn components(&self) -> Vec<String> {
        self.component_dict.keys().cloned().collect()
    }

    pub fn node_body(&self, node: &str) -> Option<NodeBody> {
        self.bodies.get(node).copied()
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.error_set.iter().cloned().collect()
    }

    pub fn is_valid(&self) -> bool {
        self.error_set.is_empty()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn time_res(&self) -> u64 {
        self.time_res
    }
}
