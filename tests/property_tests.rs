//! Property-based tests for the transition graph and engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and walks.

use proptest::prelude::*;
use switchyard::core::{Graph, State};
use switchyard::{Machine, MachineError};

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

prop_compose! {
    fn arbitrary_state()(index in 0..NAMES.len()) -> &'static str {
        NAMES[index]
    }
}

prop_compose! {
    fn arbitrary_edges()(
        edges in prop::collection::vec((arbitrary_state(), arbitrary_state()), 0..20)
    ) -> Vec<(&'static str, &'static str)> {
        edges
    }
}

proptest! {
    #[test]
    fn adjacency_is_always_mutual(edges in arbitrary_edges()) {
        let mut graph = Graph::new();
        for (from, to) in &edges {
            let _ = graph.add_edge(from, to);
        }

        for name in NAMES {
            let Some(node) = graph.node(&name) else { continue };
            for to in node.to() {
                let target = graph.node(to).unwrap();
                prop_assert!(target.from().contains(&name));
            }
            for from in node.from() {
                let source = graph.node(from).unwrap();
                prop_assert!(source.to().contains(&name));
            }
        }
    }

    #[test]
    fn self_loops_never_enter_the_graph(edges in arbitrary_edges()) {
        let mut graph = Graph::new();
        for (from, to) in &edges {
            let result = graph.add_edge(from, to);
            prop_assert_eq!(result.is_err(), from == to);
        }

        for name in NAMES {
            prop_assert!(!graph.has_edge(&name, &name));
        }
    }

    #[test]
    fn failed_go_to_leaves_machine_untouched(
        edges in arbitrary_edges(),
        walk in prop::collection::vec(arbitrary_state(), 1..15),
    ) {
        let mut machine = Machine::new();
        machine.add_transitions("a", NAMES[1..].iter().copied()).finish().unwrap();
        for &(from, to) in &edges {
            let _ = machine.add_transition(from, to).finish();
        }
        machine.set_state("a").unwrap();

        for target in walk {
            let before_state = *machine.state();
            let before_history = machine.history().clone();
            let allowed = machine.can_go_to(&target);

            match machine.go_to(&target) {
                Ok(()) => {
                    prop_assert!(allowed);
                    prop_assert_eq!(*machine.state(), target);
                }
                Err(MachineError::InvalidTransition { .. }) => {
                    prop_assert!(!allowed);
                    prop_assert_eq!(*machine.state(), before_state);
                    prop_assert_eq!(machine.history(), &before_history);
                }
                Err(err) => prop_assert!(false, "unexpected error: {}", err),
            }
        }
    }

    #[test]
    fn go_back_retraces_every_forward_move(
        edges in arbitrary_edges(),
        walk in prop::collection::vec(arbitrary_state(), 1..15),
    ) {
        let mut machine = Machine::new();
        machine.add_transitions("a", NAMES[1..].iter().copied()).finish().unwrap();
        for &(from, to) in &edges {
            let _ = machine.add_transition(from, to).finish();
        }
        machine.set_state("a").unwrap();

        let mut visited = vec![*machine.state()];
        for target in walk {
            if target != *machine.state() && machine.go_to(&target).is_ok() {
                visited.push(target);
            }
        }

        while machine.go_back().is_ok() {
            visited.pop();
            prop_assert_eq!(Some(machine.state()), visited.last());
        }
        prop_assert_eq!(visited, vec!["a"]);
        prop_assert!(machine.history().is_empty());
    }

    #[test]
    fn clone_never_observes_the_original(
        walk in prop::collection::vec(arbitrary_state(), 1..10),
    ) {
        let mut machine = Machine::new();
        for from in NAMES {
            let tos = NAMES.iter().copied().filter(move |to| *to != from);
            machine.add_transitions(from, tos).finish().unwrap();
        }
        machine.set_state("a").unwrap();
        let clone = machine.clone();

        for target in walk {
            machine.go_to(&target).unwrap();
        }

        prop_assert_eq!(clone.state(), &"a");
        prop_assert!(clone.history().is_empty());
    }

    #[test]
    fn sentinel_is_never_declared(name in arbitrary_state()) {
        let mut machine = Machine::new();
        machine.declare_state(name).finish().unwrap();

        prop_assert!(matches!(
            machine.declare_state("").finish(),
            Err(MachineError::ReservedState)
        ));
        prop_assert!(machine.add_transition(name, "").finish().is_err());
        prop_assert!(machine.states().iter().all(|state| !state.is_sentinel()));
    }
}
