// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use stigmergy_aco::{colony::AntColony, config::AcoConfig};
use stigmergy_antnet::{antnet::AntNet, config::AntNetConfig};
use stigmergy_eval::baseline::{Baseline, Dijkstra};
use stigmergy_model::graph::Graph;

const REFERENCE_EDGES: [(&str, &str, f64); 11] = [
    ("A", "B", 2.0),
    ("B", "C", 2.0),
    ("A", "H", 2.0),
    ("H", "G", 2.0),
    ("C", "F", 1.0),
    ("F", "G", 1.0),
    ("G", "F", 1.0),
    ("F", "C", 1.0),
    ("C", "D", 10.0),
    ("E", "D", 2.0),
    ("G", "E", 2.0),
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn reference_graph() -> Graph {
    let mut g = Graph::new();
    for (source, target, cost) in REFERENCE_EDGES {
        g.add_edge(source, target, cost);
    }
    g
}

#[test]
fn test_dijkstra_on_reference_graph() {
    let g = reference_graph();
    let (a, d) = (g.node_index("A").unwrap(), g.node_index("D").unwrap());
    let route = Dijkstra::new().find_shortest_path(&g, a, d);
    assert_eq!(g.format_path(&route.path), "A -> H -> G -> E -> D");
    assert_eq!(route.cost, 8.0);
}

#[test]
fn test_colony_agrees_with_dijkstra() {
    init_tracing();
    let mut agreements = 0;
    for seed in 10..15 {
        let mut g = reference_graph();
        let (a, d) = (g.node_index("A").unwrap(), g.node_index("D").unwrap());
        let exact = Dijkstra::new().find_shortest_path(&g, a, d);

        let config = AcoConfig::builder()
            .with_num_ants(20)
            .with_cycles(60)
            .with_seed(seed)
            .build()
            .unwrap();
        let outcome = AntColony::new(config).find_shortest_path(&mut g, a, d).unwrap();
        assert!(outcome.cost() >= exact.cost);
        if outcome.route().nodes() == exact.path.as_slice() {
            assert_eq!(outcome.cost(), exact.cost);
            agreements += 1;
        }
    }
    assert!(agreements >= 4, "colony matched dijkstra in {agreements} of 5 runs");
}

#[test]
fn test_antnet_route_is_never_better_than_dijkstra() {
    init_tracing();
    let g = reference_graph();
    let (a, d) = (g.node_index("A").unwrap(), g.node_index("D").unwrap());
    let exact = Dijkstra::new().find_shortest_path(&g, a, d);

    for seed in 0..3 {
        let config = AntNetConfig::builder()
            .with_cycles(100)
            .with_seed(seed)
            .build()
            .unwrap();
        let outcome = AntNet::new(config).find_shortest_path(&g, a, d).unwrap();
        assert!(outcome.cost() >= exact.cost);
        assert_eq!(outcome.cost(), g.compute_path_cost(outcome.route().nodes()));
        assert!(!outcome.route().has_cycle());
    }
}
