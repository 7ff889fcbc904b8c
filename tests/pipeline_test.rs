use netgraph::ops::{
    assign_weights, betweenness_ranking, degree_ranking, find_cut_points, modularity_groups,
    MergeStrategy,
};
use netgraph::{AttrValue, Column, GraphShape, NetworkGraph, NodeKey, Table};
use std::io::Write;

fn str_column(values: &[&str]) -> Column {
    Column::Str(values.iter().map(|v| Some(v.to_string())).collect())
}

/// Two triangles joined by a single bridge edge c-x.
fn barbell_network() -> NetworkGraph {
    let edges = Table::new([
        (
            "source".to_string(),
            str_column(&["a", "b", "c", "x", "y", "z", "c"]),
        ),
        (
            "target".to_string(),
            str_column(&["b", "c", "a", "y", "z", "x", "x"]),
        ),
    ])
    .unwrap();
    NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap()
}

fn node_attr(network: &NetworkGraph, node: &str, attr: &str) -> AttrValue {
    let nodes = network.nodes();
    for row in 0..nodes.num_rows() {
        if nodes.cell(row, "node_id") == AttrValue::Str(node.to_string()) {
            return nodes.cell(row, attr);
        }
    }
    panic!("node {node} not found");
}

#[test]
fn test_assembly_derives_nodes_and_counts() {
    let network = barbell_network();
    assert_eq!(network.num_nodes(), 6);
    assert_eq!(network.num_edges(), 7);
    let props = network.properties();
    assert_eq!(props.number_of_nodes, 6);
    assert_eq!(props.number_of_edges, 7);
}

#[test]
fn test_degree_then_betweenness_compose() {
    // operations chain: each output record is a valid input
    let after_degree = degree_ranking(&barbell_network(), None).unwrap().network;
    let out = betweenness_ranking(&after_degree, None).unwrap();
    // degree scores survive the second operation
    assert_eq!(
        node_attr(&out.network, "c", "Degree Score"),
        AttrValue::Float(3.0)
    );
    // the bridge endpoints dominate betweenness
    assert_eq!(out.ranking.cell(0, "Rank"), AttrValue::Int(1));
    let top = out.ranking.cell(0, "Node");
    assert!(top == AttrValue::Str("c".to_string()) || top == AttrValue::Str("x".to_string()));
}

#[test]
fn test_cut_points_on_bridge() {
    let out = find_cut_points(&barbell_network()).unwrap();
    assert_eq!(out.cut_points, vec![NodeKey::from("c"), NodeKey::from("x")]);
    assert_eq!(
        node_attr(&out.network, "c", "Cut Point"),
        AttrValue::Str("Yes".to_string())
    );
    assert_eq!(
        node_attr(&out.network, "a", "Cut Point"),
        AttrValue::Str("No".to_string())
    );
}

#[test]
fn test_modularity_groups_split_the_barbell() {
    let out = modularity_groups(&barbell_network(), None, None).unwrap();
    assert_eq!(out.number_of_communities, 2);
    assert_eq!(
        node_attr(&out.network, "a", "modularity_group"),
        node_attr(&out.network, "b", "modularity_group")
    );
    assert_ne!(
        node_attr(&out.network, "a", "modularity_group"),
        node_attr(&out.network, "x", "modularity_group")
    );
}

#[test]
fn test_weight_assignment_feeds_weighted_centrality() {
    // duplicate rows collapse into multiplicity weights, which the next
    // operation picks up automatically through the 'weight' column
    let edges = Table::new([
        ("source".to_string(), str_column(&["a", "a", "a", "b"])),
        ("target".to_string(), str_column(&["b", "b", "c", "c"])),
    ])
    .unwrap();
    let network =
        NetworkGraph::from_tables(GraphShape::UndirectedMulti, edges, None).unwrap();
    let weighted = assign_weights(&network, None, MergeStrategy::Sum).unwrap();
    assert_eq!(weighted.graph_type(), GraphShape::Undirected);
    assert_eq!(weighted.num_edges(), 3);

    let out = degree_ranking(&weighted, None).unwrap();
    assert_eq!(
        node_attr(&out.network, "a", "Weighted Degree Score"),
        AttrValue::Float(3.0)
    );
}

#[test]
fn test_file_import_to_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.gml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "graph [\n  node [ id 0 label \"a\" ]\n  node [ id 1 label \"b\" ]\n  node [ id 2 label \"c\" ]\n  edge [ source 0 target 1 ]\n  edge [ source 1 target 2 ]\n]"
    )
    .unwrap();

    let network = NetworkGraph::from_file(&path).unwrap();
    assert_eq!(network.graph_type(), GraphShape::Undirected);
    assert_eq!(network.num_nodes(), 3);

    let out = find_cut_points(&network).unwrap();
    assert_eq!(out.cut_points, vec![NodeKey::from("b")]);
}

#[test]
fn test_custom_bindings_survive_operations() {
    let edges = Table::new([
        ("from".to_string(), str_column(&["a", "b"])),
        ("to".to_string(), str_column(&["b", "c"])),
    ])
    .unwrap();
    let bindings = netgraph::ColumnBindings {
        source: "from".to_string(),
        target: "to".to_string(),
        node_id: "id".to_string(),
    };
    let network = NetworkGraph::from_tables_with_bindings(
        GraphShape::Directed,
        edges,
        None,
        bindings,
    )
    .unwrap();

    let out = degree_ranking(&network, None).unwrap();
    assert_eq!(out.network.source_column_name(), "from");
    assert_eq!(out.network.node_id_column_name(), "id");
    assert!(out.network.nodes().has_column("Degree Score"));
}
