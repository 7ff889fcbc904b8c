//! Edge weight assignment.
//!
//! Produces a record whose edges table carries a `weight` column. Without a
//! source column every edge contributes 1, so merging duplicate endpoint
//! pairs yields parallel-edge multiplicity; with a source column the values
//! are copied (or aggregated) into `weight`.

use crate::defaults::WEIGHT_ATTRIBUTE_NAME;
use crate::error::{NetworkGraphResult, ProcessingError};
use crate::graph::{GraphShape, NodeKey};
use crate::record::NetworkGraph;
use crate::table::{AttrValue, Column, Table};
use indexmap::IndexMap;
use std::str::FromStr;
use tracing::info;

/// How duplicate `(source, target)` pairs are combined.
///
/// `Carry` keeps every edge row as-is and only copies the value into the
/// `weight` column; the aggregating strategies collapse each duplicate
/// group into a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    Carry,
    Sum,
    Mean,
    Minimum,
    Maximum,
}

impl FromStr for MergeStrategy {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carry" => Ok(MergeStrategy::Carry),
            "sum" => Ok(MergeStrategy::Sum),
            "mean" => Ok(MergeStrategy::Mean),
            "minimum" => Ok(MergeStrategy::Minimum),
            "maximum" => Ok(MergeStrategy::Maximum),
            other => Err(ProcessingError::new(format!(
                "unknown merge strategy '{other}', expected one of: carry, sum, mean, minimum, maximum"
            ))),
        }
    }
}

fn aggregate(strategy: MergeStrategy, values: &[f64]) -> f64 {
    match strategy {
        MergeStrategy::Carry => values[0],
        MergeStrategy::Sum => values.iter().sum(),
        MergeStrategy::Mean => values.iter().sum::<f64>() / values.len() as f64,
        MergeStrategy::Minimum => values.iter().copied().fold(f64::INFINITY, f64::min),
        MergeStrategy::Maximum => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Build a record with a `weight` column on its edges table.
///
/// `weight_column` names the value source; when absent each edge counts 1,
/// so aggregation yields parallel-edge multiplicity. `Carry` keeps every
/// edge row and column, only writing the `weight` column. Aggregating
/// strategies collapse duplicate endpoint pairs (unordered for undirected
/// shapes) into endpoint-plus-weight rows, demoting a multi shape to its
/// simple counterpart. All weights are `f64`; values that are null or
/// non-numeric count as 1.
pub fn assign_weights(
    network: &NetworkGraph,
    weight_column: Option<&str>,
    strategy: MergeStrategy,
) -> NetworkGraphResult<NetworkGraph> {
    if let Some(name) = weight_column {
        if !network.edges().has_column(name) {
            return Err(ProcessingError::new(format!(
                "edges table has no '{}' column to use as weight",
                name
            ))
            .into());
        }
    }

    let edges = network.edges();
    let source_col = network.source_column_name();
    let target_col = network.target_column_name();
    let directed = network.graph_type().is_directed();

    let mut rows: Vec<(NodeKey, NodeKey, f64)> = Vec::with_capacity(edges.num_rows());
    for row in 0..edges.num_rows() {
        let source = NodeKey::from_cell(&edges.cell(row, source_col)).ok_or_else(|| {
            ProcessingError::new(format!("edges table row {} has a null '{}' value", row, source_col))
        })?;
        let target = NodeKey::from_cell(&edges.cell(row, target_col)).ok_or_else(|| {
            ProcessingError::new(format!("edges table row {} has a null '{}' value", row, target_col))
        })?;
        let value = weight_column
            .map(|name| edges.cell(row, name).as_f64().unwrap_or(1.0))
            .unwrap_or(1.0);
        rows.push((source, target, value));
    }

    let (graph_type, new_edges) = match strategy {
        MergeStrategy::Carry => {
            // every original row and column survives; the value only lands
            // in the weight column, replacing it in place when present
            let weights = Column::Float(rows.iter().map(|&(_, _, w)| Some(w)).collect());
            let mut columns: Vec<(String, Column)> = edges
                .iter()
                .map(|(name, column)| (name.to_string(), column.clone()))
                .collect();
            match columns.iter_mut().find(|(name, _)| name == WEIGHT_ATTRIBUTE_NAME) {
                Some((_, column)) => *column = weights,
                None => columns.push((WEIGHT_ATTRIBUTE_NAME.to_string(), weights)),
            }
            (network.graph_type(), Table::new(columns)?)
        }
        _ => {
            let mut groups: IndexMap<(NodeKey, NodeKey), Vec<f64>> = IndexMap::new();
            for (source, target, value) in rows {
                let pair = if !directed && target < source {
                    (target, source)
                } else {
                    (source, target)
                };
                groups.entry(pair).or_default().push(value);
            }
            let merged: Vec<(NodeKey, NodeKey, f64)> = groups
                .into_iter()
                .map(|((source, target), values)| {
                    (source, target, aggregate(strategy, &values))
                })
                .collect();
            let source_cells: Vec<AttrValue> = merged.iter().map(|(s, _, _)| s.to_cell()).collect();
            let target_cells: Vec<AttrValue> = merged.iter().map(|(_, t, _)| t.to_cell()).collect();
            let weights: Vec<Option<f64>> = merged.iter().map(|(_, _, w)| Some(*w)).collect();
            let table = Table::new([
                (source_col.to_string(), Column::from_values(&source_cells)),
                (target_col.to_string(), Column::from_values(&target_cells)),
                (WEIGHT_ATTRIBUTE_NAME.to_string(), Column::Float(weights)),
            ])?;
            (GraphShape::classify(directed, false), table)
        }
    };

    info!(
        edges = new_edges.num_rows(),
        strategy = ?strategy,
        from_column = weight_column.unwrap_or("<multiplicity>"),
        "assigned edge weights"
    );
    NetworkGraph::from_tables_with_bindings(
        graph_type,
        new_edges,
        Some(network.nodes().clone()),
        network.bindings(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi_network(weights: Option<Vec<Option<f64>>>) -> NetworkGraph {
        // a-b twice, b-c once
        let mut columns = vec![
            (
                "source".to_string(),
                Column::Str(vec![
                    Some("a".to_string()),
                    Some("b".to_string()),
                    Some("b".to_string()),
                ]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![
                    Some("b".to_string()),
                    Some("a".to_string()),
                    Some("c".to_string()),
                ]),
            ),
        ];
        if let Some(values) = weights {
            columns.push(("value".to_string(), Column::Float(values)));
        }
        let edges = Table::new(columns).unwrap();
        NetworkGraph::from_tables(GraphShape::UndirectedMulti, edges, None).unwrap()
    }

    fn weight_of(network: &NetworkGraph, source: &str, target: &str) -> f64 {
        let edges = network.edges();
        for row in 0..edges.num_rows() {
            if edges.cell(row, "source") == AttrValue::Str(source.to_string())
                && edges.cell(row, "target") == AttrValue::Str(target.to_string())
            {
                return edges.cell(row, "weight").as_f64().unwrap();
            }
        }
        panic!("edge {source}-{target} not found");
    }

    #[test]
    fn test_multiplicity_weights() {
        let out = assign_weights(&multi_network(None), None, MergeStrategy::Sum).unwrap();
        assert_eq!(out.graph_type(), GraphShape::Undirected);
        assert_eq!(out.num_edges(), 2);
        assert_eq!(weight_of(&out, "a", "b"), 2.0);
        assert_eq!(weight_of(&out, "b", "c"), 1.0);
    }

    #[test]
    fn test_merge_arithmetic() {
        let network = multi_network(Some(vec![Some(2.0), Some(4.0), Some(5.0)]));
        for (strategy, expected) in [
            (MergeStrategy::Sum, 6.0),
            (MergeStrategy::Mean, 3.0),
            (MergeStrategy::Minimum, 2.0),
            (MergeStrategy::Maximum, 4.0),
        ] {
            let out = assign_weights(&network, Some("value"), strategy).unwrap();
            assert_eq!(weight_of(&out, "a", "b"), expected, "{strategy:?}");
        }
    }

    #[test]
    fn test_carry_keeps_every_row() {
        let network = multi_network(Some(vec![Some(2.0), Some(4.0), Some(5.0)]));
        let out = assign_weights(&network, Some("value"), MergeStrategy::Carry).unwrap();
        assert_eq!(out.graph_type(), GraphShape::UndirectedMulti);
        assert_eq!(out.num_edges(), 3);
        assert_eq!(
            out.edges().column("weight").unwrap().values(),
            vec![
                AttrValue::Float(2.0),
                AttrValue::Float(4.0),
                AttrValue::Float(5.0),
            ]
        );
        // the source column survives next to the new weight column
        assert_eq!(
            out.edges().column_names(),
            vec!["source", "target", "value", "weight"]
        );
    }

    #[test]
    fn test_carry_preserves_other_edge_columns() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("a".to_string()), Some("b".to_string())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("b".to_string()), Some("c".to_string())]),
            ),
            (
                "value".to_string(),
                Column::Float(vec![Some(2.0), Some(4.0)]),
            ),
            (
                "kind".to_string(),
                Column::Str(vec![Some("friend".to_string()), None]),
            ),
        ])
        .unwrap();
        let network =
            NetworkGraph::from_tables(GraphShape::UndirectedMulti, edges, None).unwrap();
        let out = assign_weights(&network, Some("value"), MergeStrategy::Carry).unwrap();
        assert_eq!(
            out.edges().column_names(),
            vec!["source", "target", "value", "kind", "weight"]
        );
        assert_eq!(
            out.edges().column("kind").unwrap().values(),
            vec![AttrValue::Str("friend".to_string()), AttrValue::Null]
        );
        assert_eq!(weight_of(&out, "a", "b"), 2.0);
    }

    #[test]
    fn test_carry_replaces_existing_weight_column_in_place() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("a".to_string())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("b".to_string())]),
            ),
            ("weight".to_string(), Column::Float(vec![None])),
            (
                "kind".to_string(),
                Column::Str(vec![Some("friend".to_string())]),
            ),
        ])
        .unwrap();
        let network = NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap();
        let out = assign_weights(&network, None, MergeStrategy::Carry).unwrap();
        assert_eq!(
            out.edges().column_names(),
            vec!["source", "target", "weight", "kind"]
        );
        assert_eq!(weight_of(&out, "a", "b"), 1.0);
    }

    #[test]
    fn test_missing_column_fails() {
        let err = assign_weights(&multi_network(None), Some("value"), MergeStrategy::Sum)
            .unwrap_err();
        assert!(err.to_string().contains("'value'"));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("mean".parse::<MergeStrategy>().unwrap(), MergeStrategy::Mean);
        assert!("median".parse::<MergeStrategy>().is_err());
    }
}
