//! Graph construction and serialization tests

use super::*;
use serde_json::json;

const PRE: Route = Route::new(EdgeDirection::Inbound, EdgeStyle::Solid);
const POST: Route = Route::new(EdgeDirection::Outbound, EdgeStyle::Solid);
const ISSUE: Route = Route::new(EdgeDirection::Outbound, EdgeStyle::Dashed);

fn cd3_graph() -> Graph {
    let mut builder = GraphBuilder::new("CD3");
    builder.upsert("ITAM", Category::named("PRE"), "signal motif", PRE);
    builder.upsert("CAR-T", Category::named("POST"), "manufacturing use", POST);
    builder.upsert("exhaustion", Category::named("ISSUE"), "durability loss", ISSUE);
    builder.build()
}

fn edge_triples(graph: &Graph) -> Vec<(String, String, EdgeStyle)> {
    graph
        .edges()
        .map(|e| (e.source.to_string(), e.target.to_string(), e.style))
        .collect()
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn cd3_example_yields_center_and_three_edges() {
        let graph = cd3_graph();

        let ids: Vec<&str> = graph.all_nodes().map(|n| n.label()).collect();
        assert_eq!(ids, vec!["CD3", "ITAM", "CAR-T", "exhaustion"]);
        assert!(graph.center().is_center());

        assert_eq!(
            edge_triples(&graph),
            vec![
                ("ITAM".to_string(), "CD3".to_string(), EdgeStyle::Solid),
                ("CD3".to_string(), "CAR-T".to_string(), EdgeStyle::Solid),
                ("CD3".to_string(), "exhaustion".to_string(), EdgeStyle::Dashed),
            ]
        );
    }

    #[test]
    fn duplicate_label_keeps_latest_description() {
        let mut builder = GraphBuilder::new("CD3");
        assert_eq!(builder.upsert("X", Category::named("PRE"), "a", PRE), Upsert::Inserted);
        assert_eq!(builder.upsert("X", Category::named("PRE"), "b", PRE), Upsert::Replaced);
        let graph = builder.build();

        assert_eq!(graph.peripheral_count(), 1);
        let x = graph.node(&NodeId::from("X")).unwrap();
        assert_eq!(x.description, "b");
    }

    #[test]
    fn duplicate_label_recomputes_edge_from_latest_category() {
        let mut builder = GraphBuilder::new("CD3");
        builder.upsert("X", Category::named("PRE"), "a", PRE);
        builder.upsert("X", Category::named("ISSUE"), "b", ISSUE);
        let graph = builder.build();

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge_for(&NodeId::from("X")).unwrap();
        assert_eq!(edge.source.as_str(), "CD3");
        assert_eq!(edge.target.as_str(), "X");
        assert_eq!(edge.style, EdgeStyle::Dashed);
        assert_eq!(edge.category, Category::named("ISSUE"));
    }

    #[test]
    fn center_label_is_reserved() {
        let mut builder = GraphBuilder::new("CD3");
        assert_eq!(
            builder.upsert("CD3", Category::named("POST"), "self loop", POST),
            Upsert::ReservedLabel
        );
        assert!(builder.is_empty());

        let graph = builder.build();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.center().description, "");
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut builder = GraphBuilder::new("cd3");
        builder.upsert("CD3", Category::named("PRE"), "upper", PRE);
        builder.upsert("itam", Category::named("PRE"), "lower", PRE);
        builder.upsert("ITAM", Category::named("PRE"), "upper", PRE);
        assert_eq!(builder.build().peripheral_count(), 3);
    }

    #[test]
    fn unknown_category_uses_default_route() {
        let mut builder = GraphBuilder::new("CD3");
        builder.upsert("mystery", Category::Unknown, "?", Route::default());
        let graph = builder.build();

        let edge = graph.edge_for(&NodeId::from("mystery")).unwrap();
        assert_eq!(edge.source.as_str(), "CD3");
        assert_eq!(edge.style, EdgeStyle::Dotted);
        assert!(edge.category.is_unknown());
        assert_eq!(edge.peripheral(&graph.center().id).as_str(), "mystery");
    }

    #[test]
    fn replaying_the_same_sequence_is_idempotent() {
        assert_eq!(cd3_graph(), cd3_graph());
    }
}

/// Fixture: the shape handed to an external renderer
fn cd3_graph_fixture() -> serde_json::Value {
    json!({
        "center": { "id": "CD3", "role": "center", "description": "" },
        "nodes": [
            {
                "id": "ITAM",
                "role": "peripheral",
                "category": { "kind": "named", "name": "PRE" },
                "description": "signal motif"
            }
        ],
        "edges": [
            {
                "source": "ITAM",
                "target": "CD3",
                "style": "solid",
                "category": { "kind": "named", "name": "PRE" }
            }
        ]
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[test]
    fn node_id_serializes_as_string() {
        let id = NodeId::from_string("CAR-T");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CAR-T\"");
    }

    #[test]
    fn unknown_category_serializes_without_name() {
        let json = serde_json::to_value(Category::Unknown).unwrap();
        assert_eq!(json, json!({ "kind": "unknown" }));
    }

    #[test]
    fn graph_matches_renderer_fixture() {
        let mut builder = GraphBuilder::new("CD3");
        builder.upsert("ITAM", Category::named("PRE"), "signal motif", PRE);
        let graph = builder.build();

        assert_eq!(serde_json::to_value(&graph).unwrap(), cd3_graph_fixture());
    }

    #[test]
    fn graph_deserializes_from_fixture() {
        let graph: Graph = serde_json::from_value(cd3_graph_fixture()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges().next().unwrap().target.as_str(), "CD3");
    }

    #[test]
    fn graph_without_edges_is_rejected() {
        let mut fixture = cd3_graph_fixture();
        fixture["edges"] = json!([]);
        let err = serde_json::from_value::<Graph>(fixture).unwrap_err();
        assert!(err.to_string().contains("1 peripheral nodes but 0 edges"));
    }

    #[test]
    fn graph_with_detached_edge_is_rejected() {
        let mut fixture = cd3_graph_fixture();
        fixture["edges"][0]["target"] = json!("elsewhere");
        assert!(serde_json::from_value::<Graph>(fixture).is_err());
    }

    #[test]
    fn graph_reusing_center_label_is_rejected() {
        let mut fixture = cd3_graph_fixture();
        fixture["nodes"][0]["id"] = json!("CD3");
        fixture["edges"][0]["source"] = json!("CD3");
        assert!(serde_json::from_value::<Graph>(fixture).is_err());
    }
}
