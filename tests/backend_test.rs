use mcqgraph::backend::{self, GraphBackend, InMemoryGraph, RemoteGraph};
use mcqgraph::config::{BackendConfig, SimilarityMeasure};
use mcqgraph::sample::{build_store, load_concepts, neurotransmitters, BELONGS_TO, INCLUDES};
use mcqgraph::{GraphError, McqError, Node, Relationship};
use std::sync::Arc;

async fn sample() -> Arc<dyn GraphBackend> {
    let graph = InMemoryGraph::new();
    load_concepts(&graph, &neurotransmitters()).await.unwrap();
    Arc::new(graph)
}

#[tokio::test]
async fn test_sample_graph_counts() {
    let graph = sample().await;
    let map = neurotransmitters();
    let pairs: u64 = map.values().map(|m| m.len() as u64).sum();

    let stats = graph.stats().await.unwrap();
    assert_eq!(stats.relationships, pairs * 2);
    assert!(stats.nodes > 40);
}

#[tokio::test]
async fn test_every_picked_relationship_exists() {
    let graph = sample().await;
    for seed in 0..50 {
        let rel = graph.random_relationship(Some(seed)).await.unwrap();
        assert!(rel.rel_type == INCLUDES || rel.rel_type == BELONGS_TO);
        assert!(graph.has_relationship(&rel).await.unwrap());
    }
}

#[tokio::test]
async fn test_unseeded_pick_still_valid() {
    let graph = sample().await;
    let rel = graph.random_relationship(None).await.unwrap();
    assert!(graph.get_node(&rel.source).await.unwrap().is_some());
    assert!(graph.get_node(&rel.target).await.unwrap().is_some());
}

#[tokio::test]
async fn test_related_nodes_include_the_source() {
    let graph = sample().await;
    let rel = Relationship::new("Serotonin", BELONGS_TO, "Monoamine");
    let related: Vec<String> = graph
        .related_nodes(&rel)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(related, vec!["Dopamine", "Epinephrine", "Serotonin"]);
}

#[tokio::test]
async fn test_similarity_excludes_neighbours() {
    let graph = sample().await;
    let glycine = Node::new("Glycine");
    let neighbours: Vec<String> = graph
        .connected_nodes(&glycine)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    let matrix = graph.similarity_matrix(&glycine).await.unwrap();

    assert!(!matrix.is_empty());
    assert!(!matrix.contains_key("Glycine"));
    for name in &neighbours {
        assert!(!matrix.contains_key(name));
    }
    // Glutamate shares all three categories with Glycine
    assert_eq!(matrix.get("Glutamate"), Some(&0.75));
    assert!(matrix.values().all(|s| (0.0..=1.0).contains(s)));
}

#[tokio::test]
async fn test_isolated_component_similarity() {
    let graph = sample().await;
    let matrix = graph.similarity_matrix(&Node::new("Kainate")).await.unwrap();
    // Kainate Receptor -> {Kainate, UBP-302}; UBP-302 is two hops away
    assert_eq!(matrix.keys().collect::<Vec<_>>(), vec!["UBP-302"]);
    assert_eq!(matrix["UBP-302"], 1.0);
}

#[tokio::test]
async fn test_missing_node_errors() {
    let graph = sample().await;
    let ghost = Node::new("Phlogiston");
    for err in [
        graph.connected_nodes(&ghost).await.unwrap_err(),
        graph.similarity_matrix(&ghost).await.unwrap_err(),
    ] {
        assert!(matches!(err, McqError::Graph(GraphError::NodeNotFound(ref name)) if name == "Phlogiston"));
    }
    assert!(graph.get_node("Phlogiston").await.unwrap().is_none());
}

#[tokio::test]
async fn test_relationships_need_valid_types_and_endpoints() {
    let graph = sample().await;
    let before = graph.stats().await.unwrap();

    let err = graph
        .create_relationships(vec![
            Relationship::new("GABA", "inhibits", "Glutamate"),
            Relationship::new("GABA", "has part", "Glutamate"),
        ])
        .await
        .unwrap_err();
    assert_eq!(
        err.as_graph_error(),
        Some(&GraphError::InvalidRelationshipType("has part".to_string()))
    );

    let err = graph
        .create_relationships(vec![Relationship::new("GABA", "inhibits", "Phlogiston")])
        .await
        .unwrap_err();
    assert_eq!(
        err.as_graph_error(),
        Some(&GraphError::NodeNotFound("Phlogiston".to_string()))
    );

    assert_eq!(graph.stats().await.unwrap(), before);
}

#[tokio::test]
async fn test_duplicate_nodes_are_all_reported() {
    let graph = sample().await;
    let err = graph
        .create_nodes(vec![
            Node::new("Taurine"),
            Node::new("Taurine"),
            Node::new("GABA"),
        ])
        .await
        .unwrap_err();
    assert_eq!(
        err.as_graph_error(),
        Some(&GraphError::DuplicateNodes {
            names: vec!["GABA".to_string(), "Taurine".to_string()]
        })
    );
    assert!(graph.get_node("Taurine").await.unwrap().is_none());
}

#[tokio::test]
async fn test_prebuilt_store_matches_loaded_graph() {
    let store = build_store(&neurotransmitters()).unwrap();
    let prebuilt = InMemoryGraph::from(store);
    let loaded = sample().await;

    assert_eq!(prebuilt.stats().await.unwrap(), loaded.stats().await.unwrap());
    for seed in 0..10 {
        assert_eq!(
            prebuilt.random_relationship(Some(seed)).await.unwrap(),
            loaded.random_relationship(Some(seed)).await.unwrap()
        );
    }
}

#[tokio::test]
async fn test_simrank_backend_from_config() {
    let config = BackendConfig::Memory {
        concepts: None,
        similarity: SimilarityMeasure::SimRank {
            radius: 2,
            importance: 0.8,
            max_iterations: 50,
            tolerance: 0.001,
        },
    };
    let graph = backend::from_config(&config).await.unwrap();
    load_concepts(graph.as_ref(), &neurotransmitters()).await.unwrap();

    let matrix = graph.similarity_matrix(&Node::new("Serotonin")).await.unwrap();
    assert!(matrix.contains_key("Dopamine"));
    assert!(!matrix.contains_key("UBP-302"));
}

#[tokio::test]
async fn test_remote_backend_reports_transport_errors() {
    // nothing listens on the discard port
    let graph = RemoteGraph::new("http://127.0.0.1:9").with_credentials("neo4j", Some("secret"));
    let err = graph.get_node("GABA").await.unwrap_err();
    assert!(matches!(err, McqError::HttpError(_)), "unexpected {:?}", err);

    let err = graph
        .has_relationship(&Relationship::new("a", "bad type", "b"))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_graph_error(),
        Some(&GraphError::InvalidRelationshipType("bad type".to_string()))
    );
}

#[tokio::test]
async fn test_remote_backend_from_config_is_lazy() {
    let config = BackendConfig::Remote {
        url: "http://127.0.0.1:9".to_string(),
        database: "concepts".to_string(),
        username: None,
        password: None,
        radius: 2,
    };
    // building the client does not touch the network
    let graph = backend::from_config(&config).await.unwrap();
    assert!(matches!(graph.stats().await, Err(McqError::HttpError(_))));
}
