//! Concept maps and the built-in sample graph
//!
//! A concept map lists categories and their members. Loading it creates
//! `category -includes-> member` and `member -belongs_to-> category` for every
//! pair.

use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::backend::GraphBackend;
use crate::error::McqResult;
use crate::graph::{GraphResult, GraphStore, Node, Relationship};

pub const INCLUDES: &str = "includes";
pub const BELONGS_TO: &str = "belongs_to";

/// Category name -> member names, in file order
pub type ConceptMap = IndexMap<String, Vec<String>>;

/// Nodes (sorted by name) and relationships (in map order) for a concept map.
///
/// A category with no members produces no node.
pub fn concept_graph(map: &ConceptMap) -> (Vec<Node>, Vec<Relationship>) {
    let mut names = BTreeSet::new();
    let mut relationships = Vec::new();

    for (category, members) in map {
        for member in members {
            names.insert(category.as_str());
            names.insert(member.as_str());
            relationships.push(Relationship::new(category, INCLUDES, member));
            relationships.push(Relationship::new(member, BELONGS_TO, category));
        }
    }

    (names.into_iter().map(Node::new).collect(), relationships)
}

/// A fresh store holding the concept graph
pub fn build_store(map: &ConceptMap) -> GraphResult<GraphStore> {
    let (nodes, relationships) = concept_graph(map);
    let mut store = GraphStore::new();
    store.create_nodes(nodes)?;
    store.create_relationships(&relationships)?;
    Ok(store)
}

/// Replace everything in `backend` with the concept graph
pub async fn load_concepts(backend: &dyn GraphBackend, map: &ConceptMap) -> McqResult<()> {
    let (nodes, relationships) = concept_graph(map);
    backend.delete_all().await?;
    let nodes = backend.create_nodes(nodes).await?;
    let relationships = backend.create_relationships(relationships).await?;
    info!(
        "Loaded {} categories: {} nodes, {} relationships",
        map.len(),
        nodes,
        relationships
    );
    Ok(())
}

/// Read a concept map from a YAML (or JSON) file
pub fn read_concepts(path: impl AsRef<Path>) -> McqResult<ConceptMap> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Neurotransmitters with their precursors, receptors and chemical families
pub fn neurotransmitters() -> ConceptMap {
    let data: [(&str, &[&str]); 16] = [
        (
            "Neurotransmitter",
            &[
                "Serotonin",
                "Glycine",
                "Glutamate",
                "GABA",
                "Dopamine",
                "Epinephrine",
                "Norepinephrine",
                "ATP",
                "GTP",
                "Nitric Oxide",
                "Acetylcholine",
                "Endocannibinoids",
                "Anandamide",
            ],
        ),
        ("Endocannibinoids", &["Anandamide"]),
        ("Acetylcholine", &["Tyrosine", "acetylCoA", "Acetate"]),
        (
            "Amino Acid",
            &["Glycine", "Glutamate", "Serine", "Histadine", "Tyrosine", "Phenylalanine"],
        ),
        ("Monoamine", &["Serotonin", "Epinephrine", "Dopamine"]),
        ("L-tryptophan", &["Serotonin"]),
        ("L-DOPA", &["Dopamine"]),
        ("5-hydroxytryptophan", &["Serotonin"]),
        (
            "Vitamin C",
            &["Serotonin", "L-tryptophan", "5-hydroxytryptophan", "L-DOPA", "Dopamine"],
        ),
        ("Precursor", &["L-tryptophan", "L-DOPA", "5-hydroxytryptophan", "Tyrosine"]),
        ("GABA Receptor", &["GABA", "Muscimol"]),
        ("NMDA Receptor", &["Glutamate", "NMDA", "Ketamine", "Glycine"]),
        ("AMPA Receptor", &["AMPA", "Glutamate", "Perampanel"]),
        ("Muscarinic Receptor", &["Acetylcholine", "Muscarine", "Scopolamine"]),
        ("Kainate Receptor", &["Kainate", "UBP-302"]),
        ("Purines", &["ATP", "GTP"]),
    ];

    data.iter()
        .map(|(category, members)| {
            (
                category.to_string(),
                members.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect()
}
