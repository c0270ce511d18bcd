use serde::Deserialize;

/// One node as returned by the upstream network export. Identity is the
/// `id`; every other field is a presentation hint and may be absent.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub patent_count: Option<u64>,
    #[serde(default)]
    pub doctype: Option<String>,
    #[serde(default)]
    pub h_index: Option<f64>,
    #[serde(default)]
    pub productivity: Option<f64>,
}

impl GraphNode {
    pub fn weight(&self) -> u64 {
        self.patent_count.unwrap_or(0)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Informational counters some exports attach; never required. Unknown
/// keys in the JSON are ignored.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct NetworkMeta {
    #[serde(default)]
    pub min_year: Option<i32>,
    #[serde(default)]
    pub max_year: Option<i32>,
    #[serde(default)]
    pub n_nodes: Option<usize>,
    #[serde(default)]
    pub n_links: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
    #[serde(default)]
    pub meta: Option<NetworkMeta>,
}

impl NetworkData {
    pub fn reported_node_count(&self) -> usize {
        self.meta
            .and_then(|meta| meta.n_nodes)
            .unwrap_or(self.nodes.len())
    }

    pub fn reported_link_count(&self) -> usize {
        self.meta
            .and_then(|meta| meta.n_links)
            .unwrap_or(self.links.len())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkKind {
    Citations,
    Authors,
}

impl NetworkKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Citations => "Citations",
            Self::Authors => "Co-authors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_default_to_none() {
        let data: NetworkData = serde_json::from_str(
            r#"{"nodes": [{"id": "a"}], "links": [{"source": "a", "target": "a"}]}"#,
        )
        .unwrap();

        let node = &data.nodes[0];
        assert_eq!(node.id, "a");
        assert!(node.label.is_none());
        assert!(node.year.is_none());
        assert_eq!(node.weight(), 0);
        assert!(data.links[0].weight.is_none());
        assert!(data.meta.is_none());
    }

    #[test]
    fn meta_counts_override_array_lengths() {
        let data: NetworkData = serde_json::from_str(
            r#"{"nodes": [{"id": "a"}], "links": [], "meta": {"n_nodes": 900, "n_links": 4000}}"#,
        )
        .unwrap();

        assert_eq!(data.reported_node_count(), 900);
        assert_eq!(data.reported_link_count(), 4000);
    }

    #[test]
    fn empty_document_deserializes_to_empty_network() {
        let data: NetworkData = serde_json::from_str("{}").unwrap();
        assert!(data.nodes.is_empty());
        assert!(data.links.is_empty());
    }
}
