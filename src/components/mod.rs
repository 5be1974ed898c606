pub mod integration_graph;
