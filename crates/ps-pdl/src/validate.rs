//! The one document-closure-wide check that doesn't belong to a single
//! entry: exactly one `graph` named `main` (spec.md §4.4).

use crate::error::{PdlError, PdlResult};
use crate::schema::{Entry, GraphEntry, PdlDocument};

/// Finds the single graph entry named `main` across every document in the
/// resolved import closure.
pub fn find_main_graph(documents: &[PdlDocument]) -> PdlResult<&GraphEntry> {
    let mut found: Option<&GraphEntry> = None;
    for doc in documents {
        for entry in &doc.body {
            if let Entry::Graph(graph) = entry {
                if graph.name == "main" {
                    if found.is_some() {
                        return Err(PdlError::DuplicateMainGraph);
                    }
                    found = Some(graph);
                }
            }
        }
    }
    found.ok_or(PdlError::NoMainGraph)
}
