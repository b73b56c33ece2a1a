#![no_main]

use centra_core::graph::file::GraphFile;
use centra_metrics::{CentralityRegistry, FactoryResolver, Manifest, compute_all};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(file) = serde_json::from_slice::<GraphFile>(data) else {
        return;
    };
    if file.nodes.len() > 64 || file.edges.len() > 256 {
        return;
    }
    let Ok(graph) = file.into_graph() else {
        return;
    };

    let registry = CentralityRegistry::default();
    registry.reload(&Manifest::builtin(), &FactoryResolver::builtin());
    compute_all(Some(&graph), &registry.admitted()).expect("builtins honor the score contract");
});
