#![no_main]

use centra_core::graph::file::GraphFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = GraphFile::from_json(text) else {
        return;
    };
    if let Ok(graph) = file.into_graph() {
        let again = GraphFile::from_graph(&graph)
            .into_graph()
            .expect("a built graph must rebuild");
        assert_eq!(graph.content_hash(), again.content_hash());
    }
});
