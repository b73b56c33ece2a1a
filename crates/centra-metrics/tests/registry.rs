//! Registry admission behavior as an embedder sees it.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use centra_core::{CentralityType, Graph, GraphBuilder, error::ErrorCode};
use centra_metrics::registry::resolver::{
    BETWEENNESS_ID, BUILTIN_IDENTIFIERS, OUTDEGREE_ID, PAGERANK_ID,
};
use centra_metrics::{
    Centrality, CentralityRegistry, FactoryResolver, Manifest, PluginError, Scores,
};

/// Scores every node 1.0 and asks for whatever API version it was built with.
struct Flat {
    name: &'static str,
    version: u32,
    required_api: u32,
}

impl Centrality for Flat {
    fn kind(&self) -> CentralityType {
        CentralityType::NodeCentrality
    }
    fn name(&self) -> &str {
        self.name
    }
    fn version(&self) -> u32 {
        self.version
    }
    fn required_api_version(&self) -> u32 {
        self.required_api
    }
    fn compute_scores(&self, graph: &Graph) -> Scores {
        Scores::Node(graph.node_ids().map(|n| (n, 1.0)).collect())
    }
}

fn resolver_with_custom() -> FactoryResolver {
    let mut r = FactoryResolver::builtin();
    r.register("com.example.Flat", || {
        Ok(Box::new(Flat {
            name: "Flat",
            version: 1,
            required_api: 1,
        }))
    })
    .register("com.example.FlatV2", || {
        Ok(Box::new(Flat {
            name: "Flat",
            version: 2,
            required_api: 1,
        }))
    })
    .register("com.example.FromTheFuture", || {
        Ok(Box::new(Flat {
            name: "Future",
            version: 1,
            required_api: 2,
        }))
    });
    r
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with `warn!` and above written to the returned log.
fn with_captured_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, log.contents())
}

#[test]
fn one_good_one_missing_admits_exactly_one() {
    let registry = CentralityRegistry::default();
    let (report, log) = with_captured_warnings(|| {
        registry.reload(
            &Manifest::from_identifiers([PAGERANK_ID, "com.example.DoesNotExist"]),
            &FactoryResolver::builtin(),
        )
    });

    let rejection = log
        .lines()
        .find(|line| line.contains("centrality rejected"))
        .unwrap_or_else(|| panic!("no rejection logged in:\n{log}"));
    assert!(rejection.contains("WARN"));
    assert!(rejection.contains("com.example.DoesNotExist"));
    assert!(rejection.contains("E4001"));
    assert!(!log.contains(PAGERANK_ID), "admission is not a warning");

    assert_eq!(registry.available_centralities().len(), 1);
    assert_eq!(report.admitted.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].identifier(), "com.example.DoesNotExist");
    assert_eq!(report.rejected[0].code(), ErrorCode::PluginLoadFailure);
}

#[test]
fn newer_api_requirement_is_never_admitted() {
    let registry = CentralityRegistry::new(1);
    let report = registry.reload(
        &Manifest::from_identifiers(["com.example.FromTheFuture", OUTDEGREE_ID]),
        &resolver_with_custom(),
    );

    assert!(
        registry
            .available_centralities()
            .iter()
            .all(|d| d.name() != "Future")
    );
    assert!(matches!(
        report.rejected.as_slice(),
        [PluginError::VersionMismatch {
            required: 2,
            provided: 1,
            ..
        }]
    ));
    assert_eq!(report.rejected[0].code(), ErrorCode::VersionMismatch);
}

#[test]
fn newer_host_admits_older_plugins() {
    let registry = CentralityRegistry::new(2);
    let report = registry.reload(
        &Manifest::from_identifiers(["com.example.FromTheFuture", OUTDEGREE_ID]),
        &resolver_with_custom(),
    );
    assert!(report.rejected.is_empty());
    assert_eq!(registry.available_centralities().len(), 2);
}

#[test]
fn versions_of_one_name_coexist() {
    let registry = CentralityRegistry::default();
    let report = registry.reload(
        &Manifest::from_identifiers(["com.example.Flat", "com.example.FlatV2"]),
        &resolver_with_custom(),
    );
    assert!(report.rejected.is_empty());

    assert_eq!(registry.select(&["Flat"]).unwrap().len(), 2);
    let v2 = registry.select(&["flat@2"]).unwrap();
    assert_eq!(v2.len(), 1);
    assert_eq!(v2[0].version(), 2);
}

#[test]
fn first_candidate_wins_a_descriptor_clash() {
    let mut resolver = FactoryResolver::builtin();
    resolver.register("com.example.Impostor", || {
        Ok(Box::new(Flat {
            name: "Betweenness",
            version: 1,
            required_api: 1,
        }))
    });

    let registry = CentralityRegistry::default();
    let report = registry.reload(
        &Manifest::from_identifiers([BETWEENNESS_ID, "com.example.Impostor"]),
        &resolver,
    );
    assert!(matches!(
        report.rejected.as_slice(),
        [PluginError::Duplicate { identifier, .. }] if identifier == "com.example.Impostor"
    ));

    // The real algorithm stayed in place: B brokers the path.
    let mut b = GraphBuilder::new();
    for k in ["A", "B", "C"] {
        b.add_node(k, None).unwrap();
    }
    b.add_edge("A", "B", None).unwrap();
    b.add_edge("B", "C", None).unwrap();
    let g = b.build();
    let scores = registry.compute(&report.admitted[0], Some(&g)).unwrap();
    assert!(scores.by_node_key(&g)["A"].abs() < 1e-10);
}

#[test]
fn manifest_file_drives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("centralities.txt");
    std::fs::write(
        &path,
        format!("# pick two\n{PAGERANK_ID}\n\n{OUTDEGREE_ID}  # cheap\n"),
    )
    .unwrap();

    let registry = CentralityRegistry::default();
    let report = registry
        .reload_from_path(&path, &FactoryResolver::builtin())
        .unwrap();
    let names: Vec<&str> = report.admitted.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["PageRank", "Outdegree"]);
}

#[test]
fn report_serializes_rejections() {
    let registry = CentralityRegistry::default();
    let report = registry.reload(
        &Manifest::from_identifiers(["nope"]),
        &FactoryResolver::builtin(),
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rejected"][0]["kind"], "load_failure");
    assert_eq!(json["rejected"][0]["identifier"], "nope");
    assert!(json["admitted"].as_array().unwrap().is_empty());
}

#[test]
fn readers_see_whole_sets_during_reloads() {
    let registry = Arc::new(CentralityRegistry::default());
    let resolver = FactoryResolver::builtin();
    let full = Manifest::builtin();
    let single = Manifest::from_identifiers([PAGERANK_ID]);
    registry.reload(&full, &resolver);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..200 {
                    let n = registry.available_centralities().len();
                    assert!(n == 1 || n == BUILTIN_IDENTIFIERS.len(), "saw {n}");
                }
            })
        })
        .collect();

    for i in 0..50 {
        registry.reload(if i % 2 == 0 { &single } else { &full }, &resolver);
    }
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn zero_version_plugin_is_never_admitted() {
    let mut resolver = FactoryResolver::builtin();
    resolver.register("com.example.Unversioned", || {
        Ok(Box::new(Flat {
            name: "Unversioned",
            version: 0,
            required_api: 1,
        }))
    });

    let registry = CentralityRegistry::default();
    let (report, log) = with_captured_warnings(|| {
        registry.reload(
            &Manifest::from_identifiers([OUTDEGREE_ID, "com.example.Unversioned"]),
            &resolver,
        )
    });

    assert_eq!(report.admitted.len(), 1);
    assert_eq!(report.admitted[0].name(), "Outdegree");
    assert!(
        registry
            .available_centralities()
            .iter()
            .all(|d| d.version() >= 1)
    );
    match &report.rejected[..] {
        [PluginError::LoadFailure { identifier, reason }] => {
            assert_eq!(identifier, "com.example.Unversioned");
            assert!(reason.contains("version 0"));
        }
        other => panic!("unexpected rejections: {other:?}"),
    }
    assert!(log.contains("com.example.Unversioned"));
}
