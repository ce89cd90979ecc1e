use std::path::PathBuf;

#[test]
fn demo_batches_load() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let demos = ["demos/batches/office_variants.yaml"];

    for rel in demos {
        let path = root.join(rel);
        let result = eb_project::load_batch(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
        let batch = result.unwrap();
        for variant in &batch.variants {
            batch.resolve(variant).unwrap();
        }
    }
}
