//! End-to-end tests for the embed selection policy and its diagnostics.

use srcembed::prelude::*;

fn document(path: &str, content: &str) -> SourceDocument {
    SourceDocument::new(
        path,
        content.as_bytes().to_vec(),
        Some(TextEncoding::Utf8),
        ChecksumAlgorithm::Sha256,
    )
}

#[test]
fn embed_all_with_redundant_specifics_matches_plain_embed_all() {
    let documents = vec![
        document("/src/a.cs", "class A { }"),
        document("/src/b.cs", "class B { }"),
    ];

    let mut redundant = EmbedSelectionSpec::all();
    redundant.add_file("/src/a.cs");
    redundant.add_file("/src/b.cs");

    let pipeline = EmbeddingPipeline::new();
    let with_redundancy = pipeline
        .embed_documents(&documents, &redundant, None, None)
        .unwrap();
    let plain = pipeline
        .embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)
        .unwrap();

    // both documents embedded, decision identical to EmbedAll alone
    assert!(with_redundancy.records.iter().all(|r| r.blob().is_some()));
    for (a, b) in with_redundancy.records.iter().zip(plain.records.iter()) {
        assert_eq!(a.checksum(), b.checksum());
        assert_eq!(a.blob().unwrap(), b.blob().unwrap());
    }

    // exactly one warning, and only on the redundant run
    assert_eq!(with_redundancy.diagnostics.len(), 1);
    assert_eq!(with_redundancy.diagnostics[0].severity(), Severity::Warning);
    assert!(plain.diagnostics.is_empty());
}

#[test]
fn specific_subset_embeds_only_the_named_file() {
    let documents = vec![
        document("/src/a.cs", "class A { }"),
        document("/src/b.cs", "class B { }"),
    ];
    let spec = EmbedSelectionSpec::only(["/src/a.cs"]);

    let pipeline = EmbeddingPipeline::new();
    let outcome = pipeline
        .embed_documents(&documents, &spec, None, None)
        .unwrap();

    assert!(outcome.diagnostics.is_empty());

    let a = &outcome.records[0];
    assert_eq!(a.path(), "/src/a.cs");
    let blob = a.blob().expect("named file must be embedded");
    assert_eq!(blob.format_indicator(), 0);
    assert_eq!(blob.payload(), b"class A { }");

    let b = &outcome.records[1];
    assert!(b.blob().is_none(), "unnamed file is checksummed only");
    assert_eq!(b.checksum(), ChecksumAlgorithm::Sha256.digest(b"class B { }"));
}

#[test]
fn missing_file_is_fatal_and_names_the_path() {
    let documents = vec![
        document("/src/a.cs", "class A { }"),
        document("/src/b.cs", "class B { }"),
    ];
    let spec = EmbedSelectionSpec::only(["/resolved/nope.cs"]);

    let pipeline = EmbeddingPipeline::new();
    let err = pipeline
        .embed_documents(&documents, &spec, None, None)
        .unwrap_err();

    match err {
        Error::FileNotInCompilation { path } => assert_eq!(path, "/resolved/nope.cs"),
        other => panic!("expected FileNotInCompilation, got {other}"),
    }
}

#[test]
fn missing_file_aborts_even_when_other_requests_match() {
    let documents = vec![document("/src/a.cs", "class A { }")];
    let spec = EmbedSelectionSpec::only(["/src/a.cs", "/src/nope.cs"]);

    let pipeline = EmbeddingPipeline::new();
    let err = pipeline
        .embed_documents(&documents, &spec, None, None)
        .unwrap_err();
    assert!(matches!(err, Error::FileNotInCompilation { .. }));
}

#[test]
fn embed_none_produces_checksums_without_blobs_or_diagnostics() {
    let documents = vec![
        document("/src/a.cs", "class A { }"),
        document("/src/b.cs", "class B { }"),
    ];

    let pipeline = EmbeddingPipeline::new();
    let outcome = pipeline
        .embed_documents(&documents, &EmbedSelectionSpec::none(), None, None)
        .unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.records.iter().all(|r| r.blob().is_none()));
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn cli_occurrence_order_does_not_change_the_decision() {
    let documents = vec![
        document("/src/a.cs", "class A { }"),
        document("/src/b.cs", "class B { }"),
    ];

    // /embed:a.cs /embed  vs  /embed /embed:a.cs
    let mut file_then_all = EmbedSelectionSpec::none();
    file_then_all.add_file("/src/a.cs");
    file_then_all.add_embed_all();

    let mut all_then_file = EmbedSelectionSpec::none();
    all_then_file.add_embed_all();
    all_then_file.add_file("/src/a.cs");

    let pipeline = EmbeddingPipeline::new();
    for spec in [&file_then_all, &all_then_file] {
        let outcome = pipeline
            .embed_documents(&documents, spec, None, None)
            .unwrap();
        assert!(outcome.records.iter().all(|r| r.blob().is_some()));
        assert_eq!(outcome.diagnostics.len(), 1);
    }
}

#[test]
fn selection_requires_exact_path_equality() {
    // the document set carries the path as the user wrote it, '..' included
    let documents = vec![document("/src/../src/a.cs", "class A { }")];

    let pipeline = EmbeddingPipeline::new();

    let exact = EmbedSelectionSpec::only(["/src/../src/a.cs"]);
    let outcome = pipeline
        .embed_documents(&documents, &exact, None, None)
        .unwrap();
    assert!(outcome.records[0].blob().is_some());

    let normalized = EmbedSelectionSpec::only(["/src/a.cs"]);
    let err = pipeline
        .embed_documents(&documents, &normalized, None, None)
        .unwrap_err();
    assert!(matches!(err, Error::FileNotInCompilation { .. }));
}
