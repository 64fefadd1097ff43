use govaid::workflows::catalog::{CatalogImportError, SchemeCatalogImporter};
use govaid::workflows::schemes::ApplicantRole;

#[test]
fn importer_reads_fixture_catalog() {
    let data = include_bytes!("fixtures/schemes.csv");
    let drafts = SchemeCatalogImporter::from_reader(&data[..]).expect("catalog imports");

    assert_eq!(drafts.len(), 8);
    assert_eq!(drafts[0].name, "Post Matric Scholarship");
    assert_eq!(drafts[0].eligibility, "income<250000;category=sc,st,obc");
    assert_eq!(drafts[3].eligibility, "");
    assert_eq!(
        drafts
            .iter()
            .filter(|draft| draft.target_group == ApplicantRole::Entrepreneur)
            .count(),
        3
    );
}

#[test]
fn importer_reports_missing_files() {
    match SchemeCatalogImporter::from_path("does/not/exist.csv") {
        Err(CatalogImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn importer_rejects_rows_without_target_group() {
    let csv = "name,eligibility,provider,benefits,link,target_group\nOrphan,,,,,\n";
    match SchemeCatalogImporter::from_reader(csv.as_bytes()) {
        Err(CatalogImportError::Csv(err)) => assert!(err.to_string().contains("target group")),
        other => panic!("expected csv error, got {other:?}"),
    }
}
