use flate2::read::GzDecoder;
use std::path::Path;
use symbol_extractor_core::contract::{MockSymbolService, ServiceResponse};
use symbol_extractor_core::extract::{extract, ExtractOptions};
use symbol_extractor_core::{ExtractError, ResolveError};
use tempfile::tempdir;

const SINGLE_SYMBOL: &str = r#"[{"id":1,"mathml":"<mi>x</mi>","tex":"x","location":{"left":0,"top":0,"width":10,"height":10,"page":0},"parent":null}]"#;

fn entry_names(archive: &[u8]) -> Vec<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(archive));
    archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn mock_returning(status: u16, body: &'static str) -> MockSymbolService {
    let mut service = MockSymbolService::new();
    service
        .expect_endpoint()
        .return_const("http://mock.invalid:8001/".to_string());
    service.expect_submit().times(1).returning(move |_| {
        Ok(ServiceResponse {
            status,
            body: body.as_bytes().to_vec(),
        })
    });
    service
}

fn sources_with_one_file(dir: &Path) {
    std::fs::write(dir.join("paper.tex"), "$x$").unwrap();
}

#[tokio::test]
async fn extract_submits_the_archive_once_and_resolves_the_response() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());

    let mut service = MockSymbolService::new();
    service
        .expect_endpoint()
        .return_const("http://mock.invalid:8001/".to_string());
    service.expect_submit().times(1).returning(|archive| {
        let names = entry_names(&archive);
        assert!(
            names.iter().any(|n| n.ends_with("paper.tex")),
            "archive should carry the sources, got {names:?}"
        );
        Ok(ServiceResponse {
            status: 200,
            body: SINGLE_SYMBOL.as_bytes().to_vec(),
        })
    });

    let tree = extract(&service, tmp.path(), ExtractOptions::default())
        .await
        .expect("extraction should succeed");

    assert_eq!(tree.len(), 1);
    let symbol = &tree.symbols()[0];
    assert_eq!(symbol.id, 1);
    assert_eq!(symbol.parent, None);
    assert_eq!(symbol.location.page, 0);
    assert_eq!(symbol.mathml, "<mi>x</mi>");
}

#[tokio::test]
async fn connection_errors_pass_through_unchanged() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());

    let mut service = MockSymbolService::new();
    service
        .expect_endpoint()
        .return_const("http://mock.invalid:8001/".to_string());
    service.expect_submit().times(1).returning(|_| {
        Err(ExtractError::connection(
            "http://mock.invalid:8001/",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        ))
    });

    let err = extract(&service, tmp.path(), ExtractOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_connection(), "expected connection error, got {err:?}");
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn missing_sources_directory_never_reaches_the_service() {
    let tmp = tempdir().unwrap();
    let mut service = MockSymbolService::new();
    service
        .expect_endpoint()
        .return_const("http://mock.invalid:8001/".to_string());
    service.expect_submit().never();

    let err = extract(&service, &tmp.path().join("absent"), ExtractOptions::default())
        .await
        .unwrap_err();
    match err {
        ExtractError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_is_decoded_when_checking_is_off() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());
    let service = mock_returning(500, SINGLE_SYMBOL);

    let tree = extract(&service, tmp.path(), ExtractOptions { check_status: false })
        .await
        .expect("status is ignored by default");
    assert_eq!(tree.len(), 1);
}

#[tokio::test]
async fn error_status_is_rejected_when_checking_is_on() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());
    let service = mock_returning(503, "service unavailable");

    let err = extract(&service, tmp.path(), ExtractOptions { check_status: true })
        .await
        .unwrap_err();
    match err {
        ExtractError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());
    let service = mock_returning(200, "<html>not json</html>");

    let err = extract(&service, tmp.path(), ExtractOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn dangling_parent_fails_the_whole_call() {
    let tmp = tempdir().unwrap();
    sources_with_one_file(tmp.path());
    let service = mock_returning(
        200,
        r#"[{"id":1,"mathml":"","tex":"","location":{"left":0,"top":0,"width":1,"height":1,"page":0},"parent":2}]"#,
    );

    let err = extract(&service, tmp.path(), ExtractOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::Resolve(ResolveError::MissingParent { id: 1, parent: 2 })
    ));
}
